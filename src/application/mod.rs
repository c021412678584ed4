//! Application layer: turns decoded batches into renderer commands.

pub mod viewport_controller;

pub use viewport_controller::*;
