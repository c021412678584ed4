pub mod config;
pub mod demo_feed;
pub mod rendering;
pub mod services;
pub mod websocket;
