//! Chart aggregate: viewport geometry, static chart configuration and the
//! renderer seam.

pub mod services;
pub mod value_objects;

pub use services::*;
pub use value_objects::*;
