//! Stream aggregate: sample points, batches, the rendered dataset and the
//! connection lifecycle.

pub mod connection;
pub mod entities;
pub mod value_objects;

pub use connection::*;
pub use entities::*;
pub use value_objects::*;
