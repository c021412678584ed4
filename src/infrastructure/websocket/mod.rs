//! WebSocket transport: frame DTOs, the lifecycle-driven stream client, and
//! the browser socket pump.

pub mod connection;
pub mod dto;
pub mod stream_client;

pub use connection::*;
pub use dto::*;
pub use stream_client::*;
