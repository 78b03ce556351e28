//! # HyperSockets Traits
//!
//! Core abstractions used by the client:
//!
//! - **MessageRouter**: Parse frames and pick a route
//! - **MessageHandler**: Consume the messages of one route
//! - **ReconnectionStrategy**: Control reconnection behavior

pub mod error;
pub mod parser;
pub mod reconnect;
pub mod router;

// Re-export commonly used types
pub use error::{HyperSocketError, Result};
pub use parser::WsMessage;
pub use reconnect::{FixedDelay, NeverReconnect, ReconnectionStrategy};
pub use router::{MessageHandler, MessageRouter};
