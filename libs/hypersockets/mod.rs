//! # HyperSockets
//!
//! A small WebSocket client with typed message routing and supervised
//! reconnection.
//!
//! ## Features
//!
//! - **Atomic connection state**: Lock-free state and counters readable from any thread
//! - **Type-state builder**: Compile-time guarantees for required configuration
//! - **Ordered routing**: Frames are parsed in arrival order and routed to per-key handler threads
//! - **Supervised reconnection**: One owned reconnect timer per client, cut short by `reconnect_now`

pub mod traits;
pub mod core;

// Re-export all traits
pub use traits::*;

// Re-export core client functionality
pub use crate::core::{
    builder, client, config, connection_state,
    builder::{states, RoutingBuilder, WebSocketClientBuilder},
    client::{ClientEvent, Metrics, WebSocketClient},
    config::ClientConfig,
    connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState},
};

// Convenience function
pub use crate::core::builder as client_builder;

/// Type alias for Result with HyperSocketError
pub type Result<T> = std::result::Result<T, traits::HyperSocketError>;
