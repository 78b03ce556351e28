//! # HyperSockets core
//!
//! ## Example
//!
//! ```rust,ignore
//! use hypersockets::{FixedDelay, MessageHandler, MessageRouter};
//! use std::time::Duration;
//!
//! let client = hypersockets::builder()
//!     .url("ws://localhost:8765")
//!     .router(FeedRouter, |routing| routing.handler(Route::Feed, FeedHandler::new(tx)))
//!     .reconnect_strategy(FixedDelay::forever(Duration::from_secs(5)))
//!     .build()
//!     .await?;
//!
//! while let Some(event) = client.try_recv_event() {
//!     println!("Event: {:?}", event);
//! }
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod connection_state;

// Re-export main types
pub use builder::{states, RoutingBuilder, WebSocketClientBuilder};
pub use client::{ClientEvent, Metrics, WebSocketClient};
pub use config::ClientConfig;
pub use connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState};

/// Create a new WebSocket client builder
pub fn builder() -> WebSocketClientBuilder<builder::states::NoUrl, builder::states::NoRouter, ()> {
    WebSocketClientBuilder::new()
}
