//! Infrastructure Layer
//!
//! Bounded buffers, configuration, logging and the bot feed router.
//! Depends on the domain layer but not on the application layer.

pub mod bounded;
pub mod config;
pub mod logging;
pub mod router;

pub use bounded::{BalanceSeries, BoundedHistory};
pub use config::{ConfigError, DashboardConfig, HistoryConfig};
pub use logging::init_file_tracing;
pub use router::{BotEventRouter, DashboardRoute, FeedHandler, FeedItem};
