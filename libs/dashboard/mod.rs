//! Trading Bot Dashboard
//!
//! Live monitoring of an automated trading bot over a WebSocket feed,
//! following Clean Architecture principles.
//!
//! ## Architecture
//!
//! - **domain**: Wire events sent by the bot and their value types
//! - **application**: Session, projectors, display port, connection supervisor, terminal UI
//! - **infrastructure**: Bounded buffers, config, logging, feed router
//!
//! ## Data flow
//!
//! ```text
//! Bot server → hypersockets client → BotEventRouter → feed channel
//!                 (frames and link changes, in arrival order)   ↓
//!              ConnectionSupervisor::pump → DashboardSession::handle_event
//!                                                          ↓
//!                                    projector → bounded buffer + DisplayPort
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{
    ConnectionSupervisor, DashboardSession, DisplayPort, HistoryLimits, SessionStats,
};
pub use domain::{BotEvent, Severity, TradeOutcome};
pub use infrastructure::{BalanceSeries, BoundedHistory, ConfigError, DashboardConfig};
