//! Application Layer
//!
//! The dashboard session and its projectors, the display port they render
//! through, the connection supervisor, and the terminal UI.

pub mod display;
pub mod format;
pub mod projectors;
pub mod session;
pub mod supervisor;
pub mod visualizer;

pub use display::{
    DisplayPort, LogLine, OutcomeStyle, ProfitStyle, SequenceMarker, StakeCell, StatusView,
    TradeRow,
};
pub use projectors::SessionStats;
pub use session::{DashboardSession, HistoryLimits};
pub use supervisor::{apply_client_event, apply_feed_item, ConnectionSupervisor, LinkState};
