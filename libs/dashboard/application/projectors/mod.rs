//! Projectors
//!
//! One projector per event type. Each maps its event onto a bounded
//! in-memory structure (where it has one) and the matching display region.

pub mod balance;
pub mod log;
pub mod sequence;
pub mod stakes;
pub mod status;
pub mod trades;

pub use balance::BalanceProjector;
pub use log::LogProjector;
pub use sequence::{project_sequence, sequence_markers};
pub use stakes::stake_ladder;
pub use status::{project_status, round_of, status_view};
pub use trades::{trade_row, SessionStats, TradeHistoryProjector};
