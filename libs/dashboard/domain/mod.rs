//! Domain Layer
//!
//! Wire events published by the trading bot and the small value types
//! derived from them. No dependencies on infrastructure or application layers.

pub mod events;
pub mod records;

pub use events::{
    BalanceUpdate, BotEvent, LogMessage, SequenceUpdate, StatusUpdate, TradeUpdate,
};
pub use records::{SequenceTag, Severity, TradeOutcome};
