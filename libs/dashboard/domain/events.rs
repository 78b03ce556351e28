//! Bot feed events
//!
//! One JSON object per text frame, discriminated by its `type` field:
//!
//! ```json
//! {"type": "status_update", "market": "R_100", "authorized": true, "is_trading": true,
//!  "consecutive_losses": 2, "current_stake": 1.61, "stakes": [0.35, 0.6, 1.61]}
//! {"type": "sequence_update", "sequence": ["G", "R", "R"], "current_trade_index": 1}
//! {"type": "trade_update", "market": "R_100", "contract_type": "CALL", "stake": 0.35,
//!  "outcome": "won", "profit": 0.33, "timestamp": "2024-05-01T12:00:00"}
//! {"type": "balance_update", "balance": 100.33, "change": 0.33}
//! {"type": "log", "message": "Trade placed", "level": "info"}
//! ```
//!
//! Every field is optional on the wire; projectors substitute display
//! defaults for anything missing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Wire tag of a status event
pub const STATUS_UPDATE: &str = "status_update";
/// Wire tag of a sequence event
pub const SEQUENCE_UPDATE: &str = "sequence_update";
/// Wire tag of a trade event
pub const TRADE_UPDATE: &str = "trade_update";
/// Wire tag of a balance event
pub const BALANCE_UPDATE: &str = "balance_update";
/// Wire tag of a log event
pub const LOG: &str = "log";

/// A decoded feed event
#[derive(Debug, Clone, PartialEq)]
pub enum BotEvent {
    Status(StatusUpdate),
    Sequence(SequenceUpdate),
    Trade(TradeUpdate),
    Balance(BalanceUpdate),
    Log(LogMessage),
    /// Anything the dashboard does not render; carries a short description
    /// of what arrived (the unknown tag, or why the frame was rejected)
    Unknown(String),
}

impl BotEvent {
    /// Decode an event from its `type` tag and the full JSON object
    ///
    /// Unknown tags decode to [`BotEvent::Unknown`]; a known tag whose
    /// fields cannot be decoded is an error.
    pub fn from_tagged(tag: &str, payload: Value) -> Result<Self, serde_json::Error> {
        let event = match tag {
            STATUS_UPDATE => BotEvent::Status(serde_json::from_value(payload)?),
            SEQUENCE_UPDATE => BotEvent::Sequence(serde_json::from_value(payload)?),
            TRADE_UPDATE => BotEvent::Trade(serde_json::from_value(payload)?),
            BALANCE_UPDATE => BotEvent::Balance(serde_json::from_value(payload)?),
            LOG => BotEvent::Log(serde_json::from_value(payload)?),
            other => BotEvent::Unknown(format!("type '{}'", other)),
        };
        Ok(event)
    }

    /// Wire tag of this event (`None` for unknown events)
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            BotEvent::Status(_) => Some(STATUS_UPDATE),
            BotEvent::Sequence(_) => Some(SEQUENCE_UPDATE),
            BotEvent::Trade(_) => Some(TRADE_UPDATE),
            BotEvent::Balance(_) => Some(BALANCE_UPDATE),
            BotEvent::Log(_) => Some(LOG),
            BotEvent::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.kind().is_some()
    }
}

/// Bot status snapshot; replaces the previous one wholesale
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub authorized: Option<bool>,
    #[serde(default)]
    pub is_trading: Option<bool>,
    #[serde(default)]
    pub consecutive_losses: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub current_stake: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_amounts")]
    pub stakes: Vec<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Win/loss tags of the planned sequence plus the position being traded
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SequenceUpdate {
    #[serde(default)]
    pub sequence: Vec<String>,
    #[serde(default)]
    pub current_trade_index: Option<usize>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// A settled trade
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TradeUpdate {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub stake: Option<f64>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub profit: Option<f64>,
}

/// Account balance after a trade
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BalanceUpdate {
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub balance: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub change: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Free-form log line forwarded by the bot
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Convert a JSON number or numeric string to f64
fn amount_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Deserialize an optional amount that may be a number or a numeric string
///
/// `null` and non-numeric values decode to `None`, so one bad field does not
/// cost the rest of the event.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    let amount = amount_from_value(&value);
    if amount.is_none() {
        debug!("Ignoring non-numeric amount: {}", value);
    }
    Ok(amount)
}

/// Deserialize a list of amounts
///
/// `null`, a non-list, or a list with any non-numeric entry decodes to an
/// empty list. Skipping single entries would shift the round numbers.
fn deserialize_amounts<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let amounts = match &value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items.iter().map(amount_from_value).collect::<Option<Vec<_>>>(),
        _ => None,
    };
    Ok(amounts.unwrap_or_else(|| {
        debug!("Ignoring malformed stake list: {}", value);
        Vec::new()
    }))
}
