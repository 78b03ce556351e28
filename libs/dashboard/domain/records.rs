//! Value types derived from feed fields

use std::fmt;

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
    Success,
}

impl Severity {
    /// Parse a wire level; absent or unrecognised levels are `Info`
    pub fn from_level(level: Option<&str>) -> Self {
        match level.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("warning") | Some("warn") => Severity::Warning,
            Some("error") => Severity::Error,
            Some("success") => Severity::Success,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Success => "success",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settled trade outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeOutcome {
    Won,
    Lost,
    /// Any other contract status, passed through unstyled
    Other(String),
}

impl TradeOutcome {
    pub fn parse(outcome: &str) -> Self {
        match outcome.trim().to_ascii_lowercase().as_str() {
            "won" => TradeOutcome::Won,
            "lost" => TradeOutcome::Lost,
            _ => TradeOutcome::Other(outcome.trim().to_string()),
        }
    }

    /// Uppercase display label
    pub fn label(&self) -> String {
        match self {
            TradeOutcome::Won => "WON".to_string(),
            TradeOutcome::Lost => "LOST".to_string(),
            TradeOutcome::Other(s) => s.to_uppercase(),
        }
    }
}

/// One position of the planned win/loss sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceTag {
    /// "G": the bot buys CALL
    Win,
    /// "R": the bot buys PUT
    Loss,
    Other,
}

impl SequenceTag {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "G" => SequenceTag::Win,
            "R" => SequenceTag::Loss,
            _ => SequenceTag::Other,
        }
    }
}
