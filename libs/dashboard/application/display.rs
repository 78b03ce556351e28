//! Display port
//!
//! The session never touches a concrete screen. Each display region gets one
//! method; the terminal UI implements them with a retained view model and
//! tests implement them with a recording display.

use crate::domain::{SequenceTag, Severity};

use super::projectors::SessionStats;

/// Style of a signed amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitStyle {
    Profit,
    Loss,
}

/// Style of a trade outcome label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStyle {
    Won,
    Lost,
    Plain,
}

/// Labelled status values
#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub market: String,
    pub authorized: String,
    pub trading: String,
    pub round: u32,
    pub current_stake: String,
}

impl Default for StatusView {
    fn default() -> Self {
        Self {
            market: "--".to_string(),
            authorized: "No".to_string(),
            trading: "No".to_string(),
            round: 1,
            current_stake: "$0.00".to_string(),
        }
    }
}

/// One rung of the stake ladder
#[derive(Debug, Clone, PartialEq)]
pub struct StakeCell {
    /// 1-based round number
    pub round: usize,
    pub amount: String,
    pub active: bool,
}

/// One marker of the win/loss sequence row
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceMarker {
    pub label: String,
    pub tag: SequenceTag,
    pub active: bool,
}

/// A formatted trade-history row
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRow {
    pub time: String,
    pub market: String,
    pub contract_type: String,
    pub stake: String,
    pub outcome: String,
    pub outcome_style: OutcomeStyle,
    pub profit: String,
    pub profit_style: ProfitStyle,
}

/// A formatted log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    /// `[HH:MM:SS] message`
    pub text: String,
    pub severity: Severity,
}

/// Rendering surface of the dashboard
pub trait DisplayPort {
    /// Binary connected/disconnected indicator
    fn set_connection_indicator(&mut self, connected: bool);

    /// Replace the status panel
    fn update_status(&mut self, status: &StatusView);

    /// Replace the stake ladder
    fn update_stakes(&mut self, ladder: &[StakeCell]);

    /// Replace the sequence marker row
    fn update_sequence(&mut self, markers: &[SequenceMarker]);

    /// Insert `row` at the top of the trade table
    ///
    /// `evicted` is set when the insert pushed the oldest row out of the
    /// bottom of the history.
    fn append_trade_row(&mut self, row: &TradeRow, evicted: bool, stats: &SessionStats);

    /// Append a balance sample and refresh the chart
    ///
    /// `evicted` is set when the oldest sample left the front of the series.
    fn append_balance_sample(&mut self, label: &str, balance: f64, evicted: bool, change: Option<f64>);

    /// Insert `line` at the top of the log feed; `evicted` drops the bottom line
    fn append_log_line(&mut self, line: &LogLine, evicted: bool);
}

#[cfg(test)]
pub(crate) mod recording {
    //! Display double that records every port call

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DisplayCall {
        Indicator(bool),
        Status(StatusView),
        Stakes(Vec<StakeCell>),
        Sequence(Vec<SequenceMarker>),
        Trade {
            row: TradeRow,
            evicted: bool,
            stats: SessionStats,
        },
        Balance {
            label: String,
            balance: f64,
            evicted: bool,
            change: Option<f64>,
        },
        Log(LogLine, bool),
    }

    #[derive(Debug, Default)]
    pub struct RecordingDisplay {
        pub calls: Vec<DisplayCall>,
    }

    impl RecordingDisplay {
        pub fn last(&self) -> Option<&DisplayCall> {
            self.calls.last()
        }
    }

    impl DisplayPort for RecordingDisplay {
        fn set_connection_indicator(&mut self, connected: bool) {
            self.calls.push(DisplayCall::Indicator(connected));
        }

        fn update_status(&mut self, status: &StatusView) {
            self.calls.push(DisplayCall::Status(status.clone()));
        }

        fn update_stakes(&mut self, ladder: &[StakeCell]) {
            self.calls.push(DisplayCall::Stakes(ladder.to_vec()));
        }

        fn update_sequence(&mut self, markers: &[SequenceMarker]) {
            self.calls.push(DisplayCall::Sequence(markers.to_vec()));
        }

        fn append_trade_row(&mut self, row: &TradeRow, evicted: bool, stats: &SessionStats) {
            self.calls.push(DisplayCall::Trade {
                row: row.clone(),
                evicted,
                stats: *stats,
            });
        }

        fn append_balance_sample(
            &mut self,
            label: &str,
            balance: f64,
            evicted: bool,
            change: Option<f64>,
        ) {
            self.calls.push(DisplayCall::Balance {
                label: label.to_string(),
                balance,
                evicted,
                change,
            });
        }

        fn append_log_line(&mut self, line: &LogLine, evicted: bool) {
            self.calls.push(DisplayCall::Log(line.clone(), evicted));
        }
    }
}
