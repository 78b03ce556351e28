//! Retained view model for the terminal UI
//!
//! Mirrors the session's bounded buffers one insert at a time: the session
//! reports each new entry and whether it evicted one, so no update copies a
//! whole history.

use std::collections::VecDeque;

use crate::application::display::{
    DisplayPort, LogLine, SequenceMarker, StakeCell, StatusView, TradeRow,
};
use crate::application::projectors::SessionStats;

/// Everything the terminal UI draws, updated through [`DisplayPort`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TuiDisplay {
    pub connected: bool,
    pub status: StatusView,
    pub stakes: Vec<StakeCell>,
    pub sequence: Vec<SequenceMarker>,
    /// Most recent first
    pub trades: VecDeque<TradeRow>,
    pub stats: SessionStats,
    /// (sample number, balance), oldest first
    pub balance_points: VecDeque<(f64, f64)>,
    pub balance_labels: VecDeque<String>,
    pub balance_change: Option<f64>,
    /// Most recent first
    pub logs: VecDeque<LogLine>,
    /// Number of chart refreshes requested; also numbers the samples
    pub chart_refreshes: u64,
}

impl TuiDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest_balance(&self) -> Option<f64> {
        self.balance_points.back().map(|(_, v)| *v)
    }

    /// X axis bounds covering every retained sample
    pub fn balance_x_bounds(&self) -> [f64; 2] {
        match (self.balance_points.front(), self.balance_points.back()) {
            (Some((first, _)), Some((last, _))) => [*first, last.max(first + 1.0)],
            _ => [0.0, 1.0],
        }
    }

    /// Y axis bounds with 5% padding; a flat series gets a fixed margin
    pub fn balance_y_bounds(&self) -> [f64; 2] {
        let (min, max) = self
            .balance_points
            .iter()
            .map(|(_, v)| *v)
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() || !max.is_finite() {
            [0.0, 1.0]
        } else if (max - min).abs() < f64::EPSILON {
            let padding = (max.abs() * 0.05).max(1.0);
            [min - padding, max + padding]
        } else {
            let padding = (max - min) * 0.05;
            [min - padding, max + padding]
        }
    }
}

impl DisplayPort for TuiDisplay {
    fn set_connection_indicator(&mut self, connected: bool) {
        self.connected = connected;
    }

    fn update_status(&mut self, status: &StatusView) {
        self.status = status.clone();
    }

    fn update_stakes(&mut self, ladder: &[StakeCell]) {
        self.stakes = ladder.to_vec();
    }

    fn update_sequence(&mut self, markers: &[SequenceMarker]) {
        self.sequence = markers.to_vec();
    }

    fn append_trade_row(&mut self, row: &TradeRow, evicted: bool, stats: &SessionStats) {
        if evicted {
            self.trades.pop_back();
        }
        self.trades.push_front(row.clone());
        self.stats = *stats;
    }

    fn append_balance_sample(&mut self, label: &str, balance: f64, evicted: bool, change: Option<f64>) {
        if evicted {
            self.balance_points.pop_front();
            self.balance_labels.pop_front();
        }
        self.balance_points
            .push_back((self.chart_refreshes as f64, balance));
        self.balance_labels.push_back(label.to_string());
        self.balance_change = change;
        self.chart_refreshes += 1;
    }

    fn append_log_line(&mut self, line: &LogLine, evicted: bool) {
        if evicted {
            self.logs.pop_back();
        }
        self.logs.push_front(line.clone());
    }
}
