//! Trade history projector

use chrono::{DateTime, Local};

use crate::application::display::{DisplayPort, OutcomeStyle, TradeRow};
use crate::application::format::{currency, event_time_of_day, signed_currency};
use crate::domain::{TradeOutcome, TradeUpdate};
use crate::infrastructure::BoundedHistory;

/// Running totals over every trade seen this session
///
/// Unlike the table these are not capped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    pub trades: u64,
    pub wins: u64,
    pub losses: u64,
    pub net_profit: f64,
}

impl SessionStats {
    fn record(&mut self, outcome: Option<&TradeOutcome>, profit: f64) {
        self.trades += 1;
        match outcome {
            Some(TradeOutcome::Won) => self.wins += 1,
            Some(TradeOutcome::Lost) => self.losses += 1,
            _ => {}
        }
        self.net_profit += profit;
    }

    /// Share of decided trades that were won, in percent
    pub fn win_rate(&self) -> Option<f64> {
        let decided = self.wins + self.losses;
        (decided > 0).then(|| self.wins as f64 * 100.0 / decided as f64)
    }
}

/// Format one trade; `received_at` stands in for a missing or unreadable timestamp
pub fn trade_row(update: &TradeUpdate, received_at: &DateTime<Local>) -> TradeRow {
    let outcome = update.outcome.as_deref().map(TradeOutcome::parse);
    let (outcome_label, outcome_style) = match &outcome {
        Some(TradeOutcome::Won) => ("WON".to_string(), OutcomeStyle::Won),
        Some(TradeOutcome::Lost) => ("LOST".to_string(), OutcomeStyle::Lost),
        Some(other) => (other.label(), OutcomeStyle::Plain),
        None => ("--".to_string(), OutcomeStyle::Plain),
    };
    let (profit, profit_style) = signed_currency(update.profit.unwrap_or(0.0));

    TradeRow {
        time: event_time_of_day(update.timestamp.as_deref(), received_at),
        market: text_or_dash(update.market.as_deref()),
        contract_type: text_or_dash(update.contract_type.as_deref()),
        stake: currency(update.stake.unwrap_or(0.0)),
        outcome: outcome_label,
        outcome_style,
        profit,
        profit_style,
    }
}

fn text_or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "--".to_string(),
    }
}

/// Most-recent-first trade table plus session totals
#[derive(Debug, Clone)]
pub struct TradeHistoryProjector {
    rows: BoundedHistory<TradeRow>,
    stats: SessionStats,
}

impl TradeHistoryProjector {
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: BoundedHistory::new(capacity),
            stats: SessionStats::default(),
        }
    }

    /// Insert the trade at the top; the table never re-sorts
    pub fn project(
        &mut self,
        update: &TradeUpdate,
        received_at: &DateTime<Local>,
        display: &mut dyn DisplayPort,
    ) {
        let outcome = update.outcome.as_deref().map(TradeOutcome::parse);
        self.stats
            .record(outcome.as_ref(), update.profit.unwrap_or(0.0));

        let row = trade_row(update, received_at);
        let evicted = self.rows.push_front(row.clone()).is_some();
        display.append_trade_row(&row, evicted, &self.stats);
    }

    pub fn rows(&self) -> &BoundedHistory<TradeRow> {
        &self.rows
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }
}
