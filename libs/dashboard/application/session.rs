//! Dashboard session
//!
//! Owns every bounded buffer and the display port for the lifetime of the
//! dashboard. Events are applied one at a time on the UI thread, so nothing
//! here is shared or locked.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::domain::{BotEvent, Severity};
use crate::infrastructure::config::HistoryConfig;
use crate::infrastructure::{BalanceSeries, BoundedHistory};

use super::display::{DisplayPort, LogLine, TradeRow};
use super::projectors::{
    project_sequence, project_status, BalanceProjector, LogProjector, SessionStats,
    TradeHistoryProjector,
};

/// Caps of the three bounded histories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    pub trades: usize,
    pub balance_samples: usize,
    pub log_entries: usize,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            trades: 100,
            balance_samples: 50,
            log_entries: 200,
        }
    }
}

impl From<&HistoryConfig> for HistoryLimits {
    fn from(config: &HistoryConfig) -> Self {
        Self {
            trades: config.trades,
            balance_samples: config.balance_samples,
            log_entries: config.log_entries,
        }
    }
}

/// The single dashboard session
pub struct DashboardSession<D: DisplayPort> {
    display: D,
    trades: TradeHistoryProjector,
    balance: BalanceProjector,
    logs: LogProjector,
    connected: bool,
    events_applied: u64,
    events_ignored: u64,
}

impl<D: DisplayPort> DashboardSession<D> {
    /// Start a session; the indicator begins disconnected
    pub fn new(mut display: D, limits: HistoryLimits) -> Self {
        display.set_connection_indicator(false);
        Self {
            display,
            trades: TradeHistoryProjector::new(limits.trades),
            balance: BalanceProjector::new(limits.balance_samples),
            logs: LogProjector::new(limits.log_entries),
            connected: false,
            events_applied: 0,
            events_ignored: 0,
        }
    }

    /// Plot a starting balance ahead of the live samples
    pub fn seed_balance(&mut self, balance: f64) {
        self.balance.seed(balance, &Local::now(), &mut self.display);
    }

    /// Apply one feed event, stamped with the current time
    ///
    /// Returns false when the event was ignored.
    pub fn handle_event(&mut self, event: BotEvent) -> bool {
        self.handle_event_at(event, &Local::now())
    }

    /// Apply one feed event received at `now`
    pub fn handle_event_at(&mut self, event: BotEvent, now: &DateTime<Local>) -> bool {
        let display = &mut self.display;
        match &event {
            BotEvent::Status(update) => project_status(update, display),
            BotEvent::Sequence(update) => project_sequence(update, display),
            BotEvent::Trade(update) => self.trades.project(update, now, display),
            BotEvent::Balance(update) => self.balance.project(update, now, display),
            BotEvent::Log(update) => self.logs.project(update, now, display),
            BotEvent::Unknown(what) => {
                debug!("[Dashboard] Unknown event ignored: {}", what);
                self.events_ignored += 1;
                return false;
            }
        }
        self.events_applied += 1;
        true
    }

    /// Update the connection indicator
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
        self.display.set_connection_indicator(connected);
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Add a dashboard-originated line to the log feed
    pub fn log(&mut self, message: &str, severity: Severity) {
        self.log_at(message, severity, &Local::now());
    }

    pub fn log_at(&mut self, message: &str, severity: Severity, at: &DateTime<Local>) {
        self.logs.push(message, severity, at, &mut self.display);
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn trades(&self) -> &BoundedHistory<TradeRow> {
        self.trades.rows()
    }

    pub fn stats(&self) -> &SessionStats {
        self.trades.stats()
    }

    pub fn balance(&self) -> &BalanceSeries {
        self.balance.series()
    }

    pub fn logs(&self) -> &BoundedHistory<LogLine> {
        self.logs.lines()
    }

    pub fn events_applied(&self) -> u64 {
        self.events_applied
    }

    pub fn events_ignored(&self) -> u64 {
        self.events_ignored
    }

    /// End the session, handing back the display
    pub fn into_display(self) -> D {
        self.display
    }
}
