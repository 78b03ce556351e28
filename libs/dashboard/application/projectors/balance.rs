//! Balance series projector

use chrono::{DateTime, Local};
use tracing::debug;

use crate::application::display::DisplayPort;
use crate::application::format::time_of_day;
use crate::domain::BalanceUpdate;
use crate::infrastructure::BalanceSeries;

/// Balance chart samples, oldest first
#[derive(Debug, Clone)]
pub struct BalanceProjector {
    series: BalanceSeries,
    last_change: Option<f64>,
}

impl BalanceProjector {
    pub fn new(capacity: usize) -> Self {
        Self {
            series: BalanceSeries::new(capacity),
            last_change: None,
        }
    }

    /// Plot a starting balance ahead of the live samples
    pub fn seed(&mut self, balance: f64, at: &DateTime<Local>, display: &mut dyn DisplayPort) {
        self.append(balance, at, display);
    }

    /// Append the sample labelled with the receipt time
    ///
    /// An update without a balance carries nothing to plot and is skipped.
    pub fn project(
        &mut self,
        update: &BalanceUpdate,
        received_at: &DateTime<Local>,
        display: &mut dyn DisplayPort,
    ) {
        let Some(balance) = update.balance else {
            debug!("[Dashboard] balance_update without balance, skipping");
            return;
        };
        if update.change.is_some() {
            self.last_change = update.change;
        }
        self.append(balance, received_at, display);
    }

    fn append(&mut self, balance: f64, at: &DateTime<Local>, display: &mut dyn DisplayPort) {
        let label = time_of_day(at);
        let evicted = self.series.push(label.clone(), balance).is_some();
        display.append_balance_sample(&label, balance, evicted, self.last_change);
    }

    pub fn series(&self) -> &BalanceSeries {
        &self.series
    }

    /// Most recent per-trade balance change
    pub fn last_change(&self) -> Option<f64> {
        self.last_change
    }
}
