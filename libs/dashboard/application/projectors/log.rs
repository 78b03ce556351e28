//! Log projector

use chrono::{DateTime, Local};

use crate::application::display::{DisplayPort, LogLine};
use crate::application::format::time_of_day;
use crate::domain::{LogMessage, Severity};
use crate::infrastructure::BoundedHistory;

/// Most-recent-first log feed
#[derive(Debug, Clone)]
pub struct LogProjector {
    lines: BoundedHistory<LogLine>,
}

impl LogProjector {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: BoundedHistory::new(capacity),
        }
    }

    /// Log line forwarded by the bot
    pub fn project(
        &mut self,
        update: &LogMessage,
        received_at: &DateTime<Local>,
        display: &mut dyn DisplayPort,
    ) {
        let message = update.message.as_deref().unwrap_or_default();
        let severity = Severity::from_level(update.level.as_deref());
        self.push(message, severity, received_at, display);
    }

    /// Insert a line at the top, stamped with `at`
    pub fn push(
        &mut self,
        message: &str,
        severity: Severity,
        at: &DateTime<Local>,
        display: &mut dyn DisplayPort,
    ) {
        let line = LogLine {
            text: format!("[{}] {}", time_of_day(at), message),
            severity,
        };
        let evicted = self.lines.push_front(line.clone()).is_some();
        display.append_log_line(&line, evicted);
    }

    pub fn lines(&self) -> &BoundedHistory<LogLine> {
        &self.lines
    }
}
