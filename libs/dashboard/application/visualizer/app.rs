//! Main application state and logic for the dashboard

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::KeyCode;
use hypersockets::Metrics;
use tokio::runtime::Handle;
use tracing::info;

use crate::application::session::{DashboardSession, HistoryLimits};
use crate::application::supervisor::{ConnectionSupervisor, LinkState};
use crate::infrastructure::DashboardConfig;

use super::state::TuiDisplay;

/// Main application state
pub struct App {
    /// Session owning every buffer and the view model
    pub session: DashboardSession<TuiDisplay>,
    /// Connection to the trading bot
    supervisor: ConnectionSupervisor,
    /// Whether to quit
    pub should_quit: bool,
    /// Shutdown flag shared with the feed client
    shutdown_flag: Arc<AtomicBool>,
    /// Tokio runtime handle
    runtime: Handle,
    /// Status message to show in footer
    pub status_message: Option<String>,
}

impl App {
    /// Create the session and start connecting to the bot
    pub async fn initialize(runtime: Handle, config: &DashboardConfig) -> Result<Self> {
        // true = keep running, false = shutdown requested
        let shutdown_flag = Arc::new(AtomicBool::new(true));

        let mut session =
            DashboardSession::new(TuiDisplay::new(), HistoryLimits::from(&config.history));
        if let Some(balance) = config.seed_balance {
            info!("[Dashboard] Seeding balance chart with {:.2}", balance);
            session.seed_balance(balance);
        }

        let supervisor = ConnectionSupervisor::start(config, shutdown_flag.clone()).await?;

        Ok(Self {
            session,
            supervisor,
            should_quit: false,
            shutdown_flag,
            runtime,
            status_message: None,
        })
    }

    /// Apply everything the feed delivered since the last frame
    pub fn tick(&mut self) -> usize {
        self.supervisor.pump(&mut self.session)
    }

    /// Handle a key press
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => {
                self.status_message = Some(if self.supervisor.network_restored() {
                    "Reconnecting now...".to_string()
                } else {
                    format!("Link is {}, nothing to reconnect", self.link_label())
                });
            }
            _ => {}
        }
    }

    pub fn display(&self) -> &TuiDisplay {
        self.session.display()
    }

    pub fn link_state(&self) -> LinkState {
        self.supervisor.link_state()
    }

    pub fn link_label(&self) -> &'static str {
        match self.supervisor.link_state() {
            LinkState::Disconnected => "disconnected",
            LinkState::Connecting => "connecting",
            LinkState::Connected => "connected",
        }
    }

    pub fn server_url(&self) -> &str {
        self.supervisor.server_url()
    }

    pub fn metrics(&self) -> Metrics {
        self.supervisor.metrics()
    }

    /// Shutdown the application
    pub fn shutdown(self) -> Result<()> {
        info!("[Dashboard] Shutting down...");
        self.shutdown_flag.store(false, Ordering::Release);
        self.runtime.block_on(self.supervisor.shutdown())
    }
}
