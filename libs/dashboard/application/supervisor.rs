//! Connection supervisor
//!
//! Owns the bot feed client and translates its lifecycle into the
//! dashboard's connected/disconnected indicator and log feed:
//!
//! ```text
//! DISCONNECTED ──start / r key / delay elapsed──▶ CONNECTING ──open──▶ CONNECTED
//!      ▲                                                                   │
//!      └──────────────── close or error (retry after fixed delay) ────────┘
//! ```
//!
//! Retries never stop while the dashboard runs. The reconnect timer lives
//! inside the client task, so a superseded timer can never fire.
//!
//! Link changes arrive on the feed channel between the bot events, so a
//! message received before a closure is always applied before the
//! disconnect warning.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossbeam_channel::{unbounded, Receiver};
use hypersockets::{ClientEvent, FixedDelay, Metrics, WebSocketClient};
use tracing::{debug, error, info, warn};

use crate::domain::Severity;
use crate::infrastructure::router::{BotEventRouter, DashboardRoute, FeedHandler, FeedItem};
use crate::infrastructure::DashboardConfig;

use super::display::DisplayPort;
use super::session::DashboardSession;

/// Upper bound on feed items applied per pump, so a burst cannot stall a frame
const MAX_FEED_ITEMS_PER_PUMP: usize = 1024;

/// Link state as seen by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
}

/// Apply one client lifecycle event to the session
pub fn apply_client_event<D: DisplayPort>(
    link: &mut LinkState,
    event: ClientEvent,
    reconnect_delay: Duration,
    session: &mut DashboardSession<D>,
) {
    match event {
        ClientEvent::Connecting(attempt) => {
            debug!("[Supervisor] Connection attempt {}", attempt);
            *link = LinkState::Connecting;
        }
        ClientEvent::Connected => {
            info!("[Supervisor] Connected to trading bot server");
            *link = LinkState::Connected;
            session.set_connected(true);
            session.log("Connected to trading bot server", Severity::Info);
        }
        ClientEvent::Error(e) => {
            // The closure follows as its own event
            error!("[Supervisor] Connection error: {}", e);
            session.log(&format!("Connection error: {}", e), Severity::Error);
        }
        ClientEvent::Disconnected => {
            warn!(
                "[Supervisor] Disconnected, reconnecting in {}s",
                reconnect_delay.as_secs()
            );
            *link = LinkState::Disconnected;
            session.set_connected(false);
            session.log(
                &format!(
                    "Disconnected from server. Reconnecting in {}s...",
                    reconnect_delay.as_secs()
                ),
                Severity::Warning,
            );
        }
    }
}

/// Apply one entry of the ordered feed
pub fn apply_feed_item<D: DisplayPort>(
    link: &mut LinkState,
    item: FeedItem,
    reconnect_delay: Duration,
    session: &mut DashboardSession<D>,
) {
    match item {
        FeedItem::Link(event) => apply_client_event(link, event, reconnect_delay, session),
        FeedItem::Event(event) => {
            session.handle_event(event);
        }
    }
}

/// Supervises the single connection to the trading bot
pub struct ConnectionSupervisor {
    client: WebSocketClient<BotEventRouter>,
    feed_rx: Receiver<FeedItem>,
    link: LinkState,
    reconnect_delay: Duration,
}

impl ConnectionSupervisor {
    /// Build the client and start connecting
    ///
    /// Must be called from within a tokio runtime. Storing `false` in
    /// `shutdown_flag` stops the client.
    pub async fn start(config: &DashboardConfig, shutdown_flag: Arc<AtomicBool>) -> Result<Self> {
        let reconnect_delay = config.reconnect_delay();
        let (feed_tx, feed_rx) = unbounded();

        info!("[Supervisor] Connecting to {}", config.server_url);

        let client = hypersockets::builder()
            .url(config.server_url.clone())
            .router(BotEventRouter, move |routing| {
                routing.handler(DashboardRoute::Feed, FeedHandler::new(feed_tx))
            })
            .reconnect_strategy(FixedDelay::forever(reconnect_delay))
            .shutdown_flag(shutdown_flag)
            .build()
            .await?;

        Ok(Self {
            client,
            feed_rx,
            link: LinkState::Disconnected,
            reconnect_delay,
        })
    }

    /// Apply pending feed items to the session, in arrival order
    ///
    /// Never blocks. Returns the number of items applied.
    pub fn pump<D: DisplayPort>(&mut self, session: &mut DashboardSession<D>) -> usize {
        // Same link changes as the feed carries; drained so the channel stays empty
        while self.client.try_recv_event().is_some() {}

        let mut processed = 0;
        for item in self.feed_rx.try_iter().take(MAX_FEED_ITEMS_PER_PUMP) {
            apply_feed_item(&mut self.link, item, self.reconnect_delay, session);
            processed += 1;
        }
        processed
    }

    /// Network-restored signal: connect now if the link is down
    ///
    /// Returns true if a connection attempt was requested.
    pub fn network_restored(&self) -> bool {
        if self.link != LinkState::Disconnected {
            debug!("[Supervisor] Network restored while {:?}, nothing to do", self.link);
            return false;
        }

        match self.client.reconnect_now() {
            Ok(()) => {
                info!("[Supervisor] Network restored, reconnecting now");
                true
            }
            Err(e) => {
                warn!("[Supervisor] Could not request reconnect: {}", e);
                false
            }
        }
    }

    pub fn link_state(&self) -> LinkState {
        self.link
    }

    pub fn server_url(&self) -> &str {
        self.client.url()
    }

    pub fn reconnect_delay(&self) -> Duration {
        self.reconnect_delay
    }

    /// Transport counters
    pub fn metrics(&self) -> Metrics {
        self.client.metrics()
    }

    /// Close the connection and stop retrying
    pub async fn shutdown(self) -> Result<()> {
        info!("[Supervisor] Shutting down");
        self.client.shutdown().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::display::recording::{DisplayCall, RecordingDisplay};
    use crate::application::session::HistoryLimits;

    const DELAY: Duration = Duration::from_secs(5);

    fn session() -> DashboardSession<RecordingDisplay> {
        let mut session = DashboardSession::new(RecordingDisplay::default(), HistoryLimits::default());
        session.display_mut().calls.clear();
        session
    }

    #[test]
    fn test_connect_sets_indicator_and_logs() {
        let mut link = LinkState::Disconnected;
        let mut session = session();

        apply_client_event(&mut link, ClientEvent::Connecting(0), DELAY, &mut session);
        assert_eq!(link, LinkState::Connecting);
        assert!(session.display().calls.is_empty());

        apply_client_event(&mut link, ClientEvent::Connected, DELAY, &mut session);
        assert_eq!(link, LinkState::Connected);
        assert!(session.is_connected());
        assert_eq!(session.display().calls[0], DisplayCall::Indicator(true));

        let line = session.logs().front().unwrap();
        assert!(line.text.ends_with("Connected to trading bot server"));
        assert_eq!(line.severity, Severity::Info);
    }

    #[test]
    fn test_error_then_close() {
        let mut link = LinkState::Connected;
        let mut session = session();
        session.set_connected(true);

        apply_client_event(&mut link, ClientEvent::Error("reset".into()), DELAY, &mut session);
        // An error alone does not flip the indicator
        assert_eq!(link, LinkState::Connected);
        assert!(session.is_connected());
        assert_eq!(session.logs().front().unwrap().severity, Severity::Error);

        apply_client_event(&mut link, ClientEvent::Disconnected, DELAY, &mut session);
        assert_eq!(link, LinkState::Disconnected);
        assert!(!session.is_connected());

        let line = session.logs().front().unwrap();
        assert!(line.text.ends_with("Disconnected from server. Reconnecting in 5s..."));
        assert_eq!(line.severity, Severity::Warning);
        assert_eq!(session.logs().len(), 2);
    }

    #[test]
    fn test_feed_items_apply_in_arrival_order() {
        use crate::domain::{BotEvent, LogMessage};

        let mut link = LinkState::Connected;
        let mut session = session();
        let items = vec![
            FeedItem::Event(BotEvent::Log(LogMessage {
                message: Some("Contract LOST".to_string()),
                ..LogMessage::default()
            })),
            FeedItem::Link(ClientEvent::Disconnected),
            FeedItem::Link(ClientEvent::Connecting(1)),
            FeedItem::Link(ClientEvent::Connected),
        ];
        for item in items {
            apply_feed_item(&mut link, item, DELAY, &mut session);
        }

        let texts: Vec<_> = session.logs().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts.len(), 3);
        assert!(texts[0].ends_with("Connected to trading bot server"));
        assert!(texts[1].ends_with("Disconnected from server. Reconnecting in 5s..."));
        assert!(texts[2].ends_with("Contract LOST"));
        assert_eq!(link, LinkState::Connected);
        assert_eq!(session.events_applied(), 1);
    }
}
