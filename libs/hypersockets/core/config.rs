use crate::traits::*;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Configuration for a routed WebSocketClient
///
/// Produced by the type-state builder; shared between the client handle and
/// its background task. Dropping the last reference closes every route
/// channel, which stops the handler threads.
pub struct ClientConfig<R>
where
    R: MessageRouter,
{
    /// WebSocket URL (ws:// or wss://)
    pub(crate) url: String,

    /// Message router for parsing and routing messages
    pub(crate) router: Arc<R>,

    /// Channel senders mapped by route key
    pub(crate) route_senders: HashMap<R::RouteKey, crossbeam_channel::Sender<R::Message>>,

    /// Reconnection strategy consulted after every closure
    pub(crate) reconnect_strategy: Box<dyn ReconnectionStrategy>,

    /// Shutdown flag - true while running, false prevents reconnection
    pub(crate) shutdown_flag: Arc<AtomicBool>,
}

impl<R> ClientConfig<R>
where
    R: MessageRouter,
{
    /// Get a reference to the URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the number of configured handlers
    pub fn handler_count(&self) -> usize {
        self.route_senders.len()
    }
}
