pub mod states;

use crate::core::client::WebSocketClient;
use crate::core::config::ClientConfig;
use crate::traits::*;
use states::*;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Default delay between reconnection attempts
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Type-state builder for WebSocketClient with routing
///
/// This builder uses Rust's type system to enforce that required
/// fields (URL and router) are set before the client can be built.
pub struct WebSocketClientBuilder<U, Ro, R>
where
    U: UrlState,
    Ro: RouterState,
{
    _state: TypeState<U, Ro>,
    url: Option<String>,
    router: Option<R>,
    // RoutingBuilder<R> stored type-erased; R has no MessageRouter bound until `router()`
    routing: Option<Box<dyn Any + Send>>,
    reconnect_strategy: Option<Box<dyn ReconnectionStrategy>>,
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl WebSocketClientBuilder<NoUrl, NoRouter, ()> {
    /// Create a new builder instance
    pub fn new() -> Self {
        Self {
            _state: TypeState::new(),
            url: None,
            router: None,
            routing: None,
            reconnect_strategy: None,
            shutdown_flag: None,
        }
    }
}

impl Default for WebSocketClientBuilder<NoUrl, NoRouter, ()> {
    fn default() -> Self {
        Self::new()
    }
}

// URL setting
impl<Ro, R> WebSocketClientBuilder<NoUrl, Ro, R>
where
    Ro: RouterState,
{
    pub fn url(self, url: impl Into<String>) -> WebSocketClientBuilder<HasUrl, Ro, R> {
        WebSocketClientBuilder {
            _state: TypeState::new(),
            url: Some(url.into()),
            router: self.router,
            routing: self.routing,
            reconnect_strategy: self.reconnect_strategy,
            shutdown_flag: self.shutdown_flag,
        }
    }
}

/// Routing builder helper
///
/// Registers one handler per route key. Each handler gets its own channel
/// and thread when the client is built.
pub struct RoutingBuilder<R>
where
    R: MessageRouter,
{
    handlers: HashMap<R::RouteKey, Box<dyn MessageHandler<R::Message>>>,
}

impl<R> RoutingBuilder<R>
where
    R: MessageRouter,
{
    fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Add a handler for a specific route key
    pub fn handler<H>(mut self, route_key: R::RouteKey, handler: H) -> Self
    where
        H: MessageHandler<R::Message>,
    {
        self.handlers.insert(route_key, Box::new(handler));
        self
    }

    fn spawn(
        self,
        shutdown_flag: Arc<AtomicBool>,
    ) -> (
        HashMap<R::RouteKey, crossbeam_channel::Sender<R::Message>>,
        Vec<JoinHandle<()>>,
    ) {
        let mut senders = HashMap::new();
        let mut handles = Vec::new();

        for (route_key, handler) in self.handlers {
            let (sender, receiver) = crossbeam_channel::unbounded::<R::Message>();
            senders.insert(route_key.clone(), sender);

            let shutdown_flag = Arc::clone(&shutdown_flag);

            let handle = std::thread::spawn(move || {
                let mut handler = handler;

                loop {
                    match receiver.recv_timeout(Duration::from_millis(50)) {
                        Ok(message) => {
                            if let Err(e) = handler.handle(message) {
                                tracing::error!("Handler error for route {:?}: {}", route_key, e);
                            }
                        }
                        Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                            if !shutdown_flag.load(Ordering::Acquire) {
                                tracing::debug!("Shutdown flag detected, handler thread for route {:?} exiting", route_key);
                                break;
                            }
                        }
                        Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                            tracing::debug!("Handler channel closed for route {:?}, thread exiting", route_key);
                            break;
                        }
                    }
                }
            });

            handles.push(handle);
        }

        (senders, handles)
    }
}

// Router setting
impl<U> WebSocketClientBuilder<U, NoRouter, ()>
where
    U: UrlState,
{
    pub fn router<NewR, F>(
        self,
        router: NewR,
        configure_routing: F,
    ) -> WebSocketClientBuilder<U, HasRouter, NewR>
    where
        NewR: MessageRouter,
        F: FnOnce(RoutingBuilder<NewR>) -> RoutingBuilder<NewR>,
    {
        let routing = configure_routing(RoutingBuilder::<NewR>::new());

        WebSocketClientBuilder {
            _state: TypeState::new(),
            url: self.url,
            router: Some(router),
            routing: Some(Box::new(routing)),
            reconnect_strategy: self.reconnect_strategy,
            shutdown_flag: self.shutdown_flag,
        }
    }
}

// Optional configuration methods
impl<U, R> WebSocketClientBuilder<U, HasRouter, R>
where
    U: UrlState,
    R: MessageRouter,
{
    pub fn reconnect_strategy(mut self, strategy: impl ReconnectionStrategy + 'static) -> Self {
        self.reconnect_strategy = Some(Box::new(strategy));
        self
    }

    /// Set a custom shutdown flag for coordinated shutdown across components
    ///
    /// The flag is `true` while running. Storing `false` stops reconnection,
    /// closes an open connection and lets the handler threads exit.
    pub fn shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }
}

// Build method - only available when all required fields are set
impl<R> WebSocketClientBuilder<HasUrl, HasRouter, R>
where
    R: MessageRouter,
{
    /// Spawn the handler threads and the client task
    ///
    /// Must be called from within a tokio runtime.
    pub async fn build(self) -> Result<WebSocketClient<R>> {
        let url = self
            .url
            .ok_or_else(|| HyperSocketError::Configuration("URL not set".into()))?;
        let router = Arc::new(
            self.router
                .ok_or_else(|| HyperSocketError::Configuration("Router not set".into()))?,
        );

        let shutdown_flag = self
            .shutdown_flag
            .unwrap_or_else(|| Arc::new(AtomicBool::new(true)));

        let reconnect_strategy = self
            .reconnect_strategy
            .unwrap_or_else(|| Box::new(FixedDelay::forever(DEFAULT_RECONNECT_DELAY)));

        let routing = match self.routing {
            Some(routing) => *routing.downcast::<RoutingBuilder<R>>().map_err(|_| {
                HyperSocketError::Configuration("Routing table type mismatch".into())
            })?,
            None => RoutingBuilder::new(),
        };

        let (route_senders, handler_handles) = routing.spawn(Arc::clone(&shutdown_flag));

        let config = ClientConfig {
            url,
            router,
            route_senders,
            reconnect_strategy,
            shutdown_flag,
        };

        let mut client = WebSocketClient::new(config).await?;
        client.handler_handles = handler_handles;

        Ok(client)
    }
}
