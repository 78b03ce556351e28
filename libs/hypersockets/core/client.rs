use crate::core::config::ClientConfig;
use crate::core::connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState};
use crate::traits::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use futures::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How often blocking waits re-check the shutdown flag
const SHUTDOWN_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Internal command messages for client control
#[derive(Debug)]
enum ClientCommand {
    /// Skip the pending reconnect delay (ignored while connected)
    ReconnectNow,
    /// Shutdown the client
    Shutdown,
}

/// Lifecycle events published by the client task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A connection attempt started (0 = first attempt after a closure or startup)
    Connecting(usize),
    /// Connected to the server
    Connected,
    /// Transport error; always followed by `Disconnected`
    Error(String),
    /// Connection closed (cleanly or after an error), or the attempt failed
    Disconnected,
}

/// Client metrics snapshot
#[derive(Debug, Clone)]
pub struct Metrics {
    pub messages_received: u64,
    pub messages_dropped: u64,
    pub reconnect_count: u64,
    pub connection_state: ConnectionState,
}

/// How an open connection ended without a transport error
enum ConnectionEnd {
    /// Server closed the socket or the stream ended
    Closed,
    /// Local shutdown requested
    Shutdown,
}

/// What ended a reconnect wait
enum Wake {
    Timer,
    ReconnectNow,
    Shutdown,
}

/// WebSocket client with message routing and supervised reconnection
///
/// The connection runs in a tokio task. Data frames are parsed in arrival
/// order and forwarded to the handler registered for their route key.
/// Lifecycle changes are published as [`ClientEvent`]s for the owner to
/// poll, and routed in order with the data when the router maps them to
/// messages (see [`MessageRouter::lifecycle_message`]).
///
/// The task owns a single reconnect timer: after a closure it waits for the
/// strategy's delay, or until [`WebSocketClient::reconnect_now`] cuts the
/// wait short. A new attempt always consumes the pending timer, so a stale
/// timer can never start a second connection.
pub struct WebSocketClient<R>
where
    R: MessageRouter,
{
    /// Keeps the route channels open until shutdown
    config: Arc<ClientConfig<R>>,
    state: Arc<AtomicConnectionState>,
    metrics: Arc<AtomicMetrics>,
    command_tx: mpsc::UnboundedSender<ClientCommand>,
    event_rx: Receiver<ClientEvent>,
    task_handle: Option<tokio::task::JoinHandle<()>>,
    /// Handler threads (one per route)
    pub(crate) handler_handles: Vec<std::thread::JoinHandle<()>>,
    shutdown_flag: Arc<AtomicBool>,
}

impl<R> WebSocketClient<R>
where
    R: MessageRouter,
{
    /// Create a new WebSocket client from configuration
    ///
    /// This is called by the builder's `build()` method.
    pub(crate) async fn new(config: ClientConfig<R>) -> Result<Self> {
        let config = Arc::new(config);
        let state = Arc::new(AtomicConnectionState::new(ConnectionState::Disconnected));
        let metrics = Arc::new(AtomicMetrics::new());
        let shutdown_flag = Arc::clone(&config.shutdown_flag);

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = unbounded();

        let task_handle = {
            let config = Arc::clone(&config);
            let state = Arc::clone(&state);
            let metrics = Arc::clone(&metrics);

            tokio::spawn(async move {
                run_client(config, state, metrics, command_rx, event_tx).await;
            })
        };

        Ok(Self {
            config,
            state,
            metrics,
            command_tx,
            event_rx,
            task_handle: Some(task_handle),
            handler_handles: Vec::new(),
            shutdown_flag,
        })
    }

    /// Endpoint this client connects to
    pub fn url(&self) -> &str {
        self.config.url()
    }

    /// Get current connection state
    #[inline]
    pub fn connection_state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Check if connected
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Get current metrics
    pub fn metrics(&self) -> Metrics {
        Metrics {
            messages_received: self.metrics.messages_received(),
            messages_dropped: self.metrics.messages_dropped(),
            reconnect_count: self.metrics.reconnect_count(),
            connection_state: self.state.get(),
        }
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv_event(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Receive an event, waiting at most `timeout`
    pub fn recv_event_timeout(&self, timeout: Duration) -> Option<ClientEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Start a connection attempt now if the client is waiting to reconnect
    ///
    /// Ignored while a connection is open. Requests sent before the client
    /// publishes `Disconnected` are discarded when the connection closes.
    pub fn reconnect_now(&self) -> Result<()> {
        self.command_tx
            .send(ClientCommand::ReconnectNow)
            .map_err(|e| HyperSocketError::ChannelSend(e.to_string()))
    }

    /// Get a reference to the shutdown flag
    pub fn shutdown_flag(&self) -> &Arc<AtomicBool> {
        &self.shutdown_flag
    }

    /// Shutdown the client
    ///
    /// Stops reconnection, closes the socket, then waits for the handler
    /// threads to drain their queues and exit.
    pub async fn shutdown(mut self) -> Result<()> {
        info!("Shutting down WebSocket client");

        self.shutdown_flag.store(false, Ordering::Release);
        let _ = self.command_tx.send(ClientCommand::Shutdown);

        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }
        self.state.set(ConnectionState::ShuttingDown);

        // Last reference to the route senders: handler channels close here
        drop(self.config);

        debug!("Waiting for {} handler threads to complete", self.handler_handles.len());
        for handle in self.handler_handles {
            let _ = handle.join();
        }

        info!("All handlers shut down successfully");
        Ok(())
    }
}

fn is_running(flag: &AtomicBool) -> bool {
    flag.load(Ordering::Acquire)
}

/// Main client task loop
async fn run_client<R>(
    config: Arc<ClientConfig<R>>,
    state: Arc<AtomicConnectionState>,
    metrics: Arc<AtomicMetrics>,
    mut command_rx: mpsc::UnboundedReceiver<ClientCommand>,
    event_tx: Sender<ClientEvent>,
) where
    R: MessageRouter,
{
    let mut reconnect_attempt = 0;
    let shutdown_flag = &config.shutdown_flag;

    loop {
        if !is_running(shutdown_flag) || state.is_shutting_down() {
            debug!("Shutdown requested, exiting main loop");
            break;
        }

        state.set(if reconnect_attempt == 0 {
            ConnectionState::Connecting
        } else {
            ConnectionState::Reconnecting
        });
        publish(&config, &event_tx, ClientEvent::Connecting(reconnect_attempt));

        let mut shutdown_requested = false;

        match connect_async(config.url.as_str()).await {
            Ok((ws_stream, _)) => {
                info!("Connected to {}", config.url);
                state.set(ConnectionState::Connected);
                publish(&config, &event_tx, ClientEvent::Connected);

                reconnect_attempt = 0;

                match message_loop(ws_stream, &config, &metrics, &mut command_rx).await {
                    Ok(ConnectionEnd::Closed) => {
                        info!("Connection to {} closed by server", config.url);
                    }
                    Ok(ConnectionEnd::Shutdown) => {
                        shutdown_requested = true;
                    }
                    Err(e) => {
                        error!("Connection error: {}", e);
                        publish(&config, &event_tx, ClientEvent::Error(e.to_string()));
                    }
                }
            }
            Err(e) => {
                error!("Failed to connect to {}: {}", config.url, e);
                publish(&config, &event_tx, ClientEvent::Error(e.to_string()));
            }
        }

        // Requests made before the closure is published are superseded by it
        if discard_stale_commands(&mut command_rx) {
            shutdown_requested = true;
        }

        state.set(ConnectionState::Disconnected);
        publish(&config, &event_tx, ClientEvent::Disconnected);

        if shutdown_requested || !is_running(shutdown_flag) {
            debug!("Shutdown requested during connection, stopping reconnection");
            break;
        }

        let Some(delay) = config.reconnect_strategy.next_delay(reconnect_attempt) else {
            warn!("Reconnection strategy exhausted, stopping");
            break;
        };

        info!("Reconnecting in {:?} (attempt {})", delay, reconnect_attempt + 1);

        match wait_for_reconnect(delay, &mut command_rx, shutdown_flag).await {
            Wake::Timer => {}
            Wake::ReconnectNow => info!("Reconnect requested, skipping remaining delay"),
            Wake::Shutdown => break,
        }

        reconnect_attempt += 1;
        metrics.increment_reconnects();
    }

    info!("Client task exiting");
}

/// Publish a lifecycle event
///
/// The router's message for the event, if any, is routed first. Frames
/// received earlier are already queued on the same route, so the handler
/// sees the change in arrival order.
fn publish<R>(config: &ClientConfig<R>, event_tx: &Sender<ClientEvent>, event: ClientEvent)
where
    R: MessageRouter,
{
    if let Some(message) = config.router.lifecycle_message(&event) {
        let route_key = config.router.route_key(&message);
        match config.route_senders.get(&route_key) {
            Some(sender) => {
                let _ = sender.send(message);
            }
            None => debug!("No handler for lifecycle route {:?}", route_key),
        }
    }
    let _ = event_tx.send(event);
}

/// Drop reconnect requests queued while connecting or connected
///
/// Returns true if a shutdown command was queued.
fn discard_stale_commands(command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>) -> bool {
    while let Ok(cmd) = command_rx.try_recv() {
        match cmd {
            ClientCommand::ReconnectNow => debug!("Discarding stale reconnect request"),
            ClientCommand::Shutdown => return true,
        }
    }
    false
}

/// Wait out the reconnect delay
///
/// The sleep future is the only reconnect timer; returning drops it.
async fn wait_for_reconnect(
    delay: Duration,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
    shutdown_flag: &AtomicBool,
) -> Wake {
    let timer = tokio::time::sleep(delay);
    tokio::pin!(timer);
    let mut shutdown_check = tokio::time::interval(SHUTDOWN_CHECK_INTERVAL);

    loop {
        tokio::select! {
            _ = &mut timer => return Wake::Timer,
            cmd = command_rx.recv() => {
                match cmd {
                    Some(ClientCommand::ReconnectNow) => return Wake::ReconnectNow,
                    Some(ClientCommand::Shutdown) | None => return Wake::Shutdown,
                }
            }
            _ = shutdown_check.tick() => {
                if !is_running(shutdown_flag) {
                    debug!("Shutdown flag set during reconnection delay");
                    return Wake::Shutdown;
                }
            }
        }
    }
}

/// Main message processing loop for an open connection
async fn message_loop<R>(
    ws_stream: WsStream,
    config: &ClientConfig<R>,
    metrics: &AtomicMetrics,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
) -> Result<ConnectionEnd>
where
    R: MessageRouter,
{
    let (mut write, mut read) = ws_stream.split();
    let mut shutdown_check = tokio::time::interval(SHUTDOWN_CHECK_INTERVAL);

    loop {
        tokio::select! {
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Close(frame))) => {
                        debug!("Close frame received: {:?}", frame);
                        return Ok(ConnectionEnd::Closed);
                    }
                    Some(Ok(msg)) => {
                        if let Some(ws_msg) = tungstenite_to_ws_message(msg) {
                            metrics.increment_received();
                            route_message(config, metrics, ws_msg);
                        }
                    }
                    Some(Err(e)) => {
                        return Err(HyperSocketError::WebSocket(e.to_string()));
                    }
                    None => {
                        warn!("WebSocket stream closed");
                        return Ok(ConnectionEnd::Closed);
                    }
                }
            }

            cmd = command_rx.recv() => {
                match cmd {
                    Some(ClientCommand::ReconnectNow) => {
                        debug!("Already connected, ignoring reconnect request");
                    }
                    Some(ClientCommand::Shutdown) | None => {
                        info!("Received shutdown command");
                        let _ = write.close().await;
                        return Ok(ConnectionEnd::Shutdown);
                    }
                }
            }

            _ = shutdown_check.tick() => {
                if !is_running(&config.shutdown_flag) {
                    debug!("Shutdown flag detected in message loop, closing connection");
                    let _ = write.close().await;
                    return Ok(ConnectionEnd::Shutdown);
                }
            }
        }
    }
}

/// Parse a frame and hand it to its route's handler
fn route_message<R>(config: &ClientConfig<R>, metrics: &AtomicMetrics, ws_msg: WsMessage)
where
    R: MessageRouter,
{
    match config.router.parse(ws_msg) {
        Ok(message) => {
            let route_key = config.router.route_key(&message);

            if let Some(sender) = config.route_senders.get(&route_key) {
                // Fails only while shutting down
                let _ = sender.send(message);
            } else {
                metrics.increment_dropped();
                debug!("No handler configured for route key {:?}, dropping message", route_key);
            }
        }
        Err(e) => {
            metrics.increment_dropped();
            warn!("Dropping unparseable message: {}", e);
        }
    }
}

/// Convert tungstenite Message to WsMessage
fn tungstenite_to_ws_message(msg: Message) -> Option<WsMessage> {
    match msg {
        Message::Text(text) => Some(WsMessage::Text(text)),
        Message::Binary(data) => Some(WsMessage::Binary(data)),
        Message::Ping(_) | Message::Pong(_) | Message::Close(_) | Message::Frame(_) => None,
    }
}
