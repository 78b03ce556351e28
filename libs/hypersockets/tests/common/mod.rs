//! Common test utilities for HyperSockets integration tests
//!
//! Provides a scripted mock WebSocket server and a collecting router.

#![allow(dead_code)]

use hypersockets::{HyperSocketError, MessageHandler, MessageRouter, WsMessage};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::Notify;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// What the server does after sending its script
#[derive(Debug, Clone, Copy)]
pub enum AfterScript {
    /// Send a close frame
    Close,
    /// Keep the socket open until shutdown
    Hold,
}

/// A scripted mock WebSocket server
///
/// Every accepted connection receives the same text frames, then the
/// server either closes or holds the connection.
pub struct MockWsServer {
    pub addr: SocketAddr,
    accepted: Arc<Mutex<Vec<Instant>>>,
    shutdown: Arc<Notify>,
}

impl MockWsServer {
    pub async fn start(script: Vec<String>, after: AfterScript) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let accepted = Arc::new(Mutex::new(Vec::new()));

        let shutdown_clone = shutdown.clone();
        let accepted_clone = accepted.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _)) => {
                                accepted_clone.lock().unwrap().push(Instant::now());
                                let shutdown = shutdown_clone.clone();
                                let script = script.clone();
                                tokio::spawn(async move {
                                    Self::handle_connection(stream, script, after, shutdown).await;
                                });
                            }
                            Err(e) => {
                                eprintln!("Accept error: {}", e);
                                break;
                            }
                        }
                    }
                    _ = shutdown_clone.notified() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            accepted,
            shutdown,
        }
    }

    async fn handle_connection(
        stream: tokio::net::TcpStream,
        script: Vec<String>,
        after: AfterScript,
        shutdown: Arc<Notify>,
    ) {
        use futures::{SinkExt, StreamExt};
        use tokio_tungstenite::{accept_async, tungstenite::Message};

        let mut ws_stream = match accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                eprintln!("WebSocket handshake failed: {}", e);
                return;
            }
        };

        for text in script {
            if ws_stream.send(Message::Text(text)).await.is_err() {
                return;
            }
        }

        match after {
            AfterScript::Close => {
                let _ = ws_stream.close(None).await;
            }
            AfterScript::Hold => loop {
                tokio::select! {
                    msg = ws_stream.next() => {
                        match msg {
                            Some(Ok(msg)) if msg.is_close() => break,
                            Some(Ok(_)) => {}
                            Some(Err(_)) | None => break,
                        }
                    }
                    _ = shutdown.notified() => break,
                }
            },
        }
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Instants at which connections were accepted
    pub fn accepted(&self) -> Vec<Instant> {
        self.accepted.lock().unwrap().clone()
    }

    pub fn connection_count(&self) -> usize {
        self.accepted.lock().unwrap().len()
    }

    /// Shutdown the server
    pub fn shutdown(&self) {
        self.shutdown.notify_waiters();
    }
}

impl Drop for MockWsServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Reserve a local port with nothing listening on it
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Route keys used by the test router
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TestRoute {
    Tagged,
    Untagged,
}

/// Parsed test message: the `type` field of a JSON object, if any
#[derive(Debug, Clone, PartialEq)]
pub struct TestMessage {
    pub tag: Option<String>,
    pub raw: String,
}

/// Router that keys messages on the presence of a JSON `type` field
pub struct TestRouter;

impl MessageRouter for TestRouter {
    type Message = TestMessage;
    type RouteKey = TestRoute;

    fn parse(&self, message: WsMessage) -> hypersockets::Result<Self::Message> {
        let text = message
            .as_text()
            .ok_or_else(|| HyperSocketError::ParseError("binary frame".into()))?;
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| HyperSocketError::ParseError(e.to_string()))?;
        Ok(TestMessage {
            tag: value.get("type").and_then(|t| t.as_str()).map(str::to_string),
            raw: text.to_string(),
        })
    }

    fn route_key(&self, message: &Self::Message) -> Self::RouteKey {
        if message.tag.is_some() {
            TestRoute::Tagged
        } else {
            TestRoute::Untagged
        }
    }
}

/// Test router that also routes lifecycle changes onto the tagged route
///
/// Lifecycle messages carry the tag `lifecycle` and the event's debug
/// form as their raw text.
pub struct LifecycleRouter;

impl MessageRouter for LifecycleRouter {
    type Message = TestMessage;
    type RouteKey = TestRoute;

    fn parse(&self, message: WsMessage) -> hypersockets::Result<Self::Message> {
        TestRouter.parse(message)
    }

    fn route_key(&self, message: &Self::Message) -> Self::RouteKey {
        TestRouter.route_key(message)
    }

    fn lifecycle_message(&self, event: &hypersockets::ClientEvent) -> Option<Self::Message> {
        Some(TestMessage {
            tag: Some("lifecycle".to_string()),
            raw: format!("{:?}", event),
        })
    }
}

/// Handler forwarding every message into a crossbeam channel
pub struct ForwardHandler {
    pub tx: crossbeam_channel::Sender<TestMessage>,
}

impl MessageHandler<TestMessage> for ForwardHandler {
    fn handle(&mut self, message: TestMessage) -> hypersockets::Result<()> {
        self.tx
            .send(message)
            .map_err(|e| HyperSocketError::ChannelSend(e.to_string()))
    }
}

/// Poll the client's events until `pred` matches or `timeout` passes
pub async fn wait_for_event<R, F>(
    client: &hypersockets::WebSocketClient<R>,
    timeout: Duration,
    mut pred: F,
) -> Vec<hypersockets::ClientEvent>
where
    R: MessageRouter,
    F: FnMut(&hypersockets::ClientEvent) -> bool,
{
    let deadline = Instant::now() + timeout;
    let mut seen = Vec::new();
    while Instant::now() < deadline {
        while let Some(event) = client.try_recv_event() {
            let done = pred(&event);
            seen.push(event);
            if done {
                return seen;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    seen
}

/// Collect up to `count` forwarded messages within `timeout`
pub async fn collect_messages(
    rx: &crossbeam_channel::Receiver<TestMessage>,
    count: usize,
    timeout: Duration,
) -> Vec<TestMessage> {
    let deadline = Instant::now() + timeout;
    let mut received = Vec::new();
    while received.len() < count && Instant::now() < deadline {
        match rx.try_recv() {
            Ok(message) => received.push(message),
            Err(_) => tokio::time::sleep(Duration::from_millis(10)).await,
        }
    }
    received
}

/// Wait until the server has accepted `count` connections
pub async fn wait_for_connections(server: &MockWsServer, count: usize, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if server.connection_count() >= count {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
