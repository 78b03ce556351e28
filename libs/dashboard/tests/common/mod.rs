//! Common test utilities for dashboard integration tests
//!
//! A mock trading bot that plays a fixed list of feed frames to every
//! client that connects.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashboard::application::visualizer::TuiDisplay;
use dashboard::{ConnectionSupervisor, DashboardConfig, DashboardSession, HistoryLimits};
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// Mock trading bot server
pub struct MockBot {
    pub addr: SocketAddr,
    connections: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
}

impl MockBot {
    /// Serve `frames` to each client; close afterwards when `close_after` is set
    pub async fn start(frames: Vec<String>, close_after: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let shutdown = Arc::new(Notify::new());

        let connections_clone = connections.clone();
        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    accepted = listener.accept() => {
                        let Ok((stream, _)) = accepted else { break };
                        connections_clone.fetch_add(1, Ordering::SeqCst);
                        let frames = frames.clone();
                        let shutdown = shutdown_clone.clone();
                        tokio::spawn(serve(stream, frames, close_after, shutdown));
                    }
                    _ = shutdown_clone.notified() => break,
                }
            }
        });

        Self {
            addr,
            connections,
            shutdown,
        }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

impl Drop for MockBot {
    fn drop(&mut self) {
        self.shutdown.notify_waiters();
    }
}

async fn serve(stream: TcpStream, frames: Vec<String>, close_after: bool, shutdown: Arc<Notify>) {
    let Ok(mut ws) = accept_async(stream).await else {
        return;
    };

    for frame in frames {
        if ws.send(Message::Text(frame)).await.is_err() {
            return;
        }
    }

    if close_after {
        let _ = ws.close(None).await;
        return;
    }

    loop {
        tokio::select! {
            msg = ws.next() => match msg {
                Some(Ok(msg)) if msg.is_close() => break,
                Some(Ok(_)) => {}
                Some(Err(_)) | None => break,
            },
            _ = shutdown.notified() => break,
        }
    }
}

/// Config pointing at `url` with a short reconnect delay
pub fn config_for(url: String, reconnect_delay_secs: u64) -> DashboardConfig {
    DashboardConfig {
        server_url: url,
        reconnect_delay_secs,
        ..DashboardConfig::default()
    }
}

pub fn new_session() -> DashboardSession<TuiDisplay> {
    DashboardSession::new(TuiDisplay::new(), HistoryLimits::default())
}

/// Pump the supervisor until `done` holds or `timeout` elapses
pub async fn pump_until<F>(
    supervisor: &mut ConnectionSupervisor,
    session: &mut DashboardSession<TuiDisplay>,
    timeout: Duration,
    mut done: F,
) -> bool
where
    F: FnMut(&DashboardSession<TuiDisplay>) -> bool,
{
    let deadline = Instant::now() + timeout;
    loop {
        supervisor.pump(session);
        if done(session) {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
