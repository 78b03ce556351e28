//! Integration tests: bot feed → supervisor → session → view model

mod common;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use common::{config_for, new_session, pump_until, MockBot};
use dashboard::application::visualizer::TuiDisplay;
use dashboard::application::LinkState;
use dashboard::{ConnectionSupervisor, DashboardSession, Severity};
use serde_json::json;

fn frames() -> Vec<String> {
    vec![
        json!({
            "type": "status_update",
            "market": "R_100",
            "authorized": true,
            "is_trading": true,
            "consecutive_losses": 4,
            "current_stake": 11.69,
            "stakes": [0.35, 0.60, 1.61, 4.34, 11.69, 31.49]
        }),
        json!({"type": "sequence_update", "sequence": ["G", "R", "R"], "current_trade_index": 2}),
        json!({"type": "trade_update", "market": "T1", "contract_type": "CALL", "stake": 0.35,
               "outcome": "won", "profit": 0.33, "timestamp": "2024-05-01T12:00:00"}),
        json!({"type": "trade_update", "market": "T2", "contract_type": "PUT", "stake": "0.60",
               "outcome": "lost", "profit": -0.6, "timestamp": "2024-05-01T12:00:05"}),
        json!({"type": "balance_update", "balance": 99.73, "change": -0.6}),
        json!({"type": "echo", "data": "ping"}),
        json!({"type": "log", "message": "Bot log line", "level": "success"}),
    ]
    .into_iter()
    .map(|v| v.to_string())
    .collect()
}

#[tokio::test]
async fn test_feed_events_reach_the_display() {
    let mut frames = frames();
    // Garbage between known events must not disturb ordering
    frames.insert(5, "not json {".to_string());
    let bot = MockBot::start(frames, false).await;

    let config = config_for(bot.ws_url(), 5);
    let mut supervisor = ConnectionSupervisor::start(&config, Arc::new(AtomicBool::new(true)))
        .await
        .unwrap();
    let mut session = new_session();

    let done = pump_until(&mut supervisor, &mut session, Duration::from_secs(5), |s| {
        s.logs().iter().any(|l| l.text.ends_with("Bot log line"))
    })
    .await;
    assert!(done, "feed never delivered the log line");
    verbose_println!("  Logs: {:?}", session.logs());

    let display = session.display();
    assert!(display.connected);
    assert_eq!(supervisor.link_state(), LinkState::Connected);

    assert_eq!(display.status.market, "R_100");
    assert_eq!(display.status.round, 5);
    assert_eq!(display.status.current_stake, "$11.69");
    let active: Vec<_> = display.stakes.iter().filter(|c| c.active).map(|c| c.round).collect();
    assert_eq!(active, vec![5]);

    assert_eq!(display.sequence.len(), 3);
    assert!(display.sequence[2].active);

    let markets: Vec<_> = display.trades.iter().map(|t| t.market.as_str()).collect();
    assert_eq!(markets, vec!["T2", "T1"]);
    assert_eq!(display.trades[0].profit, "-$0.60");
    assert_eq!(display.trades[0].stake, "$0.60");
    assert_eq!(display.trades[0].time, "12:00:05");
    assert_eq!(display.stats.wins, 1);
    assert_eq!(display.stats.losses, 1);

    assert_eq!(display.latest_balance(), Some(99.73));
    assert_eq!(display.balance_change, Some(-0.6));

    let newest = &display.logs[0];
    assert!(newest.text.ends_with("Bot log line"));
    assert_eq!(newest.severity, Severity::Success);

    assert_eq!(session.events_applied(), 6);
    let metrics = supervisor.metrics();
    assert_eq!(metrics.messages_received, 8);
    assert_eq!(metrics.messages_dropped, 2);

    supervisor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_server_close_flips_indicator_and_reconnects() {
    let frames = vec![json!({"type": "log", "message": "hello"}).to_string()];
    let bot = MockBot::start(frames, true).await;

    let config = config_for(bot.ws_url(), 1);
    let mut supervisor = ConnectionSupervisor::start(&config, Arc::new(AtomicBool::new(true)))
        .await
        .unwrap();
    let mut session = new_session();

    let closed = pump_until(&mut supervisor, &mut session, Duration::from_secs(5), |s| {
        s.logs()
            .iter()
            .any(|l| l.text.ends_with("Disconnected from server. Reconnecting in 1s..."))
    })
    .await;
    assert!(closed);
    assert!(session.logs().iter().any(|l| l.severity == Severity::Warning));

    let reconnected = pump_until(&mut supervisor, &mut session, Duration::from_secs(5), |_| {
        bot.connection_count() >= 2
    })
    .await;
    assert!(reconnected, "no reconnect after the fixed delay");

    supervisor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_events_before_close_precede_disconnect_in_log_feed() {
    let frames = vec![json!({"type": "log", "message": "Contract LOST! Profit: -0.35"}).to_string()];
    let bot = MockBot::start(frames, true).await;

    // Long delay keeps the client from reconnecting during the test
    let config = config_for(bot.ws_url(), 60);
    let mut supervisor = ConnectionSupervisor::start(&config, Arc::new(AtomicBool::new(true)))
        .await
        .unwrap();
    let mut session = new_session();

    // Let the whole connection play out before applying anything
    tokio::time::sleep(Duration::from_millis(800)).await;
    let applied = supervisor.pump(&mut session);
    verbose_println!("  Applied {} items, logs: {:?}", applied, session.logs());

    let texts: Vec<_> = session.logs().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts.len(), 3, "{:?}", texts);
    assert!(texts[0].ends_with("Disconnected from server. Reconnecting in 60s..."));
    assert!(texts[1].ends_with("Contract LOST! Profit: -0.35"));
    assert!(texts[2].ends_with("Connected to trading bot server"));
    assert!(!session.is_connected());
    assert_eq!(supervisor.link_state(), LinkState::Disconnected);

    supervisor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_server_logs_error_and_retries_on_demand() {
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    // Long delay: only the network-restored signal can trigger the retry in time
    let config = config_for(format!("ws://{}", addr), 60);
    let mut supervisor = ConnectionSupervisor::start(&config, Arc::new(AtomicBool::new(true)))
        .await
        .unwrap();
    let mut session = new_session();

    let count_errors = |s: &DashboardSession<TuiDisplay>| {
        s.logs()
            .iter()
            .filter(|l| l.severity == Severity::Error)
            .count()
    };

    let failed = pump_until(&mut supervisor, &mut session, Duration::from_secs(5), |s| {
        s.logs()
            .iter()
            .any(|l| l.text.contains("Disconnected from server"))
    })
    .await;
    assert!(failed);
    assert_eq!(count_errors(&session), 1);
    assert!(!session.display().connected);
    assert_eq!(supervisor.link_state(), LinkState::Disconnected);

    assert!(supervisor.network_restored());

    let retried = pump_until(&mut supervisor, &mut session, Duration::from_secs(5), |s| {
        count_errors(s) >= 2
    })
    .await;
    assert!(retried, "network-restored signal did not trigger a new attempt");

    supervisor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_network_restored_while_connected_is_noop() {
    let bot = MockBot::start(Vec::new(), false).await;

    let config = config_for(bot.ws_url(), 5);
    let mut supervisor = ConnectionSupervisor::start(&config, Arc::new(AtomicBool::new(true)))
        .await
        .unwrap();
    let mut session = new_session();

    let connected = pump_until(&mut supervisor, &mut session, Duration::from_secs(5), |s| {
        s.is_connected()
    })
    .await;
    assert!(connected);

    assert!(!supervisor.network_restored());
    tokio::time::sleep(Duration::from_millis(200)).await;
    supervisor.pump(&mut session);

    assert!(session.is_connected());
    assert_eq!(bot.connection_count(), 1);

    supervisor.shutdown().await.unwrap();
}
