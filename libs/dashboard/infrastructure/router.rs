//! Bot feed routing
//!
//! Decodes text frames into [`BotEvent`]s for the hypersockets client.
//! Every known event travels on the single `Feed` route, whose handler
//! forwards it to the UI thread; anything unrecognised is routed to
//! `Ignored`, which has no handler, so the client drops it.
//!
//! Link changes ride the `Feed` route too, so the UI thread receives bot
//! events and connects/disconnects as one stream in arrival order.

use crossbeam_channel::Sender;
use hypersockets::{
    ClientEvent, HyperSocketError, MessageHandler, MessageRouter, Result, WsMessage,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::BotEvent;

// ============================================================================
// Router
// ============================================================================

/// Route keys of the bot feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardRoute {
    /// Events the dashboard renders
    Feed,
    /// Unknown or malformed events (no handler registered)
    Ignored,
}

/// One entry of the ordered feed
#[derive(Debug, Clone, PartialEq)]
pub enum FeedItem {
    /// Event decoded from a frame
    Event(BotEvent),
    /// Connection lifecycle change
    Link(ClientEvent),
}

/// Router for the trading bot feed
pub struct BotEventRouter;

impl BotEventRouter {
    /// Decode one text frame
    ///
    /// Non-JSON text is an error. Valid JSON that is not an object, or an
    /// object without a string `type`, decodes to [`BotEvent::Unknown`].
    pub fn decode(text: &str) -> Result<BotEvent> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| HyperSocketError::ParseError(format!("invalid JSON: {}", e)))?;

        let tag = match &value {
            Value::Object(map) => match map.get("type").and_then(Value::as_str) {
                Some(tag) => tag.to_string(),
                None => return Ok(BotEvent::Unknown("missing type".to_string())),
            },
            _ => return Ok(BotEvent::Unknown("non-object payload".to_string())),
        };

        BotEvent::from_tagged(&tag, value)
            .map_err(|e| HyperSocketError::ParseError(format!("malformed {}: {}", tag, e)))
    }
}

impl MessageRouter for BotEventRouter {
    type Message = FeedItem;
    type RouteKey = DashboardRoute;

    fn parse(&self, message: WsMessage) -> Result<Self::Message> {
        let event = match message {
            WsMessage::Text(text) => Self::decode(&text)?,
            WsMessage::Binary(data) => {
                BotEvent::Unknown(format!("binary frame ({} bytes)", data.len()))
            }
        };
        Ok(FeedItem::Event(event))
    }

    fn route_key(&self, message: &Self::Message) -> Self::RouteKey {
        match message {
            FeedItem::Event(BotEvent::Unknown(what)) => {
                debug!("[Router] Ignoring event: {}", what);
                DashboardRoute::Ignored
            }
            _ => DashboardRoute::Feed,
        }
    }

    fn lifecycle_message(&self, event: &ClientEvent) -> Option<Self::Message> {
        Some(FeedItem::Link(event.clone()))
    }
}

// ============================================================================
// Handler
// ============================================================================

/// Forwards the feed to the UI thread
pub struct FeedHandler {
    tx: Sender<FeedItem>,
}

impl FeedHandler {
    pub fn new(tx: Sender<FeedItem>) -> Self {
        Self { tx }
    }
}

impl MessageHandler<FeedItem> for FeedHandler {
    fn handle(&mut self, message: FeedItem) -> Result<()> {
        self.tx.send(message).map_err(|e| {
            warn!("[Router] Feed receiver dropped");
            HyperSocketError::ChannelSend(e.to_string())
        })
    }
}
