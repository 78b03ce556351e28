//! Message Routing
//!
//! The router turns raw frames into typed messages and names the route each
//! message travels on. Every route has one handler running on its own
//! thread, so messages on the same route are handled strictly in arrival
//! order.
//!
//! ```text
//! WebSocket → Router::parse → Router::route_key → Channel → Handler thread
//!                                      ↓
//!                         no handler for key → dropped (logged)
//! ```
//!
//! A router may also turn connection lifecycle changes into messages. They
//! are queued on their route behind every frame received before the change,
//! so one handler can observe data and lifecycle as a single ordered stream.

use crate::core::client::ClientEvent;
use crate::{Result, WsMessage};
use std::fmt::Debug;
use std::hash::Hash;

/// Message router that parses WebSocket messages and determines routing
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// enum Route {
///     Feed,
///     Ignored,
/// }
///
/// struct FeedRouter;
///
/// impl MessageRouter for FeedRouter {
///     type Message = FeedEvent;
///     type RouteKey = Route;
///
///     fn parse(&self, message: WsMessage) -> Result<Self::Message> {
///         // Decode JSON into a typed event
///     }
///
///     fn route_key(&self, message: &Self::Message) -> Self::RouteKey {
///         if message.is_known() { Route::Feed } else { Route::Ignored }
///     }
/// }
/// ```
pub trait MessageRouter: Send + Sync + 'static {
    /// The parsed message type
    type Message: Send + Debug + 'static;

    /// The route key type (determines which handler processes the message)
    type RouteKey: Hash + Eq + Clone + Send + Sync + Debug + 'static;

    /// Parse a raw WebSocket message into a typed message
    ///
    /// Called sequentially, in arrival order, for every data frame.
    /// A parse error drops the frame and is logged by the client.
    fn parse(&self, message: WsMessage) -> Result<Self::Message>;

    /// Extract the route key from a parsed message
    ///
    /// A key without a registered handler drops the message.
    fn route_key(&self, message: &Self::Message) -> Self::RouteKey;

    /// Message to route when the connection lifecycle changes
    ///
    /// Called from the client task just before the event is published on
    /// the event channel. `None` (the default) routes nothing.
    fn lifecycle_message(&self, _event: &ClientEvent) -> Option<Self::Message> {
        None
    }
}

/// Message handler that processes typed messages sequentially
///
/// Each handler runs on a dedicated OS thread and receives the messages of
/// its route in the order they arrived on the socket.
pub trait MessageHandler<M>: Send + 'static
where
    M: Send + Debug + 'static,
{
    /// Handle a parsed message
    ///
    /// # Errors
    /// If this returns an error, it will be logged but the handler thread
    /// continues processing subsequent messages.
    fn handle(&mut self, message: M) -> Result<()>;
}
