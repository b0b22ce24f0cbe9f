//! Event-to-notification routing engine.
//!
//! [`NotificationRouter`] subscribes to the event bus and forwards each
//! user-scoped event to that user's WebSocket connections. AI request
//! events carry the full serialized request document as their payload, so
//! clients can render the update without a follow-up fetch.

use std::sync::Arc;

use axum::extract::ws::Message;
use jejum_events::DomainEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Routes domain events to user WebSocket connections.
pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    /// Create a new router with the given WebSocket manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](jejum_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.route_event(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Forward a single event to its owning user's sockets.
    ///
    /// Events without a user id are server-internal and never forwarded.
    async fn route_event(&self, event: &DomainEvent) {
        let Some(user_id) = event.user_id else {
            return;
        };

        let msg = serde_json::json!({
            "type": "event",
            "event_type": event.event_type,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        let ws_msg = Message::Text(msg.to_string().into());

        let delivered = self.ws_manager.send_to_user(user_id, ws_msg).await;
        tracing::debug!(
            user_id,
            event_type = %event.event_type,
            delivered,
            "Routed event to WebSocket connections"
        );
    }
}
