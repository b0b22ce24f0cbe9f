//! In-process event system.
//!
//! - [`EventBus`] -- publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`DomainEvent`] -- the canonical event envelope.
//!
//! The API crate publishes an event for every state change worth observing
//! (fast lifecycle, weight log, AI request transitions); the notification
//! router subscribes and forwards the relevant ones over WebSocket.

pub mod bus;

pub use bus::{DomainEvent, EventBus};
