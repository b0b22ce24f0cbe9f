//! AI features: fasting time suggestions and meal plan generation.
//!
//! The API crate enqueues requests into the `ai_requests` table; the
//! [`Dispatcher`] claims them one at a time, renders a prompt, calls the
//! configured [`CompletionClient`], and writes the parsed output (or error)
//! back to the row, publishing an event on every transition.

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod prompts;
pub mod schema;

pub use client::{CompletionClient, HttpCompletionClient};
pub use dispatcher::Dispatcher;
pub use error::AiError;
