//! HTTP request handlers, one module per resource.

pub mod ai_requests;
pub mod auth;
pub mod fasting;
pub mod profile;
pub mod weight;
