//! Row types and DTOs for every table.

pub mod ai_request;
pub mod fasting_session;
pub mod profile;
pub mod session;
pub mod user;
pub mod weight_entry;
