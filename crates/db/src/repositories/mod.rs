//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod ai_request_repo;
pub mod fasting_session_repo;
pub mod profile_repo;
pub mod session_repo;
pub mod user_repo;
pub mod weight_entry_repo;

pub use ai_request_repo::AiRequestRepo;
pub use fasting_session_repo::FastingSessionRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use weight_entry_repo::WeightEntryRepo;
