//! Application services - Business logic orchestration

pub mod identity_service;
pub mod session_service;

pub use identity_service::resolve_identity;
pub use session_service::Session;
