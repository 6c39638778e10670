//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Session loop and identity resolution
//! - Errors: Domain-specific errors
//! - Messaging: Classification, rule resolution, reply generation

pub mod errors;
pub mod messaging;
pub mod services;
