//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (rules, events, replies, identity)
//! - Traits: Abstractions for infrastructure (Transport)

pub mod entities;
pub mod traits;
