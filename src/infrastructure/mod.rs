//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Rules: Declarative rule source
//! - Adapters: Platform integrations (Slack RTM, console)

pub mod adapters;
pub mod config;
pub mod rules;
