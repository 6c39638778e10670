//! retort-bot - a rule-driven reply bot for real-time messaging feeds

pub mod application;
pub mod domain;
pub mod infrastructure;
