//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Identity error: {0}")]
    Identity(String),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Reply payload missing required field `{0}`")]
    SendFormat(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Rule store and rule source errors
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Rule is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("Invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to read rule source: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("Failed to parse rule source: {0}")]
    Malformed(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
