//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub rules: RulesConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    /// Display name, used for identity resolution when no id is configured
    pub name: String,
    pub token: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RulesConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionConfig {
    /// Idle delay between polling cycles
    pub poll_delay_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "retort-bot".to_string(),
                token: None,
                id: None,
            },
            rules: RulesConfig {
                path: PathBuf::from("rules.json"),
            },
            session: SessionConfig { poll_delay_secs: 1 },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(token) = std::env::var("BOT_TOKEN") {
            config.bot.token = Some(token);
        }
        if let Ok(id) = std::env::var("BOT_ID") {
            config.bot.id = Some(id);
        }
        if let Ok(name) = std::env::var("BOT_NAME") {
            config.bot.name = name;
        }
        if let Ok(path) = std::env::var("RULES_PATH") {
            config.rules.path = PathBuf::from(path);
        }

        config
    }

    pub fn poll_delay(&self) -> Duration {
        Duration::from_secs(self.session.poll_delay_secs)
    }
}
