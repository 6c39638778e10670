//! Console adapter for development/testing

use async_trait::async_trait;
use serde_json::Value;
use std::io::Write;

use crate::application::errors::BotError;
use crate::domain::entities::{Account, InboundEvent};
use crate::domain::traits::Transport;

/// Console transport for local development: stdin lines become passive
/// events on a single synthetic channel, sends print to stdout
pub struct ConsoleAdapter {
    bot_name: String,
    channel: String,
}

impl ConsoleAdapter {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
            channel: "console".to_string(),
        }
    }
}

#[async_trait]
impl Transport for ConsoleAdapter {
    async fn connect(&mut self) -> bool {
        tracing::info!("Starting console transport (dev mode)");
        true
    }

    async fn poll_events(&mut self) -> Result<Vec<InboundEvent>, BotError> {
        print!("> ");
        std::io::stdout()
            .flush()
            .map_err(|e| BotError::Network(e.to_string()))?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .map_err(|e| BotError::Network(e.to_string()))?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![InboundEvent::message(
            "console-user",
            self.channel.clone(),
            input,
        )])
    }

    async fn send_text(&self, _channel: &str, text: &str) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        Ok(())
    }

    async fn send_formatted(
        &self,
        _channel: &str,
        text: &str,
        attachments: &[Value],
    ) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        for attachment in attachments {
            println!("  [Attachment] {}", attachment);
        }
        Ok(())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, BotError> {
        // One synthetic account so name-based identity resolution works.
        Ok(vec![Account {
            id: "console-bot".to_string(),
            name: Some(self.bot_name.clone()),
            deleted: false,
        }])
    }
}
