use async_trait::async_trait;
use serde_json::Value;

use crate::application::errors::BotError;
use crate::domain::entities::{Account, InboundEvent};

/// Transport trait - abstraction over the real-time messaging backend
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the handshake. `false` means the session cannot start.
    async fn connect(&mut self) -> bool;

    /// Pull the batch of events buffered since the last poll.
    async fn poll_events(&mut self) -> Result<Vec<InboundEvent>, BotError>;

    /// Send a plain text message to a channel
    async fn send_text(&self, channel: &str, text: &str) -> Result<(), BotError>;

    /// Send a message with attachment data to a channel
    async fn send_formatted(
        &self,
        channel: &str,
        text: &str,
        attachments: &[Value],
    ) -> Result<(), BotError>;

    /// List the accounts known to the workspace
    async fn list_accounts(&self) -> Result<Vec<Account>, BotError>;
}
