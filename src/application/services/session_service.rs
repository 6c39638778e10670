use std::time::Duration;

use crate::application::errors::BotError;
use crate::application::messaging::{MessageClassifier, ReplyResolver};
use crate::domain::entities::Reply;
use crate::domain::traits::Transport;

/// Drives the poll -> classify -> resolve -> send cycle against a transport.
///
/// Single logical task: the rule store is read-only once the session starts,
/// and the idle delay is the only intentional suspension point besides
/// transport IO.
pub struct Session<T: Transport> {
    transport: T,
    classifier: MessageClassifier,
    resolver: ReplyResolver,
    idle: Duration,
}

impl<T: Transport> Session<T> {
    pub fn new(
        transport: T,
        classifier: MessageClassifier,
        resolver: ReplyResolver,
        idle: Duration,
    ) -> Self {
        Self {
            transport,
            classifier,
            resolver,
            idle,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Connect and listen until an unrecoverable error surfaces. A refused
    /// handshake is fatal; retry policy belongs to the caller.
    pub async fn start(&mut self) -> Result<(), BotError> {
        if !self.transport.connect().await {
            return Err(BotError::Connection(
                "transport handshake failed".to_string(),
            ));
        }

        tracing::info!("Connected, listening for events");
        self.listen().await
    }

    async fn listen(&mut self) -> Result<(), BotError> {
        loop {
            let events = self.transport.poll_events().await?;
            if !events.is_empty() {
                tracing::debug!("Received {} events", events.len());
            }

            let classified = self.classifier.classify(&events);
            if let Some(reply) = self.resolver.resolve(&classified)? {
                // resolve only produces a reply when a channel is present
                let channel = classified.channel.as_deref().unwrap_or_default();
                tracing::debug!(
                    "Replying to message received at {}",
                    classified.received_at
                );
                self.send(channel, &reply).await?;
            }

            tokio::time::sleep(self.idle).await;
        }
    }

    async fn send(&self, channel: &str, reply: &Reply) -> Result<(), BotError> {
        match reply {
            Reply::Plain(text) => {
                tracing::info!("Sending reply to {}", channel);
                self.transport.send_text(channel, text).await
            }
            Reply::Formatted(formatted) => {
                tracing::info!("Sending formatted reply to {}", channel);
                self.transport
                    .send_formatted(channel, &formatted.text, &formatted.attachments)
                    .await
            }
        }
    }
}
