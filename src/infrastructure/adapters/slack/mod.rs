//! Slack RTM adapter

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::application::errors::BotError;
use crate::domain::entities::{Account, InboundEvent};
use crate::domain::traits::Transport;

/// Slack Web API base URL
const API_BASE: &str = "https://slack.com/api";

/// How long each poll waits on the socket before handing back to the loop
const READ_DEADLINE: Duration = Duration::from_millis(200);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Slack adapter: Web API for sends and account listing, RTM WebSocket for
/// the event feed
pub struct SlackAdapter {
    token: String,
    client: Client,
    socket: Option<WsStream>,
}

impl SlackAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            socket: None,
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/{}", API_BASE, method)
    }

    /// Ask the Web API for the RTM socket URL
    async fn rtm_url(&self) -> Result<String, BotError> {
        #[derive(Deserialize)]
        struct Response {
            ok: bool,
            url: Option<String>,
            error: Option<String>,
        }

        let response = self
            .client
            .get(self.api_url("rtm.connect"))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        if !data.ok {
            return Err(BotError::Connection(
                data.error.unwrap_or_else(|| "rtm.connect refused".to_string()),
            ));
        }
        data.url
            .ok_or_else(|| BotError::Parse("rtm.connect returned no socket url".to_string()))
    }

    async fn post_message(&self, body: &Value) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct Response {
            ok: bool,
            error: Option<String>,
        }

        let response = self
            .client
            .post(self.api_url("chat.postMessage"))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Slack API error: {}",
                response.status()
            )));
        }

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        if !data.ok {
            return Err(BotError::Network(
                data.error
                    .unwrap_or_else(|| "chat.postMessage failed".to_string()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for SlackAdapter {
    async fn connect(&mut self) -> bool {
        let url = match self.rtm_url().await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("RTM handshake failed: {}", e);
                return false;
            }
        };

        match connect_async(&url).await {
            Ok((socket, _)) => {
                self.socket = Some(socket);
                true
            }
            Err(e) => {
                tracing::error!("WebSocket dial failed: {}", e);
                false
            }
        }
    }

    async fn poll_events(&mut self) -> Result<Vec<InboundEvent>, BotError> {
        let socket = self
            .socket
            .as_mut()
            .ok_or_else(|| BotError::Connection("not connected".to_string()))?;

        let mut events = Vec::new();
        loop {
            match tokio::time::timeout(READ_DEADLINE, socket.next()).await {
                Ok(Some(Ok(WsMessage::Text(frame)))) => {
                    // Frames that don't decode as events are dropped.
                    if let Ok(event) = serde_json::from_str::<InboundEvent>(&frame) {
                        events.push(event);
                    }
                }
                // Control frames carry no events.
                Ok(Some(Ok(_))) => continue,
                Ok(Some(Err(e))) => return Err(BotError::Network(e.to_string())),
                Ok(None) => {
                    return Err(BotError::Connection("event stream closed".to_string()))
                }
                // Nothing buffered right now; hand the batch back.
                Err(_) => break,
            }
        }
        Ok(events)
    }

    async fn send_text(&self, channel: &str, text: &str) -> Result<(), BotError> {
        self.post_message(&serde_json::json!({
            "channel": channel,
            "text": text,
            "as_user": true,
        }))
        .await
    }

    async fn send_formatted(
        &self,
        channel: &str,
        text: &str,
        attachments: &[Value],
    ) -> Result<(), BotError> {
        // The attachments field travels as a JSON-encoded string.
        let encoded =
            serde_json::to_string(attachments).map_err(|e| BotError::Parse(e.to_string()))?;
        self.post_message(&serde_json::json!({
            "channel": channel,
            "text": text,
            "as_user": true,
            "attachments": encoded,
        }))
        .await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, BotError> {
        #[derive(Deserialize)]
        struct Response {
            ok: bool,
            members: Option<Vec<Account>>,
            error: Option<String>,
        }

        let response = self
            .client
            .get(self.api_url("users.list"))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        if !data.ok {
            return Err(BotError::Network(
                data.error.unwrap_or_else(|| "users.list failed".to_string()),
            ));
        }
        Ok(data.members.unwrap_or_default())
    }
}
