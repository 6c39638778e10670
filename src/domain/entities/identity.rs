use serde::Deserialize;

/// The bot's own account id, used to detect and discard self-authored
/// events before they can start a feedback loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: String,
}

impl BotIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn is_self(&self, user_id: &str) -> bool {
        self.id == user_id
    }
}

/// An account known to the workspace, as listed by the transport
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}
