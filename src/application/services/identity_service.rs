use crate::application::errors::BotError;
use crate::domain::entities::{Account, BotIdentity};
use crate::domain::traits::Transport;

/// Resolve the bot's own account id.
///
/// A configured id wins outright; otherwise the configured display name is
/// looked up in the transport's account list. A deleted or missing account
/// is fatal at startup.
pub async fn resolve_identity<T: Transport>(
    transport: &T,
    configured_id: Option<&str>,
    configured_name: Option<&str>,
) -> Result<BotIdentity, BotError> {
    if let Some(id) = configured_id.filter(|id| !id.is_empty()) {
        return Ok(BotIdentity::new(id));
    }

    let Some(name) = configured_name.filter(|name| !name.is_empty()) else {
        return Err(BotError::Identity(
            "neither bot id nor bot name configured".to_string(),
        ));
    };

    let accounts = transport.list_accounts().await?;
    find_by_name(&accounts, name)
}

fn find_by_name(accounts: &[Account], name: &str) -> Result<BotIdentity, BotError> {
    for account in accounts {
        if account.name.as_deref() == Some(name) {
            if account.deleted {
                return Err(BotError::Identity(format!(
                    "bot account {} has been deleted",
                    name
                )));
            }
            return Ok(BotIdentity::new(account.id.clone()));
        }
    }

    Err(BotError::Identity(format!("bot account {} not found", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, name: &str, deleted: bool) -> Account {
        Account {
            id: id.to_string(),
            name: Some(name.to_string()),
            deleted,
        }
    }

    #[test]
    fn lookup_by_name_returns_the_account_id() {
        let accounts = [account("U1", "otherbot", false), account("U2", "retort", false)];
        let identity = find_by_name(&accounts, "retort").unwrap();
        assert_eq!(identity.id, "U2");
    }

    #[test]
    fn deleted_account_is_fatal() {
        let accounts = [account("U2", "retort", true)];
        let err = find_by_name(&accounts, "retort").unwrap_err();
        assert!(matches!(err, BotError::Identity(_)));
    }

    #[test]
    fn unknown_name_is_fatal() {
        let accounts = [account("U1", "otherbot", false)];
        let err = find_by_name(&accounts, "retort").unwrap_err();
        assert!(matches!(err, BotError::Identity(_)));
    }
}
