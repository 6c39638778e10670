//! Domain entities - Core business objects

pub mod identity;
pub mod message;
pub mod rule;

pub use identity::{Account, BotIdentity};
pub use message::{Classification, FormattedReply, InboundEvent, Reply};
pub use rule::{ReplyRule, ResponseSpec, RuleAction, RuleKind, RuleRecord, RuleStore};
