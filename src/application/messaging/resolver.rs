//! Reply resolver - Scans the rule partitions for the first matching rule

use crate::application::errors::BotError;
use crate::domain::entities::{Classification, Reply, ResponseSpec, RuleAction, RuleKind, RuleStore};

use super::generator::ReplyGenerator;

/// Resolves classified messages against the rule store and delegates reply
/// generation to the matched rule's action
pub struct ReplyResolver {
    rules: RuleStore,
    generator: ReplyGenerator,
}

impl ReplyResolver {
    pub fn new(rules: RuleStore, generator: ReplyGenerator) -> Self {
        Self { rules, generator }
    }

    /// Find the reply for a classified message, if any.
    ///
    /// A message without a channel cannot be replied to, and no match is the
    /// normal "nothing to say" outcome; both come back as `Ok(None)`.
    pub fn resolve(&self, classified: &Classification) -> Result<Option<Reply>, BotError> {
        let (Some(text), Some(_)) = (classified.text.as_deref(), classified.channel.as_deref())
        else {
            return Ok(None);
        };

        let kind = if classified.active {
            RuleKind::Active
        } else {
            RuleKind::Passive
        };

        for rule in self.rules.rules(kind) {
            if !rule.matches(text) {
                continue;
            }

            return match rule.action() {
                RuleAction::Random => match rule.response() {
                    ResponseSpec::Choices(choices) => {
                        Ok(Some(self.generator.random_choice(choices)))
                    }
                    // A lone literal is a degenerate one-element choice.
                    other => self.generator.plain(other).map(Some),
                },
                RuleAction::Function => match rule.response() {
                    ResponseSpec::Text(key) => Ok(self.generator.delegated(key, text)),
                    // A capability key must be a bare string.
                    _ => Ok(None),
                },
                RuleAction::Message | RuleAction::Other => {
                    self.generator.plain(rule.response()).map(Some)
                }
            };
        }

        Ok(None)
    }
}
