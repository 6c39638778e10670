//! Message classifier - Decides which inbound event, if any, deserves a reply

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::domain::entities::{BotIdentity, Classification, InboundEvent};

/// An explicit @-mention token at the very start of the text
static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<@(\w+)>").expect("mention pattern compiles"));

/// Inspects raw event batches and extracts at most one message per cycle
pub struct MessageClassifier {
    identity: BotIdentity,
}

impl MessageClassifier {
    pub fn new(identity: BotIdentity) -> Self {
        Self { identity }
    }

    /// Classify one polling cycle's worth of raw events.
    ///
    /// The first event that yields usable text decides the outcome: a
    /// mention of the bot makes the message active, an unaddressed message
    /// makes it passive, and a mention of someone else yields nothing and
    /// moves on to the next event. A self-authored text event drops the
    /// remainder of the batch.
    pub fn classify(&self, events: &[InboundEvent]) -> Classification {
        let mut out = Classification::empty();

        for event in events {
            let Some(text) = event.text.as_deref() else {
                continue;
            };

            if event.user.as_deref().is_some_and(|u| self.identity.is_self(u)) {
                return out;
            }

            // Channel is captured from any text-bearing event, even one
            // that yields no message.
            out.channel = event.channel.clone();

            match MENTION.captures(text) {
                Some(caps) => {
                    let token_end = caps.get(0).map_or(0, |m| m.end());
                    let mentioned = caps.get(1).map_or("", |m| m.as_str());
                    if self.identity.is_self(mentioned) {
                        out.text = Some(text[token_end..].trim().to_lowercase());
                        out.active = true;
                        return out;
                    }
                    // Addressed to someone else; not ours to answer.
                }
                None => {
                    out.text = Some(text.trim().to_lowercase());
                    out.active = false;
                    return out;
                }
            }
        }

        out
    }
}
