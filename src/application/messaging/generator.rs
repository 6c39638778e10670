//! Reply generator - Turns a matched rule's response into an outgoing payload

use std::collections::HashMap;

use rand::Rng;

use crate::application::errors::BotError;
use crate::domain::entities::{Reply, ResponseSpec};

/// A pre-registered capability invoked to compute a reply dynamically.
/// Receives the matched message text; `None` means nothing to say.
pub type Capability = Box<dyn Fn(&str) -> Option<Reply> + Send + Sync>;

/// Produces outgoing payloads for matched rules
#[derive(Default)]
pub struct ReplyGenerator {
    capabilities: HashMap<String, Capability>,
}

impl ReplyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named capability. A later registration under the same key
    /// replaces the earlier one.
    pub fn register<F>(&mut self, key: impl Into<String>, capability: F)
    where
        F: Fn(&str) -> Option<Reply> + Send + Sync + 'static,
    {
        self.capabilities.insert(key.into(), Box::new(capability));
    }

    /// Pick one candidate uniformly.
    ///
    /// Precondition: `choices` must be non-empty.
    pub fn random_choice(&self, choices: &[String]) -> Reply {
        let index = rand::thread_rng().gen_range(0..choices.len());
        Reply::Plain(choices[index].clone())
    }

    /// Invoke a registered capability with the matched text. An unknown key
    /// yields no reply.
    pub fn delegated(&self, key: &str, text: &str) -> Option<Reply> {
        self.capabilities.get(key).and_then(|capability| capability(text))
    }

    /// Pass a literal response through, shaping structured payloads for the
    /// formatted send path.
    pub fn plain(&self, response: &ResponseSpec) -> Result<Reply, BotError> {
        match response {
            ResponseSpec::Text(text) => Ok(Reply::Plain(text.clone())),
            ResponseSpec::Choices(choices) => Ok(Reply::Plain(choices.join("\n"))),
            ResponseSpec::Payload(payload) => Reply::from_payload(payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn random_choice_is_roughly_uniform_and_in_range() {
        let generator = ReplyGenerator::new();
        let choices: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

        let trials = 600;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..trials {
            let Reply::Plain(picked) = generator.random_choice(&choices) else {
                panic!("random choice is always plain");
            };
            assert!(choices.contains(&picked));
            *counts.entry(picked).or_default() += 1;
        }

        for choice in &choices {
            let count = counts.get(choice).copied().unwrap_or(0);
            assert!(count > trials / 10, "choice {} drawn only {} times", choice, count);
        }
    }

    #[test]
    fn unknown_capability_yields_no_reply() {
        let generator = ReplyGenerator::new();
        assert!(generator.delegated("missing", "hello").is_none());
    }

    #[test]
    fn capability_receives_the_matched_text() {
        let mut generator = ReplyGenerator::new();
        generator.register("shout", |text| Some(Reply::plain(text.to_uppercase())));

        let reply = generator.delegated("shout", "make it loud").unwrap();
        assert_eq!(reply, Reply::Plain("MAKE IT LOUD".to_string()));
    }

    #[test]
    fn capability_may_decline_to_reply() {
        let mut generator = ReplyGenerator::new();
        generator.register("quiet", |_| None);

        assert!(generator.delegated("quiet", "anything").is_none());
    }

    #[test]
    fn plain_mode_passes_literals_through() {
        let generator = ReplyGenerator::new();
        let reply = generator
            .plain(&ResponseSpec::Text("hello!".to_string()))
            .unwrap();
        assert_eq!(reply, Reply::Plain("hello!".to_string()));
    }

    #[test]
    fn plain_mode_rejects_incomplete_payloads() {
        let generator = ReplyGenerator::new();
        let payload = serde_json::json!({"text": "no attachments here"})
            .as_object()
            .cloned()
            .unwrap();

        let err = generator.plain(&ResponseSpec::Payload(payload)).unwrap_err();
        assert!(matches!(err, BotError::SendFormat(_)));
    }
}
