use regex_lite::RegexBuilder;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::application::errors::RuleError;

/// What a matched rule does with its response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Message,
    Random,
    Function,
    #[serde(other)]
    Other,
}

/// Response attached to a rule: a literal, an ordered list of candidates,
/// or a structured payload destined for the formatted send path
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseSpec {
    Text(String),
    Choices(Vec<String>),
    Payload(Map<String, Value>),
}

/// Which partition a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Passive,
    Active,
}

impl RuleKind {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "passive" => Some(RuleKind::Passive),
            "active" => Some(RuleKind::Active),
            _ => None,
        }
    }
}

/// A rule record as it appears in the declarative source, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RuleRecord {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub pattern: Option<String>,
    pub response: Option<ResponseSpec>,
    pub action: Option<RuleAction>,
}

/// A validated reply rule. Immutable once stored.
#[derive(Debug, Clone)]
pub struct ReplyRule {
    pattern: regex_lite::Regex,
    response: ResponseSpec,
    action: RuleAction,
}

impl ReplyRule {
    /// A rule matches when its pattern matches a prefix of the text.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.find(text).is_some_and(|m| m.start() == 0)
    }

    pub fn response(&self) -> &ResponseSpec {
        &self.response
    }

    pub fn action(&self) -> RuleAction {
        self.action
    }
}

/// Ordered reply rules, partitioned into passive and active collections.
/// First match wins; identical patterns may coexist.
#[derive(Debug, Default)]
pub struct RuleStore {
    passive: Vec<ReplyRule>,
    active: Vec<ReplyRule>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a record and append it to the named partition.
    ///
    /// `pattern` and `response` are required; `action` defaults to
    /// `message`. A failed add leaves the store unmodified.
    pub fn add(&mut self, kind: RuleKind, record: RuleRecord) -> Result<(), RuleError> {
        let pattern = record.pattern.ok_or(RuleError::MissingField("pattern"))?;
        let response = record.response.ok_or(RuleError::MissingField("response"))?;

        let compiled = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| RuleError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;

        self.partition_mut(kind).push(ReplyRule {
            pattern: compiled,
            response,
            action: record.action.unwrap_or(RuleAction::Message),
        });
        Ok(())
    }

    pub fn rules(&self, kind: RuleKind) -> &[ReplyRule] {
        match kind {
            RuleKind::Passive => &self.passive,
            RuleKind::Active => &self.active,
        }
    }

    fn partition_mut(&mut self, kind: RuleKind) -> &mut Vec<ReplyRule> {
        match kind {
            RuleKind::Passive => &mut self.passive,
            RuleKind::Active => &mut self.active,
        }
    }

    pub fn len(&self) -> usize {
        self.passive.len() + self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passive.is_empty() && self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pattern: Option<&str>, response: Option<ResponseSpec>) -> RuleRecord {
        RuleRecord {
            kind: None,
            pattern: pattern.map(String::from),
            response,
            action: None,
        }
    }

    #[test]
    fn add_defaults_action_to_message() {
        let mut store = RuleStore::new();
        store
            .add(
                RuleKind::Passive,
                record(Some("^hi"), Some(ResponseSpec::Text("hello!".into()))),
            )
            .unwrap();

        assert_eq!(store.rules(RuleKind::Passive)[0].action(), RuleAction::Message);
        assert!(store.rules(RuleKind::Active).is_empty());
    }

    #[test]
    fn missing_pattern_is_rejected() {
        let mut store = RuleStore::new();
        let err = store
            .add(
                RuleKind::Passive,
                record(None, Some(ResponseSpec::Text("hello!".into()))),
            )
            .unwrap_err();

        assert!(matches!(err, RuleError::MissingField("pattern")));
        assert!(store.is_empty());
    }

    #[test]
    fn missing_response_is_rejected() {
        let mut store = RuleStore::new();
        let err = store
            .add(RuleKind::Active, record(Some("^hi"), None))
            .unwrap_err();

        assert!(matches!(err, RuleError::MissingField("response")));
        assert!(store.is_empty());
    }

    #[test]
    fn bad_pattern_is_rejected_at_add_time() {
        let mut store = RuleStore::new();
        let err = store
            .add(
                RuleKind::Passive,
                record(Some("(unclosed"), Some(ResponseSpec::Text("x".into()))),
            )
            .unwrap_err();

        assert!(matches!(err, RuleError::InvalidPattern { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_patterns_coexist_in_order() {
        let mut store = RuleStore::new();
        store
            .add(
                RuleKind::Passive,
                record(Some("^hi"), Some(ResponseSpec::Text("first".into()))),
            )
            .unwrap();
        store
            .add(
                RuleKind::Passive,
                record(Some("^hi"), Some(ResponseSpec::Text("second".into()))),
            )
            .unwrap();

        let rules = store.rules(RuleKind::Passive);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].response(), &ResponseSpec::Text("first".into()));
    }

    #[test]
    fn matching_is_case_insensitive_and_prefix_anchored() {
        let mut store = RuleStore::new();
        store
            .add(
                RuleKind::Passive,
                record(Some("^hello"), Some(ResponseSpec::Text("hi".into()))),
            )
            .unwrap();

        let rule = &store.rules(RuleKind::Passive)[0];
        assert!(rule.matches("HELLO there"));
        assert!(rule.matches("hello"));
        assert!(!rule.matches("say hello"));
    }

    #[test]
    fn unknown_action_deserializes_to_other() {
        let record: RuleRecord = serde_json::from_str(
            r#"{"pattern": "^hi", "response": "x", "action": "broadcast"}"#,
        )
        .unwrap();
        assert_eq!(record.action, Some(RuleAction::Other));
    }
}
