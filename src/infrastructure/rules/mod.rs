//! Declarative rule source
//!
//! Rules live in a JSON list of records, each tagged with a `type` that
//! routes it to the passive or active partition.

use std::path::Path;

use crate::application::errors::RuleError;
use crate::domain::entities::{RuleKind, RuleRecord, RuleStore};

/// Load a JSON rule source into the store.
///
/// Records are applied in order and loading stops at the first invalid one;
/// records added before the failure remain in the store.
pub fn load_rules(path: impl AsRef<Path>, store: &mut RuleStore) -> Result<(), RuleError> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<RuleRecord> =
        serde_json::from_str(&content).map_err(|e| RuleError::Malformed(e.to_string()))?;
    load_records(records, store)
}

/// Route parsed records into the store's partitions.
pub fn load_records(records: Vec<RuleRecord>, store: &mut RuleStore) -> Result<(), RuleError> {
    for mut record in records {
        // `type` routes the record; it is not part of the rule itself.
        // Records without a recognized type are skipped.
        let Some(kind) = record.kind.take().as_deref().and_then(RuleKind::from_label) else {
            continue;
        };
        store.add(kind, record)?;
    }
    Ok(())
}
