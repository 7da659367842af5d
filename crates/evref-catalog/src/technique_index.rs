//! Technique index builder.
//!
//! Normalizes the loosely-typed ATT&CK corpus into an id-keyed lookup.
//! Malformed records never fail the build: records without an id are
//! excluded from the index and returned on a side channel so data quality
//! stays auditable without changing runtime behavior.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::Technique;
use crate::raw::RawTechnique;

/// Sentinel id assigned to corpus records that carry none. Records
/// resolving to it are excluded from the index.
pub const UNKNOWN_ID: &str = "Unknown ID";

const UNKNOWN_NAME: &str = "Unknown Name";
const UNKNOWN_TACTIC: &str = "Unknown Tactic";

/// A corpus record excluded during index construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedTechnique {
    /// Zero-based position of the record in the corpus.
    pub position: usize,
    /// Name carried by the record, if it had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Id-keyed lookup of normalized techniques.
#[derive(Debug, Default)]
pub struct TechniqueIndex {
    by_id: HashMap<String, Technique>,
}

impl TechniqueIndex {
    /// Build the index from the raw corpus.
    ///
    /// Records without an id are dropped and reported; a later record with
    /// the same id as an earlier one replaces it. Insertion order is
    /// otherwise irrelevant, the index is lookup-only.
    pub fn build(corpus: &[RawTechnique]) -> (Self, Vec<DroppedTechnique>) {
        let mut by_id = HashMap::new();
        let mut dropped = Vec::new();

        for (position, raw) in corpus.iter().enumerate() {
            let technique = normalize(raw);
            if technique.id == UNKNOWN_ID {
                let name = (technique.name != UNKNOWN_NAME).then(|| technique.name.clone());
                dropped.push(DroppedTechnique { position, name });
                continue;
            }
            by_id.insert(technique.id.clone(), technique);
        }

        (TechniqueIndex { by_id }, dropped)
    }

    /// Look up a normalized technique by id.
    pub fn get(&self, id: &str) -> Option<&Technique> {
        self.by_id.get(id)
    }

    /// Number of techniques in the index.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Resolve either raw corpus shape into a normalized [`Technique`].
///
/// `tactic` is the `tactics` array joined with ", " when present, the
/// scalar `tactic` otherwise, and a sentinel when neither is carried.
fn normalize(raw: &RawTechnique) -> Technique {
    let (id, name, tactic, url, description) = match raw {
        RawTechnique::MultiTactic {
            id,
            name,
            tactics,
            url,
            description,
        } => (id, name, tactics.join(", "), url, description),
        RawTechnique::SingleTactic {
            id,
            name,
            tactic,
            url,
            description,
        } => (
            id,
            name,
            tactic.clone().unwrap_or_else(|| UNKNOWN_TACTIC.to_string()),
            url,
            description,
        ),
    };

    let id = id.clone().unwrap_or_else(|| UNKNOWN_ID.to_string());
    let url = url.clone().unwrap_or_else(|| default_url(&id));
    Technique {
        name: name.clone().unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        tactic,
        url,
        description: description.clone(),
        id,
    }
}

/// Canonical MITRE page for a technique id (`T1055.012` → `T1055/012`).
fn default_url(id: &str) -> String {
    format!("https://attack.mitre.org/techniques/{}/", id.replace('.', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(json: &str) -> Vec<RawTechnique> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn joins_tactics_array() {
        let raw = corpus(
            r#"[{"id": "T1078", "name": "Valid Accounts",
                 "tactics": ["Defense Evasion", "Persistence", "Initial Access"],
                 "url": "https://attack.mitre.org/techniques/T1078/"}]"#,
        );
        let (index, dropped) = TechniqueIndex::build(&raw);
        assert!(dropped.is_empty());
        let t = index.get("T1078").unwrap();
        assert_eq!(t.tactic, "Defense Evasion, Persistence, Initial Access");
    }

    #[test]
    fn accepts_scalar_tactic() {
        let raw = corpus(r#"[{"id": "T1110", "name": "Brute Force", "tactic": "Credential Access"}]"#);
        let (index, _) = TechniqueIndex::build(&raw);
        assert_eq!(index.get("T1110").unwrap().tactic, "Credential Access");
    }

    #[test]
    fn missing_tactic_gets_sentinel() {
        let raw = corpus(r#"[{"id": "T9998", "name": "No Tactic"}]"#);
        let (index, _) = TechniqueIndex::build(&raw);
        assert_eq!(index.get("T9998").unwrap().tactic, UNKNOWN_TACTIC);
    }

    #[test]
    fn missing_id_drops_record_without_error() {
        let raw = corpus(
            r#"[{"name": "Orphan", "tactic": "Execution"},
                {"id": "T1059", "name": "Command and Scripting Interpreter", "tactic": "Execution"}]"#,
        );
        let (index, dropped) = TechniqueIndex::build(&raw);
        assert_eq!(index.len(), 1);
        assert_eq!(
            dropped,
            vec![DroppedTechnique {
                position: 0,
                name: Some("Orphan".into()),
            }]
        );
        assert!(index.get(UNKNOWN_ID).is_none());
    }

    #[test]
    fn missing_url_defaults_to_canonical_page() {
        let raw = corpus(r#"[{"id": "T1055.012", "name": "Process Hollowing", "tactic": "Defense Evasion"}]"#);
        let (index, _) = TechniqueIndex::build(&raw);
        assert_eq!(
            index.get("T1055.012").unwrap().url,
            "https://attack.mitre.org/techniques/T1055/012/"
        );
    }

    #[test]
    fn later_duplicate_id_replaces_earlier() {
        let raw = corpus(
            r#"[{"id": "T1078", "name": "Old Name", "tactic": "Persistence"},
                {"id": "T1078", "name": "Valid Accounts", "tactic": "Persistence"}]"#,
        );
        let (index, dropped) = TechniqueIndex::build(&raw);
        assert!(dropped.is_empty());
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("T1078").unwrap().name, "Valid Accounts");
    }
}
