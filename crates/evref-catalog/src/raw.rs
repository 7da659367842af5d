//! Deserialization-side shapes for the bundled lookup tables.
//!
//! Base event tables and the authored side tables are strict: a shape
//! mismatch there is a deployment error surfaced at load. The ATT&CK
//! technique corpus is third-party derived and deliberately loose; its
//! records are normalized (or dropped) by the technique index builder.

use serde::Deserialize;

/// One base event record from `windows_security.yml` or `sysmon.yml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub official_link: Option<String>,
}

/// One record of the processed ATT&CK technique corpus.
///
/// Two shapes occur in the corpus: newer exports carry a `tactics` array,
/// older ones a scalar `tactic`. Any other field may be missing. Both
/// variants are resolved by a single normalization function in
/// [`crate::technique_index`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTechnique {
    MultiTactic {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        tactics: Vec<String>,
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
    SingleTactic {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        tactic: Option<String>,
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
}
