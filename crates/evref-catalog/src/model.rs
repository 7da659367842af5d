//! Boundary types for the merged event reference corpus.
//!
//! Everything here is constructed once by the merge engine and is read-only
//! afterwards. Fields that may be absent for a given event are `Option`s and
//! stay key-absent when serialized, so consumers can distinguish "no value"
//! from "empty value" without probing for sentinels.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Event source
// =============================================================================

/// The logging subsystem an event belongs to.
///
/// Part of an event's compound identity: Windows Security and Sysmon event
/// numbering overlaps, so an id alone does not identify an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventSource {
    #[serde(rename = "Windows Security")]
    WindowsSecurity,
    Sysmon,
    Other,
}

impl EventSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventSource::WindowsSecurity => "Windows Security",
            EventSource::Sysmon => "Sysmon",
            EventSource::Other => "Other",
        }
    }

    /// Parse a source name, accepting the display form and common
    /// lowercase/hyphenated spellings from CLI flags.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Windows Security" | "windows-security" | "windows" | "security" => {
                Some(EventSource::WindowsSecurity)
            }
            "Sysmon" | "sysmon" => Some(EventSource::Sysmon),
            "Other" | "other" => Some(EventSource::Other),
            _ => None,
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Techniques and key fields
// =============================================================================

/// A MITRE ATT&CK technique record, normalized from the processed corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Technique {
    /// Technique id, `T####` or `T####.###`.
    pub id: String,
    pub name: String,
    /// Tactic name(s); multiple tactics are joined with ", ".
    pub tactic: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A field name / meaning pair shown in an event's key-log-fields table.
///
/// No identity beyond its position in the event's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLogField {
    pub field: String,
    pub description: String,
}

// =============================================================================
// Merged event record
// =============================================================================

/// The complete merged record for one documented event.
///
/// `category`, `mitre_attack`, `common_scenarios`, and `key_log_fields` are
/// attached only when the corresponding side-table lookup resolves;
/// `mitre_attack` is `None` when no mapped technique resolves, never
/// `Some(vec![])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetail {
    /// String form of the numeric event id. Unique only per source.
    pub id: String,
    pub source: EventSource,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Resolved technique records, sorted ascending by technique id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mitre_attack: Option<Vec<Technique>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_scenarios: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_log_fields: Option<Vec<KeyLogField>>,
}

// =============================================================================
// Enhanced content
// =============================================================================

/// Long-form analyst enrichment keyed by event id.
///
/// Authored in partitioned tables separate from the core merge; an event
/// either has a full record here or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedContent {
    pub quick_answer: String,
    pub detailed_explanation: String,
    pub security_implications: Vec<String>,
    pub detection_strategies: String,
    pub real_world_examples: Vec<String>,
    /// Ids of related events worth pivoting to.
    #[serde(default)]
    pub related_events: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_note: Option<String>,
}
