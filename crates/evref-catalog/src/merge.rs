//! The event merge engine.
//!
//! Joins each base event record with its category, scenarios, key fields,
//! and resolved ATT&CK techniques into a complete [`EventDetail`]. Every
//! lookup is optional by design: a missing side-table entry leaves the
//! field `None`, and the merge itself can never fail. Re-running the merge
//! against the same tables always yields an identical corpus.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{EventDetail, EventSource, KeyLogField, Technique};
use crate::raw::RawEvent;
use crate::technique_index::TechniqueIndex;

/// The id-keyed side tables joined onto base events.
///
/// All tables are keyed by id alone; categories and scenarios are
/// source-agnostic by design, so colliding Windows/Sysmon ids share them.
#[derive(Debug, Clone, Default)]
pub struct SideTables {
    pub categories: BTreeMap<String, String>,
    pub scenarios: BTreeMap<String, Vec<String>>,
    pub key_fields: BTreeMap<String, Vec<KeyLogField>>,
    /// Manual event id → ATT&CK technique id list.
    pub technique_map: BTreeMap<String, Vec<String>>,
}

/// A technique reference that did not resolve against the corpus index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedTechnique {
    pub event_id: String,
    pub technique_id: String,
}

/// Audit output of a merge run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeReport {
    /// Mapped technique ids that were absent from the corpus, in the
    /// order they were encountered.
    pub unresolved_techniques: Vec<UnresolvedTechnique>,
}

/// Merge the two base event lists with their side tables.
///
/// Output order is all Windows Security events followed by all Sysmon
/// events; within each source, base-table order is preserved.
pub fn merge_events(
    windows: &[RawEvent],
    sysmon: &[RawEvent],
    tables: &SideTables,
    index: &TechniqueIndex,
) -> (Vec<EventDetail>, MergeReport) {
    let mut events = Vec::with_capacity(windows.len() + sysmon.len());
    let mut report = MergeReport::default();

    for raw in windows {
        events.push(merge_one(raw, EventSource::WindowsSecurity, tables, index, &mut report));
    }
    for raw in sysmon {
        events.push(merge_one(raw, EventSource::Sysmon, tables, index, &mut report));
    }

    (events, report)
}

fn merge_one(
    raw: &RawEvent,
    source: EventSource,
    tables: &SideTables,
    index: &TechniqueIndex,
    report: &mut MergeReport,
) -> EventDetail {
    EventDetail {
        id: raw.id.clone(),
        source,
        name: raw.name.clone(),
        description: raw.description.clone(),
        official_link: raw.official_link.clone(),
        category: tables.categories.get(&raw.id).cloned(),
        mitre_attack: resolve_techniques(&raw.id, tables, index, report),
        common_scenarios: tables.scenarios.get(&raw.id).cloned(),
        key_log_fields: tables.key_fields.get(&raw.id).cloned(),
    }
}

/// Resolve an event's mapped technique ids against the index.
///
/// Ids absent from the corpus are dropped and recorded in the report. The
/// resolved list is sorted ascending by technique id regardless of map
/// order; an empty result yields `None`, never an empty vec.
fn resolve_techniques(
    event_id: &str,
    tables: &SideTables,
    index: &TechniqueIndex,
    report: &mut MergeReport,
) -> Option<Vec<Technique>> {
    let ids = tables.technique_map.get(event_id)?;

    let mut resolved = Vec::with_capacity(ids.len());
    for technique_id in ids {
        match index.get(technique_id) {
            Some(technique) => resolved.push(technique.clone()),
            None => report.unresolved_techniques.push(UnresolvedTechnique {
                event_id: event_id.to_string(),
                technique_id: technique_id.clone(),
            }),
        }
    }

    if resolved.is_empty() {
        return None;
    }
    resolved.sort_by(|a, b| a.id.cmp(&b.id));
    Some(resolved)
}
