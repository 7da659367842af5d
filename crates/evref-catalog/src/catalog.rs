//! The loaded, immutable event reference corpus and its query façade.
//!
//! A [`Catalog`] is constructed explicitly — from the bundled tables via
//! [`Catalog::load`], or from injected tables via [`Catalog::from_tables`]
//! — and is read-only afterwards. There is no module-level state; every
//! reader holds a reference to the catalog it queries.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{CatalogError, Result};
use crate::merge::{SideTables, UnresolvedTechnique, merge_events};
use crate::model::{EnhancedContent, EventDetail};
use crate::raw::{RawEvent, RawTechnique};
use crate::technique_index::{DroppedTechnique, TechniqueIndex};

/// Curated "most exploited" ranking. Position in this list is the rank
/// shown to users; it is editorial, not computed.
const TOP_EXPLOITED_IDS: &[&str] = &[
    "4624", "4625", "4688", "4720", "4672", "4732", "1102", "4698", "1", "3",
];

// =============================================================================
// Raw tables
// =============================================================================

/// Every raw table needed to construct a catalog.
///
/// [`RawTables::bundled`] parses the tables compiled into the crate; tests
/// construct their own instances directly.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub windows: Vec<RawEvent>,
    pub sysmon: Vec<RawEvent>,
    pub side_tables: SideTables,
    pub techniques: Vec<RawTechnique>,
    /// Enhanced-content partitions, merged in order. On a duplicate id
    /// the last partition wins.
    pub enhanced_partitions: Vec<BTreeMap<String, EnhancedContent>>,
    /// Curated ranking, most exploited first.
    pub top_exploited: Vec<String>,
}

impl RawTables {
    /// Parse the data tables bundled into the crate.
    ///
    /// A structurally invalid table is a deployment error and fails here;
    /// per-record incompleteness never does.
    pub fn bundled() -> Result<Self> {
        Ok(RawTables {
            windows: parse_table("windows_security", include_str!("../data/windows_security.yml"))?,
            sysmon: parse_table("sysmon", include_str!("../data/sysmon.yml"))?,
            side_tables: SideTables {
                categories: parse_table("categories", include_str!("../data/categories.yml"))?,
                scenarios: parse_table("scenarios", include_str!("../data/scenarios.yml"))?,
                key_fields: parse_table("key_fields", include_str!("../data/key_fields.yml"))?,
                technique_map: parse_table(
                    "technique_map",
                    include_str!("../data/technique_map.yml"),
                )?,
            },
            techniques: serde_json::from_str(include_str!("../data/attack_techniques.json"))?,
            // Partition order is load-bearing: accounts first, activity
            // second, so activity wins any id collision.
            enhanced_partitions: vec![
                parse_table("enhanced/accounts", include_str!("../data/enhanced/accounts.yml"))?,
                parse_table("enhanced/activity", include_str!("../data/enhanced/activity.yml"))?,
            ],
            top_exploited: TOP_EXPLOITED_IDS.iter().map(|id| id.to_string()).collect(),
        })
    }
}

fn parse_table<T: DeserializeOwned>(table: &'static str, text: &str) -> Result<T> {
    serde_yaml::from_str(text).map_err(|source| CatalogError::Table { table, source })
}

// =============================================================================
// Load report
// =============================================================================

/// Data-quality audit accumulated while building a catalog.
///
/// Construction never fails for incomplete data; everything dropped or
/// overridden on the way is recorded here instead, so operators can audit
/// the tables without changing runtime behavior.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Corpus records excluded by the technique index (missing id).
    pub dropped_techniques: Vec<DroppedTechnique>,
    /// Mapped technique ids absent from the corpus.
    pub unresolved_techniques: Vec<UnresolvedTechnique>,
    /// Event ids whose enhanced content was overridden by a later partition.
    pub enhanced_overrides: Vec<String>,
}

impl LoadReport {
    /// True when the tables produced no drops or overrides.
    pub fn is_clean(&self) -> bool {
        self.dropped_techniques.is_empty()
            && self.unresolved_techniques.is_empty()
            && self.enhanced_overrides.is_empty()
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The merged, read-only event reference corpus.
#[derive(Debug)]
pub struct Catalog {
    events: Vec<EventDetail>,
    enhanced: BTreeMap<String, EnhancedContent>,
    top_exploited: Vec<String>,
    report: LoadReport,
}

impl Catalog {
    /// Load the catalog from the bundled data tables.
    pub fn load() -> Result<Self> {
        Ok(Self::from_tables(RawTables::bundled()?))
    }

    /// Build a catalog from explicit tables.
    ///
    /// Pure and deterministic: the same tables always produce an identical
    /// catalog, and nothing short of the tables themselves failing to parse
    /// (handled upstream) can make this fail.
    pub fn from_tables(tables: RawTables) -> Self {
        let (index, dropped_techniques) = TechniqueIndex::build(&tables.techniques);
        let (events, merge_report) = merge_events(
            &tables.windows,
            &tables.sysmon,
            &tables.side_tables,
            &index,
        );

        let mut enhanced = BTreeMap::new();
        let mut enhanced_overrides = Vec::new();
        for partition in tables.enhanced_partitions {
            for (id, content) in partition {
                if enhanced.insert(id.clone(), content).is_some() {
                    enhanced_overrides.push(id);
                }
            }
        }

        Catalog {
            events,
            enhanced,
            top_exploited: tables.top_exploited,
            report: LoadReport {
                dropped_techniques,
                unresolved_techniques: merge_report.unresolved_techniques,
                enhanced_overrides,
            },
        }
    }

    /// All merged events: Windows Security first, then Sysmon.
    pub fn events(&self) -> &[EventDetail] {
        &self.events
    }

    /// First event with the given id.
    ///
    /// Ids alone are not unique across sources; on a collision the Windows
    /// Security event wins because it is concatenated first.
    pub fn event_by_id(&self, id: &str) -> Option<&EventDetail> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Every event id in corpus order. May contain duplicates when a
    /// Windows and a Sysmon event share an id.
    pub fn event_ids(&self) -> Vec<&str> {
        self.events.iter().map(|event| event.id.as_str()).collect()
    }

    /// The curated most-exploited events, in curated order.
    ///
    /// Ids missing from the corpus are skipped; there is no placeholder.
    pub fn top_exploited(&self) -> Vec<&EventDetail> {
        self.top_exploited
            .iter()
            .filter_map(|id| self.event_by_id(id))
            .collect()
    }

    /// Enhanced analyst content for an event id, if authored.
    pub fn enhanced_content(&self, id: &str) -> Option<&EnhancedContent> {
        self.enhanced.get(id)
    }

    pub fn has_enhanced_content(&self, id: &str) -> bool {
        self.enhanced.contains_key(id)
    }

    /// Distinct categories present in the corpus, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .events
            .iter()
            .filter_map(|event| event.category.as_deref())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// The audit report produced while building this catalog.
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }
}
