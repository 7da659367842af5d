//! Query predicates and the search entry point.
//!
//! Predicates are AND-combined; the free-text predicate is OR across an
//! event's searchable fields. Every call recomputes from scratch over the
//! full corpus — it is hundreds of records, so there is no index and no
//! incremental diffing.

use evref_catalog::{Catalog, EventDetail, EventSource};
use serde::Serialize;

/// Source predicate. `All` disables source filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceFilter {
    #[default]
    All,
    Only(EventSource),
}

/// Post-filter sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Numeric event id, ascending. Non-numeric ids sort last.
    #[default]
    Id,
    /// Event name, lexicographic.
    Name,
    /// Category, lexicographic. Events without a category sort last.
    Category,
}

impl SortKey {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "id" => Some(SortKey::Id),
            "name" => Some(SortKey::Name),
            "category" => Some(SortKey::Category),
            _ => None,
        }
    }
}

/// The live predicate set driving one search.
///
/// `Default` is the empty query: every predicate disabled, id sort.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Case-insensitive substring, matched against id, name, description,
    /// category, technique ids and names, and scenarios. Empty or absent
    /// disables the predicate.
    pub text: Option<String>,
    pub source: SourceFilter,
    /// Selected categories; an event must belong to one of them. Empty
    /// disables the predicate.
    pub categories: Vec<String>,
    /// Keep only events with resolved ATT&CK techniques.
    pub mitre_only: bool,
    /// Keep only events with enhanced analyst content.
    pub enhanced_only: bool,
    pub sort: SortKey,
}

/// Run a query against the catalog, returning matches in sort order.
pub fn search<'a>(catalog: &'a Catalog, query: &EventQuery) -> Vec<&'a EventDetail> {
    let needle = query
        .text
        .as_deref()
        .map(str::to_ascii_lowercase)
        .filter(|t| !t.is_empty());

    let mut matches: Vec<&EventDetail> = catalog
        .events()
        .iter()
        .filter(|event| keep(event, catalog, query, needle.as_deref()))
        .collect();

    sort_events(&mut matches, query.sort);
    matches
}

fn keep(
    event: &EventDetail,
    catalog: &Catalog,
    query: &EventQuery,
    needle: Option<&str>,
) -> bool {
    if let SourceFilter::Only(source) = query.source
        && event.source != source
    {
        return false;
    }

    if !query.categories.is_empty() {
        match &event.category {
            Some(category) if query.categories.iter().any(|sel| sel == category) => {}
            _ => return false,
        }
    }

    if query.mitre_only && event.mitre_attack.is_none() {
        return false;
    }

    if query.enhanced_only && !catalog.has_enhanced_content(&event.id) {
        return false;
    }

    if let Some(needle) = needle
        && !text_matches(event, needle)
    {
        return false;
    }

    true
}

/// OR across searchable fields: the event matches if any field contains
/// the needle.
fn text_matches(event: &EventDetail, needle: &str) -> bool {
    if contains(&event.id, needle)
        || contains(&event.name, needle)
        || contains(&event.description, needle)
    {
        return true;
    }

    if let Some(category) = &event.category
        && contains(category, needle)
    {
        return true;
    }

    if let Some(techniques) = &event.mitre_attack
        && techniques
            .iter()
            .any(|t| contains(&t.id, needle) || contains(&t.name, needle))
    {
        return true;
    }

    if let Some(scenarios) = &event.common_scenarios
        && scenarios.iter().any(|s| contains(s, needle))
    {
        return true;
    }

    false
}

/// Case-insensitive substring test. `needle` is already lowercased.
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(needle)
}

fn sort_events(events: &mut [&EventDetail], key: SortKey) {
    match key {
        // Sorts are stable, so ties keep corpus order (Windows first).
        SortKey::Id => events.sort_by_key(|e| numeric_id(e)),
        SortKey::Name => events.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Category => events.sort_by(|a, b| category_key(a).cmp(&category_key(b))),
    }
}

/// Numeric sort value for an id; non-numeric ids sort after all numeric ones.
fn numeric_id(event: &EventDetail) -> u64 {
    event.id.parse().unwrap_or(u64::MAX)
}

/// Category sort key; `true` (no category) orders after every real category.
fn category_key(event: &EventDetail) -> (bool, &str) {
    match event.category.as_deref() {
        Some(category) => (false, category),
        None => (true, ""),
    }
}
