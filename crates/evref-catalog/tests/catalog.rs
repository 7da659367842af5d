//! Integration tests over the bundled data tables.
//!
//! These exercise the full load path (`Catalog::load`) rather than
//! synthetic tables, so they double as a consistency check on the data
//! shipped in `data/`.

use evref_catalog::{Catalog, EventSource};

fn catalog() -> Catalog {
    Catalog::load().expect("bundled tables must parse")
}

#[test]
fn bundled_tables_parse_and_merge() {
    let catalog = catalog();
    assert!(catalog.events().len() > 60);
}

#[test]
fn bundled_tables_are_clean() {
    // Every mapped technique resolves, every corpus record has an id, and
    // no enhanced id is defined twice across partitions.
    let catalog = catalog();
    let report = catalog.load_report();
    assert!(
        report.is_clean(),
        "bundled data produced audit findings: {report:?}"
    );
}

#[test]
fn corpus_order_is_windows_then_sysmon() {
    let catalog = catalog();
    let first_sysmon = catalog
        .events()
        .iter()
        .position(|e| e.source == EventSource::Sysmon)
        .expect("sysmon events present");
    assert!(first_sysmon > 0);
    assert!(
        catalog.events()[first_sysmon..]
            .iter()
            .all(|e| e.source == EventSource::Sysmon)
    );
    assert!(
        catalog.events()[..first_sysmon]
            .iter()
            .all(|e| e.source == EventSource::WindowsSecurity)
    );
}

#[test]
fn logon_event_is_fully_merged() {
    let catalog = catalog();
    let logon = catalog.event_by_id("4624").unwrap();

    assert_eq!(logon.source, EventSource::WindowsSecurity);
    assert_eq!(logon.name, "An account was successfully logged on");
    assert_eq!(logon.category.as_deref(), Some("Authentication"));
    assert!(logon.official_link.is_some());
    assert!(!logon.common_scenarios.as_ref().unwrap().is_empty());
    assert!(
        logon
            .key_log_fields
            .as_ref()
            .unwrap()
            .iter()
            .any(|f| f.field == "LogonType")
    );

    let techniques = logon.mitre_attack.as_ref().unwrap();
    assert_eq!(techniques[0].id, "T1078");
    assert_eq!(techniques[0].name, "Valid Accounts");
}

#[test]
fn techniques_are_sorted_ascending() {
    // 4625 is mapped as [T1110, T1078] in the table; resolution sorts.
    let catalog = catalog();
    let failed = catalog.event_by_id("4625").unwrap();
    let ids: Vec<&str> = failed
        .mitre_attack
        .as_ref()
        .unwrap()
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, ["T1078", "T1110"]);

    for event in catalog.events() {
        if let Some(techniques) = &event.mitre_attack {
            assert!(!techniques.is_empty(), "event {} has Some(vec![])", event.id);
            assert!(techniques.windows(2).all(|w| w[0].id <= w[1].id));
        }
    }
}

#[test]
fn multi_tactic_corpus_records_are_joined() {
    let catalog = catalog();
    let logon = catalog.event_by_id("4624").unwrap();
    let valid_accounts = &logon.mitre_attack.as_ref().unwrap()[0];
    assert_eq!(
        valid_accounts.tactic,
        "Defense Evasion, Persistence, Privilege Escalation, Initial Access"
    );
}

#[test]
fn unmapped_event_has_all_optional_fields_absent() {
    // 4608 is deliberately absent from every side table.
    let catalog = catalog();
    let startup = catalog.event_by_id("4608").unwrap();
    assert!(startup.category.is_none());
    assert!(startup.mitre_attack.is_none());
    assert!(startup.common_scenarios.is_none());
    assert!(startup.key_log_fields.is_none());

    let json = serde_json::to_value(startup).unwrap();
    let obj = json.as_object().unwrap();
    for key in ["category", "mitre_attack", "common_scenarios", "key_log_fields"] {
        assert!(!obj.contains_key(key), "{key} should be key-absent");
    }
}

#[test]
fn top_exploited_matches_curated_order() {
    let catalog = catalog();
    let ranked: Vec<&str> = catalog
        .top_exploited()
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(
        ranked,
        ["4624", "4625", "4688", "4720", "4672", "4732", "1102", "4698", "1", "3"]
    );

    // The tail entries come from Sysmon; id-only lookup still finds them
    // because no Windows event shares those ids.
    let top = catalog.top_exploited();
    assert_eq!(top[8].source, EventSource::Sysmon);
    assert_eq!(top[9].source, EventSource::Sysmon);
}

#[test]
fn enhanced_content_lookup() {
    let catalog = catalog();

    assert!(catalog.has_enhanced_content("4624"));
    let logon = catalog.enhanced_content("4624").unwrap();
    assert!(!logon.quick_answer.is_empty());
    assert!(!logon.security_implications.is_empty());
    assert!(logon.related_events.contains(&"4625".to_string()));

    // Most events carry no enhanced content; that is absence, not error.
    assert!(!catalog.has_enhanced_content("4634"));
    assert!(catalog.enhanced_content("4634").is_none());
}

#[test]
fn categories_cover_both_sources() {
    let catalog = catalog();
    let categories = catalog.categories();
    assert!(categories.contains(&"Authentication"));
    assert!(categories.contains(&"Registry"));
    assert!(categories.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn load_is_idempotent() {
    let first = catalog();
    let second = catalog();
    assert_eq!(first.events(), second.events());
    assert_eq!(first.event_ids(), second.event_ids());
}
