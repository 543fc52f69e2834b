#![forbid(unsafe_code)]

use std::path::PathBuf;

use lx_core::dates::IsoDate;
use lx_core::input::{Amendment, AmendmentChange, ParsedComponent, ParsedNorm};
use lx_core::model::{ChangeType, ComponentType};
use lx_core::plan::QueryPlan;
use lx_storage::{LoadPolicy, SqliteStore};

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("lx_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn article(id: &str, ordering: &str, text: &str) -> ParsedComponent {
    ParsedComponent {
        component_id: id.to_string(),
        component_type: ComponentType::Article,
        ordering_id: ordering.to_string(),
        header: Some(format!("Art. {ordering}")),
        content: Some(text.to_string()),
        full_text: text.to_string(),
        is_original: true,
        events: Vec::new(),
        children: Vec::new(),
    }
}

fn title(id: &str, ordering: &str, children: Vec<ParsedComponent>) -> ParsedComponent {
    ParsedComponent {
        component_id: id.to_string(),
        component_type: ComponentType::Title,
        ordering_id: ordering.to_string(),
        header: Some(format!("TITLE {ordering}")),
        content: None,
        full_text: String::new(),
        is_original: true,
        events: Vec::new(),
        children,
    }
}

/// Two articles under one title, article 1 amended to "A2" on 2001-01-01.
fn amended_store(test_name: &str) -> SqliteStore {
    let storage_dir = temp_dir(test_name);
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let norm = ParsedNorm {
        official_id: "CF1988".to_string(),
        name: "Toy Constitution".to_string(),
        enactment_date: IsoDate::try_new("1988-10-05").expect("enactment date"),
        components: vec![title(
            "tit_01",
            "01",
            vec![
                article("tit_01_art_1", "1", "Original."),
                article("tit_01_art_2", "2", "Sibling text."),
            ],
        )],
    };
    store.load_norm(&norm, LoadPolicy::Merge).expect("load");
    store
        .apply_amendment(&Amendment {
            number: 11,
            date: IsoDate::try_new("2001-01-01").expect("date"),
            description: "Changes article 1".to_string(),
            changes: vec![AmendmentChange {
                component_id: "tit_01_art_1".to_string(),
                new_content: "A2".to_string(),
                change_type: ChangeType::Modify,
            }],
        })
        .expect("apply amendment");
    store
}

#[test]
fn point_in_time_travels_across_the_amendment() {
    let store = amended_store("point_in_time_travels");

    let before = store
        .point_in_time(Some("tit_01_art_1"), "1999-06-01", 10)
        .expect("query before");
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].text.as_deref(), Some("Original."));
    assert_eq!(before[0].version_info.version, 1);

    let after = store
        .point_in_time(Some("tit_01_art_1"), "2001-06-01", 10)
        .expect("query after");
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].text.as_deref(), Some("A2"));
    assert_eq!(after[0].version_info.version, 2);
    assert_eq!(after[0].version_info.amendment_number, Some(11));

    let sibling = store
        .point_in_time(Some("tit_01_art_2"), "2001-06-01", 10)
        .expect("query sibling");
    assert_eq!(sibling.len(), 1);
    assert_eq!(sibling[0].text.as_deref(), Some("Sibling text."));
    assert_eq!(sibling[0].version_info.version, 1);
}

#[test]
fn point_in_time_resolves_suffix_handles() {
    let store = amended_store("point_in_time_suffix");

    let rows = store
        .point_in_time(Some("art_1"), "2001-06-01", 10)
        .expect("query by suffix");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].component_id, "tit_01_art_1");
}

#[test]
fn point_in_time_before_enactment_finds_nothing() {
    let store = amended_store("point_in_time_before_enactment");

    let rows = store
        .point_in_time(Some("tit_01_art_1"), "1980-01-01", 10)
        .expect("query before enactment");
    assert!(rows.is_empty());
}

#[test]
fn whole_norm_snapshot_is_in_document_order() {
    let store = amended_store("whole_norm_snapshot_order");

    let rows = store
        .point_in_time(None, "2001-06-01", 10)
        .expect("snapshot");
    let ids: Vec<&str> = rows.iter().map(|r| r.component_id.as_str()).collect();
    assert_eq!(ids, vec!["tit_01_art_1", "tit_01_art_2"]);
    assert_eq!(rows[0].text.as_deref(), Some("A2"));

    let truncated = store
        .point_in_time(None, "2001-06-01", 1)
        .expect("truncated snapshot");
    assert_eq!(truncated.len(), 1);
    assert_eq!(truncated[0].component_id, "tit_01_art_1");
}

#[test]
fn version_history_lists_newest_first() {
    let store = amended_store("version_history_newest_first");

    let history = store.version_history("tit_01_art_1").expect("history");
    assert_eq!(history.len(), 2);

    assert_eq!(history[0].version, 2);
    assert_eq!(history[0].date_start, "2001-01-01");
    assert_eq!(history[0].date_end, None);
    assert_eq!(history[0].amendment_number, Some(11));

    assert_eq!(history[1].version, 1);
    assert_eq!(history[1].date_start, "1988-10-05");
    assert_eq!(history[1].date_end.as_deref(), Some("2001-01-01"));
    assert_eq!(history[1].amendment_number, None);
    assert_eq!(history[1].text_header.as_deref(), Some("Art. 1"));
}

#[test]
fn provenance_by_amendment_pairs_old_and_new_text() {
    let store = amended_store("provenance_by_amendment");

    let rows = store.provenance(Some(11), None, 10).expect("provenance");
    assert_eq!(rows.len(), 1, "only the directly changed leaf is reported");
    let row = &rows[0];
    assert_eq!(row.component_id, "tit_01_art_1");
    assert_eq!(row.text.as_deref(), Some("A2"));
    let provenance = row.provenance.as_ref().expect("provenance attached");
    assert_eq!(provenance.amendment_number, 11);
    assert_eq!(provenance.amendment_date, "2001-01-01");
    assert_eq!(provenance.previous_text.as_deref(), Some("Original."));
}

#[test]
fn provenance_by_component_returns_full_history() {
    let store = amended_store("provenance_by_component");

    let rows = store
        .provenance(None, Some("tit_01_art_1"), 10)
        .expect("provenance");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].version_info.version, 2);
    assert_eq!(rows[1].version_info.version, 1);
    assert_eq!(rows[1].text.as_deref(), Some("Original."));
}

#[test]
fn provenance_without_filters_lists_recent_actions() {
    let store = amended_store("provenance_recent_actions");

    let rows = store.provenance(None, None, 10).expect("provenance");
    assert_eq!(rows.len(), 1);
    let provenance = rows[0].provenance.as_ref().expect("provenance attached");
    assert_eq!(provenance.amendment_number, 11);
}

#[test]
fn unknown_handles_return_empty_not_errors() {
    let store = amended_store("unknown_handles_empty");

    assert!(store
        .point_in_time(Some("art_999"), "2001-06-01", 10)
        .expect("query")
        .is_empty());
    assert!(store.provenance(Some(99), None, 10).expect("query").is_empty());
    assert!(store
        .version_history("art_999")
        .expect("query")
        .is_empty());
    let impact = store
        .hierarchical_impact("art_999", "2000-01-01", "2002-01-01")
        .expect("query");
    assert!(impact.components.is_empty());
}

#[test]
fn hierarchical_impact_attributes_amendments() {
    let store = amended_store("hierarchical_impact_attribution");

    let report = store
        .hierarchical_impact("tit_01", "2000-12-31", "2001-12-31")
        .expect("impact");
    assert_eq!(report.components.len(), 1, "only the amended article");
    assert_eq!(report.components[0].component_id, "tit_01_art_1");
    assert_eq!(report.components[0].amendment_numbers, vec![11]);
    assert_eq!(report.actions.len(), 1);
    assert_eq!(report.actions[0].amendment_number, 11);

    let outside = store
        .hierarchical_impact("tit_01", "2002-01-01", "2003-01-01")
        .expect("impact outside range");
    assert!(outside.components.is_empty());
    assert!(outside.actions.is_empty());
}

#[test]
fn plan_dispatch_covers_all_variants() {
    let store = amended_store("plan_dispatch_variants");

    let rows = store
        .retrieve(&QueryPlan::PointInTime {
            target_component: Some("tit_01_art_1".to_string()),
            target_date: IsoDate::try_new("2001-06-01").expect("date"),
            top_k: 10,
        })
        .expect("point-in-time plan");
    assert_eq!(rows[0].text.as_deref(), Some("A2"));

    let rows = store
        .retrieve(&QueryPlan::Provenance {
            amendment_number: Some(11),
            target_component: None,
            top_k: 10,
        })
        .expect("provenance plan");
    assert_eq!(rows.len(), 1);

    let rows = store
        .retrieve(&QueryPlan::Semantic {
            semantic_query: "Sibling".to_string(),
            top_k: 10,
        })
        .expect("semantic plan");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].component_id, "tit_01_art_2");

    let rows = store
        .retrieve(&QueryPlan::Hybrid {
            semantic_query: "Original".to_string(),
            target_date: IsoDate::try_new("1999-01-01").expect("date"),
            top_k: 10,
        })
        .expect("hybrid plan");
    assert_eq!(rows.len(), 1, "hybrid finds the old wording at the old date");
    assert_eq!(rows[0].component_id, "tit_01_art_1");

    let rows = store
        .retrieve(&QueryPlan::Hybrid {
            semantic_query: "Original".to_string(),
            target_date: IsoDate::try_new("2002-01-01").expect("date"),
            top_k: 10,
        })
        .expect("hybrid plan after amendment");
    assert!(rows.is_empty(), "the old wording is gone at the later date");
}
