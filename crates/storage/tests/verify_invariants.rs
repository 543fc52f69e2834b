#![forbid(unsafe_code)]

use std::path::PathBuf;

use lx_core::dates::IsoDate;
use lx_core::input::{Amendment, AmendmentChange, ParsedComponent, ParsedNorm};
use lx_core::model::{ChangeType, ComponentType};
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

fn leaf(
    id: &str,
    component_type: ComponentType,
    ordering: &str,
    text: &str,
) -> ParsedComponent {
    ParsedComponent {
        component_id: id.to_string(),
        component_type,
        ordering_id: ordering.to_string(),
        header: None,
        content: Some(text.to_string()),
        full_text: text.to_string(),
        is_original: true,
        events: Vec::new(),
        children: Vec::new(),
    }
}

fn node(
    id: &str,
    component_type: ComponentType,
    ordering: &str,
    full_text: &str,
    children: Vec<ParsedComponent>,
) -> ParsedComponent {
    ParsedComponent {
        component_id: id.to_string(),
        component_type,
        ordering_id: ordering.to_string(),
        header: Some(format!("{} {ordering}", id.to_uppercase())),
        content: None,
        full_text: full_text.to_string(),
        is_original: true,
        events: Vec::new(),
        children,
    }
}

fn layered_norm() -> ParsedNorm {
    let art_1 = node(
        "tit_01_cap_01_art_1",
        ComponentType::Article,
        "1",
        "Art. 1 All power emanates from the people.",
        vec![
            leaf(
                "tit_01_cap_01_art_1_par_1",
                ComponentType::Paragraph,
                "1",
                "Paragraph one.",
            ),
            leaf(
                "tit_01_cap_01_art_1_par_2",
                ComponentType::Paragraph,
                "2",
                "Paragraph two.",
            ),
        ],
    );
    let art_2 = leaf(
        "tit_01_cap_01_art_2",
        ComponentType::Article,
        "2",
        "Art. 2 The branches are independent.",
    );
    let chapter = node(
        "tit_01_cap_01",
        ComponentType::Chapter,
        "01",
        "",
        vec![art_1, art_2],
    );
    let title = node("tit_01", ComponentType::Title, "01", "", vec![chapter]);
    ParsedNorm {
        official_id: "CF1988".to_string(),
        name: "Layered Constitution".to_string(),
        enactment_date: IsoDate::try_new("1988-10-05").expect("enactment date"),
        components: vec![title],
    }
}

fn modify(component_id: &str, text: &str) -> AmendmentChange {
    AmendmentChange {
        component_id: component_id.to_string(),
        new_content: text.to_string(),
        change_type: ChangeType::Modify,
    }
}

#[test]
fn invariants_hold_through_a_life_of_amendments() {
    let storage_dir = temp_dir("invariants_full_life");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    store
        .load_norm(&layered_norm(), LoadPolicy::Merge)
        .expect("load");

    let report = store.verify().expect("verify after load");
    assert!(report.ok, "after load: {:?}", report.checks);

    store
        .apply_amendment(&Amendment {
            number: 1,
            date: IsoDate::try_new("1995-06-01").expect("date"),
            description: "Rewrites paragraph one".to_string(),
            changes: vec![modify("tit_01_cap_01_art_1_par_1", "Paragraph one, amended.")],
        })
        .expect("first amendment");

    store
        .apply_amendment(&Amendment {
            number: 2,
            date: IsoDate::try_new("2004-12-30").expect("date"),
            description: "Rewrites article two and repeals paragraph two".to_string(),
            changes: vec![
                modify("tit_01_cap_01_art_2", "Art. 2, amended."),
                AmendmentChange {
                    component_id: "tit_01_cap_01_art_1_par_2".to_string(),
                    new_content: String::new(),
                    change_type: ChangeType::Repeal,
                },
            ],
        })
        .expect("second amendment");

    let report = store.verify().expect("verify after amendments");
    assert!(report.ok, "after amendments: {:?}", report.checks);

    assert_eq!(report.totals.actions, 2);
    assert_eq!(report.totals.components, 6);
    // 6 originals + amendment 1 (par_1, art_1, chapter, title)
    //             + amendment 2 (art_2, par_2, art_1, chapter, title)
    assert_eq!(report.totals.ctvs, 15);
    assert!(
        report.totals.efficiency < 1.0,
        "aggregation must beat full copies: {}",
        report.totals.efficiency
    );

    let names: Vec<&str> = report.checks.iter().map(|c| c.invariant).collect();
    for expected in [
        "single_active_version",
        "non_overlapping_validity",
        "monotone_versions",
        "supersedes_chain",
        "aggregates_completeness",
        "point_in_time_closure",
        "leaf_text",
        "causality",
        "aggregates_acyclic",
    ] {
        assert!(names.contains(&expected), "missing check {expected}");
    }
}

#[test]
fn component_with_no_amendments_keeps_one_open_version() {
    let storage_dir = temp_dir("untouched_component_stays_v1");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    store
        .load_norm(&layered_norm(), LoadPolicy::Merge)
        .expect("load");

    store
        .apply_amendment(&Amendment {
            number: 3,
            date: IsoDate::try_new("1999-01-01").expect("date"),
            description: "Touches only article two".to_string(),
            changes: vec![modify("tit_01_cap_01_art_2", "Art. 2 v2.")],
        })
        .expect("apply");

    // Article 1 and its paragraphs sit outside the amendment path.
    for component_id in [
        "tit_01_cap_01_art_1",
        "tit_01_cap_01_art_1_par_1",
        "tit_01_cap_01_art_1_par_2",
    ] {
        let history = store.version_history(component_id).expect("history");
        assert_eq!(history.len(), 1, "component {component_id}");
        assert_eq!(history[0].date_end, None);
    }

    // The chapter above article 2 was versioned and reuses article 1's v1.
    let chapter = store
        .active_version("tit_01_cap_01")
        .expect("query")
        .expect("chapter active");
    assert_eq!(chapter.version_number, 2);
    let fanout = store
        .version_children(&chapter.ctv_id)
        .expect("chapter fan-out");
    let children: Vec<&str> = fanout.iter().map(|e| e.child_ctv_id.as_str()).collect();
    assert_eq!(
        children,
        vec!["tit_01_cap_01_art_1_v1", "tit_01_cap_01_art_2_v2"]
    );
}

#[test]
fn consolidated_reload_matches_amended_state() {
    // Applying amendments chronologically must leave the same active text
    // as loading the consolidated result directly.
    let amended_dir = temp_dir("consolidated_amended");
    let mut amended = SqliteStore::open(&amended_dir).expect("open store");
    amended
        .load_norm(&layered_norm(), LoadPolicy::Merge)
        .expect("load");
    amended
        .apply_amendment(&Amendment {
            number: 4,
            date: IsoDate::try_new("2001-01-01").expect("date"),
            description: "Consolidation check".to_string(),
            changes: vec![modify("tit_01_cap_01_art_2", "Art. 2 consolidated.")],
        })
        .expect("apply");

    let consolidated_dir = temp_dir("consolidated_direct");
    let mut consolidated = SqliteStore::open(&consolidated_dir).expect("open store");
    let mut norm = layered_norm();
    {
        let title = &mut norm.components[0];
        let chapter = &mut title.children[0];
        let art_2 = &mut chapter.children[1];
        art_2.content = Some("Art. 2 consolidated.".to_string());
        art_2.full_text = "Art. 2 consolidated.".to_string();
    }
    consolidated
        .load_norm(&norm, LoadPolicy::Merge)
        .expect("load consolidated");

    let now = "2020-01-01";
    let left = amended.point_in_time(None, now, 100).expect("amended snapshot");
    let right = consolidated
        .point_in_time(None, now, 100)
        .expect("consolidated snapshot");

    let strip = |rows: &[lx_storage::RetrievalResult]| -> Vec<(String, Option<String>)> {
        rows.iter()
            .map(|r| (r.component_id.clone(), r.text.clone()))
            .collect()
    };
    assert_eq!(strip(&left), strip(&right));
}
