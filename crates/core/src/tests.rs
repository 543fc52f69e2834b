#![forbid(unsafe_code)]

use crate::dates::{DateError, IsoDate};
use crate::ids::{ComponentId, ComponentIdError};
use crate::input::{Amendment, ParsedNorm};
use crate::model::{ChangeType, ComponentType};
use crate::plan::QueryPlan;

#[test]
fn component_id_accepts_path_encoded_handles() {
    let id = ComponentId::try_new("tit_08_cap_03_sec_01_art_214_art_214").expect("valid id");
    assert_eq!(id.as_str(), "tit_08_cap_03_sec_01_art_214_art_214");
}

#[test]
fn component_id_rejects_bad_input() {
    assert_eq!(ComponentId::try_new(""), Err(ComponentIdError::Empty));
    assert_eq!(
        ComponentId::try_new("_art_5"),
        Err(ComponentIdError::InvalidFirstChar)
    );
    assert!(matches!(
        ComponentId::try_new("art 5"),
        Err(ComponentIdError::InvalidChar { ch: ' ', index: 3 })
    ));
}

#[test]
fn iso_date_canonicalizes_and_orders() {
    let enacted = IsoDate::try_new("1988-10-5").expect("valid date");
    assert_eq!(enacted.as_str(), "1988-10-05");
    let amended = IsoDate::try_new("2004-12-30").expect("valid date");
    assert!(enacted < amended);
}

#[test]
fn iso_date_rejects_impossible_days() {
    assert!(matches!(
        IsoDate::try_new("2001-02-29"),
        Err(DateError::OutOfRange { .. })
    ));
    assert!(IsoDate::try_new("2000-02-29").is_ok());
    assert!(matches!(
        IsoDate::try_new("not-a-date"),
        Err(DateError::Malformed { .. })
    ));
}

#[test]
fn component_type_round_trips() {
    for ty in [
        ComponentType::Norm,
        ComponentType::Title,
        ComponentType::Chapter,
        ComponentType::Section,
        ComponentType::Subsection,
        ComponentType::Article,
        ComponentType::Paragraph,
        ComponentType::Item,
        ComponentType::Letter,
    ] {
        assert_eq!(ComponentType::parse(ty.as_str()), Some(ty));
    }
    assert_eq!(ComponentType::parse("annex"), None);
    assert!(ComponentType::Letter.is_text_bearing());
    assert!(!ComponentType::Chapter.is_text_bearing());
}

#[test]
fn amendment_json_deserializes() {
    let raw = r#"{
        "number": 45,
        "date": "2004-12-30",
        "description": "Judicial reform",
        "changes": [
            {"component_id": "art_5", "new_content": "New wording.", "change_type": "modify"},
            {"component_id": "art_6", "change_type": "repeal"}
        ]
    }"#;
    let amendment: Amendment = serde_json::from_str(raw).expect("parse amendment");
    assert_eq!(amendment.number, 45);
    assert_eq!(amendment.changes.len(), 2);
    assert_eq!(amendment.changes[0].change_type, ChangeType::Modify);
    assert_eq!(amendment.changes[1].change_type, ChangeType::Repeal);
    assert!(amendment.changes[1].new_content.is_empty());
}

#[test]
fn parsed_norm_json_deserializes() {
    let raw = r#"{
        "official_id": "CF1988",
        "name": "Constitution",
        "enactment_date": "1988-10-05",
        "components": [
            {
                "component_id": "tit_01",
                "component_type": "title",
                "ordering_id": "01",
                "header": "TITLE I",
                "children": [
                    {
                        "component_id": "tit_01_art_1",
                        "component_type": "article",
                        "ordering_id": "1",
                        "full_text": "Art. 1 Original."
                    }
                ]
            }
        ]
    }"#;
    let norm: ParsedNorm = serde_json::from_str(raw).expect("parse norm");
    assert_eq!(norm.components.len(), 1);
    let title = &norm.components[0];
    assert_eq!(title.component_type, ComponentType::Title);
    assert!(title.is_original, "is_original defaults to true");
    assert_eq!(title.children[0].component_id, "tit_01_art_1");
}

#[test]
fn query_plan_dispatch_tag_parses() {
    let raw = r#"{"kind": "point_in_time", "target_component": "art_5", "target_date": "2015-07-01"}"#;
    let plan: QueryPlan = serde_json::from_str(raw).expect("parse plan");
    match plan {
        QueryPlan::PointInTime {
            target_component,
            target_date,
            top_k,
        } => {
            assert_eq!(target_component.as_deref(), Some("art_5"));
            assert_eq!(target_date.as_str(), "2015-07-01");
            assert_eq!(top_k, crate::plan::DEFAULT_TOP_K);
        }
        other => panic!("unexpected plan variant: {other:?}"),
    }

    let raw = r#"{"kind": "provenance", "amendment_number": 45}"#;
    let plan: QueryPlan = serde_json::from_str(raw).expect("parse plan");
    assert!(matches!(
        plan,
        QueryPlan::Provenance {
            amendment_number: Some(45),
            ..
        }
    ));
}
