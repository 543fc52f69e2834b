#![forbid(unsafe_code)]
//! Records produced by the out-of-scope parsers: the parsed document tree
//! consumed by the initial loader and the amendment records consumed by the
//! temporal engine.

use serde::{Deserialize, Serialize};

use crate::dates::IsoDate;
use crate::model::{ChangeType, ComponentType};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParsedNorm {
    pub official_id: String,
    pub name: String,
    pub enactment_date: IsoDate,
    #[serde(default)]
    pub components: Vec<ParsedComponent>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParsedComponent {
    pub component_id: String,
    pub component_type: ComponentType,
    #[serde(default)]
    pub ordering_id: String,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Header + content combined; empty for purely structural connectors.
    #[serde(default)]
    pub full_text: String,
    #[serde(default = "default_true")]
    pub is_original: bool,
    /// Amendment markers observed in the consolidated source text.
    #[serde(default)]
    pub events: Vec<AmendmentEvent>,
    #[serde(default)]
    pub children: Vec<ParsedComponent>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AmendmentEvent {
    pub event_type: String,
    pub amendment_number: i64,
    #[serde(default)]
    pub amendment_date: Option<IsoDate>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Amendment {
    pub number: i64,
    pub date: IsoDate,
    #[serde(default)]
    pub description: String,
    pub changes: Vec<AmendmentChange>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AmendmentChange {
    pub component_id: String,
    /// Consolidated replacement text; empty for repeals.
    #[serde(default)]
    pub new_content: String,
    pub change_type: ChangeType,
}

fn default_true() -> bool {
    true
}
