#![forbid(unsafe_code)]

use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct VersionInfo {
    pub version: i64,
    pub date_start: String,
    pub date_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amendment_number: Option<i64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Provenance {
    pub amendment_number: i64,
    pub amendment_date: String,
    pub description: Option<String>,
    pub previous_text: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RetrievalResult {
    pub component_id: String,
    pub component_type: String,
    pub text: Option<String>,
    pub version_info: VersionInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

#[derive(Clone, Debug, Serialize)]
pub struct HistoryEntry {
    pub version: i64,
    pub date_start: String,
    pub date_end: Option<String>,
    pub amendment_number: Option<i64>,
    pub text_header: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ImpactComponent {
    pub component_id: String,
    pub component_type: String,
    pub amendment_numbers: Vec<i64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ImpactAction {
    pub amendment_number: i64,
    pub amendment_date: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ImpactReport {
    pub components: Vec<ImpactComponent>,
    pub actions: Vec<ImpactAction>,
}
