#![forbid(unsafe_code)]

use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub norms: usize,
    pub components: usize,
    pub ctvs: usize,
    pub clvs: usize,
    pub text_units: usize,
    pub relationships: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AmendmentStats {
    pub new_ctvs: usize,
    pub closed_ctvs: usize,
    pub reused_ctvs: usize,
    pub new_aggregations: usize,
    pub actions_created: usize,
    pub skipped_changes: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct BatchError {
    pub amendment_number: i64,
    pub reason: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: Vec<BatchError>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SchemaInfo {
    pub norms: i64,
    pub components: i64,
    pub ctvs: i64,
    pub clvs: i64,
    pub text_units: i64,
    pub actions: i64,
}
