#![forbid(unsafe_code)]

use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct VerifyCheck {
    pub invariant: &'static str,
    pub ok: bool,
    pub violations: i64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct GraphTotals {
    pub components: i64,
    pub ctvs: i64,
    pub actions: i64,
    pub avg_versions: f64,
    /// ctvs / (components * (actions + 1)); low means sibling reuse works.
    pub efficiency: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct VerifyReport {
    pub ok: bool,
    pub checks: Vec<VerifyCheck>,
    pub totals: GraphTotals,
}
