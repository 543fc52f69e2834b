#![forbid(unsafe_code)]
//! Query plans handed over by the out-of-scope query classifier.

use serde::{Deserialize, Serialize};

use crate::dates::IsoDate;

pub const DEFAULT_TOP_K: usize = 10;

/// Classified retrieval request. The engine executes the first two variants
/// itself; `Semantic` and `Hybrid` narrow to a temporal scope and hand the
/// text matching to the substring fallback standing in for an external
/// text-search collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryPlan {
    PointInTime {
        #[serde(default)]
        target_component: Option<String>,
        target_date: IsoDate,
        #[serde(default = "default_top_k")]
        top_k: usize,
    },
    Provenance {
        #[serde(default)]
        amendment_number: Option<i64>,
        #[serde(default)]
        target_component: Option<String>,
        #[serde(default = "default_top_k")]
        top_k: usize,
    },
    Semantic {
        semantic_query: String,
        #[serde(default = "default_top_k")]
        top_k: usize,
    },
    Hybrid {
        semantic_query: String,
        target_date: IsoDate,
        #[serde(default = "default_top_k")]
        top_k: usize,
    },
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}
