#![forbid(unsafe_code)]

mod history;
mod impact;
mod point_in_time;
mod provenance;
mod text_search;

use lx_core::plan::QueryPlan;

use super::*;

impl SqliteStore {
    /// Executes a classified query plan. Point-in-time and provenance are
    /// native graph traversals; semantic and hybrid narrow to a temporal
    /// scope and fall back to substring matching in place of an external
    /// text-search collaborator.
    pub fn retrieve(&self, plan: &QueryPlan) -> Result<Vec<RetrievalResult>, StoreError> {
        match plan {
            QueryPlan::PointInTime {
                target_component,
                target_date,
                top_k,
            } => self.point_in_time(target_component.as_deref(), target_date.as_str(), *top_k),
            QueryPlan::Provenance {
                amendment_number,
                target_component,
                top_k,
            } => self.provenance(*amendment_number, target_component.as_deref(), *top_k),
            QueryPlan::Semantic {
                semantic_query,
                top_k,
            } => self.text_search(semantic_query, *top_k),
            QueryPlan::Hybrid {
                semantic_query,
                target_date,
                top_k,
            } => self.hybrid_search(semantic_query, target_date.as_str(), *top_k),
        }
    }

    /// Active version of a component, if any.
    pub fn active_version(&self, component_id: &str) -> Result<Option<CtvRow>, StoreError> {
        active_ctv_tx(&self.conn, component_id)
    }

    /// Outgoing AGGREGATES edges of one parent version, in document order.
    pub fn version_children(&self, ctv_id: &str) -> Result<Vec<AggregateEdge>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT child_ctv_id, ordering FROM aggregates \
             WHERE parent_ctv_id=?1 ORDER BY ordering, child_ctv_id",
        )?;
        let mut rows = stmt.query(rusqlite::params![ctv_id])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(AggregateEdge {
                child_ctv_id: row.get(0)?,
                ordering: row.get(1)?,
            });
        }
        Ok(out)
    }
}

fn version_info(ctv: &CtvRow) -> VersionInfo {
    VersionInfo {
        version: ctv.version_number,
        date_start: ctv.date_start.clone(),
        date_end: ctv.date_end.clone(),
        amendment_number: ctv.amendment_number,
    }
}

fn result_row(
    component: &ComponentRow,
    ctv: &CtvRow,
    text: Option<String>,
    provenance: Option<Provenance>,
) -> RetrievalResult {
    RetrievalResult {
        component_id: component.component_id.clone(),
        component_type: component.component_type.clone(),
        text,
        version_info: version_info(ctv),
        provenance,
    }
}
