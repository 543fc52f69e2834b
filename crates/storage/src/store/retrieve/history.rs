#![forbid(unsafe_code)]

use super::super::*;

impl SqliteStore {
    /// The full version chain of one component, newest first.
    pub fn version_history(&self, component: &str) -> Result<Vec<HistoryEntry>, StoreError> {
        let Some(component) = component_resolve_tx(&self.conn, component)? else {
            return Ok(Vec::new());
        };
        let versions = ctvs_of_component_tx(&self.conn, &component.component_id)?;
        let mut out = Vec::new();
        for ctv in versions {
            let text_header = text_for_ctv_tx(&self.conn, &ctv.ctv_id)?.and_then(|t| t.header);
            out.push(HistoryEntry {
                version: ctv.version_number,
                date_start: ctv.date_start,
                date_end: ctv.date_end,
                amendment_number: ctv.amendment_number,
                text_header,
            });
        }
        Ok(out)
    }
}
