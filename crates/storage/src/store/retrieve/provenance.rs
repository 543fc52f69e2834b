#![forbid(unsafe_code)]

use rusqlite::params;

use super::super::*;
use super::result_row;

impl SqliteStore {
    /// Who changed what. By amendment: the directly changed versions of
    /// that Action, each with the superseded wording for diffing. By
    /// component: the full version history. With neither: recent Actions.
    pub fn provenance(
        &self,
        amendment_number: Option<i64>,
        component: Option<&str>,
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, StoreError> {
        if let Some(number) = amendment_number {
            return self.provenance_by_amendment(number, top_k);
        }
        if let Some(needle) = component {
            return self.provenance_by_component(needle, top_k);
        }
        self.recent_actions(top_k)
    }

    fn provenance_by_amendment(
        &self,
        number: i64,
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, StoreError> {
        let rows: Vec<(String, String, Option<String>)> = {
            let mut stmt = self.conn.prepare(
                r#"
                SELECT v.ctv_id, a.amendment_date, a.description
                FROM actions a
                JOIN resulted_in r ON r.action_id = a.action_id
                JOIN ctvs v ON v.ctv_id = r.ctv_id
                WHERE a.amendment_number = ?1 AND v.created_by_action = 'amendment'
                ORDER BY v.component_id
                LIMIT ?2
                "#,
            )?;
            let mut rows = stmt.query(params![number, top_k as i64])?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push((row.get(0)?, row.get(1)?, row.get(2)?));
            }
            out
        };

        let mut results = Vec::new();
        for (ctv_id, amendment_date, description) in rows {
            let Some(ctv) = ctv_get_tx(&self.conn, &ctv_id)? else {
                continue;
            };
            let Some(component) = component_get_tx(&self.conn, &ctv.component_id)? else {
                continue;
            };
            let text = text_for_ctv_tx(&self.conn, &ctv.ctv_id)?.map(|t| t.full_text);
            let previous_text = match supersedes_of_tx(&self.conn, &ctv.ctv_id)? {
                Some(prev_id) => text_for_ctv_tx(&self.conn, &prev_id)?.map(|t| t.full_text),
                None => None,
            };
            let provenance = Provenance {
                amendment_number: number,
                amendment_date,
                description,
                previous_text,
            };
            results.push(result_row(&component, &ctv, text, Some(provenance)));
        }
        Ok(results)
    }

    fn provenance_by_component(
        &self,
        needle: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, StoreError> {
        let Some(component) = component_resolve_tx(&self.conn, needle)? else {
            return Ok(Vec::new());
        };
        let versions = ctvs_of_component_tx(&self.conn, &component.component_id)?;
        let mut results = Vec::new();
        for ctv in versions.into_iter().take(top_k) {
            let text = text_for_ctv_tx(&self.conn, &ctv.ctv_id)?.map(|t| t.full_text);
            results.push(result_row(&component, &ctv, text, None));
        }
        Ok(results)
    }

    fn recent_actions(&self, top_k: usize) -> Result<Vec<RetrievalResult>, StoreError> {
        let rows: Vec<(String, i64, String, Option<String>)> = {
            let mut stmt = self.conn.prepare(
                r#"
                SELECT v.ctv_id, a.amendment_number, a.amendment_date, a.description
                FROM actions a
                JOIN resulted_in r ON r.action_id = a.action_id
                JOIN ctvs v ON v.ctv_id = r.ctv_id
                WHERE v.created_by_action = 'amendment'
                ORDER BY a.amendment_date DESC, a.amendment_number DESC, v.component_id
                LIMIT ?1
                "#,
            )?;
            let mut rows = stmt.query(params![top_k as i64])?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?));
            }
            out
        };

        let mut results = Vec::new();
        for (ctv_id, number, amendment_date, description) in rows {
            let Some(ctv) = ctv_get_tx(&self.conn, &ctv_id)? else {
                continue;
            };
            let Some(component) = component_get_tx(&self.conn, &ctv.component_id)? else {
                continue;
            };
            let text = text_for_ctv_tx(&self.conn, &ctv.ctv_id)?.map(|t| t.full_text);
            let provenance = Provenance {
                amendment_number: number,
                amendment_date,
                description,
                previous_text: None,
            };
            results.push(result_row(&component, &ctv, text, Some(provenance)));
        }
        Ok(results)
    }
}
