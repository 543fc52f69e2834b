#![forbid(unsafe_code)]

use super::super::*;
use super::result_row;

const MAX_SEARCH_TERMS: usize = 3;

impl SqliteStore {
    /// Substring fallback over the currently active text. Stands in for the
    /// external text-search collaborator that a semantic plan delegates to.
    pub fn text_search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, StoreError> {
        let terms: Vec<&str> = query.split_whitespace().take(MAX_SEARCH_TERMS).collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut sql = String::from(
            "SELECT v.ctv_id FROM ctvs v \
             JOIN clvs l ON l.ctv_id = v.ctv_id \
             JOIN text_units t ON t.clv_id = l.clv_id \
             WHERE v.is_active = 1",
        );
        let mut values: Vec<rusqlite::types::Value> = Vec::new();
        for term in &terms {
            sql.push_str(" AND instr(lower(t.full_text), lower(?)) > 0");
            values.push(rusqlite::types::Value::Text((*term).to_string()));
        }
        sql.push_str(" ORDER BY v.component_id LIMIT ?");
        values.push(rusqlite::types::Value::Integer(top_k as i64));

        let ctv_ids: Vec<String> = {
            let mut stmt = self.conn.prepare(&sql)?;
            let mut rows = stmt.query(rusqlite::params_from_iter(values))?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push(row.get(0)?);
            }
            out
        };

        let mut results = Vec::new();
        for ctv_id in &ctv_ids {
            let Some(ctv) = ctv_get_tx(&self.conn, ctv_id)? else {
                continue;
            };
            let Some(component) = component_get_tx(&self.conn, &ctv.component_id)? else {
                continue;
            };
            let text = text_for_ctv_tx(&self.conn, &ctv.ctv_id)?.map(|t| t.full_text);
            results.push(result_row(&component, &ctv, text, None));
        }
        Ok(results)
    }

    /// Hybrid: snapshot at the date, then keep rows matching the query terms.
    pub fn hybrid_search(
        &self,
        query: &str,
        date: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, StoreError> {
        let terms: Vec<String> = query
            .split_whitespace()
            .take(MAX_SEARCH_TERMS)
            .map(str::to_lowercase)
            .collect();
        if terms.is_empty() {
            return self.point_in_time(None, date, top_k);
        }

        let snapshot = self.point_in_time(None, date, usize::MAX)?;
        let mut out = Vec::new();
        for row in snapshot {
            let Some(text) = row.text.as_deref() else {
                continue;
            };
            let haystack = text.to_lowercase();
            if terms.iter().all(|term| haystack.contains(term)) {
                out.push(row);
                if out.len() >= top_k {
                    break;
                }
            }
        }
        Ok(out)
    }
}
