#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use rusqlite::params;

use super::super::*;

impl SqliteStore {
    /// Which descendants of a scope were directly amended inside a date
    /// range, and which Actions are responsible.
    pub fn hierarchical_impact(
        &self,
        scope_component_id: &str,
        from: &str,
        to: &str,
    ) -> Result<ImpactReport, StoreError> {
        let Some(scope) = component_resolve_tx(&self.conn, scope_component_id)? else {
            return Ok(ImpactReport::default());
        };

        let mut report = ImpactReport::default();
        let mut responsible: BTreeSet<i64> = BTreeSet::new();
        for component_id in descendant_ids_tx(&self.conn, &scope.component_id)? {
            let numbers: Vec<i64> = {
                let mut stmt = self.conn.prepare(
                    r#"
                    SELECT amendment_number FROM ctvs
                    WHERE component_id = ?1
                      AND created_by_action = 'amendment'
                      AND amendment_number IS NOT NULL
                      AND date_start >= ?2 AND date_start <= ?3
                    ORDER BY version_number
                    "#,
                )?;
                let mut rows = stmt.query(params![component_id, from, to])?;
                let mut out = Vec::new();
                while let Some(row) = rows.next()? {
                    out.push(row.get(0)?);
                }
                out
            };
            if numbers.is_empty() {
                continue;
            }
            let Some(component) = component_get_tx(&self.conn, &component_id)? else {
                continue;
            };
            responsible.extend(numbers.iter().copied());
            report.components.push(ImpactComponent {
                component_id: component.component_id,
                component_type: component.component_type,
                amendment_numbers: numbers,
            });
        }

        for number in responsible {
            let mut stmt = self.conn.prepare(
                "SELECT amendment_number, amendment_date, description \
                 FROM actions WHERE amendment_number=?1",
            )?;
            let mut rows = stmt.query(params![number])?;
            while let Some(row) = rows.next()? {
                report.actions.push(ImpactAction {
                    amendment_number: row.get(0)?,
                    amendment_date: row.get(1)?,
                    description: row.get(2)?,
                });
            }
        }
        report
            .actions
            .sort_by(|a, b| a.amendment_date.cmp(&b.amendment_date));
        Ok(report)
    }
}
