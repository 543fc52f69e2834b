#![forbid(unsafe_code)]

use std::collections::HashMap;

use super::super::*;
use super::result_row;

impl SqliteStore {
    /// The state of the law at one date. With a component handle the
    /// answer is the single version whose interval covers the date; without
    /// one it is a depth-first snapshot of the whole norm.
    pub fn point_in_time(
        &self,
        component: Option<&str>,
        date: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, StoreError> {
        match component {
            Some(needle) => {
                let Some(component) = component_resolve_tx(&self.conn, needle)? else {
                    return Ok(Vec::new());
                };
                let Some(ctv) = ctv_at_date_tx(&self.conn, &component.component_id, date)? else {
                    return Ok(Vec::new());
                };
                if ctv.is_repealed {
                    return Ok(Vec::new());
                }
                let text = text_for_ctv_tx(&self.conn, &ctv.ctv_id)?.map(|t| t.full_text);
                Ok(vec![result_row(&component, &ctv, text, None)])
            }
            None => self.norm_snapshot(date, top_k),
        }
    }

    /// Whole-norm snapshot: every text-carrying component valid at the date,
    /// in document order (sibling order within a parent, depth-first).
    fn norm_snapshot(&self, date: &str, top_k: usize) -> Result<Vec<RetrievalResult>, StoreError> {
        let components = components_all_tx(&self.conn)?;
        let mut roots: Vec<&ComponentRow> = Vec::new();
        let mut children: HashMap<&str, Vec<&ComponentRow>> = HashMap::new();
        for component in &components {
            match component.parent_id.as_deref() {
                Some(parent) => children.entry(parent).or_default().push(component),
                None => roots.push(component),
            }
        }
        let order = |a: &&ComponentRow, b: &&ComponentRow| {
            a.sibling_order
                .cmp(&b.sibling_order)
                .then_with(|| a.ordering_id.cmp(&b.ordering_id))
        };
        roots.sort_by(order);
        for siblings in children.values_mut() {
            siblings.sort_by(order);
        }

        let mut out = Vec::new();
        let mut stack: Vec<&ComponentRow> = roots.into_iter().rev().collect();
        while let Some(component) = stack.pop() {
            if out.len() >= top_k {
                break;
            }
            if let Some(ctv) = ctv_at_date_tx(&self.conn, &component.component_id, date)? {
                if !ctv.is_repealed {
                    if let Some(text) = text_for_ctv_tx(&self.conn, &ctv.ctv_id)? {
                        out.push(result_row(component, &ctv, Some(text.full_text), None));
                    }
                }
            }
            if let Some(siblings) = children.get(component.component_id.as_str()) {
                for child in siblings.iter().rev() {
                    stack.push(*child);
                }
            }
        }
        Ok(out)
    }
}
