#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use rusqlite::Transaction;
use tracing::{info, warn};

use lx_core::input::Amendment;
use lx_core::model::{ChangeType, CreatedBy, DEFAULT_LANGUAGE};

use super::*;

struct NewVersionTxArgs<'a> {
    old: &'a CtvRow,
    action_id: &'a str,
    amendment_date: &'a str,
    amendment_number: i64,
    created_by: CreatedBy,
    new_content: Option<&'a str>,
    is_repealed: bool,
}

impl SqliteStore {
    /// Applies one amendment under a single transaction.
    ///
    /// Directly changed components are versioned first; affected ancestors are
    /// then versioned deepest-first so every new parent fan-out can reference
    /// the already-current child versions. Children untouched by the
    /// amendment are referenced by identity, never copied.
    pub fn apply_amendment(&mut self, amendment: &Amendment) -> Result<AmendmentStats, StoreError> {
        let mut seen = BTreeSet::new();
        for change in &amendment.changes {
            if !seen.insert(change.component_id.as_str()) {
                return Err(StoreError::InvalidInput(
                    "amendment lists the same component twice",
                ));
            }
        }

        let now_ms = now_ms();
        let mut stats = AmendmentStats::default();
        let tx = self.conn.transaction()?;

        if action_exists_tx(&tx, amendment.number)? {
            warn!(
                amendment = amendment.number,
                "amendment already applied; second application is a no-op"
            );
            return Ok(stats);
        }

        let Some(max_start) = max_date_start_tx(&tx)? else {
            return Err(StoreError::PreconditionFailed {
                reason: "store holds no versions; load a norm first".to_string(),
            });
        };
        if amendment.date.as_str() < max_start.as_str() {
            return Err(StoreError::PreconditionFailed {
                reason: format!(
                    "amendment {} dated {} precedes the latest version start {}",
                    amendment.number, amendment.date, max_start
                ),
            });
        }

        let action_id = format!("ec_{}", amendment.number);
        let affected: Vec<String> = amendment
            .changes
            .iter()
            .map(|change| change.component_id.clone())
            .collect();
        insert_action_tx(
            &tx,
            ActionInsertTxArgs {
                action_id: &action_id,
                amendment_number: amendment.number,
                amendment_date: amendment.date.as_str(),
                description: &amendment.description,
                affected_components: &affected,
                now_ms,
            },
        )?;
        stats.actions_created += 1;

        let mut touched: Vec<String> = Vec::new();
        for change in &amendment.changes {
            let Some(old) = active_ctv_tx(&tx, &change.component_id)? else {
                warn!(
                    component = %change.component_id,
                    amendment = amendment.number,
                    "no active version for changed component; change skipped"
                );
                stats.skipped_changes += 1;
                continue;
            };
            let is_repealed = change.change_type == ChangeType::Repeal;
            let new_content = (!is_repealed && !change.new_content.trim().is_empty())
                .then_some(change.new_content.as_str());
            open_new_version_tx(
                &tx,
                &mut stats,
                NewVersionTxArgs {
                    old: &old,
                    action_id: &action_id,
                    amendment_date: amendment.date.as_str(),
                    amendment_number: amendment.number,
                    created_by: CreatedBy::Amendment,
                    new_content,
                    is_repealed,
                },
                now_ms,
            )?;
            touched.push(change.component_id.clone());
        }

        if !touched.is_empty() {
            let mut ancestors: BTreeSet<String> = BTreeSet::new();
            for component_id in &touched {
                for ancestor in ancestor_ids_tx(&tx, component_id)? {
                    ancestors.insert(ancestor);
                }
            }
            // A directly changed component already got its version and
            // fan-out above; versioning it again would tear its interval.
            for component_id in &touched {
                ancestors.remove(component_id);
            }
            let ancestor_ids: Vec<String> = ancestors.into_iter().collect();
            let ordered = components_by_depth_desc_tx(&tx, &ancestor_ids)?;
            for ancestor_id in &ordered {
                let Some(old) = active_ctv_tx(&tx, ancestor_id)? else {
                    return Err(StoreError::InvariantViolation {
                        invariant: "single_active_version",
                        detail: format!("no active version for ancestor {ancestor_id}"),
                    });
                };
                open_new_version_tx(
                    &tx,
                    &mut stats,
                    NewVersionTxArgs {
                        old: &old,
                        action_id: &action_id,
                        amendment_date: amendment.date.as_str(),
                        amendment_number: amendment.number,
                        created_by: CreatedBy::AmendmentPropagation,
                        new_content: None,
                        is_repealed: false,
                    },
                    now_ms,
                )?;
            }
        }

        tx.commit()?;
        info!(
            amendment = amendment.number,
            date = %amendment.date,
            new_ctvs = stats.new_ctvs,
            reused_ctvs = stats.reused_ctvs,
            skipped = stats.skipped_changes,
            "amendment applied"
        );
        Ok(stats)
    }

    /// Applies a batch in chronological order (date, then number). Duplicate
    /// applications count as skipped; failed amendments are reported, not
    /// propagated.
    pub fn apply_all(&mut self, amendments: &[Amendment]) -> BatchReport {
        let mut sorted: Vec<&Amendment> = amendments.iter().collect();
        sorted.sort_by(|a, b| a.date.cmp(&b.date).then(a.number.cmp(&b.number)));

        let mut report = BatchReport::default();
        for amendment in sorted {
            match self.apply_amendment(amendment) {
                Ok(stats) if stats.actions_created == 0 => report.skipped += 1,
                Ok(_) => report.processed += 1,
                Err(err) => {
                    warn!(
                        amendment = amendment.number,
                        error = %err,
                        "amendment failed"
                    );
                    report.errors.push(BatchError {
                        amendment_number: amendment.number,
                        reason: err.to_string(),
                    });
                }
            }
        }
        report
    }
}

/// Closes the current version, opens its successor, wires SUPERSEDES and
/// RESULTED_IN, and rebuilds the AGGREGATES fan-out from the children's
/// active versions. Children whose version predates the amendment are the
/// reused ones.
fn open_new_version_tx(
    tx: &Transaction<'_>,
    stats: &mut AmendmentStats,
    args: NewVersionTxArgs<'_>,
    now_ms: i64,
) -> Result<String, StoreError> {
    let NewVersionTxArgs {
        old,
        action_id,
        amendment_date,
        amendment_number,
        created_by,
        new_content,
        is_repealed,
    } = args;

    close_ctv_tx(tx, &old.ctv_id, amendment_date)?;
    stats.closed_ctvs += 1;

    let new_version = old.version_number + 1;
    let new_ctv_id = format!("{}_v{new_version}", old.component_id);
    if !insert_ctv_tx(
        tx,
        CtvInsertTxArgs {
            ctv_id: &new_ctv_id,
            component_id: &old.component_id,
            version_number: new_version,
            date_start: amendment_date,
            is_original: false,
            is_repealed,
            created_by_action: Some(created_by.as_str()),
            amendment_number: Some(amendment_number),
            event_numbers: None,
            now_ms,
        },
    )? {
        return Err(StoreError::InvariantViolation {
            invariant: "monotone_versions",
            detail: format!("version {new_ctv_id} already exists"),
        });
    }
    stats.new_ctvs += 1;

    if is_repealed {
        // Repealed versions carry no expression.
    } else if let Some(content) = new_content {
        insert_expression_tx(
            tx,
            ExpressionInsertTxArgs {
                ctv_id: &new_ctv_id,
                language: DEFAULT_LANGUAGE,
                header: None,
                content: Some(content),
                full_text: content,
                now_ms,
            },
        )?;
    } else if created_by == CreatedBy::AmendmentPropagation {
        // An ancestor's own wording did not change; each CTV owns its
        // expression, so the previous one is re-materialized.
        copy_expressions_tx(tx, &old.ctv_id, &new_ctv_id, now_ms)?;
    }

    insert_supersedes_tx(tx, &new_ctv_id, &old.ctv_id)?;
    insert_resulted_in_tx(tx, action_id, &new_ctv_id)?;

    for child in children_of_tx(tx, &old.component_id)? {
        let Some(child_active) = active_ctv_tx(tx, &child.component_id)? else {
            return Err(StoreError::InvariantViolation {
                invariant: "single_active_version",
                detail: format!(
                    "no active version for child {} of {}",
                    child.component_id, old.component_id
                ),
            });
        };
        if insert_aggregate_tx(tx, &new_ctv_id, &child_active.ctv_id, child.sibling_order)? {
            stats.new_aggregations += 1;
        }
        if child_active.date_start.as_str() < amendment_date {
            stats.reused_ctvs += 1;
        }
    }

    Ok(new_ctv_id)
}
