#![forbid(unsafe_code)]

use rusqlite::Transaction;
use tracing::info;

use lx_core::error::DomainError;
use lx_core::ids::ComponentId;
use lx_core::input::{ParsedComponent, ParsedNorm};
use lx_core::model::DEFAULT_LANGUAGE;

use super::*;

struct LoadFrame<'a> {
    norm_id: &'a str,
    parent_id: Option<&'a str>,
    parent_ctv_id: Option<&'a str>,
    enactment_date: &'a str,
    sibling_order: i64,
    depth: i64,
}

impl SqliteStore {
    /// Materializes the v1 graph for one parsed Norm: one Component per tree
    /// node, one CTV per Component, CLV + TextUnit for text carriers, and
    /// one AGGREGATES edge per parent→child link. Runs in one transaction.
    pub fn load_norm(
        &mut self,
        norm: &ParsedNorm,
        policy: LoadPolicy,
    ) -> Result<LoadStats, StoreError> {
        let now_ms = now_ms();
        let mut stats = LoadStats::default();
        let tx = self.conn.transaction()?;

        if policy == LoadPolicy::Strict && norm_exists_tx(&tx, &norm.official_id)? {
            return Err(StoreError::AlreadyExists {
                entity: "norm",
                id: norm.official_id.clone(),
            });
        }

        if upsert_norm_tx(
            &tx,
            &norm.official_id,
            &norm.name,
            norm.enactment_date.as_str(),
            now_ms,
        )? {
            stats.norms += 1;
        }

        for (idx, component) in norm.components.iter().enumerate() {
            load_component_tx(
                &tx,
                &mut stats,
                LoadFrame {
                    norm_id: &norm.official_id,
                    parent_id: None,
                    parent_ctv_id: None,
                    enactment_date: norm.enactment_date.as_str(),
                    sibling_order: idx as i64 + 1,
                    depth: 0,
                },
                component,
                now_ms,
            )?;
        }

        tx.commit()?;
        info!(
            norm = %norm.official_id,
            components = stats.components,
            ctvs = stats.ctvs,
            "initial load complete"
        );
        Ok(stats)
    }
}

fn load_component_tx(
    tx: &Transaction<'_>,
    stats: &mut LoadStats,
    frame: LoadFrame<'_>,
    component: &ParsedComponent,
    now_ms: i64,
) -> Result<(), StoreError> {
    let id = ComponentId::try_new(component.component_id.as_str()).map_err(DomainError::from)?;

    if upsert_component_tx(
        tx,
        ComponentUpsertTxArgs {
            component_id: id.as_str(),
            norm_id: frame.norm_id,
            component_type: component.component_type.as_str(),
            ordering_id: &component.ordering_id,
            parent_id: frame.parent_id,
            sibling_order: frame.sibling_order,
            depth: frame.depth,
            now_ms,
        },
    )? {
        stats.components += 1;
        if frame.parent_id.is_some() {
            stats.relationships += 1;
        }
    }

    let ctv_id = format!("{}_v1", id.as_str());
    let event_numbers: Vec<i64> = component
        .events
        .iter()
        .map(|event| event.amendment_number)
        .collect();
    let event_numbers_json = if event_numbers.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&event_numbers)?)
    };

    if insert_ctv_tx(
        tx,
        CtvInsertTxArgs {
            ctv_id: &ctv_id,
            component_id: id.as_str(),
            version_number: 1,
            date_start: frame.enactment_date,
            is_original: component.is_original,
            is_repealed: false,
            created_by_action: None,
            amendment_number: None,
            event_numbers: event_numbers_json.as_deref(),
            now_ms,
        },
    )? {
        stats.ctvs += 1;
    }

    if !component.full_text.trim().is_empty() {
        let (clv_inserted, text_inserted) = insert_expression_tx(
            tx,
            ExpressionInsertTxArgs {
                ctv_id: &ctv_id,
                language: DEFAULT_LANGUAGE,
                header: component.header.as_deref(),
                content: component.content.as_deref(),
                full_text: &component.full_text,
                now_ms,
            },
        )?;
        if clv_inserted {
            stats.clvs += 1;
        }
        if text_inserted {
            stats.text_units += 1;
        }
    }

    if let Some(parent_ctv_id) = frame.parent_ctv_id {
        if insert_aggregate_tx(tx, parent_ctv_id, &ctv_id, frame.sibling_order)? {
            stats.relationships += 1;
        }
    }

    for (idx, child) in component.children.iter().enumerate() {
        load_component_tx(
            tx,
            stats,
            LoadFrame {
                norm_id: frame.norm_id,
                parent_id: Some(id.as_str()),
                parent_ctv_id: Some(&ctv_id),
                enactment_date: frame.enactment_date,
                sibling_order: idx as i64 + 1,
                depth: frame.depth + 1,
            },
            child,
            now_ms,
        )?;
    }

    Ok(())
}
