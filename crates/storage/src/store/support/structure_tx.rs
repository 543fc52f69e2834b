#![forbid(unsafe_code)]

use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OptionalExtension, Transaction, params, params_from_iter};

use super::super::{ComponentRow, StoreError};

pub(in crate::store) fn norm_exists_tx(
    conn: &Connection,
    official_id: &str,
) -> Result<bool, StoreError> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM norms WHERE official_id=?1",
            params![official_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

pub(in crate::store) fn upsert_norm_tx(
    tx: &Transaction<'_>,
    official_id: &str,
    name: &str,
    enactment_date: &str,
    now_ms: i64,
) -> Result<bool, StoreError> {
    let inserted = tx.execute(
        r#"
        INSERT OR IGNORE INTO norms(official_id, name, enactment_date, created_at_ms)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![official_id, name, enactment_date, now_ms],
    )?;
    Ok(inserted > 0)
}

pub(in crate::store) struct ComponentUpsertTxArgs<'a> {
    pub component_id: &'a str,
    pub norm_id: &'a str,
    pub component_type: &'a str,
    pub ordering_id: &'a str,
    pub parent_id: Option<&'a str>,
    pub sibling_order: i64,
    pub depth: i64,
    pub now_ms: i64,
}

pub(in crate::store) fn upsert_component_tx(
    tx: &Transaction<'_>,
    args: ComponentUpsertTxArgs<'_>,
) -> Result<bool, StoreError> {
    let ComponentUpsertTxArgs {
        component_id,
        norm_id,
        component_type,
        ordering_id,
        parent_id,
        sibling_order,
        depth,
        now_ms,
    } = args;

    let inserted = tx.execute(
        r#"
        INSERT OR IGNORE INTO components(component_id, norm_id, component_type, ordering_id, parent_id, sibling_order, depth, created_at_ms)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            component_id,
            norm_id,
            component_type,
            ordering_id,
            parent_id,
            sibling_order,
            depth,
            now_ms
        ],
    )?;
    Ok(inserted > 0)
}

fn component_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ComponentRow> {
    Ok(ComponentRow {
        component_id: row.get(0)?,
        norm_id: row.get(1)?,
        component_type: row.get(2)?,
        ordering_id: row.get(3)?,
        parent_id: row.get(4)?,
        sibling_order: row.get(5)?,
        depth: row.get(6)?,
    })
}

const COMPONENT_COLUMNS: &str =
    "component_id, norm_id, component_type, ordering_id, parent_id, sibling_order, depth";

pub(in crate::store) fn component_get_tx(
    conn: &Connection,
    component_id: &str,
) -> Result<Option<ComponentRow>, StoreError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COMPONENT_COLUMNS} FROM components WHERE component_id=?1"),
            params![component_id],
            component_from_row,
        )
        .optional()?)
}

/// Exact-id lookup first, then unique-suffix match (callers pass short
/// handles like `art_5` for a path-encoded id).
pub(in crate::store) fn component_resolve_tx(
    conn: &Connection,
    needle: &str,
) -> Result<Option<ComponentRow>, StoreError> {
    if let Some(row) = component_get_tx(conn, needle)? {
        return Ok(Some(row));
    }
    // '_' is a LIKE wildcard and the separator inside component ids, so the
    // needle is escaped before the suffix match.
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    let pattern = format!("%{escaped}");
    Ok(conn
        .query_row(
            &format!(
                "SELECT {COMPONENT_COLUMNS} FROM components \
                 WHERE component_id LIKE ?1 ESCAPE '\\' \
                 ORDER BY component_id LIMIT 1"
            ),
            params![pattern],
            component_from_row,
        )
        .optional()?)
}

pub(in crate::store) fn children_of_tx(
    conn: &Connection,
    component_id: &str,
) -> Result<Vec<ComponentRow>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COMPONENT_COLUMNS} FROM components WHERE parent_id=?1 \
         ORDER BY sibling_order, ordering_id"
    ))?;
    let mut rows = stmt.query(params![component_id])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(component_from_row(row)?);
    }
    Ok(out)
}

pub(in crate::store) fn ancestor_ids_tx(
    conn: &Connection,
    component_id: &str,
) -> Result<Vec<String>, StoreError> {
    let mut stmt = conn.prepare(
        r#"
        WITH RECURSIVE chain(component_id) AS (
          SELECT parent_id FROM components WHERE component_id=?1 AND parent_id IS NOT NULL
          UNION
          SELECT c.parent_id FROM components c
          JOIN chain ON c.component_id = chain.component_id
          WHERE c.parent_id IS NOT NULL
        )
        SELECT component_id FROM chain
        "#,
    )?;
    let mut rows = stmt.query(params![component_id])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(row.get(0)?);
    }
    Ok(out)
}

/// Orders the affected ancestor set for propagation: deepest first, so a
/// parent is versioned only after every affected descendant.
pub(in crate::store) fn components_by_depth_desc_tx(
    conn: &Connection,
    component_ids: &[String],
) -> Result<Vec<String>, StoreError> {
    if component_ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut sql = String::from(
        "SELECT component_id FROM components WHERE component_id IN (",
    );
    let mut params: Vec<SqlValue> = Vec::new();
    for (i, id) in component_ids.iter().enumerate() {
        if i != 0 {
            sql.push(',');
        }
        sql.push('?');
        params.push(SqlValue::Text(id.clone()));
    }
    sql.push_str(") ORDER BY depth DESC, component_id");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(params))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(row.get(0)?);
    }
    Ok(out)
}

/// Scope component plus every component reachable through HAS_CHILD.
pub(in crate::store) fn descendant_ids_tx(
    conn: &Connection,
    scope_component_id: &str,
) -> Result<Vec<String>, StoreError> {
    let mut stmt = conn.prepare(
        r#"
        WITH RECURSIVE sub(component_id) AS (
          SELECT component_id FROM components WHERE component_id=?1
          UNION ALL
          SELECT c.component_id FROM components c
          JOIN sub ON c.parent_id = sub.component_id
        )
        SELECT component_id FROM sub
        "#,
    )?;
    let mut rows = stmt.query(params![scope_component_id])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(row.get(0)?);
    }
    Ok(out)
}

pub(in crate::store) fn components_all_tx(
    conn: &Connection,
) -> Result<Vec<ComponentRow>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COMPONENT_COLUMNS} FROM components ORDER BY component_id"
    ))?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(component_from_row(row)?);
    }
    Ok(out)
}
