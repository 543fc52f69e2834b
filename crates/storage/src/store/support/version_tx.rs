#![forbid(unsafe_code)]

use rusqlite::{Connection, OptionalExtension, Transaction, params};

use super::super::{CtvRow, StoreError, TextRow};
use super::{char_count, content_hash};

const CTV_COLUMNS: &str = "ctv_id, component_id, version_number, date_start, date_end, \
     is_active, is_original, is_repealed, created_by_action, amendment_number";

fn ctv_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CtvRow> {
    let is_active: i64 = row.get(5)?;
    let is_original: i64 = row.get(6)?;
    let is_repealed: i64 = row.get(7)?;
    Ok(CtvRow {
        ctv_id: row.get(0)?,
        component_id: row.get(1)?,
        version_number: row.get(2)?,
        date_start: row.get(3)?,
        date_end: row.get(4)?,
        is_active: is_active != 0,
        is_original: is_original != 0,
        is_repealed: is_repealed != 0,
        created_by_action: row.get(8)?,
        amendment_number: row.get(9)?,
    })
}

pub(in crate::store) fn ctv_get_tx(
    conn: &Connection,
    ctv_id: &str,
) -> Result<Option<CtvRow>, StoreError> {
    Ok(conn
        .query_row(
            &format!("SELECT {CTV_COLUMNS} FROM ctvs WHERE ctv_id=?1"),
            params![ctv_id],
            ctv_from_row,
        )
        .optional()?)
}

pub(in crate::store) fn supersedes_of_tx(
    conn: &Connection,
    ctv_id: &str,
) -> Result<Option<String>, StoreError> {
    Ok(conn
        .query_row(
            "SELECT supersedes_ctv_id FROM supersedes WHERE ctv_id=?1",
            params![ctv_id],
            |row| row.get(0),
        )
        .optional()?)
}

pub(in crate::store) fn active_ctv_tx(
    conn: &Connection,
    component_id: &str,
) -> Result<Option<CtvRow>, StoreError> {
    Ok(conn
        .query_row(
            &format!(
                "SELECT {CTV_COLUMNS} FROM ctvs WHERE component_id=?1 AND is_active=1 LIMIT 1"
            ),
            params![component_id],
            ctv_from_row,
        )
        .optional()?)
}

/// The single version whose [date_start, date_end) interval covers `date`.
pub(in crate::store) fn ctv_at_date_tx(
    conn: &Connection,
    component_id: &str,
    date: &str,
) -> Result<Option<CtvRow>, StoreError> {
    Ok(conn
        .query_row(
            &format!(
                "SELECT {CTV_COLUMNS} FROM ctvs \
                 WHERE component_id=?1 AND date_start <= ?2 \
                   AND (date_end IS NULL OR date_end > ?2) \
                 LIMIT 1"
            ),
            params![component_id, date],
            ctv_from_row,
        )
        .optional()?)
}

pub(in crate::store) fn ctvs_of_component_tx(
    conn: &Connection,
    component_id: &str,
) -> Result<Vec<CtvRow>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CTV_COLUMNS} FROM ctvs WHERE component_id=?1 ORDER BY version_number DESC"
    ))?;
    let mut rows = stmt.query(params![component_id])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(ctv_from_row(row)?);
    }
    Ok(out)
}

pub(in crate::store) fn close_ctv_tx(
    tx: &Transaction<'_>,
    ctv_id: &str,
    date_end: &str,
) -> Result<(), StoreError> {
    tx.execute(
        "UPDATE ctvs SET date_end=?2, is_active=0 WHERE ctv_id=?1",
        params![ctv_id, date_end],
    )?;
    Ok(())
}

pub(in crate::store) struct CtvInsertTxArgs<'a> {
    pub ctv_id: &'a str,
    pub component_id: &'a str,
    pub version_number: i64,
    pub date_start: &'a str,
    pub is_original: bool,
    pub is_repealed: bool,
    pub created_by_action: Option<&'a str>,
    pub amendment_number: Option<i64>,
    pub event_numbers: Option<&'a str>,
    pub now_ms: i64,
}

pub(in crate::store) fn insert_ctv_tx(
    tx: &Transaction<'_>,
    args: CtvInsertTxArgs<'_>,
) -> Result<bool, StoreError> {
    let CtvInsertTxArgs {
        ctv_id,
        component_id,
        version_number,
        date_start,
        is_original,
        is_repealed,
        created_by_action,
        amendment_number,
        event_numbers,
        now_ms,
    } = args;

    let inserted = tx.execute(
        r#"
        INSERT OR IGNORE INTO ctvs(ctv_id, component_id, version_number, date_start, date_end,
                                   is_active, is_original, is_repealed, created_by_action,
                                   amendment_number, event_numbers, created_at_ms)
        VALUES (?1, ?2, ?3, ?4, NULL, 1, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
        params![
            ctv_id,
            component_id,
            version_number,
            date_start,
            is_original as i64,
            is_repealed as i64,
            created_by_action,
            amendment_number,
            event_numbers,
            now_ms
        ],
    )?;
    Ok(inserted > 0)
}

pub(in crate::store) struct ExpressionInsertTxArgs<'a> {
    pub ctv_id: &'a str,
    pub language: &'a str,
    pub header: Option<&'a str>,
    pub content: Option<&'a str>,
    pub full_text: &'a str,
    pub now_ms: i64,
}

/// Creates the CLV + TextUnit pair owned by one CTV in one language.
/// Returns (clv inserted, text inserted) so loader stats count only new rows.
pub(in crate::store) fn insert_expression_tx(
    tx: &Transaction<'_>,
    args: ExpressionInsertTxArgs<'_>,
) -> Result<(bool, bool), StoreError> {
    let ExpressionInsertTxArgs {
        ctv_id,
        language,
        header,
        content,
        full_text,
        now_ms,
    } = args;

    let clv_id = format!("{ctv_id}_{language}");
    let text_id = format!("{clv_id}_text");

    let clv_inserted = tx.execute(
        r#"
        INSERT OR IGNORE INTO clvs(clv_id, ctv_id, language, created_at_ms)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![clv_id, ctv_id, language, now_ms],
    )?;

    let text_inserted = tx.execute(
        r#"
        INSERT OR IGNORE INTO text_units(text_id, clv_id, header, content, full_text,
                                         char_count, content_hash, created_at_ms)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            text_id,
            clv_id,
            header,
            content,
            full_text,
            char_count(full_text),
            content_hash(full_text),
            now_ms
        ],
    )?;

    Ok((clv_inserted > 0, text_inserted > 0))
}

/// Re-expresses an unchanged ancestor: each CTV owns its expression, so the
/// new version gets fresh CLV/TextUnit rows carrying the previous wording.
pub(in crate::store) fn copy_expressions_tx(
    tx: &Transaction<'_>,
    from_ctv_id: &str,
    to_ctv_id: &str,
    now_ms: i64,
) -> Result<usize, StoreError> {
    let mut copied = 0usize;
    let sources: Vec<(String, TextRow)> = {
        let mut stmt = tx.prepare(
            r#"
            SELECT l.language, t.text_id, t.clv_id, t.header, t.content, t.full_text,
                   t.char_count, t.content_hash
            FROM clvs l
            JOIN text_units t ON t.clv_id = l.clv_id
            WHERE l.ctv_id = ?1
            "#,
        )?;
        let mut rows = stmt.query(params![from_ctv_id])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push((
                row.get::<_, String>(0)?,
                TextRow {
                    text_id: row.get(1)?,
                    clv_id: row.get(2)?,
                    header: row.get(3)?,
                    content: row.get(4)?,
                    full_text: row.get(5)?,
                    char_count: row.get(6)?,
                    content_hash: row.get(7)?,
                },
            ));
        }
        out
    };

    for (language, text) in sources {
        let clv_id = format!("{to_ctv_id}_{language}");
        let text_id = format!("{clv_id}_text");
        tx.execute(
            r#"
            INSERT OR IGNORE INTO clvs(clv_id, ctv_id, language, created_at_ms)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![clv_id, to_ctv_id, language, now_ms],
        )?;
        tx.execute(
            r#"
            INSERT OR IGNORE INTO text_units(text_id, clv_id, header, content, full_text,
                                             char_count, content_hash, created_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                text_id,
                clv_id,
                text.header,
                text.content,
                text.full_text,
                text.char_count,
                text.content_hash,
                now_ms
            ],
        )?;
        copied += 1;
    }

    Ok(copied)
}

pub(in crate::store) fn text_for_ctv_tx(
    conn: &Connection,
    ctv_id: &str,
) -> Result<Option<TextRow>, StoreError> {
    Ok(conn
        .query_row(
            r#"
            SELECT t.text_id, t.clv_id, t.header, t.content, t.full_text, t.char_count, t.content_hash
            FROM clvs l
            JOIN text_units t ON t.clv_id = l.clv_id
            WHERE l.ctv_id = ?1
            LIMIT 1
            "#,
            params![ctv_id],
            |row| {
                Ok(TextRow {
                    text_id: row.get(0)?,
                    clv_id: row.get(1)?,
                    header: row.get(2)?,
                    content: row.get(3)?,
                    full_text: row.get(4)?,
                    char_count: row.get(5)?,
                    content_hash: row.get(6)?,
                })
            },
        )
        .optional()?)
}

pub(in crate::store) fn insert_aggregate_tx(
    tx: &Transaction<'_>,
    parent_ctv_id: &str,
    child_ctv_id: &str,
    ordering: i64,
) -> Result<bool, StoreError> {
    let inserted = tx.execute(
        r#"
        INSERT OR IGNORE INTO aggregates(parent_ctv_id, child_ctv_id, ordering)
        VALUES (?1, ?2, ?3)
        "#,
        params![parent_ctv_id, child_ctv_id, ordering],
    )?;
    Ok(inserted > 0)
}

pub(in crate::store) fn insert_supersedes_tx(
    tx: &Transaction<'_>,
    ctv_id: &str,
    supersedes_ctv_id: &str,
) -> Result<(), StoreError> {
    tx.execute(
        "INSERT INTO supersedes(ctv_id, supersedes_ctv_id) VALUES (?1, ?2)",
        params![ctv_id, supersedes_ctv_id],
    )?;
    Ok(())
}

pub(in crate::store) fn max_date_start_tx(
    conn: &Connection,
) -> Result<Option<String>, StoreError> {
    Ok(conn.query_row("SELECT MAX(date_start) FROM ctvs", [], |row| row.get(0))?)
}
