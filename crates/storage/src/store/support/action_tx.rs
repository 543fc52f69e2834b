#![forbid(unsafe_code)]

use rusqlite::{Connection, OptionalExtension, Transaction, params};

use super::super::StoreError;

pub(in crate::store) fn action_exists_tx(
    conn: &Connection,
    amendment_number: i64,
) -> Result<bool, StoreError> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM actions WHERE amendment_number=?1",
            params![amendment_number],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

pub(in crate::store) struct ActionInsertTxArgs<'a> {
    pub action_id: &'a str,
    pub amendment_number: i64,
    pub amendment_date: &'a str,
    pub description: &'a str,
    pub affected_components: &'a [String],
    pub now_ms: i64,
}

pub(in crate::store) fn insert_action_tx(
    tx: &Transaction<'_>,
    args: ActionInsertTxArgs<'_>,
) -> Result<(), StoreError> {
    let ActionInsertTxArgs {
        action_id,
        amendment_number,
        amendment_date,
        description,
        affected_components,
        now_ms,
    } = args;

    let affected_json = serde_json::to_string(affected_components)?;
    tx.execute(
        r#"
        INSERT INTO actions(action_id, action_type, amendment_number, amendment_date,
                            description, affected_components, created_at_ms)
        VALUES (?1, 'amendment', ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            action_id,
            amendment_number,
            amendment_date,
            description,
            affected_json,
            now_ms
        ],
    )?;
    Ok(())
}

pub(in crate::store) fn insert_resulted_in_tx(
    tx: &Transaction<'_>,
    action_id: &str,
    ctv_id: &str,
) -> Result<(), StoreError> {
    tx.execute(
        "INSERT INTO resulted_in(action_id, ctv_id) VALUES (?1, ?2)",
        params![action_id, ctv_id],
    )?;
    Ok(())
}
