#![forbid(unsafe_code)]

use rusqlite::params;
use tracing::warn;

use super::*;

impl SqliteStore {
    /// Drops all rows and re-stamps the schema. The DDL itself is idempotent
    /// and was already applied on open.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            r#"
            DELETE FROM resulted_in;
            DELETE FROM supersedes;
            DELETE FROM aggregates;
            DELETE FROM text_units;
            DELETE FROM clvs;
            DELETE FROM ctvs;
            DELETE FROM components;
            DELETE FROM actions;
            DELETE FROM norms;
            DELETE FROM meta;
            "#,
        )?;
        tx.execute(
            "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
            params!["schema_version", "v1"],
        )?;
        tx.commit()?;
        warn!("store cleared");
        Ok(())
    }

    pub fn schema_info(&self) -> Result<SchemaInfo, StoreError> {
        let count = |table: &str| -> Result<i64, StoreError> {
            Ok(self
                .conn
                .query_row(&format!("SELECT count(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?)
        };
        Ok(SchemaInfo {
            norms: count("norms")?,
            components: count("components")?,
            ctvs: count("ctvs")?,
            clvs: count("clvs")?,
            text_units: count("text_units")?,
            actions: count("actions")?,
        })
    }
}
