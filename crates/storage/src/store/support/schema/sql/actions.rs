#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS actions (
          action_id TEXT PRIMARY KEY,
          action_type TEXT NOT NULL,
          amendment_number INTEGER NOT NULL,
          amendment_date TEXT NOT NULL,
          description TEXT,
          affected_components TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS resulted_in (
          action_id TEXT NOT NULL,
          ctv_id TEXT NOT NULL,
          PRIMARY KEY (action_id, ctv_id)
        );
"#;
