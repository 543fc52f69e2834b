#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS ctvs (
          ctv_id TEXT PRIMARY KEY,
          component_id TEXT NOT NULL,
          version_number INTEGER NOT NULL,
          date_start TEXT NOT NULL,
          date_end TEXT,
          is_active INTEGER NOT NULL,
          is_original INTEGER NOT NULL,
          is_repealed INTEGER NOT NULL,
          created_by_action TEXT,
          amendment_number INTEGER,
          event_numbers TEXT,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS clvs (
          clv_id TEXT PRIMARY KEY,
          ctv_id TEXT NOT NULL,
          language TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS text_units (
          text_id TEXT PRIMARY KEY,
          clv_id TEXT NOT NULL,
          header TEXT,
          content TEXT,
          full_text TEXT NOT NULL,
          char_count INTEGER NOT NULL,
          content_hash TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS aggregates (
          parent_ctv_id TEXT NOT NULL,
          child_ctv_id TEXT NOT NULL,
          ordering INTEGER NOT NULL,
          PRIMARY KEY (parent_ctv_id, child_ctv_id)
        );

        CREATE TABLE IF NOT EXISTS supersedes (
          ctv_id TEXT PRIMARY KEY,
          supersedes_ctv_id TEXT NOT NULL
        );
"#;
