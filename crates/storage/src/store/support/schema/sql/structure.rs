#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS norms (
          official_id TEXT PRIMARY KEY,
          name TEXT NOT NULL,
          enactment_date TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS components (
          component_id TEXT PRIMARY KEY,
          norm_id TEXT NOT NULL,
          component_type TEXT NOT NULL,
          ordering_id TEXT NOT NULL,
          parent_id TEXT,
          sibling_order INTEGER NOT NULL,
          depth INTEGER NOT NULL,
          created_at_ms INTEGER NOT NULL
        );
"#;
