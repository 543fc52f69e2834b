#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE INDEX IF NOT EXISTS idx_components_type ON components(component_type);
        CREATE INDEX IF NOT EXISTS idx_components_parent ON components(parent_id, sibling_order);
        CREATE INDEX IF NOT EXISTS idx_components_norm ON components(norm_id);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_ctvs_component_version ON ctvs(component_id, version_number);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_ctvs_single_active ON ctvs(component_id) WHERE is_active = 1;
        CREATE INDEX IF NOT EXISTS idx_ctvs_component_active ON ctvs(component_id, is_active);
        CREATE INDEX IF NOT EXISTS idx_ctvs_date_start ON ctvs(date_start);
        CREATE INDEX IF NOT EXISTS idx_ctvs_amendment ON ctvs(amendment_number);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_clvs_ctv_language ON clvs(ctv_id, language);
        CREATE INDEX IF NOT EXISTS idx_clvs_language ON clvs(language);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_text_units_clv ON text_units(clv_id);
        CREATE INDEX IF NOT EXISTS idx_aggregates_child ON aggregates(child_ctv_id);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_supersedes_prev ON supersedes(supersedes_ctv_id);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_actions_number ON actions(amendment_number);
        CREATE INDEX IF NOT EXISTS idx_actions_date ON actions(amendment_date);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_resulted_in_ctv ON resulted_in(ctv_id);
"#;
