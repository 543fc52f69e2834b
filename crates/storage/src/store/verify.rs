#![forbid(unsafe_code)]

use rusqlite::Connection;

use super::*;

struct InvariantQuery {
    invariant: &'static str,
    sql: &'static str,
}

/// Each query counts violations of one invariant; zero means the invariant
/// holds for the whole graph.
const INVARIANT_QUERIES: &[InvariantQuery] = &[
    InvariantQuery {
        invariant: "single_active_version",
        sql: "SELECT count(*) FROM (
                SELECT component_id FROM ctvs GROUP BY component_id HAVING SUM(is_active) <> 1
              )",
    },
    InvariantQuery {
        invariant: "active_version_open_ended",
        sql: "SELECT count(*) FROM ctvs WHERE is_active = 1 AND date_end IS NOT NULL",
    },
    InvariantQuery {
        invariant: "non_overlapping_validity",
        sql: "SELECT count(*) FROM ctvs v1
              JOIN ctvs v2 ON v1.component_id = v2.component_id AND v1.ctv_id < v2.ctv_id
              WHERE (v1.date_start < v2.date_start
                     AND (v1.date_end IS NULL OR v1.date_end > v2.date_start))
                 OR (v2.date_start < v1.date_start
                     AND (v2.date_end IS NULL OR v2.date_end > v1.date_start))
                 OR v1.date_start = v2.date_start",
    },
    InvariantQuery {
        invariant: "monotone_versions",
        sql: "SELECT count(*) FROM ctvs v1
              JOIN ctvs v2 ON v1.component_id = v2.component_id
              WHERE v1.version_number < v2.version_number AND v1.date_start >= v2.date_start",
    },
    InvariantQuery {
        invariant: "version_intervals_chain",
        sql: "SELECT count(*) FROM ctvs v1
              JOIN ctvs v2 ON v1.component_id = v2.component_id
                          AND v2.version_number = v1.version_number + 1
              WHERE v1.date_end IS NULL OR v1.date_end <> v2.date_start",
    },
    InvariantQuery {
        invariant: "supersedes_chain",
        sql: "SELECT (SELECT count(*) FROM ctvs v
                      WHERE v.version_number > 1 AND NOT EXISTS (
                        SELECT 1 FROM supersedes s
                        JOIN ctvs prev ON prev.ctv_id = s.supersedes_ctv_id
                        WHERE s.ctv_id = v.ctv_id
                          AND prev.component_id = v.component_id
                          AND prev.version_number = v.version_number - 1))
                   + (SELECT count(*) FROM supersedes s
                      JOIN ctvs a ON a.ctv_id = s.ctv_id
                      JOIN ctvs b ON b.ctv_id = s.supersedes_ctv_id
                      WHERE a.component_id <> b.component_id
                         OR a.version_number <> b.version_number + 1)",
    },
    InvariantQuery {
        invariant: "aggregates_completeness",
        sql: "SELECT count(*) FROM ctvs p
              JOIN components ch ON ch.parent_id = p.component_id
              WHERE NOT EXISTS (
                SELECT 1 FROM aggregates a
                JOIN ctvs cv ON cv.ctv_id = a.child_ctv_id
                WHERE a.parent_ctv_id = p.ctv_id
                  AND cv.component_id = ch.component_id)",
    },
    InvariantQuery {
        invariant: "aggregates_extraneous",
        sql: "SELECT count(*) FROM aggregates a
              JOIN ctvs p ON p.ctv_id = a.parent_ctv_id
              JOIN ctvs c ON c.ctv_id = a.child_ctv_id
              JOIN components cc ON cc.component_id = c.component_id
              WHERE cc.parent_id IS NULL OR cc.parent_id <> p.component_id",
    },
    InvariantQuery {
        invariant: "point_in_time_closure",
        sql: "SELECT count(*) FROM aggregates a
              JOIN ctvs p ON p.ctv_id = a.parent_ctv_id
              JOIN ctvs c ON c.ctv_id = a.child_ctv_id
              WHERE c.date_start > p.date_start
                 OR (c.date_end IS NOT NULL
                     AND (p.date_end IS NULL OR c.date_end < p.date_end))",
    },
    InvariantQuery {
        invariant: "leaf_text",
        sql: "SELECT count(*) FROM ctvs v
              JOIN components c ON c.component_id = v.component_id
              WHERE c.component_type IN ('article', 'paragraph', 'item', 'letter')
                AND v.is_repealed = 0
                AND NOT EXISTS (
                  SELECT 1 FROM clvs l
                  JOIN text_units t ON t.clv_id = l.clv_id
                  WHERE l.ctv_id = v.ctv_id)",
    },
    InvariantQuery {
        invariant: "causality",
        sql: "SELECT (SELECT count(*) FROM ctvs v
                      WHERE v.version_number > 1
                        AND (SELECT count(*) FROM resulted_in r
                             WHERE r.ctv_id = v.ctv_id) <> 1)
                   + (SELECT count(*) FROM ctvs v
                      JOIN resulted_in r ON r.ctv_id = v.ctv_id
                      WHERE v.version_number = 1)",
    },
    InvariantQuery {
        invariant: "orphan_versions",
        sql: "SELECT (SELECT count(*) FROM components c
                      WHERE NOT EXISTS (SELECT 1 FROM ctvs v
                                        WHERE v.component_id = c.component_id))
                   + (SELECT count(*) FROM ctvs v
                      WHERE NOT EXISTS (SELECT 1 FROM components c
                                        WHERE c.component_id = v.component_id))",
    },
    InvariantQuery {
        invariant: "aggregates_acyclic",
        sql: "SELECT (SELECT count(*) FROM aggregates WHERE parent_ctv_id = child_ctv_id)
                   + (SELECT count(*) FROM supersedes WHERE ctv_id = supersedes_ctv_id)",
    },
];

impl SqliteStore {
    /// Runs the full invariant suite and the aggregation-efficiency totals.
    pub fn verify(&self) -> Result<VerifyReport, StoreError> {
        let mut checks = Vec::with_capacity(INVARIANT_QUERIES.len());
        for query in INVARIANT_QUERIES {
            let violations: i64 = self.conn.query_row(query.sql, [], |row| row.get(0))?;
            checks.push(VerifyCheck {
                invariant: query.invariant,
                ok: violations == 0,
                violations,
            });
        }
        let totals = graph_totals(&self.conn)?;
        Ok(VerifyReport {
            ok: checks.iter().all(|check| check.ok),
            checks,
            totals,
        })
    }
}

fn graph_totals(conn: &Connection) -> Result<GraphTotals, StoreError> {
    let (components, ctvs, actions): (i64, i64, i64) = conn.query_row(
        "SELECT (SELECT count(*) FROM components),
                (SELECT count(*) FROM ctvs),
                (SELECT count(*) FROM actions)",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    let avg_versions = if components > 0 {
        ctvs as f64 / components as f64
    } else {
        0.0
    };
    let efficiency = if components > 0 {
        ctvs as f64 / (components as f64 * (actions as f64 + 1.0))
    } else {
        0.0
    };
    Ok(GraphTotals {
        components,
        ctvs,
        actions,
        avg_versions,
        efficiency,
    })
}
