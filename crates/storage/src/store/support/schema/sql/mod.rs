#![forbid(unsafe_code)]

mod actions;
mod core;
mod indexes;
mod pragmas;
mod structure;
mod versions;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(pragmas::SQL);
    sql.push_str(core::SQL);
    sql.push_str(structure::SQL);
    sql.push_str(versions::SQL);
    sql.push_str(actions::SQL);
    sql.push_str(indexes::SQL);
    sql
}
