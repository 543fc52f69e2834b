#![forbid(unsafe_code)]
//! SQLite-backed temporal aggregation engine for amended legal documents.
//!
//! The graph (Norm → Component → CTV → CLV → TextUnit, plus Action
//! provenance) lives in typed tables; amendments version only the changed
//! leaves and their ancestors, referencing unchanged sibling versions by
//! identity.

mod store;

pub use store::*;
