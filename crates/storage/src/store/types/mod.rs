#![forbid(unsafe_code)]

mod retrieval;
mod rows;
mod stats;
mod verify;

pub use retrieval::*;
pub use rows::*;
pub use stats::*;
pub use verify::*;
