//! Catalog diffing: version ordering, descriptor parsing and per-skill
//! status classification.

pub mod descriptor;
pub mod diff;
pub mod version;

pub use diff::{DiffEngine, ItemStatus, Status};
