//! Deterministic fix application for cleanroom.
//!
//! Applies an approved, ordered list of [`FixOperation`]s to a copy of a
//! table. The input table is never modified.

pub mod applier;
pub mod errors;
pub mod model;
pub mod operations;

pub use applier::FixApplier;
pub use errors::{FixError, Result};
pub use model::{FixKind, FixOperation, Params};
