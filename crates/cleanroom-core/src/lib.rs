//! Core contracts for cleanroom.
//!
//! This crate defines the in-memory table model (a validated polars
//! `DataFrame` with one supported type per column), the validation applied
//! when a table is constructed, and the error type shared by the quality
//! pipeline crates.

pub mod dtype;
pub mod error;
pub mod table;
pub mod validation;

pub use dtype::DType;
pub use error::{Error, Result};
pub use table::Table;
pub use validation::validate_frame;
