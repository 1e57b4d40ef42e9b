//! Dataset profiling for cleanroom.
//!
//! Turns a [`cleanroom_core::Table`] into a versioned [`Profile`] of
//! structural and statistical metrics consumed by the quality rules.

pub mod model;
pub mod profiler;
pub mod sampling;

pub use model::{ColumnProfile, DatasetSummary, NumericSummary, PROFILE_VERSION, Profile};
pub use profiler::{DEFAULT_MAX_SAMPLE_SIZE, Profiler};
pub use sampling::{SAMPLE_SEED, sample_indices};
