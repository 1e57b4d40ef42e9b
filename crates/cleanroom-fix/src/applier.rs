use tracing::{debug, info};

use cleanroom_core::Table;

use crate::errors::Result;
use crate::model::{FixKind, FixOperation};
use crate::operations;

/// Applies fixes sequentially to a working copy of a table.
#[derive(Debug, Clone, Default)]
pub struct FixApplier;

impl FixApplier {
    pub fn new() -> Self {
        Self
    }

    /// Operations this applier knows how to run.
    pub fn supported_operations(&self) -> &'static [FixKind] {
        &FixKind::ALL
    }

    /// Apply `fixes` in order and return the resulting table.
    ///
    /// Every operation identifier is resolved before the first fix runs, so
    /// an unknown operation fails the batch without doing any work. Each fix
    /// sees the output of the previous one (an `impute_mean` after a
    /// `drop_duplicates` uses the deduplicated column).
    pub fn apply(&self, table: &Table, fixes: &[FixOperation]) -> Result<Table> {
        let resolved = fixes
            .iter()
            .map(|fix| fix.kind().map(|kind| (kind, fix)))
            .collect::<Result<Vec<_>>>()?;

        info!(fixes = resolved.len(), rows = table.row_count(), "applying fixes");

        let mut working = table.clone();
        for (step, (kind, fix)) in resolved.into_iter().enumerate() {
            working = operations::apply(kind, &working, fix.column.as_deref(), &fix.params)?;
            debug!(
                step,
                operation = %kind,
                column = fix.column.as_deref().unwrap_or("-"),
                rows = working.row_count(),
                cols = working.column_count(),
                "fix applied"
            );
        }

        Ok(working)
    }
}
