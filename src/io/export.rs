//! JSON export of a finished run.
//!
//! The export carries the ranked comparison table and every stage of every model,
//! so a run can be post-processed without parsing the text log. Non-finite numbers
//! (failed models) are written as `null`.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::error::AppError;
use crate::fit::{ComparisonRow, LrtResult, ModelComparisonTable, ModelFit};

#[derive(Debug, Serialize)]
struct RunExport<'a> {
    tool: &'static str,
    pop_ids: (&'a str, &'a str),
    comparison: Vec<ComparisonRow>,
    best: Option<&'a str>,
    lrt: &'a [LrtResult],
    fits: &'a [ModelFit],
}

/// Write the comparison table, likelihood-ratio tests and stage history to `path`.
pub fn write_comparison_json(
    path: &Path,
    pop_ids: (&str, &str),
    fits: &[ModelFit],
    table: &ModelComparisonTable,
    lrt: &[LrtResult],
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let export = RunExport {
        tool: "afs-fit",
        pop_ids,
        comparison: table.summary(),
        best: table.best().map(|e| e.model.as_str()),
        lrt,
        fits,
    };

    serde_json::to_writer_pretty(file, &export)
        .map_err(|e| AppError::new(4, format!("Failed to write export JSON: {e}")))?;
    Ok(())
}
