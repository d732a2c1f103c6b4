use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::model::{ExportDocument, ExportSummary, PerfSnapshot};
use crate::util::{now_utc_string, write_json_pretty};

/// Writes the full loaded dataset plus a summary to one pretty-printed
/// JSON file for downstream tools, overwriting any existing file.
pub fn export(snapshot: &PerfSnapshot, path: &Path) -> Result<()> {
    let document = ExportDocument {
        timestamp: now_utc_string(),
        metrics: &snapshot.metrics,
        raw_measurements: &snapshot.raw,
        summary: ExportSummary {
            platforms_available: snapshot.metrics.keys().copied().collect(),
            total_builds: snapshot.metrics.len(),
        },
    };

    write_json_pretty(path, &document)?;
    info!(
        path = %path.display(),
        builds = document.summary.total_builds,
        "wrote combined performance dataset"
    );

    Ok(())
}
