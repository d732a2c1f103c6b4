use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "buildperf",
    version,
    about = "Build pipeline performance comparison report generator"
)]
pub struct Cli {
    /// Directory containing the per-pipeline artifact directories.
    #[arg(long, default_value = ".")]
    pub artifacts_root: PathBuf,

    /// Destination for the combined JSON dataset.
    #[arg(long, default_value = "comprehensive-performance-data.json")]
    pub export_path: PathBuf,
}
