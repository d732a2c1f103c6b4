use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::model::{Metrics, PerfSnapshot, RawMeasurements, RunKey};

/// Reads every pipeline's summary-metrics and raw-measurements file into
/// one frozen snapshot. Missing files leave the run key absent; read and
/// parse failures are logged and skipped so one bad artifact never takes
/// down the whole report.
pub fn load(artifacts_root: &Path) -> PerfSnapshot {
    let mut snapshot = PerfSnapshot::default();

    for key in RunKey::ALL {
        let dir = artifacts_root.join(key.artifact_dir());

        if let Some(metrics) = load_file::<Metrics>(key, &dir.join(key.metrics_filename())) {
            snapshot.metrics.insert(key, metrics);
        }

        if let Some(raw) = load_file::<RawMeasurements>(key, &dir.join(key.raw_filename())) {
            snapshot.raw.insert(key, raw);
        }
    }

    info!(
        builds = snapshot.metrics.len(),
        raw_sets = snapshot.raw.len(),
        "artifact load complete"
    );

    snapshot
}

fn load_file<T: DeserializeOwned>(key: RunKey, path: &Path) -> Option<T> {
    if !path.exists() {
        info!(run = key.as_str(), path = %path.display(), "artifact file not present");
        return None;
    }

    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(run = key.as_str(), path = %path.display(), error = %err, "failed to read artifact file");
            return None;
        }
    };

    match serde_json::from_slice(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(run = key.as_str(), path = %path.display(), error = %err, "failed to parse artifact file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::load;
    use crate::model::RunKey;

    fn write_artifact(root: &std::path::Path, dir: &str, file: &str, contents: &str) {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).expect("create artifact dir");
        fs::write(dir.join(file), contents).expect("write artifact file");
    }

    #[test]
    fn load_tolerates_missing_artifact_directories() {
        let root = TempDir::new().expect("create temp dir");

        let snapshot = load(root.path());
        assert!(snapshot.metrics.is_empty());
        assert!(snapshot.raw.is_empty());
    }

    #[test]
    fn load_skips_malformed_files_and_keeps_the_rest() {
        let root = TempDir::new().expect("create temp dir");
        write_artifact(
            root.path(),
            "windows-compile-only-artifacts",
            "windows-compile-only-metrics.json",
            r#"{"total_duration": 100.0, "compile_duration": 20.0}"#,
        );
        write_artifact(
            root.path(),
            "windows-compile-only-artifacts",
            "windows-raw-measurements.json",
            r#"{"measurements": [{"stage": "compile", "duration": 20.0}], "totals": {"total_duration": 100.0}}"#,
        );
        write_artifact(
            root.path(),
            "linux-compile-only-artifacts",
            "linux-compile-only-metrics.json",
            "{ this is not json",
        );

        let snapshot = load(root.path());

        let windows = snapshot
            .metrics
            .get(&RunKey::WindowsCompileOnly)
            .expect("windows metrics should load");
        assert_eq!(windows.total_duration, Some(100.0));

        assert!(snapshot.metrics.get(&RunKey::LinuxCompileOnly).is_none());
        assert!(snapshot.metrics.get(&RunKey::WindowsBcContainer).is_none());

        let raw = snapshot
            .raw
            .get(&RunKey::WindowsCompileOnly)
            .expect("windows raw measurements should load");
        assert_eq!(raw.measurements.len(), 1);
        assert_eq!(raw.measurements[0].stage, "compile");
    }

    #[test]
    fn load_accepts_metrics_without_raw_measurements() {
        let root = TempDir::new().expect("create temp dir");
        write_artifact(
            root.path(),
            "linux-compile-only-artifacts",
            "linux-compile-only-metrics.json",
            r#"{"total_duration": 60.0}"#,
        );

        let snapshot = load(root.path());
        assert!(snapshot.metrics.contains_key(&RunKey::LinuxCompileOnly));
        assert!(snapshot.raw.is_empty());
    }
}
