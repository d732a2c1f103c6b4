use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of one pipeline run whose artifacts are compared. Variant
/// order is the fixed pipeline order; `BTreeMap` iteration relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunKey {
    WindowsBcContainer,
    WindowsCompileOnly,
    LinuxCompileOnly,
}

impl RunKey {
    pub const ALL: [RunKey; 3] = [
        RunKey::WindowsBcContainer,
        RunKey::WindowsCompileOnly,
        RunKey::LinuxCompileOnly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WindowsBcContainer => "windows-bc-container",
            Self::WindowsCompileOnly => "windows-compile-only",
            Self::LinuxCompileOnly => "linux-compile-only",
        }
    }

    pub fn artifact_dir(self) -> &'static str {
        match self {
            Self::WindowsBcContainer => "windows-bc-container-artifacts",
            Self::WindowsCompileOnly => "windows-compile-only-artifacts",
            Self::LinuxCompileOnly => "linux-compile-only-artifacts",
        }
    }

    pub fn metrics_filename(self) -> &'static str {
        match self {
            Self::WindowsBcContainer => "windows-bc-container-metrics.json",
            Self::WindowsCompileOnly => "windows-compile-only-metrics.json",
            Self::LinuxCompileOnly => "linux-compile-only-metrics.json",
        }
    }

    pub fn raw_filename(self) -> &'static str {
        match self {
            Self::WindowsBcContainer => "windows-bc-container-raw-measurements.json",
            Self::WindowsCompileOnly => "windows-raw-measurements.json",
            Self::LinuxCompileOnly => "linux-raw-measurements.json",
        }
    }
}

/// Named build stage with a measured duration. The comparison table walks
/// these in `COMPARISON_ORDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    DotnetSetup,
    AlInstall,
    AlVerify,
    DependenciesTotal,
    Compile,
    MockTest,
    Total,
}

impl Stage {
    pub const COMPARISON_ORDER: [Stage; 7] = [
        Stage::DotnetSetup,
        Stage::AlInstall,
        Stage::AlVerify,
        Stage::DependenciesTotal,
        Stage::Compile,
        Stage::MockTest,
        Stage::Total,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::DotnetSetup => ".NET Setup",
            Self::AlInstall => "AL Installation",
            Self::AlVerify => "AL Verification",
            Self::DependenciesTotal => "Dependencies Total",
            Self::Compile => "Compilation",
            Self::MockTest => "Mock Testing",
            Self::Total => "Total Build Time",
        }
    }
}

/// Summary metrics for one pipeline run. Every field is optional in the
/// JSON contract; an absent duration reads as zero at the use sites.
/// Absent fields stay absent on re-serialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dotnet_setup_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub al_install_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub al_verify_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies_total_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock_test_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_app_size_kb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_file_count: Option<u64>,
}

impl Metrics {
    pub fn stage_seconds(&self, stage: Stage) -> f64 {
        match stage {
            Stage::DotnetSetup => self.dotnet_setup_duration,
            Stage::AlInstall => self.al_install_duration,
            Stage::AlVerify => self.al_verify_duration,
            Stage::DependenciesTotal => self.dependencies_total_duration,
            Stage::Compile => self.compile_duration,
            Stage::MockTest => self.mock_test_duration,
            Stage::Total => self.total_duration,
        }
        .unwrap_or(0.0)
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_duration.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub stage: String,
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Totals {
    pub total_duration: f64,
}

/// Ordered per-stage measurements for one pipeline run. Measurement order
/// is insertion order and is preserved in rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMeasurements {
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<Totals>,
}

/// Frozen dataset built once during load. A key present in one map need
/// not be present in the other; consumers degrade to a warning on absence.
#[derive(Debug, Clone, Default)]
pub struct PerfSnapshot {
    pub metrics: BTreeMap<RunKey, Metrics>,
    pub raw: BTreeMap<RunKey, RawMeasurements>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub platforms_available: Vec<RunKey>,
    pub total_builds: usize,
}

#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub timestamp: String,
    pub metrics: &'a BTreeMap<RunKey, Metrics>,
    #[serde(rename = "rawMeasurements")]
    pub raw_measurements: &'a BTreeMap<RunKey, RawMeasurements>,
    pub summary: ExportSummary,
}
