use tracing::debug;

use crate::format::{calculate_improvement, format_duration};
use crate::model::{Metrics, PerfSnapshot, RunKey, Stage};

pub(crate) const MISSING_COMPILE_METRICS: &str =
    "⚠️ Compile-only metrics are not available for both Windows and Linux.\n";
pub(crate) const MISSING_STRATEGY_METRICS: &str =
    "⚠️ Strategy comparison requires metrics from all three pipelines.\n";
pub(crate) const MISSING_RAW_MEASUREMENTS: &str =
    "⚠️ Raw stage measurements are not available for both compile-only pipelines.\n";
pub(crate) const MISSING_ARTIFACT_METRICS: &str =
    "⚠️ No artifact metrics available for the compile-only pipelines.\n";

/// Assembles the full Markdown report: title, available builds, the four
/// comparison sections in fixed order, and a static footer. Every section
/// degrades to a single warning line when its input data is absent.
pub fn render_report(snapshot: &PerfSnapshot) -> String {
    let available: Vec<&str> = snapshot.metrics.keys().map(|key| key.as_str()).collect();
    let available = if available.is_empty() {
        "none".to_string()
    } else {
        available.join(", ")
    };

    let mut out = String::new();
    out.push_str("# 📊 Build Performance Comparison Report\n\n");
    out.push_str(&format!("**Available builds:** {available}\n\n"));

    out.push_str("## 🏁 Compile-Only Build: Windows vs Linux\n\n");
    out.push_str(&compile_only_comparison(snapshot));
    out.push('\n');

    out.push_str("## 🏗️ Build Strategy Comparison\n\n");
    out.push_str(&strategy_comparison(snapshot));
    out.push('\n');

    out.push_str("## 🔬 Detailed Stage Analysis\n\n");
    out.push_str(&stage_analysis(snapshot));
    out.push('\n');

    out.push_str("## 📦 Artifact Analysis\n\n");
    out.push_str(&artifact_analysis(snapshot));
    out.push('\n');

    out.push_str("---\n\n*Generated by buildperf from CI timing artifacts*\n");
    out
}

/// Stage-by-stage Windows vs Linux table for the compile-only pipelines,
/// followed by an overall verdict and the single biggest per-stage win.
pub(crate) fn compile_only_comparison(snapshot: &PerfSnapshot) -> String {
    let (Some(windows), Some(linux)) = (
        snapshot.metrics.get(&RunKey::WindowsCompileOnly),
        snapshot.metrics.get(&RunKey::LinuxCompileOnly),
    ) else {
        return MISSING_COMPILE_METRICS.to_string();
    };

    let mut out = String::new();
    out.push_str("| Stage | Windows | Linux | Improvement |\n");
    out.push_str("|-------|---------|-------|-------------|\n");

    for stage in Stage::COMPARISON_ORDER {
        let w = windows.stage_seconds(stage);
        let l = linux.stage_seconds(stage);
        let improvement = calculate_improvement(w, l);

        let row = if stage == Stage::Total {
            format!(
                "| **{}** | **{:.2}s** | **{:.2}s** | **{}** |\n",
                stage.label(),
                w,
                l,
                improvement
            )
        } else {
            format!("| {} | {:.2}s | {:.2}s | {} |\n", stage.label(), w, l, improvement)
        };
        out.push_str(&row);
    }

    let windows_total = windows.total_seconds();
    let linux_total = linux.total_seconds();
    // Not routed through calculate_improvement: a zero Windows total
    // renders the overall figure as a non-finite value.
    let total_improvement = ((windows_total - linux_total) / windows_total) * 100.0;

    out.push('\n');
    if total_improvement > 0.0 {
        out.push_str(&format!(
            "🚀 **Linux is {:.1}% faster** overall, saving **{}** per build.\n",
            total_improvement,
            format_duration(windows_total - linux_total)
        ));
        if let Some((label, best)) = biggest_stage_improvement(windows, linux) {
            out.push_str(&format!(
                "📈 Biggest improvement: **{label}** ({best:.1}% faster)\n"
            ));
        }
    } else {
        out.push_str(&format!(
            "⚠️ **Windows is {:.1}% faster** overall.\n",
            total_improvement.abs()
        ));
    }

    out
}

/// Largest per-stage improvement of Linux over Windows. Stages with a zero
/// Windows baseline are skipped; ties keep the first stage encountered.
fn biggest_stage_improvement(windows: &Metrics, linux: &Metrics) -> Option<(&'static str, f64)> {
    let mut best: Option<(&'static str, f64)> = None;

    for stage in Stage::COMPARISON_ORDER {
        let w = windows.stage_seconds(stage);
        if w == 0.0 {
            continue;
        }

        let improvement = ((w - linux.stage_seconds(stage)) / w) * 100.0;
        match best {
            Some((_, current)) if improvement <= current => {}
            _ => best = Some((stage.label(), improvement)),
        }
    }

    best
}

/// Three-strategy table (container vs compile-only, per platform) with
/// pairwise total-duration improvements and static selection guidance.
pub(crate) fn strategy_comparison(snapshot: &PerfSnapshot) -> String {
    let (Some(container), Some(win_compile), Some(linux_compile)) = (
        snapshot.metrics.get(&RunKey::WindowsBcContainer),
        snapshot.metrics.get(&RunKey::WindowsCompileOnly),
        snapshot.metrics.get(&RunKey::LinuxCompileOnly),
    ) else {
        return MISSING_STRATEGY_METRICS.to_string();
    };

    let container_total = container.total_seconds();
    let windows_total = win_compile.total_seconds();
    let linux_total = linux_compile.total_seconds();

    let mut out = String::new();
    out.push_str("| Strategy | Platform | Total Duration | Description |\n");
    out.push_str("|----------|----------|----------------|-------------|\n");
    out.push_str(&format!(
        "| BC Container | Windows | {} | Full Business Central environment with database |\n",
        format_duration(container_total)
    ));
    out.push_str(&format!(
        "| Compile-Only | Windows | {} | Compiler and mock tests, no service tier |\n",
        format_duration(windows_total)
    ));
    out.push_str(&format!(
        "| Compile-Only | Linux | {} | Containerized compiler and mock tests |\n",
        format_duration(linux_total)
    ));

    out.push('\n');
    out.push_str(&format!(
        "- **Linux compile-only vs Windows BC container:** {}\n",
        calculate_improvement(container_total, linux_total)
    ));
    out.push_str(&format!(
        "- **Linux compile-only vs Windows compile-only:** {}\n",
        calculate_improvement(windows_total, linux_total)
    ));
    out.push_str(&format!(
        "- **Windows compile-only vs Windows BC container:** {}\n",
        calculate_improvement(container_total, windows_total)
    ));

    out.push('\n');
    out.push_str("### Choosing a strategy\n\n");
    out.push_str(
        "- **BC Container (Windows)**: full platform coverage; use for release validation and integration test runs.\n",
    );
    out.push_str(
        "- **Compile-Only (Windows)**: catches compiler and analyzer errors without the container start-up cost.\n",
    );
    out.push_str(
        "- **Compile-Only (Linux)**: fastest feedback for pull-request validation on hosted runners.\n",
    );

    out
}

/// Per-platform bullet list of every recorded stage in insertion order,
/// with each stage's share of the reported total duration.
pub(crate) fn stage_analysis(snapshot: &PerfSnapshot) -> String {
    let (Some(windows), Some(linux)) = (
        snapshot.raw.get(&RunKey::WindowsCompileOnly),
        snapshot.raw.get(&RunKey::LinuxCompileOnly),
    ) else {
        return MISSING_RAW_MEASUREMENTS.to_string();
    };

    let mut out = String::new();
    for (label, raw) in [("Windows", windows), ("Linux", linux)] {
        out.push_str(&format!("### {label} (compile-only)\n\n"));

        let mut stage_sum = 0.0;
        for measurement in &raw.measurements {
            stage_sum += measurement.duration;

            let share = match &raw.totals {
                Some(totals) => {
                    format!("{:.1}%", (measurement.duration / totals.total_duration) * 100.0)
                }
                None => "N/A".to_string(),
            };

            out.push_str(&format!(
                "- **{}**: {} ({share} of total)\n",
                measurement.stage.replace('_', " "),
                format_duration(measurement.duration)
            ));
        }

        // Cross-check value for the reported totals; not rendered.
        debug!(platform = label, stage_sum, "accumulated stage durations");
        out.push('\n');
    }

    out
}

/// App-count and size table for whichever compile-only platforms reported
/// artifact metrics; a single available platform renders a partial table.
pub(crate) fn artifact_analysis(snapshot: &PerfSnapshot) -> String {
    let platforms: Vec<(RunKey, &Metrics)> = [RunKey::WindowsCompileOnly, RunKey::LinuxCompileOnly]
        .into_iter()
        .filter_map(|key| snapshot.metrics.get(&key).map(|metrics| (key, metrics)))
        .collect();

    if platforms.is_empty() {
        return MISSING_ARTIFACT_METRICS.to_string();
    }

    let mut out = String::new();
    out.push_str("| Platform | App Count | Total Size (KB) | Test Files |\n");
    out.push_str("|----------|-----------|-----------------|------------|\n");

    for (key, metrics) in platforms {
        // replacen: only the first hyphen becomes a space, so the label
        // reads "windows compile-only".
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            key.as_str().replacen('-', " ", 1),
            metrics.app_count.unwrap_or(0),
            metrics.total_app_size_kb.unwrap_or(0.0),
            metrics.test_file_count.unwrap_or(0)
        ));
    }

    out
}
