//! Duration and percentage rendering shared by all report sections.

/// Renders a duration in seconds using the bucket a human would pick:
/// milliseconds below one second, two-decimal seconds below a minute,
/// minutes and seconds from there up.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{}ms", (seconds * 1000.0).round() as i64)
    } else if seconds < 60.0 {
        format!("{seconds:.2}s")
    } else {
        let minutes = (seconds / 60.0).floor() as i64;
        let remainder = seconds % 60.0;
        format!("{minutes}m {remainder:.2}s")
    }
}

/// Percentage reduction of `comparison` relative to `baseline`, signed so
/// that a faster comparison yields a positive number. A zero on either
/// side (which is also what an absent field reads as) yields `N/A`.
pub fn calculate_improvement(baseline: f64, comparison: f64) -> String {
    if baseline == 0.0 || comparison == 0.0 {
        return "N/A".to_string();
    }

    let improvement = ((baseline - comparison) / baseline) * 100.0;
    if improvement > 0.0 {
        format!("+{improvement:.1}%")
    } else {
        format!("{improvement:.1}%")
    }
}
