// Step index -> simulated wall-clock label, and display rounding
pub const MINUTES_PER_STEP: i64 = 3;

/// Label shown for steps that are not finite numbers.
pub const UNKNOWN_TIME_LABEL: &str = "--";

/// Formats a simulation step as elapsed process time: `"42m"`, `"1h03m"`.
/// The step is rounded to the nearest integer first.
pub fn time_label(step: f64) -> String {
    if !step.is_finite() {
        return UNKNOWN_TIME_LABEL.to_string();
    }

    let minutes = (step.round() as i64).saturating_mul(MINUTES_PER_STEP);
    if minutes < 0 {
        return format!("-{}", format_minutes(minutes.unsigned_abs()));
    }
    format_minutes(minutes as u64)
}

fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let rem_minutes = minutes % 60;
    if hours > 0 {
        format!("{}h{:02}m", hours, rem_minutes)
    } else {
        format!("{}m", rem_minutes)
    }
}

/// Presentation rounding to one decimal place. Non-finite values pass through.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
