//! Numeric transforms between control positions and stored values.
//!
//! All functions here are total: they never panic and always return a value
//! inside the requested bounds, even for inverted or non-finite inputs.

/// Clamp `value` to `[min, max]`.
///
/// If `min > max` the result is `min`.
pub fn clamp_int(value: i64, min: i64, max: i64) -> i64 {
    min.max(max.min(value))
}

/// Clamp a float to `[min, max]`. `NaN` maps to `max`.
pub fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Map a 0–100 control position to a fraction in `[0.00, 1.00]`.
pub fn percent_to_fraction(value: i64) -> f64 {
    clamp_f64(round2(value as f64 / 100.0), 0.0, 1.0)
}

/// Inverse of [`percent_to_fraction`], clamped to `0..=100`.
pub fn fraction_to_percent(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    clamp_int((value * 100.0).round_ties_even() as i64, 0, 100)
}

/// Position of `value` within `[min, max]` as a fraction in `[0, 1]`.
///
/// A degenerate range (`max <= min`) is always `0.0`.
pub fn position_in_range(value: i64, min: i64, max: i64) -> f64 {
    if max <= min {
        return 0.0;
    }
    let offset = (value as i128 - min as i128) as f64;
    let span = (max as i128 - min as i128) as f64;
    clamp_f64(offset / span, 0.0, 1.0)
}

/// Proportional master-scale value for a single bounded field:
/// `min + round(percent * (max - min))`, ties rounding to even.
///
/// Returns `None` for a degenerate range, which callers leave untouched.
pub fn master_scale_value(percent: f64, min: i64, max: i64) -> Option<i64> {
    if max <= min {
        return None;
    }
    let percent = if percent.is_finite() {
        clamp_f64(percent, 0.0, 1.0)
    } else {
        0.0
    };
    let span = (max as i128 - min as i128) as f64;
    let target = min as i128 + (percent * span).round_ties_even() as i128;
    Some(target.clamp(min as i128, max as i128) as i64)
}
