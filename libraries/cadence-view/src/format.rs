//! Time labels and slider fill ratios

use std::time::Duration;

/// Format as `m:ss`
///
/// Minutes are not padded and may exceed 59; seconds are floored and
/// always two digits.
pub fn format_time(time: Duration) -> String {
    let total = time.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format float seconds as `m:ss`; negative and NaN values show `0:00`
pub fn format_secs(secs: f64) -> String {
    if secs.is_nan() || secs <= 0.0 {
        return format_time(Duration::ZERO);
    }
    format_time(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
}

/// Slider fill as a percentage of `max`
///
/// Returns 0 when `max` is not positive, and clamps to `0..=100`.
pub fn fill_percent(value: f64, max: f64) -> f64 {
    if max <= 0.0 || max.is_nan() || value.is_nan() {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(Duration::ZERO), "0:00");
        assert_eq!(format_time(Duration::from_secs(5)), "0:05");
        assert_eq!(format_time(Duration::from_secs(372)), "6:12");
        assert_eq!(format_time(Duration::from_millis(59_999)), "0:59");
        assert_eq!(format_time(Duration::from_secs(3_600)), "60:00");
    }

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(61.9), "1:01");
        assert_eq!(format_secs(-4.0), "0:00");
        assert_eq!(format_secs(f64::NAN), "0:00");
    }

    #[test]
    fn test_fill_percent() {
        assert_eq!(fill_percent(0.0, 0.0), 0.0);
        assert_eq!(fill_percent(5.0, 10.0), 50.0);
        assert_eq!(fill_percent(75.0, 100.0), 75.0);
        assert_eq!(fill_percent(12.0, 10.0), 100.0);
        assert_eq!(fill_percent(-1.0, 10.0), 0.0);
    }
}
