use chrono::{DateTime, Utc};

/// Calendar date as shown in history tables, e.g. `Jan 16, 2024`.
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

/// Coarse duration label: `45s`, `25 min`, `1h 5m`.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes} min");
    }
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dates_use_short_month() {
        let at = Utc.with_ymd_and_hms(2024, 1, 6, 9, 0, 0).unwrap();
        assert_eq!(format_date(at), "Jan 6, 2024");
    }

    #[test]
    fn durations_pick_a_unit() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(25 * 60), "25 min");
        assert_eq!(format_duration(65 * 60), "1h 5m");
    }
}
