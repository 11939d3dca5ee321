//! Display formatters for prices, distances, durations, and dates. Consumed by
//! invoice line rendering and returned to clients that show raw records.

use chrono::NaiveDate;

pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

pub fn format_distance(miles: f64) -> String {
    format!("{:.1} mi", miles)
}

pub fn format_duration(seconds: f64) -> String {
    let total_minutes = (seconds / 60.0).floor() as i64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(12.5), "$12.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-3.0), "-$3.00");
        assert_eq!(format_currency(1234.0), "$1234.00");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(5.0), "5.0 mi");
        assert_eq!(format_distance(12.34), "12.3 mi");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(1800.0), "30m");
        assert_eq!(format_duration(3600.0), "1h 0m");
        assert_eq!(format_duration(5400.0), "1h 30m");
        assert_eq!(format_duration(59.0), "0m");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(format_date(date), "Mar 15, 2024");
    }
}
