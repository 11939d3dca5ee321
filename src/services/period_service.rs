use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Calendar period tags used by the dashboard. Weeks are Sunday-based to match
/// how the booking calendar renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub fn parse(value: &str) -> Option<Period> {
        match value {
            "day" => Some(Period::Day),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            "year" => Some(Period::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

/// Inclusive start instant (local time, 00:00:00.000) of the period containing
/// `reference`.
pub fn start_of_period(period: Period, reference: NaiveDate) -> NaiveDateTime {
    let date = match period {
        Period::Day => reference,
        Period::Week => {
            reference - Duration::days(reference.weekday().num_days_from_sunday() as i64)
        }
        Period::Month => reference.with_day(1).unwrap(),
        Period::Year => NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap(),
    };
    date.and_hms_opt(0, 0, 0).unwrap()
}

/// Inclusive end instant (local time, 23:59:59.999) of the period containing
/// `reference`. Month ends roll over through the first of the next month.
pub fn end_of_period(period: Period, reference: NaiveDate) -> NaiveDateTime {
    let date = match period {
        Period::Day => reference,
        Period::Week => {
            reference
                + Duration::days(6 - reference.weekday().num_days_from_sunday() as i64)
        }
        Period::Month => last_day_of_month(reference),
        Period::Year => NaiveDate::from_ymd_opt(reference.year(), 12, 31).unwrap(),
    };
    date.and_hms_milli_opt(23, 59, 59, 999).unwrap()
}

fn last_day_of_month(reference: NaiveDate) -> NaiveDate {
    let (year, month) = if reference.month() == 12 {
        (reference.year() + 1, 1)
    } else {
        (reference.year(), reference.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap()
        .pred_opt()
        .unwrap()
}
