use crate::data_types::TimeUnit;
use chrono::{DateTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan
    HourMin,    // 10:30
    HourMinSec, // 10:30:15
}

impl SmartDateFormat {
    fn pattern(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::MonthYear => "%b %Y",
            Self::DayMonth => "%d %b",
            Self::HourMin => "%H:%M",
            Self::HourMinSec => "%H:%M:%S",
        }
    }
}

/// Picks a date format from the span (in seconds) covered by an axis.
pub fn determine_date_format(visible_range_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3600.0;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    if visible_range_sec > YEAR * 2.0 {
        SmartDateFormat::Year
    } else if visible_range_sec > MONTH * 2.0 {
        SmartDateFormat::MonthYear
    } else if visible_range_sec > DAY * 1.5 {
        SmartDateFormat::DayMonth
    } else if visible_range_sec > MINUTE * 5.0 {
        SmartDateFormat::HourMin
    } else {
        SmartDateFormat::HourMinSec
    }
}

/// Formats a timestamp in UTC, or in `tz` when given. Values outside the
/// representable date range fall back to plain numbers.
pub fn format_timestamp(
    value: f64,
    format: SmartDateFormat,
    unit: TimeUnit,
    tz: Option<chrono_tz::Tz>,
) -> String {
    if !value.is_finite() {
        return format!("{:.2}", value);
    }
    let seconds = unit.to_seconds(value) as i64;

    let dt: DateTime<Utc> = match Utc.timestamp_opt(seconds, 0) {
        chrono::LocalResult::Single(d) => d,
        chrono::LocalResult::Ambiguous(d, _) => d,
        chrono::LocalResult::None => return format!("{:.2}", value),
    };

    match tz {
        Some(tz) => dt.with_timezone(&tz).format(format.pattern()).to_string(),
        None => dt.format(format.pattern()).to_string(),
    }
}
