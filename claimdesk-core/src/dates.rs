//! Date parsing for trade exports.
//!
//! Uploads come from spreadsheets and document stores, so the same column
//! can hold ISO dates, US-style dates, timestamps, or Excel serial numbers.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

const SECS_PER_DAY: i64 = 86_400;

/// Largest serial Excel will render (9999-12-31)
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y", "%d %b %Y"];

/// Parse a trade date string into a naive timestamp (date-only values land
/// on midnight). Returns `None` for anything unrecognized.
pub fn parse_trade_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    parse_excel_serial(s)
}

fn parse_excel_serial(s: &str) -> Option<NaiveDateTime> {
    let serial: f64 = s.parse().ok()?;
    if !serial.is_finite() || !(1.0..=EXCEL_MAX_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let secs = (serial * SECS_PER_DAY as f64).round() as i64;
    epoch.checked_add_signed(Duration::seconds(secs))
}

/// Elapsed time from `from` to `to`, rounded up to whole days. Negative when
/// `to` precedes `from`.
pub fn days_between_ceil(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let secs = (to - from).num_seconds();
    let whole = secs.div_euclid(SECS_PER_DAY);
    if secs.rem_euclid(SECS_PER_DAY) > 0 {
        whole + 1
    } else {
        whole
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_common_formats() {
        let expected = ymd(2024, 1, 17);
        assert_eq!(parse_trade_date("2024-01-17"), Some(expected));
        assert_eq!(parse_trade_date("01/17/2024"), Some(expected));
        assert_eq!(parse_trade_date("17-Jan-2024"), Some(expected));
        assert_eq!(parse_trade_date("2024/01/17"), Some(expected));
        assert_eq!(parse_trade_date(" 2024-01-17T00:00:00 "), Some(expected));
        assert_eq!(parse_trade_date("2024-01-17T00:00:00Z"), Some(expected));
    }

    #[test]
    fn test_parse_excel_serial() {
        // 45308 is 2024-01-17 in the 1900 date system
        assert_eq!(parse_trade_date("45308"), Some(ymd(2024, 1, 17)));
        assert!(parse_trade_date("0").is_none());
        assert!(parse_trade_date("99999999").is_none());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_trade_date("").is_none());
        assert!(parse_trade_date("next tuesday").is_none());
        assert!(parse_trade_date("2024-13-45").is_none());
    }

    #[test]
    fn test_days_between_ceil() {
        assert_eq!(days_between_ceil(ymd(2024, 1, 17), ymd(2024, 1, 20)), 3);
        assert_eq!(days_between_ceil(ymd(2024, 1, 20), ymd(2024, 1, 15)), -5);
        assert_eq!(days_between_ceil(ymd(2024, 1, 17), ymd(2024, 1, 17)), 0);

        let from = ymd(2024, 1, 17);
        let to = from + Duration::hours(36);
        assert_eq!(days_between_ceil(from, to), 2);
        assert_eq!(days_between_ceil(to, from), -1);
    }
}
