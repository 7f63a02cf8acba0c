//! Field-level validators shared by every service.
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(r) if !r.is_empty() && !r.chars().any(char::is_whitespace))
}

pub fn is_valid_latitude(v: f64) -> bool {
    v.is_finite() && (-90.0..=90.0).contains(&v)
}

pub fn is_valid_longitude(v: f64) -> bool {
    v.is_finite() && (-180.0..=180.0).contains(&v)
}

pub fn is_valid_ranking(v: f64) -> bool {
    v.is_finite() && (0.0..=5.0).contains(&v)
}

pub fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Parse a booking timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS]` interpreted in server-local
/// time, or a bare `YYYY-MM-DD` taken as UTC midnight.
pub fn parse_booking_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Server-local calendar day containing `raw`, as an inclusive UTC range
/// `[00:00:00.000, 23:59:59.999]`.
pub fn local_day_bounds(raw: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let day = parse_booking_date(raw)?.with_timezone(&Local).date_naive();
    let start = day.and_hms_milli_opt(0, 0, 0, 0)?;
    let end = day.and_hms_milli_opt(23, 59, 59, 999)?;
    let start = Local.from_local_datetime(&start).earliest()?;
    let end = Local.from_local_datetime(&end).latest()?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Timelike};

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("owner@bistro.pk"));
        assert!(!is_valid_email("owner@bistro"));
        assert!(!is_valid_email("owner bistro@x.io"));
        assert!(!is_valid_email("@x.io"));
        assert!(!is_valid_email("a@b@c.io"));
    }

    #[test]
    fn url_requires_http_scheme() {
        assert!(is_http_url("https://cdn.example.com/a.png"));
        assert!(is_http_url("http://x"));
        assert!(!is_http_url("ftp://x"));
        assert!(!is_http_url("https://"));
    }

    #[test]
    fn coordinate_ranges() {
        assert!(is_valid_latitude(32.58));
        assert!(!is_valid_latitude(90.5));
        assert!(is_valid_longitude(-180.0));
        assert!(!is_valid_longitude(f64::NAN));
        assert!(is_valid_ranking(5.0));
        assert!(!is_valid_ranking(5.1));
    }

    #[test]
    fn rfc3339_keeps_offset() {
        let dt = parse_booking_date("2030-01-01T19:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 17);
    }

    #[test]
    fn date_only_is_utc_midnight() {
        let dt = parse_booking_date("2030-01-01").unwrap();
        assert_eq!(dt.to_rfc3339(), "2030-01-01T00:00:00+00:00");
    }

    #[test]
    fn naive_is_local_time() {
        let dt = parse_booking_date("2030-06-01T12:30").unwrap();
        let local = dt.with_timezone(&Local);
        assert_eq!((local.hour(), local.minute()), (12, 30));
        assert!(parse_booking_date("tomorrow").is_none());
    }

    #[test]
    fn day_bounds_cover_full_local_day() {
        let (start, end) = local_day_bounds("2030-06-01T12:30:00").unwrap();
        assert_eq!(start.with_timezone(&Local).hour(), 0);
        assert_eq!(end - start, Duration::days(1) - Duration::milliseconds(1));
    }
}
