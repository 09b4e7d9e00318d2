use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Zero-padded layout: `YYYY-MM-DD`, optionally `[T ]HH:MM[:SS[.f+]]` with a
    /// `Z` or `+HH:MM` suffix. Stored values compare as strings, so widths are exact.
    static ref FIXED_WIDTH_SHAPE: Regex = Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}(?:[T ][0-9]{2}:[0-9]{2}(?::[0-9]{2}(?:\.[0-9]+)?)?(?:Z|[+-][0-9]{2}:[0-9]{2})?)?$"
    )
    .expect("Invalid timestamp shape pattern");
}

/// Date-time layouts accepted without a UTC offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Layouts with an offset that RFC 3339 does not cover (no seconds, space separator).
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Current instant as fixed-width UTC ISO-8601, e.g. `2024-06-15T12:00:00.000000Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Whether `value` is a zero-padded ISO-8601 date or date-time. The layout is
/// checked first; chrono then rejects out-of-range fields. A trailing `Z` is
/// read as `+00:00`.
pub fn is_iso8601(value: &str) -> bool {
    if !FIXED_WIDTH_SHAPE.is_match(value) {
        return false;
    }

    let normalized = match value.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => value.to_string(),
    };
    let s = normalized.as_str();

    DateTime::parse_from_rfc3339(s).is_ok()
        || OFFSET_FORMATS
            .iter()
            .any(|f| DateTime::parse_from_str(s, f).is_ok())
        || NAIVE_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(s, f).is_ok())
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_iso_variants() {
        for ok in [
            "2099-01-01T00:00:00Z",
            "2099-01-01T00:00:00.123456Z",
            "2099-01-01T00:00:00+02:00",
            "2099-01-01T00:00:00",
            "2099-01-01T08:30",
            "2099-01-01 08:30:00",
            "2099-01-01",
            "2099-01-01 08:30+05:30",
        ] {
            assert!(is_iso8601(ok), "{ok} should be accepted");
        }
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in [
            "not-a-date",
            "",
            "2099-13-01T00:00:00Z",
            "2099-02-30",
            "01/02/2099",
            "2099-01-01T25:00:00Z",
            "2026-9-1",
            "2026-09-1",
            "2026-09-01T8:00",
            "2026-09-01T08:00:0",
            " 2026-09-01",
            "2026-09-01 ",
            "99-09-01",
            "2026-09-01Z",
            "2026-09-01T08:00:00.Z",
            "2026-09-01T08:00+2:00",
        ] {
            assert!(!is_iso8601(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_now_is_fixed_width_utc() {
        let now = now_iso();
        assert!(now.ends_with('Z'));
        assert_eq!(now.len(), "2024-06-15T12:00:00.000000Z".len());
        assert!(is_iso8601(&now));
    }
}
