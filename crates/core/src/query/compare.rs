//! Value comparison for sorting and range filters.
//!
//! Record values are loosely typed JSON, so the comparator is chosen from the
//! field's declared [`FieldKind`], falling back to inspecting the values when
//! the kind is [`FieldKind::Auto`].

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde_json::Value;

use super::listing::FieldKind;
use super::spec::RangeFilter;
use crate::record::value_as_text;
use crate::types::Timestamp;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

/// Parse a date-like string into a UTC timestamp.
///
/// Accepts RFC 3339, ISO-8601 date-times without offset (taken as UTC), and
/// plain dates (midnight UTC).
pub fn parse_timestamp(text: &str) -> Option<Timestamp> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    parse_date(text).map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Parse an upper range bound. A plain date covers the whole day.
fn parse_upper_timestamp(text: &str) -> Option<Timestamp> {
    match parse_date(text.trim()) {
        Some(day) => {
            let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;
            Some(Utc.from_utc_datetime(&day.and_time(end)))
        }
        None => parse_timestamp(text),
    }
}

/// Read a value as a finite number. Numeric strings count.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn as_timestamp(value: &Value) -> Option<Timestamp> {
    value.as_str().and_then(parse_timestamp)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Numeric,
    Temporal,
    Lexical,
}

/// Pick a comparison mode for a single value under `kind`.
fn mode_for(kind: FieldKind, value: &Value) -> Mode {
    match kind {
        FieldKind::Number => Mode::Numeric,
        FieldKind::Date => Mode::Temporal,
        FieldKind::Text => Mode::Lexical,
        FieldKind::Auto => {
            if value.is_number() {
                Mode::Numeric
            } else if as_timestamp(value).is_some() {
                Mode::Temporal
            } else if as_number(value).is_some() {
                Mode::Numeric
            } else {
                Mode::Lexical
            }
        }
    }
}

/// Where a value lands in a sort: numbers first, then timestamps, then text.
#[derive(Debug)]
enum SortKey {
    Number(f64),
    Time(Timestamp),
    Text(String),
}

impl SortKey {
    fn of(kind: FieldKind, value: &Value) -> Self {
        let text = || Self::Text(value_as_text(value).unwrap_or_default());
        match mode_for(kind, value) {
            Mode::Numeric => as_number(value).map_or_else(text, Self::Number),
            Mode::Temporal => as_timestamp(value).map_or_else(text, Self::Time),
            Mode::Lexical => text(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Time(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

/// Compare two present values.
///
/// Values are ranked by class before they are compared, so a field holding
/// a mix of numbers, dates and free text still sorts as a total order.
pub fn compare_values(kind: FieldKind, a: &Value, b: &Value) -> Ordering {
    let (a, b) = (SortKey::of(kind, a), SortKey::of(kind, b));
    a.rank().cmp(&b.rank()).then_with(|| match (&a, &b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
        (SortKey::Time(x), SortKey::Time(y)) => x.cmp(y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        _ => Ordering::Equal,
    })
}

/// Whether `value` reads as the field's declared kind. Under
/// [`FieldKind::Number`] and [`FieldKind::Date`] anything that fails to parse
/// is unreadable; text and auto fields read every value.
pub fn is_readable(kind: FieldKind, value: &Value) -> bool {
    match kind {
        FieldKind::Number => as_number(value).is_some(),
        FieldKind::Date => as_timestamp(value).is_some(),
        FieldKind::Text | FieldKind::Auto => true,
    }
}

/// Inclusive range test. A bound that cannot be read in the value's mode
/// excludes the record.
pub fn in_range(kind: FieldKind, value: &Value, range: &RangeFilter) -> bool {
    match mode_for(kind, value) {
        Mode::Numeric => {
            let Some(v) = as_number(value) else {
                return false;
            };
            check_bounds(v, range.lower().map(as_number), range.upper().map(as_number))
        }
        Mode::Temporal => {
            let Some(v) = as_timestamp(value) else {
                return false;
            };
            let lower = range
                .lower()
                .map(|b| b.as_str().and_then(parse_timestamp));
            let upper = range
                .upper()
                .map(|b| b.as_str().and_then(parse_upper_timestamp));
            check_bounds(v, lower, upper)
        }
        Mode::Lexical => {
            let Some(v) = value_as_text(value) else {
                return false;
            };
            check_bounds(
                v,
                range.lower().map(value_as_text),
                range.upper().map(value_as_text),
            )
        }
    }
}

/// `None` = unbounded side, `Some(None)` = unreadable bound.
fn check_bounds<T: PartialOrd>(
    value: T,
    lower: Option<Option<T>>,
    upper: Option<Option<T>>,
) -> bool {
    let above = match lower {
        None => true,
        Some(Some(low)) => value >= low,
        Some(None) => false,
    };
    let below = match upper {
        None => true,
        Some(Some(high)) => value <= high,
        Some(None) => false,
    };
    above && below
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn range(from: Value, to: Value) -> RangeFilter {
        RangeFilter {
            from: Some(from),
            to: Some(to),
        }
    }

    #[test]
    fn parses_common_date_shapes() {
        assert!(parse_timestamp("2024-03-15").is_some());
        assert!(parse_timestamp("2024-03-15T10:30:00Z").is_some());
        assert!(parse_timestamp("2024-03-15T10:30:00+03:00").is_some());
        assert!(parse_timestamp("2024-03-15 10:30").is_some());
        assert!(parse_timestamp("15.03.2024").is_some());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let a = parse_timestamp("2024-03-15T10:00:00+03:00").unwrap();
        let b = parse_timestamp("2024-03-15T07:00:00Z").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(
            compare_values(FieldKind::Auto, &json!(9), &json!(10)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(FieldKind::Number, &json!("9.5"), &json!("10")),
            Ordering::Less
        );
        // As text "9" sorts after "10".
        assert_eq!(
            compare_values(FieldKind::Text, &json!("9"), &json!("10")),
            Ordering::Greater
        );
    }

    #[test]
    fn dates_compare_by_timestamp() {
        assert_eq!(
            compare_values(FieldKind::Auto, &json!("15.03.2024"), &json!("2024-03-16")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(
                FieldKind::Date,
                &json!("2024-03-16"),
                &json!("2024-03-16T00:00:00Z")
            ),
            Ordering::Equal
        );
    }

    #[test]
    fn numeric_strings_compare_numerically_under_auto() {
        assert_eq!(
            compare_values(FieldKind::Auto, &json!("9"), &json!("10.5")),
            Ordering::Less
        );
    }

    #[test]
    fn mixed_values_rank_by_class() {
        assert_eq!(
            compare_values(FieldKind::Auto, &json!("abc"), &json!(5)),
            Ordering::Greater
        );
        // Numbers, then dates, then text, whatever their text forms say.
        assert_eq!(
            compare_values(FieldKind::Auto, &json!("2"), &json!("2023-01-01")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(FieldKind::Auto, &json!("15.03.2025"), &json!("n/a")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(FieldKind::Auto, &json!("2"), &json!("n/a")),
            Ordering::Less
        );
    }

    #[test]
    fn unparseable_dates_rank_after_parseable_ones() {
        assert_eq!(
            compare_values(FieldKind::Date, &json!("2"), &json!("2023-01-01")),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(FieldKind::Date, &json!("15.03.2025"), &json!("2")),
            Ordering::Less
        );
        assert!(is_readable(FieldKind::Date, &json!("15.03.2025")));
        assert!(!is_readable(FieldKind::Date, &json!("n/a")));
        assert!(!is_readable(FieldKind::Number, &json!("heavy")));
        assert!(is_readable(FieldKind::Auto, &json!("heavy")));
    }

    #[test]
    fn comparison_is_a_total_order_over_mixed_values() {
        let values = [
            json!("2024-03-01"),
            json!("15.03.2025"),
            json!("2"),
            json!("n/a"),
            json!("2023-01-01"),
            json!("1"),
            json!(7.5),
            json!(true),
        ];
        for kind in [FieldKind::Auto, FieldKind::Date, FieldKind::Number, FieldKind::Text] {
            for a in &values {
                for b in &values {
                    assert_eq!(
                        compare_values(kind, a, b),
                        compare_values(kind, b, a).reverse()
                    );
                    for c in &values {
                        if compare_values(kind, a, b).is_le()
                            && compare_values(kind, b, c).is_le()
                        {
                            assert!(compare_values(kind, a, c).is_le(), "{a} {b} {c}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn numeric_range_is_inclusive() {
        let r = range(json!(1), json!(5));
        assert!(in_range(FieldKind::Auto, &json!(1), &r));
        assert!(in_range(FieldKind::Auto, &json!(5), &r));
        assert!(!in_range(FieldKind::Auto, &json!(5.01), &r));
    }

    #[test]
    fn date_upper_bound_covers_whole_day() {
        let r = range(json!("2024-03-01"), json!("2024-03-15"));
        assert!(in_range(FieldKind::Date, &json!("2024-03-15T18:45:00Z"), &r));
        assert!(in_range(FieldKind::Date, &json!("2024-03-01"), &r));
        assert!(!in_range(FieldKind::Date, &json!("2024-03-16T00:00:00Z"), &r));
        assert!(!in_range(FieldKind::Date, &json!("2024-02-29T23:59:59Z"), &r));
    }

    #[test]
    fn open_ended_ranges() {
        let from_only = RangeFilter {
            from: Some(json!(10)),
            to: None,
        };
        assert!(in_range(FieldKind::Number, &json!(1000), &from_only));
        assert!(!in_range(FieldKind::Number, &json!(9), &from_only));

        let to_only = RangeFilter {
            from: Some(json!("")),
            to: Some(json!("2024-01-31")),
        };
        assert!(in_range(FieldKind::Date, &json!("2023-06-01"), &to_only));
    }

    #[test]
    fn unreadable_bound_excludes() {
        let r = range(json!("soon"), json!(5));
        assert!(!in_range(FieldKind::Number, &json!(3), &r));
    }
}
