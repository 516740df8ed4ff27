use chrono::Datelike;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// All parsed timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Raw form values keyed by field name, in the order the form declares them.
pub type FieldValues = IndexMap<String, String>;

/// A calendar month, used as "today" by card expiry checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The current UTC month.
    pub fn current() -> Self {
        let now = chrono::Utc::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_year_then_month() {
        assert!(YearMonth::new(2025, 5) < YearMonth::new(2025, 6));
        assert!(YearMonth::new(2024, 12) < YearMonth::new(2025, 1));
        assert_eq!(YearMonth::new(2025, 6), YearMonth::new(2025, 6));
    }
}
