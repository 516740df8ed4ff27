//! Payment card checks: Luhn checksum, card-type detection, expiry and CVV.
//!
//! These only judge the shape of what the user typed. No card is ever
//! charged or looked up.

use serde::{Deserialize, Serialize};

use crate::types::YearMonth;

/// Shortest accepted card number.
pub const MIN_CARD_DIGITS: usize = 13;

/// Longest accepted card number.
pub const MAX_CARD_DIGITS: usize = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Visa,
    Mastercard,
    Amex,
    Unknown,
}

impl CardType {
    /// Stable string representation matching serde's `rename_all = "lowercase"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Unknown => "unknown",
        }
    }

    /// Number of digits the card's security code must have.
    pub fn cvv_length(&self) -> usize {
        match self {
            Self::Amex => 4,
            _ => 3,
        }
    }
}

/// Strip all whitespace from typed card input.
pub fn clean_card_number(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Luhn (mod 10) checksum over a card number.
///
/// Whitespace is ignored. Anything other than 13 to 19 ASCII digits fails.
///
/// # Examples
///
/// ```
/// use courier_core::validation::card::luhn_check;
///
/// assert!(luhn_check("4532 0151 1283 0366"));
/// assert!(!luhn_check("4532015112830367"));
/// ```
pub fn luhn_check(digits: &str) -> bool {
    let cleaned = clean_card_number(digits);
    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&cleaned.len())
        || !cleaned.bytes().all(|b| b.is_ascii_digit())
    {
        return false;
    }

    let sum: u32 = cleaned
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

/// Classify a card number by prefix and length.
///
/// Detection does not look at the checksum; an `Unknown` result is not a
/// validation failure on its own.
pub fn detect_card_type(digits: &str) -> CardType {
    let cleaned = clean_card_number(digits);
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return CardType::Unknown;
    }
    let len = cleaned.len();

    if cleaned.starts_with('4') && matches!(len, 13 | 16 | 19) {
        return CardType::Visa;
    }
    if len == 16 {
        if let Some(prefix) = cleaned.get(..2).and_then(|p| p.parse::<u8>().ok()) {
            if (51..=55).contains(&prefix) {
                return CardType::Mastercard;
            }
        }
    }
    if len == 15 && (cleaned.starts_with("34") || cleaned.starts_with("37")) {
        return CardType::Amex;
    }
    CardType::Unknown
}

/// Check a two-digit expiry month and year against `today`.
///
/// Fails when either part is not exactly two digits, when the month is
/// outside 1..=12, or when `(20YY, MM)` is before today's month. A card
/// expiring this month is still valid.
pub fn validate_expiry(month: &str, year: &str, today: YearMonth) -> bool {
    let (Some(month), Some(year)) = (two_digits(month), two_digits(year)) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }
    YearMonth::new(2000 + year as i32, month) >= today
}

fn two_digits(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.len() == 2 && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

/// Split `MM/YY` (or `MMYY`) expiry input into month and year parts.
pub fn split_expiry(input: &str) -> Option<(&str, &str)> {
    let input = input.trim();
    match input.split_once('/') {
        Some((month, year)) => Some((month.trim(), year.trim())),
        None if input.len() == 4 && input.bytes().all(|b| b.is_ascii_digit()) => {
            Some(input.split_at(2))
        }
        None => None,
    }
}

/// Security code must be exactly 4 digits for Amex, 3 for everything else.
pub fn validate_cvv(cvv: &str, card_type: CardType) -> bool {
    let cvv = cvv.trim();
    cvv.len() == card_type.cvv_length() && cvv.bytes().all(|b| b.is_ascii_digit())
}

/// Group a card number the way it is embossed: 4-6-5 for Amex, blocks of
/// four otherwise.
pub fn format_card_number(digits: &str) -> String {
    let cleaned = clean_card_number(digits);
    let groups: &[usize] = match detect_card_type(&cleaned) {
        CardType::Amex => &[4, 6, 5],
        _ => &[],
    };

    let mut out = String::with_capacity(cleaned.len() + 4);
    let mut rest = cleaned.as_str();
    let mut sizes = groups.iter().copied();
    while !rest.is_empty() {
        let take = sizes.next().unwrap_or(4).min(rest.len());
        let (head, tail) = rest.split_at(take);
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(head);
        rest = tail;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const JUNE_2025: YearMonth = YearMonth {
        year: 2025,
        month: 6,
    };

    // -- luhn_check ----------------------------------------------------------

    #[test]
    fn luhn_accepts_valid_test_numbers() {
        assert!(luhn_check("4532015112830366"));
        assert!(luhn_check("4111111111111111"));
        assert!(luhn_check("5500005555555559"));
        assert!(luhn_check("371449635398431"));
    }

    #[test]
    fn luhn_rejects_single_digit_corruption() {
        assert!(!luhn_check("4532015112830367"));
    }

    #[test]
    fn luhn_ignores_whitespace() {
        assert!(luhn_check(" 4532 0151 1283 0366 "));
    }

    #[test]
    fn luhn_rejects_non_digits_and_bad_lengths() {
        assert!(!luhn_check("4532-0151-1283-0366"));
        assert!(!luhn_check("0000000000"));
        assert!(!luhn_check("00000000000000000000"));
        assert!(!luhn_check(""));
    }

    #[test]
    fn luhn_accepts_all_zero_of_valid_length() {
        assert!(luhn_check("0000000000000"));
    }

    // -- detect_card_type ----------------------------------------------------

    #[test]
    fn detects_known_brands() {
        assert_eq!(detect_card_type("4111111111111111"), CardType::Visa);
        assert_eq!(detect_card_type("4222222222222"), CardType::Visa);
        assert_eq!(detect_card_type("5105105105105100"), CardType::Mastercard);
        assert_eq!(detect_card_type("5500 0055 5555 5559"), CardType::Mastercard);
        assert_eq!(detect_card_type("371449635398431"), CardType::Amex);
        assert_eq!(detect_card_type("340000000000009"), CardType::Amex);
    }

    #[test]
    fn unknown_for_other_prefixes_and_lengths() {
        assert_eq!(detect_card_type("1234567890123456"), CardType::Unknown);
        assert_eq!(detect_card_type("5605105105105100"), CardType::Unknown);
        assert_eq!(detect_card_type("411111111111111"), CardType::Unknown);
        assert_eq!(detect_card_type("37144963539843"), CardType::Unknown);
        assert_eq!(detect_card_type("4111x11111111111"), CardType::Unknown);
        assert_eq!(detect_card_type(""), CardType::Unknown);
    }

    #[test]
    fn detection_ignores_checksum() {
        assert_eq!(detect_card_type("4532015112830367"), CardType::Visa);
    }

    // -- validate_expiry -----------------------------------------------------

    #[test]
    fn expiry_relative_to_current_month() {
        assert!(!validate_expiry("05", "25", JUNE_2025));
        assert!(validate_expiry("06", "25", JUNE_2025));
        assert!(validate_expiry("07", "25", JUNE_2025));
        assert!(validate_expiry("01", "26", JUNE_2025));
        assert!(!validate_expiry("12", "24", JUNE_2025));
    }

    #[test]
    fn expiry_rejects_bad_months_and_shapes() {
        assert!(!validate_expiry("00", "30", JUNE_2025));
        assert!(!validate_expiry("13", "30", JUNE_2025));
        assert!(!validate_expiry("7", "30", JUNE_2025));
        assert!(!validate_expiry("07", "2030", JUNE_2025));
        assert!(!validate_expiry("ab", "30", JUNE_2025));
    }

    #[test]
    fn split_expiry_shapes() {
        assert_eq!(split_expiry("07/27"), Some(("07", "27")));
        assert_eq!(split_expiry(" 07 / 27 "), Some(("07", "27")));
        assert_eq!(split_expiry("0727"), Some(("07", "27")));
        assert_eq!(split_expiry("July"), None);
    }

    // -- validate_cvv --------------------------------------------------------

    #[test]
    fn cvv_length_depends_on_card_type() {
        assert!(validate_cvv("123", CardType::Visa));
        assert!(validate_cvv("123", CardType::Unknown));
        assert!(!validate_cvv("1234", CardType::Visa));
        assert!(validate_cvv("1234", CardType::Amex));
        assert!(!validate_cvv("123", CardType::Amex));
        assert!(!validate_cvv("12a", CardType::Mastercard));
    }

    // -- format_card_number --------------------------------------------------

    #[test]
    fn formats_in_groups() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("371449635398431"), "3714 496353 98431");
        assert_eq!(format_card_number("41111"), "4111 1");
        assert_eq!(format_card_number(""), "");
    }
}
