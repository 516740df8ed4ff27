//! Password strength scoring and the sign-up password policy.
//!
//! Strength feeds the meter under the password field. The policy is the
//! pass/fail rule the sign-up form enforces. Neither depends on the other.

use serde::{Deserialize, Serialize};

/// Minimum password length required by the policy.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Length that earns the second length point.
pub const LONG_PASSWORD_LENGTH: usize = 12;

/// Highest reportable score; one per label above `VeryWeak`.
pub const MAX_STRENGTH_SCORE: u8 = 5;

/// Strength labels from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLabel {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    fn from_score(score: u8) -> Self {
        match score {
            0 => Self::VeryWeak,
            1 => Self::Weak,
            2 => Self::Fair,
            3 => Self::Good,
            4 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    /// Stable string representation matching serde's `rename_all = "snake_case"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryWeak => "very_weak",
            Self::Weak => "weak",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Strong => "strong",
            Self::VeryStrong => "very_strong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub label: StrengthLabel,
}

/// Score a password for the strength meter.
///
/// One point each for: at least 8 characters, at least 12 characters, a
/// lowercase letter, an uppercase letter, a digit, and any character that is
/// not alphanumeric. The total is capped at [`MAX_STRENGTH_SCORE`].
///
/// # Examples
///
/// ```
/// use courier_core::validation::password::{password_strength, StrengthLabel};
///
/// assert_eq!(password_strength("abcdefg1").label, StrengthLabel::Good);
/// assert_eq!(password_strength("Abcdefg1!").label, StrengthLabel::VeryStrong);
/// ```
pub fn password_strength(password: &str) -> PasswordStrength {
    let length = password.chars().count();
    let checks = [
        length >= MIN_PASSWORD_LENGTH,
        length >= LONG_PASSWORD_LENGTH,
        password.chars().any(char::is_lowercase),
        password.chars().any(char::is_uppercase),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_alphanumeric()),
    ];
    let raw = checks.iter().filter(|passed| **passed).count() as u8;
    let score = raw.min(MAX_STRENGTH_SCORE);

    PasswordStrength {
        score,
        label: StrengthLabel::from_score(score),
    }
}

/// One unmet requirement of the password policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyViolation {
    TooShort,
    MissingUppercase,
    MissingDigit,
}

impl PolicyViolation {
    pub fn message(&self) -> String {
        match self {
            Self::TooShort => {
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long")
            }
            Self::MissingUppercase => "Password must contain an uppercase letter".to_string(),
            Self::MissingDigit => "Password must contain a digit".to_string(),
        }
    }
}

/// Every policy requirement `password` fails, in a fixed order.
pub fn password_policy_violations(password: &str) -> Vec<PolicyViolation> {
    let mut violations = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push(PolicyViolation::TooShort);
    }
    if !password.chars().any(char::is_uppercase) {
        violations.push(PolicyViolation::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PolicyViolation::MissingDigit);
    }
    violations
}

/// Whether `password` satisfies the sign-up policy.
pub fn meets_password_policy(password: &str) -> bool {
    password_policy_violations(password).is_empty()
}
