//! Validation rule and result types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One declarative rule for one form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub field: String,
    pub kind: RuleKind,
    pub message: String,
}

/// What a rule checks.
///
/// Every kind except `Required` passes on an empty value, so optional fields
/// only fail once the user has typed something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    Regex {
        pattern: String,
    },
    /// Length in characters, inclusive bounds.
    Length {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
    },
    /// The value must parse as a finite number within inclusive bounds.
    NumericRange {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    Email,
    /// Must equal another field's value (password confirmation).
    MatchesField {
        other: String,
    },
    /// A named check resolved through a [`CheckRegistry`](super::checks::CheckRegistry).
    Custom {
        name: String,
    },
}

impl RuleKind {
    /// Stable snake_case name matching the serde tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Regex { .. } => "regex",
            Self::Length { .. } => "length",
            Self::NumericRange { .. } => "numeric_range",
            Self::Email => "email",
            Self::MatchesField { .. } => "matches_field",
            Self::Custom { .. } => "custom",
        }
    }
}

impl ValidationRule {
    pub fn new(field: impl Into<String>, kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn required(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Required, message)
    }

    pub fn regex(
        field: impl Into<String>,
        pattern: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            RuleKind::Regex {
                pattern: pattern.into(),
            },
            message,
        )
    }

    pub fn length(
        field: impl Into<String>,
        min: Option<usize>,
        max: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(field, RuleKind::Length { min, max }, message)
    }

    pub fn numeric_range(
        field: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(field, RuleKind::NumericRange { min, max }, message)
    }

    pub fn email(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Email, message)
    }

    pub fn matches_field(
        field: impl Into<String>,
        other: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            RuleKind::MatchesField {
                other: other.into(),
            },
            message,
        )
    }

    pub fn custom(
        field: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(field, RuleKind::Custom { name: name.into() }, message)
    }
}

/// Outcome for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FieldResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Aggregated result of evaluating a rule set against one form.
///
/// `fields` holds every field that has at least one rule, in the order the
/// fields first appear in the rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub fields: IndexMap<String, FieldResult>,
    pub form_valid: bool,
}

impl ValidationResult {
    /// Whether `field` validated. Fields without rules are vacuously valid.
    pub fn is_valid(&self, field: &str) -> bool {
        self.fields.get(field).map_or(true, |r| r.valid)
    }

    pub fn reason(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|r| r.reason.as_deref())
    }

    /// Failing fields with their reasons.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|(field, r)| r.reason.as_deref().map(|reason| (field.as_str(), reason)))
    }
}
