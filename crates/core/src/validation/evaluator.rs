//! Rule evaluator: pure logic, no I/O.
//!
//! A rule list is compiled once into a [`RuleSet`] (regexes built, custom
//! check names resolved), then evaluated against form values as often as
//! needed. Only compilation can fail.

use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use validator::ValidateEmail;

use super::checks::{CheckFn, CheckRegistry};
use super::rules::{FieldResult, RuleKind, ValidationResult, ValidationRule};
use crate::error::CoreError;
use crate::types::{FieldValues, YearMonth};

enum Check {
    Required,
    Pattern(Regex),
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    NumericRange {
        min: Option<f64>,
        max: Option<f64>,
    },
    Email,
    MatchesField(String),
    Custom(Arc<CheckFn>),
}

struct CompiledRule {
    check: Check,
    message: String,
}

/// A compiled, reusable rule set.
pub struct RuleSet {
    fields: IndexMap<String, Vec<CompiledRule>>,
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RuleSet {
    /// Compile `rules`, resolving custom checks through `registry`.
    ///
    /// Fails with [`CoreError::Configuration`] on an invalid regex, an
    /// unregistered custom check, inverted `min`/`max` bounds, or a
    /// `matches_field` rule pointing at its own field.
    pub fn compile(rules: &[ValidationRule], registry: &CheckRegistry) -> Result<Self, CoreError> {
        let mut fields: IndexMap<String, Vec<CompiledRule>> = IndexMap::new();
        for rule in rules {
            let check = compile_check(rule, registry).inspect_err(|e| {
                tracing::warn!(
                    field = %rule.field,
                    kind = rule.kind.as_str(),
                    error = %e,
                    "Rejected validation rule",
                );
            })?;
            fields.entry(rule.field.clone()).or_default().push(CompiledRule {
                check,
                message: rule.message.clone(),
            });
        }
        Ok(Self { fields })
    }

    /// Evaluate every field's rules against `values`.
    ///
    /// Rules for a field run in declaration order and stop at the first
    /// failure, whose message becomes the field's reason.
    pub fn evaluate(&self, values: &FieldValues) -> ValidationResult {
        let fields: IndexMap<String, FieldResult> = self
            .fields
            .iter()
            .map(|(field, rules)| {
                let value = values.get(field).map(String::as_str).unwrap_or("");
                let result = rules
                    .iter()
                    .find(|rule| !passes(&rule.check, value, values))
                    .map_or_else(FieldResult::ok, |rule| FieldResult::failed(&rule.message));
                (field.clone(), result)
            })
            .collect();

        let form_valid = fields.values().all(|r| r.valid);
        tracing::trace!(
            fields = fields.len(),
            failed = fields.values().filter(|r| !r.valid).count(),
            form_valid,
            "Form evaluated",
        );

        ValidationResult { fields, form_valid }
    }

    /// Fields that carry at least one rule, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Compile and evaluate `rules` with the built-in checks, judging card
/// expiry against the current month.
pub fn validate(
    values: &FieldValues,
    rules: &[ValidationRule],
) -> Result<ValidationResult, CoreError> {
    validate_with(values, rules, &CheckRegistry::with_builtins(YearMonth::current()))
}

/// Compile and evaluate `rules` with an explicit registry.
pub fn validate_with(
    values: &FieldValues,
    rules: &[ValidationRule],
    registry: &CheckRegistry,
) -> Result<ValidationResult, CoreError> {
    Ok(RuleSet::compile(rules, registry)?.evaluate(values))
}

fn compile_check(rule: &ValidationRule, registry: &CheckRegistry) -> Result<Check, CoreError> {
    let field = &rule.field;
    let check = match &rule.kind {
        RuleKind::Required => Check::Required,
        RuleKind::Regex { pattern } => {
            let re = Regex::new(pattern).map_err(|e| {
                CoreError::config(format!("invalid pattern for field '{field}': {e}"))
            })?;
            Check::Pattern(re)
        }
        RuleKind::Length { min, max } => {
            check_bounds(field, *min, *max)?;
            Check::Length {
                min: *min,
                max: *max,
            }
        }
        RuleKind::NumericRange { min, max } => {
            check_bounds(field, *min, *max)?;
            Check::NumericRange {
                min: *min,
                max: *max,
            }
        }
        RuleKind::Email => Check::Email,
        RuleKind::MatchesField { other } => {
            if other == field {
                return Err(CoreError::config(format!(
                    "field '{field}' cannot be matched against itself"
                )));
            }
            Check::MatchesField(other.clone())
        }
        RuleKind::Custom { name } => match registry.get(name) {
            Some(check) => Check::Custom(check),
            None => {
                return Err(CoreError::config(format!(
                    "custom check '{name}' for field '{field}' is not registered"
                )))
            }
        },
    };
    Ok(check)
}

fn check_bounds<T: PartialOrd + std::fmt::Display>(
    field: &str,
    min: Option<T>,
    max: Option<T>,
) -> Result<(), CoreError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(CoreError::config(format!(
            "rule for field '{field}' has min {min} greater than max {max}"
        ))),
        _ => Ok(()),
    }
}

fn passes(check: &Check, value: &str, values: &FieldValues) -> bool {
    let blank = value.trim().is_empty();
    match check {
        Check::Required => !blank,
        // Optional fields only fail once something has been entered.
        _ if blank => true,
        Check::Pattern(re) => re.is_match(value),
        Check::Length { min, max } => {
            let len = value.chars().count();
            min.map_or(true, |m| len >= m) && max.map_or(true, |m| len <= m)
        }
        Check::NumericRange { min, max } => match parse_number(value) {
            Some(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
            None => false,
        },
        Check::Email => value.trim().validate_email(),
        Check::MatchesField(other) => values.get(other).is_some_and(|o| o == value),
        Check::Custom(check) => check(value, values),
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
