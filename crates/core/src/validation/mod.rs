//! Declarative form validation.
//!
//! A form supplies a list of [`ValidationRule`]s; [`RuleSet::compile`] checks
//! the list once and [`RuleSet::evaluate`] judges form values against it.
//! Malformed user input is a failed field, never an error. Only a broken rule
//! list produces [`CoreError::Configuration`](crate::error::CoreError).

pub mod card;
pub mod checks;
pub mod evaluator;
pub mod password;
pub mod rules;

pub use checks::CheckRegistry;
pub use evaluator::{validate, validate_with, RuleSet};
pub use rules::{FieldResult, RuleKind, ValidationResult, ValidationRule};
