//! Named custom checks referenced by `custom` rules.
//!
//! Rule sets are plain data, so a `custom` rule names its check instead of
//! holding a closure. The registry resolves names to callables when a rule
//! set is compiled; an unknown name is a configuration error there.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::card::{
    detect_card_type, luhn_check, split_expiry, validate_cvv, validate_expiry, CardType,
};
use super::password::meets_password_policy;
use crate::types::{FieldValues, YearMonth};

/// A custom check: receives the field's value and every value of the form.
pub type CheckFn = dyn Fn(&str, &FieldValues) -> bool + Send + Sync;

pub const CHECK_LUHN: &str = "luhn";
pub const CHECK_CARD_EXPIRY: &str = "card_expiry";
pub const CHECK_CVV: &str = "cvv";
pub const CHECK_PASSWORD_POLICY: &str = "password_policy";
pub const CHECK_SUPPORTED_CARD: &str = "supported_card";

/// Form field the `cvv` check reads the card number from.
pub const CARD_NUMBER_FIELD: &str = "card_number";

#[derive(Clone, Default)]
pub struct CheckRegistry {
    checks: HashMap<String, Arc<CheckFn>>,
}

impl CheckRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in card and password checks, with card
    /// expiry judged against `today`.
    pub fn with_builtins(today: YearMonth) -> Self {
        let mut registry = Self::new();
        registry.register(CHECK_LUHN, |value, _| luhn_check(value));
        registry.register(CHECK_CARD_EXPIRY, move |value, _| {
            split_expiry(value).is_some_and(|(month, year)| validate_expiry(month, year, today))
        });
        registry.register(CHECK_CVV, |value, form| {
            let card_type = form
                .get(CARD_NUMBER_FIELD)
                .map_or(CardType::Unknown, |number| detect_card_type(number));
            validate_cvv(value, card_type)
        });
        registry.register(CHECK_PASSWORD_POLICY, |value, _| meets_password_policy(value));
        registry.register(CHECK_SUPPORTED_CARD, |value, _| {
            detect_card_type(value) != CardType::Unknown
        });
        registry
    }

    /// Register (or replace) a check under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, check: F)
    where
        F: Fn(&str, &FieldValues) -> bool + Send + Sync + 'static,
    {
        self.checks.insert(name.into(), Arc::new(check));
    }

    pub fn get(&self, name: &str) -> Option<Arc<CheckFn>> {
        self.checks.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.checks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("checks", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JUNE_2025: YearMonth = YearMonth {
        year: 2025,
        month: 6,
    };

    fn run(registry: &CheckRegistry, name: &str, value: &str, form: &FieldValues) -> bool {
        let check = registry.get(name).expect("check should be registered");
        check(value, form)
    }

    #[test]
    fn builtins_are_registered() {
        let registry = CheckRegistry::with_builtins(JUNE_2025);
        assert_eq!(
            registry.names(),
            ["card_expiry", "cvv", "luhn", "password_policy", "supported_card"]
        );
    }

    #[test]
    fn card_expiry_reads_mm_yy() {
        let registry = CheckRegistry::with_builtins(JUNE_2025);
        let form = FieldValues::new();
        assert!(run(&registry, CHECK_CARD_EXPIRY, "06/25", &form));
        assert!(!run(&registry, CHECK_CARD_EXPIRY, "05/25", &form));
        assert!(!run(&registry, CHECK_CARD_EXPIRY, "june", &form));
    }

    #[test]
    fn cvv_follows_card_number_field() {
        let registry = CheckRegistry::with_builtins(JUNE_2025);
        let mut form = FieldValues::new();
        form.insert(CARD_NUMBER_FIELD.to_string(), "3714 496353 98431".to_string());
        assert!(run(&registry, CHECK_CVV, "1234", &form));
        assert!(!run(&registry, CHECK_CVV, "123", &form));

        form.insert(CARD_NUMBER_FIELD.to_string(), "4111111111111111".to_string());
        assert!(run(&registry, CHECK_CVV, "123", &form));
    }

    #[test]
    fn cvv_without_card_number_expects_three_digits() {
        let registry = CheckRegistry::with_builtins(JUNE_2025);
        assert!(run(&registry, CHECK_CVV, "123", &FieldValues::new()));
    }

    #[test]
    fn supported_card_rejects_unknown_brands() {
        let registry = CheckRegistry::with_builtins(JUNE_2025);
        let form = FieldValues::new();
        assert!(run(&registry, CHECK_SUPPORTED_CARD, "4111111111111111", &form));
        assert!(!run(&registry, CHECK_SUPPORTED_CARD, "1234567890123456", &form));
    }

    #[test]
    fn custom_registration_replaces() {
        let mut registry = CheckRegistry::new();
        registry.register("postcode", |v, _| v.len() == 6);
        assert!(registry.contains("postcode"));
        registry.register("postcode", |v, _| v.len() == 5);
        assert!(run(&registry, "postcode", "12345", &FieldValues::new()));
    }
}
