//! Rule lists for the portal's forms.
//!
//! Each function returns plain data; compile it with
//! [`RuleSet::compile`](crate::validation::RuleSet::compile) against a
//! registry that carries the built-in checks.

use crate::validation::checks::{
    CHECK_CARD_EXPIRY, CHECK_CVV, CHECK_LUHN, CHECK_PASSWORD_POLICY, CHECK_SUPPORTED_CARD,
};
use crate::validation::ValidationRule;

pub const FORM_PAYMENT: &str = "payment";
pub const FORM_REGISTRATION: &str = "registration";
pub const FORM_SHIPMENT: &str = "shipment";
pub const FORM_CONTACT: &str = "contact";

/// All built-in form names.
pub const FORM_NAMES: &[&str] = &[FORM_PAYMENT, FORM_REGISTRATION, FORM_SHIPMENT, FORM_CONTACT];

const PHONE_PATTERN: &str = r"^\+?[0-9][0-9 ()-]{5,18}[0-9]$";
const TRACKING_NUMBER_PATTERN: &str = r"^[A-Z]{2}\d{10}$";

/// Card payment form.
pub fn payment() -> Vec<ValidationRule> {
    vec![
        ValidationRule::required("cardholder_name", "Enter the name on the card"),
        ValidationRule::regex(
            "cardholder_name",
            r"^[A-Za-z][A-Za-z .'-]*$",
            "Use Latin letters as printed on the card",
        ),
        ValidationRule::length("cardholder_name", None, Some(26), "Name is too long"),
        ValidationRule::required("card_number", "Enter the card number"),
        ValidationRule::regex("card_number", r"^[0-9 ]+$", "Card number may contain digits only"),
        ValidationRule::custom("card_number", CHECK_LUHN, "Card number is invalid"),
        ValidationRule::custom(
            "card_number",
            CHECK_SUPPORTED_CARD,
            "This card type is not supported",
        ),
        ValidationRule::required("expiry", "Enter the expiry date"),
        ValidationRule::regex("expiry", r"^\d{2}\s*/\s*\d{2}$", "Use the MM/YY format"),
        ValidationRule::custom("expiry", CHECK_CARD_EXPIRY, "Card has expired"),
        ValidationRule::required("cvv", "Enter the security code"),
        ValidationRule::custom("cvv", CHECK_CVV, "Security code is invalid"),
        ValidationRule::required("amount", "Enter the amount"),
        ValidationRule::numeric_range(
            "amount",
            Some(0.01),
            Some(1_000_000.0),
            "Amount must be between 0.01 and 1 000 000",
        ),
    ]
}

/// Sign-up form.
pub fn registration() -> Vec<ValidationRule> {
    vec![
        ValidationRule::required("full_name", "Enter your name"),
        ValidationRule::length(
            "full_name",
            Some(2),
            Some(100),
            "Name must be 2 to 100 characters",
        ),
        ValidationRule::required("email", "Enter your e-mail"),
        ValidationRule::email("email", "E-mail address is invalid"),
        ValidationRule::regex("phone", PHONE_PATTERN, "Phone number is invalid"),
        ValidationRule::required("password", "Enter a password"),
        ValidationRule::custom(
            "password",
            CHECK_PASSWORD_POLICY,
            "Password needs 8+ characters, an uppercase letter and a digit",
        ),
        ValidationRule::required("confirm_password", "Repeat the password"),
        ValidationRule::matches_field("confirm_password", "password", "Passwords do not match"),
    ]
}

/// Create-shipment form.
pub fn shipment() -> Vec<ValidationRule> {
    vec![
        ValidationRule::required("sender_name", "Enter the sender's name"),
        ValidationRule::length(
            "sender_name",
            Some(2),
            Some(100),
            "Name must be 2 to 100 characters",
        ),
        ValidationRule::required("recipient_name", "Enter the recipient's name"),
        ValidationRule::length(
            "recipient_name",
            Some(2),
            Some(100),
            "Name must be 2 to 100 characters",
        ),
        ValidationRule::required("recipient_phone", "Enter the recipient's phone"),
        ValidationRule::regex("recipient_phone", PHONE_PATTERN, "Phone number is invalid"),
        ValidationRule::required("origin_city", "Enter the origin city"),
        ValidationRule::required("destination_city", "Enter the destination city"),
        ValidationRule::required("postal_code", "Enter the postal code"),
        ValidationRule::regex("postal_code", r"^\d{6}$", "Postal code must be 6 digits"),
        ValidationRule::required("weight_kg", "Enter the weight"),
        ValidationRule::numeric_range(
            "weight_kg",
            Some(0.1),
            Some(1000.0),
            "Weight must be between 0.1 and 1000 kg",
        ),
        ValidationRule::numeric_range(
            "declared_value",
            Some(0.0),
            Some(10_000_000.0),
            "Declared value is out of range",
        ),
        ValidationRule::length("description", None, Some(500), "Description is too long"),
    ]
}

/// Contact and support form.
pub fn contact() -> Vec<ValidationRule> {
    vec![
        ValidationRule::required("name", "Enter your name"),
        ValidationRule::required("email", "Enter your e-mail"),
        ValidationRule::email("email", "E-mail address is invalid"),
        ValidationRule::required("subject", "Enter a subject"),
        ValidationRule::length("subject", None, Some(120), "Subject is too long"),
        ValidationRule::required("message", "Enter a message"),
        ValidationRule::length(
            "message",
            Some(10),
            Some(2000),
            "Message must be 10 to 2000 characters",
        ),
        ValidationRule::regex(
            "tracking_number",
            TRACKING_NUMBER_PATTERN,
            "Tracking number looks like AB1234567890",
        ),
    ]
}

/// Look up a built-in form's rules by name.
pub fn by_name(name: &str) -> Option<Vec<ValidationRule>> {
    match name {
        FORM_PAYMENT => Some(payment()),
        FORM_REGISTRATION => Some(registration()),
        FORM_SHIPMENT => Some(shipment()),
        FORM_CONTACT => Some(contact()),
        _ => None,
    }
}
