//! Handlers for single-field helpers the payment and sign-up pages call as
//! the user types.

use axum::Json;
use courier_core::validation::card::{detect_card_type, format_card_number, luhn_check, CardType};
use courier_core::validation::password::{
    password_policy_violations, password_strength as score_password, PolicyViolation,
    StrengthLabel,
};
use serde::{Deserialize, Serialize};

use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct InspectCardRequest {
    pub number: String,
}

#[derive(Debug, Serialize)]
pub struct CardInspection {
    pub card_type: CardType,
    pub luhn_valid: bool,
    pub formatted: String,
    pub cvv_length: usize,
}

/// POST /api/v1/cards/inspect
///
/// Brand, checksum and display grouping of a partially or fully typed card
/// number. Never fails: bad input is reported as `unknown` and invalid.
pub async fn inspect_card(
    Json(input): Json<InspectCardRequest>,
) -> Json<DataResponse<CardInspection>> {
    let card_type = detect_card_type(&input.number);
    Json(DataResponse {
        data: CardInspection {
            card_type,
            luhn_valid: luhn_check(&input.number),
            formatted: format_card_number(&input.number),
            cvv_length: card_type.cvv_length(),
        },
    })
}

#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct Violation {
    pub code: PolicyViolation,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PasswordReport {
    pub score: u8,
    pub label: StrengthLabel,
    pub meets_policy: bool,
    pub violations: Vec<Violation>,
}

/// POST /api/v1/passwords/strength
pub async fn password_strength(
    Json(input): Json<PasswordRequest>,
) -> Json<DataResponse<PasswordReport>> {
    let strength = score_password(&input.password);
    let violations: Vec<Violation> = password_policy_violations(&input.password)
        .into_iter()
        .map(|code| Violation {
            code,
            message: code.message(),
        })
        .collect();

    Json(DataResponse {
        data: PasswordReport {
            score: strength.score,
            label: strength.label,
            meets_policy: violations.is_empty(),
            violations,
        },
    })
}
