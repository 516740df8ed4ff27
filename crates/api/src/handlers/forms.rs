//! Handlers for the `/forms` and `/validation` resources.

use axum::extract::{Path, State};
use axum::Json;
use courier_core::error::CoreError;
use courier_core::forms::{self, FORM_NAMES};
use courier_core::types::FieldValues;
use courier_core::validation::{RuleSet, ValidationResult, ValidationRule};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// A built-in form and the fields it validates.
#[derive(Debug, Serialize)]
pub struct FormSummary {
    pub name: &'static str,
    pub fields: Vec<String>,
}

/// Request body for validating values against a built-in form.
#[derive(Debug, Deserialize)]
pub struct ValidateFormRequest {
    #[serde(default)]
    pub values: FieldValues,
}

/// Request body for the dry-run endpoint.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub values: FieldValues,
    pub rules: Vec<ValidationRule>,
}

fn form_rules_or_404(form: &str) -> Result<Vec<ValidationRule>, CoreError> {
    forms::by_name(form).ok_or_else(|| CoreError::NotFound {
        entity: "form",
        key: form.to_string(),
    })
}

/// GET /api/v1/forms
pub async fn list_forms() -> Json<DataResponse<Vec<FormSummary>>> {
    let forms = FORM_NAMES
        .iter()
        .map(|&name| {
            let mut fields: Vec<String> = Vec::new();
            for rule in forms::by_name(name).unwrap_or_default() {
                if !fields.contains(&rule.field) {
                    fields.push(rule.field);
                }
            }
            FormSummary { name, fields }
        })
        .collect();
    Json(DataResponse { data: forms })
}

/// GET /api/v1/forms/{form}/rules
///
/// The declarative rule list, so a client can mirror the checks inline.
pub async fn form_rules(
    Path(form): Path<String>,
) -> AppResult<Json<DataResponse<Vec<ValidationRule>>>> {
    let rules = form_rules_or_404(&form)?;
    Ok(Json(DataResponse { data: rules }))
}

/// POST /api/v1/forms/{form}/validate
pub async fn validate_form(
    State(state): State<AppState>,
    Path(form): Path<String>,
    Json(input): Json<ValidateFormRequest>,
) -> AppResult<Json<DataResponse<ValidationResult>>> {
    let rules = form_rules_or_404(&form)?;
    let result = RuleSet::compile(&rules, &state.checks())?.evaluate(&input.values);

    tracing::debug!(form = %form, form_valid = result.form_valid, "Form validated");
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/validation/validate
///
/// Dry-run: evaluate caller-supplied rules against caller-supplied values.
/// A broken rule list is reported as a configuration error.
pub async fn validate(
    State(state): State<AppState>,
    Json(input): Json<ValidateRequest>,
) -> AppResult<Json<DataResponse<ValidationResult>>> {
    let result = RuleSet::compile(&input.rules, &state.checks())?.evaluate(&input.values);
    Ok(Json(DataResponse { data: result }))
}
