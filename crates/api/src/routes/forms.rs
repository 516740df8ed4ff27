//! Route definitions for the `/forms` and `/validation` resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::forms;
use crate::state::AppState;

/// Routes mounted at `/forms`.
///
/// ```text
/// GET    /                    -> list_forms
/// GET    /{form}/rules        -> form_rules
/// POST   /{form}/validate     -> validate_form
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(forms::list_forms))
        .route("/{form}/rules", get(forms::form_rules))
        .route("/{form}/validate", post(forms::validate_form))
}

/// Routes mounted at `/validation`.
///
/// ```text
/// POST   /validate    -> validate   (dry-run)
/// ```
pub fn validation_router() -> Router<AppState> {
    Router::new().route("/validate", post(forms::validate))
}
