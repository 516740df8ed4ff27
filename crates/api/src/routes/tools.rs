//! Route definitions for the single-field helper endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::tools;
use crate::state::AppState;

/// Routes mounted at `/cards`.
///
/// ```text
/// POST   /inspect    -> inspect_card
/// ```
pub fn cards_router() -> Router<AppState> {
    Router::new().route("/inspect", post(tools::inspect_card))
}

/// Routes mounted at `/passwords`.
///
/// ```text
/// POST   /strength   -> password_strength
/// ```
pub fn passwords_router() -> Router<AppState> {
    Router::new().route("/strength", post(tools::password_strength))
}
