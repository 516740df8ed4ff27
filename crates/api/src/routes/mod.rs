pub mod forms;
pub mod health;
pub mod listings;
pub mod tools;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /listings                                        list listings
/// /listings/{listing}/query                        run a listing query (POST)
/// /listings/{listing}/facets/{field}               per-value counts (POST)
///
/// /forms                                           list forms
/// /forms/{form}/rules                              form rule list
/// /forms/{form}/validate                           validate form values (POST)
///
/// /validation/validate                             dry-run ad-hoc rules (POST)
///
/// /cards/inspect                                   card type, checksum (POST)
/// /passwords/strength                              strength meter, policy (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/listings", listings::router())
        .nest("/forms", forms::router())
        .nest("/validation", forms::validation_router())
        .nest("/cards", tools::cards_router())
        .nest("/passwords", tools::passwords_router())
}
