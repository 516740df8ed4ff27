//! Route definitions for the `/listings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::listings;
use crate::state::AppState;

/// Routes mounted at `/listings`.
///
/// ```text
/// GET    /                            -> list_listings
/// POST   /{listing}/query             -> query_listing
/// POST   /{listing}/facets/{field}    -> facet_counts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(listings::list_listings))
        .route("/{listing}/query", post(listings::query_listing))
        .route("/{listing}/facets/{field}", post(listings::facet_counts))
}
