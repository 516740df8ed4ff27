//! Handlers for the `/listings` resource.
//!
//! Each listing page posts its full view state (search box, filter
//! drop-downs, sort header, pager) and renders the returned page.

use axum::extract::{Path, State};
use axum::Json;
use courier_core::listings::{shipment_quick_filter, LISTING_SHIPMENTS};
use courier_core::query::paging::{clamp_page_index, clamp_page_size};
use courier_core::query::{
    FilterValue, ListingConfig, PageRequest, QueryEngine, QueryResult, QuerySpec, SortSpec,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of a listing query.
///
/// Same shape as [`QuerySpec`], except that the page and its fields are
/// optional and an optional shipment status tab may stand in for a `status`
/// filter.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    pub search_text: String,
    pub filters: IndexMap<String, FilterValue>,
    pub sort: Option<SortSpec>,
    pub page: PageParams,
    /// Shipment quick-filter tab: `all`, `active`, `delivered` or `problem`.
    pub status_tab: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageParams {
    pub index: Option<usize>,
    pub size: Option<usize>,
}

impl QueryRequest {
    /// Resolve into an engine spec: page size clamped to the configured
    /// bounds, status tab folded into the filters.
    fn into_spec(self, listing: &str, config: &ServerConfig) -> AppResult<QuerySpec> {
        let mut filters = self.filters;
        if let Some(tab) = self.status_tab {
            if listing != LISTING_SHIPMENTS {
                return Err(AppError::BadRequest(format!(
                    "listing '{listing}' has no status tabs"
                )));
            }
            let filter = shipment_quick_filter(&tab)
                .ok_or_else(|| AppError::BadRequest(format!("unknown status tab '{tab}'")))?;
            filters.insert("status".to_string(), filter);
        }

        Ok(QuerySpec {
            search_text: self.search_text,
            filters,
            sort: self.sort,
            page: PageRequest {
                index: self.page.index.unwrap_or(1),
                size: clamp_page_size(
                    self.page.size,
                    config.default_page_size,
                    config.max_page_size,
                ),
            },
        })
    }
}

/// One page of a listing, with the page actually served.
#[derive(Debug, Serialize)]
pub struct ListingPage {
    #[serde(flatten)]
    pub result: QueryResult,
    pub page: usize,
    pub page_size: usize,
}

/// GET /api/v1/listings
///
/// Every listing with its searchable, filterable and sortable fields.
pub async fn list_listings(
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<ListingConfig>>> {
    let listings = state.catalog.entries().map(|e| e.config.clone()).collect();
    Json(DataResponse { data: listings })
}

/// POST /api/v1/listings/{listing}/query
///
/// Run a query. A page index past the end (after a filter change shrank the
/// result) is served as the last page instead of an empty one.
pub async fn query_listing(
    State(state): State<AppState>,
    Path(listing): Path<String>,
    Json(input): Json<QueryRequest>,
) -> AppResult<Json<DataResponse<ListingPage>>> {
    let entry = state.catalog.get(&listing)?;
    let mut spec = input.into_spec(&listing, &state.config)?;
    let records = entry.source.fetch()?;
    let engine = QueryEngine::new(&entry.config);

    let mut result = engine.run(&records, &spec)?;
    let clamped = clamp_page_index(spec.page.index, result.total_pages);
    if clamped != spec.page.index {
        tracing::debug!(
            listing = %listing,
            requested = spec.page.index,
            served = clamped,
            "Clamped page index",
        );
        spec.page.index = clamped;
        result = engine.run(&records, &spec)?;
    }

    Ok(Json(DataResponse {
        data: ListingPage {
            result,
            page: spec.page.index,
            page_size: spec.page.size,
        },
    }))
}

/// POST /api/v1/listings/{listing}/facets/{field}
///
/// Per-value record counts for `field` under the posted search and filters,
/// ignoring any filter on `field` itself.
pub async fn facet_counts(
    State(state): State<AppState>,
    Path((listing, field)): Path<(String, String)>,
    Json(input): Json<QueryRequest>,
) -> AppResult<Json<DataResponse<IndexMap<String, usize>>>> {
    let entry = state.catalog.get(&listing)?;
    let spec = input.into_spec(&listing, &state.config)?;
    let records = entry.source.fetch()?;

    let counts = QueryEngine::new(&entry.config).facet_counts(&records, &spec, &field)?;
    Ok(Json(DataResponse { data: counts }))
}
