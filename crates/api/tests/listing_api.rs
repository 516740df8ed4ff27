//! Integration tests for the listing query API.
//!
//! The test app serves the embedded fixtures with a default page size of 5
//! and a maximum of 8.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::{json, Value};

fn ids(json: &Value) -> Vec<i64> {
    json["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

async fn query(listing: &str, body: Value) -> (StatusCode, Value) {
    let uri = format!("/api/v1/listings/{listing}/query");
    let response = post_json(common::build_test_app(), &uri, body).await;
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Test: GET /listings describes every listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_listings_returns_configs() {
    let response = get(common::build_test_app(), "/api/v1/listings").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["shipments", "users", "archive", "payments"]);
    assert_eq!(json["data"][0]["filterable"]["weight_kg"], "number");
}

// ---------------------------------------------------------------------------
// Test: Empty body uses the default sort and page size
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_query_returns_first_page_newest_first() {
    let (status, json) = query("shipments", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json), [7, 5, 3, 2, 10]);
    assert_eq!(json["data"]["total_matched"], 10);
    assert_eq!(json["data"]["total_pages"], 2);
    assert_eq!(json["data"]["page"], 1);
    assert_eq!(json["data"]["page_size"], 5);
}

// ---------------------------------------------------------------------------
// Test: Search, filters and sort combine
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_is_case_insensitive_across_searchable_fields() {
    let (_, json) = query("shipments", json!({"search_text": "IVAN petrov"})).await;

    assert_eq!(ids(&json), [7, 5, 1]);
}

#[tokio::test]
async fn sort_by_cost_ascending() {
    let body = json!({
        "sort": {"field": "cost", "direction": "asc"},
        "page": {"size": 3},
    });
    let (_, json) = query("shipments", body).await;

    assert_eq!(ids(&json), [4, 1, 6]);
    assert_eq!(json["data"]["total_pages"], 4);
}

#[tokio::test]
async fn numeric_and_date_ranges() {
    let body = json!({
        "filters": {"weight_kg": {"from": 1, "to": 5}},
        "sort": {"field": "tracking_number"},
    });
    let (_, json) = query("shipments", body).await;
    assert_eq!(ids(&json), [1, 5, 6, 10]);

    let body = json!({
        "filters": {"created_at": {"from": "2024-03-01", "to": "2024-03-05"}},
        "sort": {"field": "tracking_number"},
    });
    let (_, json) = query("shipments", body).await;
    // A date-only upper bound covers the whole day.
    assert_eq!(ids(&json), [1, 2, 3, 10]);
}

#[tokio::test]
async fn set_filter_and_all_sentinel() {
    let body = json!({"filters": {"method": ["card", "wallet"]}, "page": {"size": 8}});
    let (_, json) = query("payments", body).await;
    assert_eq!(json["data"]["total_matched"], 5);

    let body = json!({"filters": {"role": "all"}});
    let (_, json) = query("users", body).await;
    assert_eq!(json["data"]["total_matched"], 8);

    let body = json!({"filters": {"role": "customer"}});
    let (_, json) = query("users", body).await;
    assert_eq!(json["data"]["total_matched"], 5);
}

#[tokio::test]
async fn records_missing_the_sort_field_go_last() {
    let (_, json) = query("payments", json!({"page": {"size": 8}})).await;

    assert_eq!(ids(&json), [6, 5, 2, 1, 7, 4, 3]);
}

// ---------------------------------------------------------------------------
// Test: Shipment status tabs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_tabs_filter_shipments() {
    let (_, active) = query("shipments", json!({"status_tab": "active"})).await;
    assert_eq!(ids(&active), [7, 5, 3, 2, 10]);

    let (_, problem) = query("shipments", json!({"status_tab": "problem"})).await;
    assert_eq!(problem["data"]["total_matched"], 3);

    let (_, all) = query("shipments", json!({"status_tab": "all"})).await;
    assert_eq!(all["data"]["total_matched"], 10);
}

#[tokio::test]
async fn unknown_status_tab_is_bad_request() {
    let (status, json) = query("shipments", json!({"status_tab": "late"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn status_tab_on_other_listing_is_bad_request() {
    let (status, _) = query("users", json!({"status_tab": "active"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: Paging
// ---------------------------------------------------------------------------

#[tokio::test]
async fn page_size_is_capped() {
    let (_, json) = query("shipments", json!({"page": {"size": 50}})).await;

    assert_eq!(json["data"]["page_size"], 8);
    assert_eq!(ids(&json).len(), 8);
}

#[tokio::test]
async fn page_past_the_end_serves_last_page() {
    let (status, json) = query("shipments", json!({"page": {"index": 9}})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["page"], 2);
    assert_eq!(ids(&json), [1, 8, 4, 6, 9]);
}

#[tokio::test]
async fn empty_result_has_zero_pages() {
    let (_, json) = query("shipments", json!({"search_text": "no such parcel"})).await;

    assert_eq!(json["data"]["total_matched"], 0);
    assert_eq!(json["data"]["total_pages"], 0);
    assert_eq!(json["data"]["page"], 1);
    assert!(ids(&json).is_empty());
}

// ---------------------------------------------------------------------------
// Test: Configuration errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn page_index_zero_is_configuration_error() {
    let (status, json) = query("shipments", json!({"page": {"index": 0}})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CONFIGURATION_ERROR");
}

#[tokio::test]
async fn unknown_sort_field_is_configuration_error() {
    let (status, json) = query("shipments", json!({"sort": {"field": "sender_name"}})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CONFIGURATION_ERROR");
}

#[tokio::test]
async fn filter_outside_allow_list_is_configuration_error() {
    let body = json!({"filters": {"recipient_name": "Ivan Petrov"}});
    let (status, json) = query("shipments", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CONFIGURATION_ERROR");
}

#[tokio::test]
async fn unknown_listing_returns_404() {
    let (status, json) = query("parcels", json!({})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "listing 'parcels' not found");
}

// ---------------------------------------------------------------------------
// Test: Facet counts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn facet_counts_ignore_the_faceted_filter() {
    let body = json!({"filters": {"status": "delivered", "service_type": "express"}});
    let response = post_json(
        common::build_test_app(),
        "/api/v1/listings/shipments/facets/status",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        json!({"in_transit": 1, "out_for_delivery": 1, "delivered": 1})
    );
}

#[tokio::test]
async fn facet_on_unfilterable_field_is_configuration_error() {
    let response = post_json(
        common::build_test_app(),
        "/api/v1/listings/shipments/facets/sender_name",
        json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
