//! Built-in listing configurations for the portal's list pages.
//!
//! Field names must match the record fixtures served for each listing.

use crate::query::{FieldKind, FilterValue, ListingConfig, SortDirection};

pub const LISTING_SHIPMENTS: &str = "shipments";
pub const LISTING_USERS: &str = "users";
pub const LISTING_ARCHIVE: &str = "archive";
pub const LISTING_PAYMENTS: &str = "payments";

/// All built-in listing names.
pub const LISTING_NAMES: &[&str] = &[
    LISTING_SHIPMENTS,
    LISTING_USERS,
    LISTING_ARCHIVE,
    LISTING_PAYMENTS,
];

// ---------------------------------------------------------------------------
// Shipment status quick filters
// ---------------------------------------------------------------------------

/// Statuses a shipment passes through before it is closed.
pub const ACTIVE_SHIPMENT_STATUSES: &[&str] =
    &["pending", "picked_up", "in_transit", "out_for_delivery"];

/// Statuses of shipments that ended without delivery.
pub const PROBLEM_SHIPMENT_STATUSES: &[&str] = &["cancelled", "returned", "lost"];

/// Resolve a shipment quick-filter tab to a `status` filter.
///
/// Tabs are plain membership filters, so applying "active" to a list that
/// only holds cancelled shipments yields an empty page rather than an error.
pub fn shipment_quick_filter(tab: &str) -> Option<FilterValue> {
    match tab {
        "all" => Some(FilterValue::all()),
        "active" => Some(FilterValue::one_of(ACTIVE_SHIPMENT_STATUSES.iter().copied())),
        "delivered" => Some(FilterValue::equals("delivered")),
        "problem" => Some(FilterValue::one_of(PROBLEM_SHIPMENT_STATUSES.iter().copied())),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// Customer and admin shipment list.
pub fn shipments() -> ListingConfig {
    ListingConfig::new(LISTING_SHIPMENTS)
        .searchable(["tracking_number", "sender_name", "recipient_name"])
        .field("status", FieldKind::Text)
        .field("service_type", FieldKind::Text)
        .field("destination_city", FieldKind::Text)
        .field("created_at", FieldKind::Date)
        .field("estimated_delivery", FieldKind::Date)
        .field("weight_kg", FieldKind::Number)
        .field("cost", FieldKind::Number)
        .sortable("tracking_number", FieldKind::Text)
        .default_sort("created_at", SortDirection::Desc)
}

/// Admin user-management table.
pub fn users() -> ListingConfig {
    ListingConfig::new(LISTING_USERS)
        .searchable(["full_name", "email", "phone"])
        .field("role", FieldKind::Text)
        .field("status", FieldKind::Text)
        .field("registered_at", FieldKind::Date)
        .field("orders_count", FieldKind::Number)
        .sortable("full_name", FieldKind::Text)
        .default_sort("registered_at", SortDirection::Desc)
}

/// Closed shipments archive.
pub fn archive() -> ListingConfig {
    ListingConfig::new(LISTING_ARCHIVE)
        .searchable(["tracking_number", "sender_name", "recipient_name"])
        .field("status", FieldKind::Text)
        .field("closed_at", FieldKind::Date)
        .field("cost", FieldKind::Number)
        .sortable("tracking_number", FieldKind::Text)
        .default_sort("closed_at", SortDirection::Desc)
}

/// Payment history.
pub fn payments() -> ListingConfig {
    ListingConfig::new(LISTING_PAYMENTS)
        .searchable(["invoice_number", "customer_name", "tracking_number"])
        .field("method", FieldKind::Text)
        .field("status", FieldKind::Text)
        .field("amount", FieldKind::Number)
        .field("paid_at", FieldKind::Date)
        .default_sort("paid_at", SortDirection::Desc)
}

/// Look up a built-in listing by name.
pub fn by_name(name: &str) -> Option<ListingConfig> {
    match name {
        LISTING_SHIPMENTS => Some(shipments()),
        LISTING_USERS => Some(users()),
        LISTING_ARCHIVE => Some(archive()),
        LISTING_PAYMENTS => Some(payments()),
        _ => None,
    }
}
