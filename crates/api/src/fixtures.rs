//! Embedded demo records for the built-in listings.
//!
//! The portal has no backend of its own yet; every listing is served from a
//! JSON fixture compiled into the binary.

use std::sync::Arc;

use courier_core::error::CoreError;
use courier_core::listings;
use courier_core::source::{InMemorySource, SourceCatalog};

const SHIPMENTS: &str = include_str!("../fixtures/shipments.json");
const USERS: &str = include_str!("../fixtures/users.json");
const ARCHIVE: &str = include_str!("../fixtures/archive.json");
const PAYMENTS: &str = include_str!("../fixtures/payments.json");

/// Build a catalog holding every built-in listing with its fixture records.
pub fn fixture_catalog() -> Result<SourceCatalog, CoreError> {
    let mut catalog = SourceCatalog::new();
    for (config, json) in [
        (listings::shipments(), SHIPMENTS),
        (listings::users(), USERS),
        (listings::archive(), ARCHIVE),
        (listings::payments(), PAYMENTS),
    ] {
        let source = InMemorySource::from_json(json)?;
        tracing::debug!(listing = %config.name, records = source.len(), "Loaded fixture listing");
        catalog.register(config, Arc::new(source));
    }
    Ok(catalog)
}
