//! Search, filter, sort and paginate over an in-memory record collection.
//!
//! The steps run in a fixed order: search, field filters, stable sort, page
//! slice. The engine borrows its inputs, never mutates them and keeps no
//! state between calls.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde_json::Value;

use super::compare::{compare_values, in_range, is_readable};
use super::listing::{FieldKind, ListingConfig};
use super::paging::{normalize_search, total_pages};
use super::spec::{FilterValue, QueryResult, QuerySpec, SortDirection, SortSpec};
use crate::error::CoreError;
use crate::record::{value_as_text, Record};

/// Query engine bound to one listing's configuration.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    listing: &'a ListingConfig,
}

impl<'a> QueryEngine<'a> {
    pub fn new(listing: &'a ListingConfig) -> Self {
        Self { listing }
    }

    /// Run `spec` against `records` and return the requested page.
    pub fn run(&self, records: &[Record], spec: &QuerySpec) -> Result<QueryResult, CoreError> {
        let sort = self.check(spec)?;

        let mut matched = self.select(records, spec, None);

        if let Some((sort, kind)) = sort {
            sort_records(&mut matched, &sort.field, kind, sort.direction);
        }

        let total_matched = matched.len();
        let size = spec.page.size;
        let start = (spec.page.index - 1).saturating_mul(size);
        let items: Vec<Record> = matched
            .into_iter()
            .skip(start)
            .take(size)
            .cloned()
            .collect();

        let result = QueryResult {
            items,
            total_matched,
            total_pages: total_pages(total_matched, size),
        };

        tracing::debug!(
            listing = %self.listing.name,
            total = records.len(),
            matched = result.total_matched,
            page = spec.page.index,
            pages = result.total_pages,
            returned = result.items.len(),
            "Listing query executed",
        );

        Ok(result)
    }

    /// Count records per distinct value of `field`.
    ///
    /// Applies the search and every filter except the one on `field` itself,
    /// so a status tab bar can show how many rows each tab would hold. Keys
    /// appear in first-seen order; records without the field are skipped.
    pub fn facet_counts(
        &self,
        records: &[Record],
        spec: &QuerySpec,
        field: &str,
    ) -> Result<IndexMap<String, usize>, CoreError> {
        if self.listing.filter_kind(field).is_none() {
            return Err(self.reject(format!(
                "field '{field}' is not filterable in listing '{}'",
                self.listing.name
            )));
        }
        self.check_filters(spec)?;

        let mut counts = IndexMap::new();
        for record in self.select(records, spec, Some(field)) {
            if let Some(key) = record.text(field) {
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    /// Validate the spec against the listing and resolve the effective sort.
    fn check(&self, spec: &QuerySpec) -> Result<Option<(SortSpec, FieldKind)>, CoreError> {
        if spec.page.size == 0 {
            return Err(self.reject("page size must be at least 1".to_string()));
        }
        if spec.page.index == 0 {
            return Err(self.reject("page index is 1-based and must be at least 1".to_string()));
        }
        self.check_filters(spec)?;

        let Some(sort) = spec.sort.as_ref().or(self.listing.default_sort.as_ref()) else {
            return Ok(None);
        };
        match self.listing.sort_kind(&sort.field) {
            Some(kind) => Ok(Some((sort.clone(), kind))),
            None => Err(self.reject(format!(
                "unknown sort field '{}' for listing '{}'",
                sort.field, self.listing.name
            ))),
        }
    }

    fn check_filters(&self, spec: &QuerySpec) -> Result<(), CoreError> {
        for field in spec.filters.keys() {
            if self.listing.filter_kind(field).is_none() {
                return Err(self.reject(format!(
                    "field '{field}' is not filterable in listing '{}'",
                    self.listing.name
                )));
            }
        }
        Ok(())
    }

    fn reject(&self, msg: String) -> CoreError {
        tracing::warn!(listing = %self.listing.name, error = %msg, "Rejected query spec");
        CoreError::Configuration(msg)
    }

    /// Search then filter, preserving source order.
    fn select<'r>(
        &self,
        records: &'r [Record],
        spec: &QuerySpec,
        skip_filter: Option<&str>,
    ) -> Vec<&'r Record> {
        let needle = normalize_search(&spec.search_text);
        records
            .iter()
            .filter(|r| match &needle {
                Some(needle) => self.matches_search(r, needle),
                None => true,
            })
            .filter(|r| {
                spec.filters
                    .iter()
                    .filter(|(field, _)| Some(field.as_str()) != skip_filter)
                    .all(|(field, filter)| self.matches_filter(r, field, filter))
            })
            .collect()
    }

    fn matches_search(&self, record: &Record, needle: &str) -> bool {
        self.listing.searchable.iter().any(|field| {
            record
                .text(field)
                .is_some_and(|text| text.to_lowercase().contains(needle))
        })
    }

    fn matches_filter(&self, record: &Record, field: &str, filter: &FilterValue) -> bool {
        if filter.is_noop() {
            return true;
        }
        let Some(value) = record.get(field) else {
            return false;
        };
        match filter {
            FilterValue::Scalar(expected) => values_equal(value, expected),
            FilterValue::Set(options) => options.iter().any(|o| values_equal(value, o)),
            FilterValue::Range(range) => {
                let kind = self.listing.filter_kind(field).unwrap_or_default();
                in_range(kind, value, range)
            }
        }
    }
}

/// Run `spec` against `records` under `listing`.
pub fn query(
    records: &[Record],
    spec: &QuerySpec,
    listing: &ListingConfig,
) -> Result<QueryResult, CoreError> {
    QueryEngine::new(listing).run(records, spec)
}

/// Case-sensitive equality on the text form, so `3` matches `"3"`.
fn values_equal(value: &Value, expected: &Value) -> bool {
    match (value_as_text(value), value_as_text(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Stable sort. Values that do not read as the field's kind follow the
/// readable ones, and records missing the field go last, in either direction.
fn sort_records(records: &mut [&Record], field: &str, kind: FieldKind, direction: SortDirection) {
    let tier = |record: &Record| match record.get(field) {
        Some(value) if is_readable(kind, value) => 0,
        Some(_) => 1,
        None => 2,
    };
    records.sort_by(|a, b| {
        tier(*a).cmp(&tier(*b)).then_with(|| match (a.get(field), b.get(field)) {
            (Some(x), Some(y)) => {
                let ord = compare_values(kind, x, y);
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
            _ => Ordering::Equal,
        })
    });
}
