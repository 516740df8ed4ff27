//! Per-page listing configuration.
//!
//! Each listing page supplies one [`ListingConfig`]: which fields free-text
//! search looks at, and the allow-lists of fields that may be filtered and
//! sorted on. The engine rejects anything outside the allow-lists.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::spec::{SortDirection, SortSpec};

/// How a field's values compare when sorting or range-filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Numbers (and numeric strings) numerically, date-like strings by
    /// timestamp, the rest as text.
    #[default]
    Auto,
    Text,
    Number,
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    pub name: String,
    pub searchable: Vec<String>,
    pub filterable: IndexMap<String, FieldKind>,
    pub sortable: IndexMap<String, FieldKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortSpec>,
}

impl ListingConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            searchable: Vec::new(),
            filterable: IndexMap::new(),
            sortable: IndexMap::new(),
            default_sort: None,
        }
    }

    pub fn searchable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn filterable(mut self, field: impl Into<String>, kind: FieldKind) -> Self {
        self.filterable.insert(field.into(), kind);
        self
    }

    pub fn sortable(mut self, field: impl Into<String>, kind: FieldKind) -> Self {
        self.sortable.insert(field.into(), kind);
        self
    }

    /// Register a field as both filterable and sortable.
    pub fn field(self, field: impl Into<String>, kind: FieldKind) -> Self {
        let field = field.into();
        self.filterable(field.clone(), kind).sortable(field, kind)
    }

    /// Sort applied when a query does not name one.
    pub fn default_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.default_sort = Some(SortSpec {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn filter_kind(&self, field: &str) -> Option<FieldKind> {
        self.filterable.get(field).copied()
    }

    pub fn sort_kind(&self, field: &str) -> Option<FieldKind> {
        self.sortable.get(field).copied()
    }
}
