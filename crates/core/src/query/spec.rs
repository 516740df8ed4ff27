//! Query spec and result types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::paging::DEFAULT_PAGE_SIZE;
use crate::record::Record;

/// Filter value that matches every record. Pages use it as the default state
/// of their status/role drop-downs.
pub const ALL: &str = "all";

/// Combined search, filter, sort and page state of one listing view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    pub search_text: String,
    pub filters: IndexMap<String, FilterValue>,
    pub sort: Option<SortSpec>,
    pub page: PageRequest,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            filters: IndexMap::new(),
            sort: None,
            page: PageRequest::default(),
        }
    }
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: FilterValue) -> Self {
        self.filters.insert(field.into(), value);
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn page(mut self, index: usize, size: usize) -> Self {
        self.page = PageRequest { index, size };
        self
    }
}

/// One field filter.
///
/// Deserializes from JSON as `[..]` (set membership), `{"from": .., "to": ..}`
/// (range) or any primitive (equality). `Set` must stay first: serde also
/// accepts a two-element array as a `RangeFilter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Set(Vec<Value>),
    Range(RangeFilter),
    Scalar(Value),
}

impl FilterValue {
    pub fn equals(value: impl Into<Value>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Set(values.into_iter().map(Into::into).collect())
    }

    pub fn range(from: Option<Value>, to: Option<Value>) -> Self {
        Self::Range(RangeFilter { from, to })
    }

    pub fn all() -> Self {
        Self::Scalar(Value::String(ALL.to_string()))
    }

    /// Whether this filter matches every record without looking at it.
    ///
    /// True for the `"all"` sentinel, `null`, an empty set, a set containing
    /// `"all"`, and a range with neither bound.
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Scalar(v) => is_all_sentinel(v) || v.is_null(),
            Self::Set(values) => values.is_empty() || values.iter().any(is_all_sentinel),
            Self::Range(range) => range.lower().is_none() && range.upper().is_none(),
        }
    }
}

fn is_all_sentinel(value: &Value) -> bool {
    value.as_str() == Some(ALL)
}

/// Inclusive `[from, to]` range. A missing or blank bound is unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeFilter {
    #[serde(default)]
    pub from: Option<Value>,
    #[serde(default)]
    pub to: Option<Value>,
}

impl RangeFilter {
    pub fn lower(&self) -> Option<&Value> {
        self.from.as_ref().filter(|v| !is_blank(v))
    }

    pub fn upper(&self) -> Option<&Value> {
        self.to.as_ref().filter(|v| !is_blank(v))
    }
}

/// Cleared date pickers send `""` rather than omitting the bound.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            index: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a filtered, sorted listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub items: Vec<Record>,
    pub total_matched: usize,
    pub total_pages: usize,
}
