//! Client-side record query engine.
//!
//! One generic implementation of the search + filter + sort + paginate logic
//! every listing page needs. Pages differ only in their [`ListingConfig`].

pub mod compare;
pub mod engine;
pub mod listing;
pub mod paging;
pub mod spec;

pub use engine::{query, QueryEngine};
pub use listing::{FieldKind, ListingConfig};
pub use spec::{
    FilterValue, PageRequest, QueryResult, QuerySpec, RangeFilter, SortDirection, SortSpec, ALL,
};
