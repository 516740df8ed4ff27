//! Query and validation engines for the courier portal.
//!
//! Both engines are pure, synchronous functions over borrowed inputs. Page
//! controllers hand them a record collection or a set of form values and
//! render whatever comes back.

pub mod error;
pub mod forms;
pub mod listings;
pub mod query;
pub mod record;
pub mod source;
pub mod types;
pub mod validation;
