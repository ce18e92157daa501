//! Shared JSON utilities for talking to the CMS.
//!
//! This module provides the envelope flattening applied to every response
//! and the nested query string encoding used for filters and pagination.

pub mod flatten;
pub mod query_string;

pub use flatten::{flatten_attributes, flatten_into, is_truthy};
pub use query_string::stringify;
