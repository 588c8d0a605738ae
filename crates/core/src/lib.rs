//! Database-free domain logic for the storefront product configurator.
//!
//! Everything here operates on pre-loaded data passed in by the caller;
//! the `db` crate owns all query construction and execution.

pub mod configurator;
pub mod context;
pub mod error;
pub mod translation;
pub mod types;
