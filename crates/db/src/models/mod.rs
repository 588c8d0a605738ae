//! Domain model structs.
//!
//! Row structs derive `FromRow` and mirror the column aliases selected by
//! the gateways; tree structs derive `Serialize` for the callers.

pub mod configurator;
pub mod media;
