//! Repository layer.
//!
//! Repositories provide async read methods that accept `&PgPool` as the
//! first argument. Storefront gateways additionally carry their
//! collaborators (field helper, hydrator, media gateway) as fields.

pub mod configurator_gateway;
pub mod media_repo;

pub use configurator_gateway::ConfiguratorGateway;
pub use media_repo::{MediaGateway, MediaRepo};
