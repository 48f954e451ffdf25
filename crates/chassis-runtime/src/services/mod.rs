//! Application-facing services built on resolved plugin instances.
//!
//! The [`ServiceContainer`] is the aggregation point: it resolves every
//! plugin reference in the configuration through the typed factories, then
//! composes the instances into two services: a multiplexing
//! [`LogService`] and a policy-wrapped [`CacheService`]. Construction is
//! fail-fast: any resolution failure aborts the whole build and no partial
//! service set escapes.

pub mod cache;
pub mod container;
pub mod log;

pub use cache::CacheService;
pub use container::{PluginFactories, ServiceContainer, load_service_container};
pub use log::LogService;
