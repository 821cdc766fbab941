//! Core modules - events, workers, and the catalog service.
//!
//! Everything here is independent of the UI; results flow back through the
//! event bus.

pub mod catalog;
pub mod catalog_events;
pub mod client;
pub mod event_bus;
pub mod workers;

// Re-exports for convenience
pub use catalog::CatalogService;
pub use client::CatalogClient;
pub use event_bus::EventBus;
pub use workers::Workers;
