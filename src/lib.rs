//! Contract surface of the loot case economy: the [`CaseApi`] trait, the
//! case and reward views, lifecycle events with an ordered listener registry,
//! deferred results with pluggable callback scheduling, and a TOML case
//! catalog.

pub mod api;
pub mod catalog;
pub mod config;
pub mod deferred;
pub mod error;
pub mod events;
pub mod models;
pub mod utils;

pub use api::CaseApi;
pub use catalog::CaseCatalog;
pub use config::CatalogConfig;
pub use deferred::{FutureResult, Scheduler};
pub use error::{CaseApiError, CaseApiResult};
