//! WaniKani data access.
//!
//! The [`DataSource`] trait is the only thing the progress views depend on.
//! [`WanikaniClient`] implements it over the v2 REST API and [`CachedSource`]
//! puts a [`wkdash_storage::Cache`] in front of any source.

#![warn(missing_docs)]

pub mod error;
pub mod wire;
pub mod client;
pub mod source;
pub mod cached;

pub use error::{ApiError, Result};
pub use client::{WanikaniClient, ClientConfig, DEFAULT_BASE_URL};
pub use source::DataSource;
pub use cached::{CachedSource, CacheConfig};
