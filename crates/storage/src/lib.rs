//! Local cache for wkdash.
//!
//! This crate provides a trait-based key-value cache with a JSON-file
//! implementation and an in-memory one for tests and one-shot runs.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{Cache, CacheExt, CacheEntry, Cached, StorageError, Result, keys};
pub use json_storage::JsonCache;
pub use memory::MemoryCache;
