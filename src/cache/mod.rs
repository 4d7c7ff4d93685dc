//! Environment cache.
//!
//! A bounded, least-recently-used collection of built environments, each
//! keyed by the exact [`DependencySpec`](crate::spec::DependencySpec) it
//! was built for, persisted to a plain-text index under the cache root.

pub mod entry;
pub mod index;
pub mod store;

pub use entry::CacheEntry;
pub use index::{index_file_name, parse_index, render_index};
pub use store::{clear_cache, EnvironmentCache, DEFAULT_CAPACITY};
