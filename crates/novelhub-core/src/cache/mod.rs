//! Read-through query cache for store results.
//!
//! This module provides the `QueryCache` keyed by operation family plus
//! canonical parameters. Entries stay fresh until a mutation invalidates
//! them (optionally bounded by a max age), and concurrent identical reads
//! collapse into a single fetch.
//!
//! Cached query families:
//! - Story lists, keyed by normalized `StoryFilter`
//! - Story details, keyed by id
//! - The category catalog

pub mod manager;

pub use manager::{CacheMetrics, CachedData, Invalidation, QueryCache, StoryMutation};
