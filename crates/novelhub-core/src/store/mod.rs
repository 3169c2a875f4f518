//! The system of record for stories and categories.
//!
//! This module provides the `StoryStore`, the sole owner of the live story
//! collection and the fixed category catalog. All operations here are
//! synchronous; asynchrony and simulated latency are imposed by the
//! `api` layer on top.
//!
//! State lives only for the process lifetime. Nothing is persisted.

pub mod memory;
pub mod seed;

use thiserror::Error;

pub use memory::{default_categories, StoryStore, MAX_DESCRIPTION_LEN};

/// Failures raised by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No story with the given id.
    #[error("Story not found: {0}")]
    NotFound(String),

    /// A story referenced a category slug absent from the catalog.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// A required field was missing or malformed.
    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
