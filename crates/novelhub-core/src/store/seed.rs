//! Embedded demo catalog.
//!
//! A small set of stories compiled into the crate so a fresh process has
//! something to show. The JSON lives in `data/seed_stories.json`, ordered
//! newest first like the live collection.

use anyhow::{Context, Result};

use crate::models::Story;

const SEED_JSON: &str = include_str!("../../data/seed_stories.json");

/// Parse the embedded demo stories.
pub fn demo_stories() -> Result<Vec<Story>> {
    serde_json::from_str(SEED_JSON).context("Failed to parse embedded demo stories")
}
