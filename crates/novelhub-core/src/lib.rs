//! Core library for NovelHub, a short-fiction reading and publishing app.
//!
//! Everything the front ends share lives here:
//! - `store`: The in-memory story store and fixed category catalog
//! - `cache`: Query cache with invalidation and request collapsing
//! - `api`: The `StoryClient` operation surface with simulated latency
//! - `auth`: Admin login sessions
//! - `models`: Wire types shared with the UI layer
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use novelhub_core::{StoryClient, StoryFilter, StoryStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(StoryStore::demo()?);
//!     let client = StoryClient::new(store);
//!
//!     let stories = client.list_stories(&StoryFilter::by_category("fantasy")).await?;
//!     println!("{} fantasy stories", stories.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod models;
pub mod stats;
pub mod store;
pub mod utils;

pub use api::{ApiError, LatencyProfile, Operation, Simulation, StoryClient};
pub use auth::{AdminCredentials, AuthError, Session};
pub use cache::{QueryCache, StoryMutation};
pub use config::{Config, LatencyChoice};
pub use models::{
    Category, Chapter, CreateStoryInput, Role, Story, StoryFilter, UpdateStoryInput, User,
};
pub use stats::DashboardStats;
pub use store::{StoreError, StoryStore};
