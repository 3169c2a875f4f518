//! Client for the story operations consumed by the presentation layer.
//!
//! This module provides the `StoryClient` struct: asynchronous cached reads
//! and cache-invalidating writes over the story store, with simulated
//! latency standing in for a network round trip.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{QueryCache, StoryMutation};
use crate::models::{Category, CreateStoryInput, Story, StoryFilter, UpdateStoryInput};
use crate::stats::DashboardStats;
use crate::store::StoryStore;

use super::simulate::{Operation, Simulation};
use super::ApiError;

/// The operation surface the UI calls.
///
/// Reads go through the query cache and collapse concurrent duplicates;
/// writes hit the store after the simulated latency and then invalidate the
/// affected cache entries. Cloning is cheap and clones share the same
/// store, cache, and simulation.
#[derive(Clone)]
pub struct StoryClient {
    store: Arc<StoryStore>,
    cache: Arc<QueryCache>,
    simulation: Arc<Simulation>,
}

impl StoryClient {
    /// Client with the realistic latency profile and an unbounded cache.
    pub fn new(store: Arc<StoryStore>) -> Self {
        Self::with_simulation(store, Simulation::realistic())
    }

    /// Client with a custom simulation; tests use `Simulation::instant()`.
    pub fn with_simulation(store: Arc<StoryStore>, simulation: Simulation) -> Self {
        Self::with_parts(store, QueryCache::new(), simulation)
    }

    /// Full control over the cache and simulation.
    pub fn with_parts(store: Arc<StoryStore>, cache: QueryCache, simulation: Simulation) -> Self {
        Self {
            store,
            cache: Arc::new(cache),
            simulation: Arc::new(simulation),
        }
    }

    pub fn store(&self) -> &StoryStore {
        &self.store
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Stories matching the filter, newest first. Served from cache when a
    /// fresh entry exists for the normalized filter.
    pub async fn list_stories(&self, filter: &StoryFilter) -> Result<Vec<Story>, ApiError> {
        self.cache
            .list_stories(filter, || async move {
                self.simulation.apply(Operation::ListStories).await?;
                debug!(category = ?filter.category, search = ?filter.search, "Fetching story list");
                Ok(self.store.list(filter))
            })
            .await
    }

    /// A single story by id.
    pub async fn get_story(&self, id: &str) -> Result<Story, ApiError> {
        self.cache
            .story_detail(id, || async move {
                self.simulation.apply(Operation::GetStory).await?;
                debug!(id, "Fetching story");
                let story = self.store.get(id)?;
                Ok(story)
            })
            .await
    }

    /// The category catalog with live story counts.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.cache
            .categories(|| async move {
                self.simulation.apply(Operation::ListCategories).await?;
                debug!("Fetching categories");
                Ok(self.store.list_categories())
            })
            .await
    }

    /// Warm the caches a fresh screen needs: the unfiltered story list and
    /// the category catalog, fetched concurrently.
    pub async fn prefetch(&self) -> Result<(), ApiError> {
        let filter = StoryFilter::default();
        let stories = self.list_stories(&filter);
        let categories = self.list_categories();
        futures::future::try_join(stories, categories).await?;
        Ok(())
    }

    /// Aggregate numbers for the admin dashboard, derived from the cached
    /// unfiltered list.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let stories = self.list_stories(&StoryFilter::default()).await?;
        Ok(DashboardStats::from_stories(&stories))
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a story and invalidate the affected cache entries once the
    /// store change is visible.
    pub async fn create_story(&self, input: CreateStoryInput) -> Result<Story, ApiError> {
        self.simulation.apply(Operation::CreateStory).await?;
        let story = self.store.create(input).map_err(|err| {
            warn!(%err, "Create rejected");
            err
        })?;
        self.cache.invalidate_for(&StoryMutation::Created {
            id: story.id.clone(),
        });
        Ok(story)
    }

    /// Merge the supplied fields into a story and invalidate the affected
    /// cache entries once the store change is visible.
    pub async fn update_story(
        &self,
        id: &str,
        patch: UpdateStoryInput,
    ) -> Result<Story, ApiError> {
        self.simulation.apply(Operation::UpdateStory).await?;
        let story = self.store.update(id, patch)?;
        self.cache.invalidate_for(&StoryMutation::Updated {
            id: story.id.clone(),
        });
        Ok(story)
    }

    /// Remove a story and invalidate the affected cache entries once the
    /// store change is visible.
    pub async fn delete_story(&self, id: &str) -> Result<(), ApiError> {
        self.simulation.apply(Operation::DeleteStory).await?;
        self.store.delete(id)?;
        self.cache.invalidate_for(&StoryMutation::Deleted {
            id: id.to_string(),
        });
        Ok(())
    }
}
