//! In-memory story store.
//!
//! Stories live in an ordered sequence, newest first: `create` prepends,
//! `update` edits in place, `delete` removes outright. The category catalog
//! is fixed at construction and its per-category story counts are derived
//! from the live collection on every read.
//!
//! The store is internally synchronized so it can be shared behind an
//! `Arc` across concurrent tasks. Every operation is synchronous and holds
//! the lock only for its critical section.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Duration, Utc};
use rand::Rng;
use tracing::{debug, info};

use super::{StoreError, StoreResult};
use crate::models::{Category, CreateStoryInput, Story, StoryFilter, UpdateStoryInput};
use crate::store::seed;

/// Longest accepted description, matching the authoring form's limit.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Story ids are 9 chars of base-36, like the original catalog's ids.
const ID_LEN: usize = 9;
const ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The fixed category catalog used when no custom catalog is supplied.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("1", "Romance", "romance").with_description("Love in all its forms"),
        Category::new("2", "Fantasy", "fantasy").with_description("Magic, myth, and other worlds"),
        Category::new("3", "Science Fiction", "scifi")
            .with_description("Futures near and far"),
        Category::new("4", "Mystery", "mystery").with_description("Whodunits and slow reveals"),
        Category::new("5", "Horror", "horror").with_description("Stories that keep you up"),
        Category::new("6", "Slice of Life", "slice-of-life")
            .with_description("Small moments, closely observed"),
    ]
}

/// Sole authority over the live story collection and the category catalog.
pub struct StoryStore {
    /// Ordered newest first; `create` inserts at the front.
    stories: RwLock<Vec<Story>>,
    /// Fixed at construction. Counts are derived per read, never stored.
    categories: Vec<Category>,
}

impl StoryStore {
    /// An empty store with the default category catalog.
    pub fn new() -> Self {
        Self::with_catalog(default_categories(), Vec::new())
    }

    /// A store seeded with the given stories and the default catalog.
    /// Story order is kept as given (front of the list = most recently
    /// inserted), which fixes tie-breaking for equal timestamps.
    pub fn with_stories(stories: Vec<Story>) -> Self {
        Self::with_catalog(default_categories(), stories)
    }

    /// A store with a custom category catalog and initial stories.
    pub fn with_catalog(categories: Vec<Category>, stories: Vec<Story>) -> Self {
        Self {
            stories: RwLock::new(stories),
            categories,
        }
    }

    /// The demo catalog shipped with the crate: the default categories
    /// populated with a handful of stories.
    pub fn demo() -> anyhow::Result<Self> {
        Ok(Self::with_stories(seed::demo_stories()?))
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// All stories passing the filter, newest first.
    ///
    /// The filter is normalized before matching: a missing category or the
    /// `"all"` pseudo-category is a wildcard, and search text is matched
    /// case-insensitively against title, author, and description. Ties on
    /// createdAt keep insertion order (the sort is stable and the sequence
    /// is stored newest first).
    pub fn list(&self, filter: &StoryFilter) -> Vec<Story> {
        let filter = filter.normalize();
        let stories = self.read();
        let mut result: Vec<Story> = stories
            .iter()
            .filter(|story| filter.matches(story))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }

    /// A single story by id.
    pub fn get(&self, id: &str) -> StoreResult<Story> {
        self.read()
            .iter()
            .find(|story| story.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// The category catalog with live story counts.
    pub fn list_categories(&self) -> Vec<Category> {
        let stories = self.read();
        self.categories
            .iter()
            .map(|category| {
                let mut category = category.clone();
                category.story_count = stories
                    .iter()
                    .filter(|story| story.category == category.slug)
                    .count();
                category
            })
            .collect()
    }

    /// Whether a slug names a category in the catalog.
    pub fn category_exists(&self, slug: &str) -> bool {
        self.categories.iter().any(|category| category.slug == slug)
    }

    /// Number of stories currently in the store.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a story. Assigns a fresh id, sets createdAt = updatedAt = now
    /// and views = 0, and inserts at the front of the collection. Tags are
    /// trimmed and blank tags dropped.
    pub fn create(&self, input: CreateStoryInput) -> StoreResult<Story> {
        validate_required("title", &input.title)?;
        validate_required("author", &input.author)?;
        validate_required("description", &input.description)?;
        validate_required("content", &input.content)?;
        validate_required("category", &input.category)?;
        validate_description(&input.description)?;
        self.require_category(&input.category)?;

        let mut stories = self.write();
        let now = Utc::now();
        let story = Story {
            id: fresh_id(&stories),
            title: input.title,
            author: input.author,
            description: input.description,
            content: input.content,
            category: input.category,
            tags: normalize_tags(input.tags),
            cover_image: input.cover_image,
            created_at: now,
            updated_at: now,
            views: 0,
            chapters: None,
        };
        stories.insert(0, story.clone());
        info!(id = %story.id, title = %story.title, "Created story");
        Ok(story)
    }

    /// Merge the supplied fields over an existing story and recompute
    /// updatedAt. id and createdAt never change; views and chapters change
    /// only when the patch supplies them.
    pub fn update(&self, id: &str, patch: UpdateStoryInput) -> StoreResult<Story> {
        validate_patch(&patch)?;
        if let Some(category) = &patch.category {
            self.require_category(category)?;
        }

        let mut stories = self.write();
        let story = stories
            .iter_mut()
            .find(|story| story.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(title) = patch.title {
            story.title = title;
        }
        if let Some(author) = patch.author {
            story.author = author;
        }
        if let Some(description) = patch.description {
            story.description = description;
        }
        if let Some(content) = patch.content {
            story.content = content;
        }
        if let Some(category) = patch.category {
            story.category = category;
        }
        if let Some(tags) = patch.tags {
            story.tags = normalize_tags(tags);
        }
        if let Some(cover_image) = patch.cover_image {
            story.cover_image = Some(cover_image);
        }
        if let Some(views) = patch.views {
            story.views = views;
        }
        if let Some(chapters) = patch.chapters {
            story.chapters = Some(chapters);
        }

        // The clock may not tick between rapid updates; updatedAt must still
        // strictly increase.
        let now = Utc::now();
        story.updated_at = if now > story.updated_at {
            now
        } else {
            story.updated_at + Duration::microseconds(1)
        };

        debug!(id = %story.id, "Updated story");
        Ok(story.clone())
    }

    /// Remove a story outright. No tombstone is kept.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let mut stories = self.write();
        let index = stories
            .iter()
            .position(|story| story.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        stories.remove(index);
        info!(id, "Deleted story");
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn require_category(&self, slug: &str) -> StoreResult<()> {
        if self.category_exists(slug) {
            Ok(())
        } else {
            Err(StoreError::UnknownCategory(slug.to_string()))
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Story>> {
        self.stories.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Story>> {
        self.stories.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate an id not present in the current collection.
fn fresh_id(existing: &[Story]) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let id: String = (0..ID_LEN)
            .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
            .collect();
        if !existing.iter().any(|story| story.id == id) {
            return id;
        }
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn validate_required(field: &str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn validate_description(description: &str) -> StoreResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(StoreError::Validation(format!(
            "description exceeds {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

/// Supplied patch fields get the same checks as create inputs.
fn validate_patch(patch: &UpdateStoryInput) -> StoreResult<()> {
    if let Some(title) = &patch.title {
        validate_required("title", title)?;
    }
    if let Some(author) = &patch.author {
        validate_required("author", author)?;
    }
    if let Some(description) = &patch.description {
        validate_required("description", description)?;
        validate_description(description)?;
    }
    if let Some(content) = &patch.content {
        validate_required("content", content)?;
    }
    if let Some(category) = &patch.category {
        validate_required("category", category)?;
    }
    Ok(())
}
