//! Domain model for story categories.

use serde::{Deserialize, Serialize};

/// Pseudo-slug meaning "no category filter" in list queries.
pub const ALL_CATEGORIES: &str = "all";

/// A named grouping of stories, referenced by slug from `Story.category`.
///
/// Categories are read-only: the catalog is fixed at store construction and
/// there are no create/update/delete operations for them. `story_count` is
/// derived from the live story collection every time the catalog is listed,
/// never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Unique key, used as the foreign key from `Story.category`.
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub story_count: usize,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            story_count: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
