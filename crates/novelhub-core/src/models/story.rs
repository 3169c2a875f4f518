//! Domain models for stories and their queries.
//!
//! These types are the wire shape consumed by the JavaScript presentation
//! layer, so they serialize with camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::category::ALL_CATEGORIES;
use crate::utils::{contains_ignore_case, format_date, format_views};

/// A published fiction work with its content body, metadata, and view counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Opaque unique id, 9 chars of `[0-9a-z]`.
    pub id: String,
    pub title: String,
    pub author: String,
    /// Short blurb shown on cards and searched alongside title/author.
    pub description: String,
    /// Plain text body.
    pub content: String,
    /// Slug of an existing category.
    pub category: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Always >= created_at; recomputed on every update.
    pub updated_at: DateTime<Utc>,
    pub views: u64,
    /// Optional serialized chapter list; replaced wholesale on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapters: Option<Vec<Chapter>>,
}

impl Story {
    /// View counter formatted for display ("1.2k", "3.4M").
    pub fn formatted_views(&self) -> String {
        format_views(self.views)
    }

    /// Publication date formatted for display ("Mar 15, 2024").
    pub fn formatted_date(&self) -> String {
        format_date(&self.created_at)
    }
}

/// A chapter within a story. Owned inline by its story and never
/// addressable on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Position within the story, 1-based.
    pub order: u32,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a story. The store assigns id, timestamps, and the
/// zeroed view counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoryInput {
    pub title: String,
    pub author: String,
    pub description: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// Partial update for a story. `None` fields keep their current value;
/// id and createdAt are never updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoryInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub cover_image: Option<String>,
    /// Explicit overwrite of the view counter (admin corrections).
    pub views: Option<u64>,
    pub chapters: Option<Vec<Chapter>>,
}

impl UpdateStoryInput {
    /// True when no field is supplied; such an update still bumps updatedAt.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.cover_image.is_none()
            && self.views.is_none()
            && self.chapters.is_none()
    }
}

/// Filter parameters for story list queries.
///
/// An omitted category (or the `"all"` pseudo-category) and an empty search
/// act as wildcards. [`StoryFilter::normalize`] canonicalizes both so that
/// filters producing the same result set compare and hash equal, which is
/// what keys the list cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl StoryFilter {
    /// Filter by category slug only.
    pub fn by_category(slug: impl Into<String>) -> Self {
        Self {
            category: Some(slug.into()),
            search: None,
        }
    }

    /// Filter by search text only.
    pub fn by_search(text: impl Into<String>) -> Self {
        Self {
            category: None,
            search: Some(text.into()),
        }
    }

    /// Canonical form: `"all"` becomes no category, search is trimmed and
    /// lowercased, blank search becomes no search.
    pub fn normalize(&self) -> Self {
        let category = self
            .category
            .as_deref()
            .filter(|c| *c != ALL_CATEGORIES)
            .map(str::to_string);
        let search = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Self { category, search }
    }

    /// Whether a story passes both predicates. Expects `self` to be
    /// normalized; a raw filter is normalized by the store before matching.
    pub fn matches(&self, story: &Story) -> bool {
        if let Some(category) = &self.category {
            if story.category != *category {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !contains_ignore_case(&story.title, search)
                && !contains_ignore_case(&story.author, search)
                && !contains_ignore_case(&story.description, search)
            {
                return false;
            }
        }
        true
    }
}
