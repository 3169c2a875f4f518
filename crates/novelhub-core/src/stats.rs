//! Aggregate numbers for the admin dashboard.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::Story;
use crate::utils::format_views;

/// Totals shown on the admin dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_stories: usize,
    pub total_views: u64,
    pub unique_authors: usize,
}

impl DashboardStats {
    /// Compute the totals from a story slice.
    pub fn from_stories(stories: &[Story]) -> Self {
        let authors: HashSet<&str> = stories.iter().map(|story| story.author.as_str()).collect();
        Self {
            total_stories: stories.len(),
            total_views: stories.iter().map(|story| story.views).sum(),
            unique_authors: authors.len(),
        }
    }

    /// Total views formatted for display ("1.2k", "3.4M").
    pub fn formatted_views(&self) -> String {
        format_views(self.total_views)
    }
}
