//! Data models for NovelHub entities.
//!
//! This module contains all the data structures used to represent
//! catalog data including:
//!
//! - `Story`, `Chapter`: the fiction works and their serialized chapters
//! - `CreateStoryInput`, `UpdateStoryInput`, `StoryFilter`: operation inputs
//! - `Category`: the fixed grouping catalog with derived story counts
//! - `User`, `Role`: the signed-in identity for the admin screen

pub mod category;
pub mod story;
pub mod user;

pub use category::{Category, ALL_CATEGORIES};
pub use story::{Chapter, CreateStoryInput, Story, StoryFilter, UpdateStoryInput};
pub use user::{Role, User};
