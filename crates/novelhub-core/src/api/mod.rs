//! Story operations behind a simulated backend.
//!
//! This module provides the `StoryClient` the presentation layer talks to:
//! cached asynchronous reads, writes that invalidate the affected cache
//! entries, and a configurable `Simulation` standing in for the network.

pub mod client;
pub mod error;
pub mod simulate;

pub use client::StoryClient;
pub use error::ApiError;
pub use simulate::{LatencyProfile, Operation, Simulation};
