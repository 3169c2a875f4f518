//! Authentication module for the admin area.
//!
//! This module provides:
//! - `Session`: In-memory session management with automatic expiry
//! - `AdminCredentials`: The single accepted username/password pair
//!
//! Sessions expire after 30 minutes and nothing is persisted.

pub mod credentials;
pub mod session;

pub use credentials::AdminCredentials;
pub use session::{AuthError, Session, SessionData};
