//! Application configuration.
//!
//! This module defines the knobs a front end can turn: page size, cache
//! freshness, admin credentials, and session timing. The struct is plain
//! data; embedding applications decide where the JSON comes from.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::{LatencyProfile, Simulation};
use crate::auth::credentials::AdminCredentials;
use crate::auth::session::{Session, LOGIN_DELAY_MS, SESSION_LIFETIME_MINUTES};
use crate::cache::QueryCache;
use crate::utils::DEFAULT_PAGE_SIZE;

/// Which latency profile the simulated backend runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyChoice {
    /// The original front end's per-endpoint delays.
    #[default]
    Realistic,
    /// No artificial delay (development and tests).
    Instant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stories per page in list views.
    pub page_size: usize,
    /// Cache entries older than this are refetched; `None` keeps them
    /// until an invalidation.
    pub cache_max_age_minutes: Option<i64>,
    /// Latency profile for the simulated backend.
    pub latency: LatencyChoice,
    /// The username/password pair the admin area accepts.
    pub admin: AdminCredentials,
    /// Minutes an admin session stays valid after login.
    pub session_lifetime_minutes: i64,
    /// Simulated login round trip in milliseconds.
    pub login_delay_ms: u64,
}

impl Config {
    /// Parse a configuration from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize configuration")
    }

    pub fn cache_max_age(&self) -> Option<chrono::Duration> {
        self.cache_max_age_minutes.map(chrono::Duration::minutes)
    }

    /// Query cache honoring `cache_max_age_minutes`.
    pub fn query_cache(&self) -> QueryCache {
        match self.cache_max_age() {
            Some(max_age) => QueryCache::with_max_age(Some(max_age)),
            None => QueryCache::new(),
        }
    }

    /// Simulation running the configured latency profile.
    pub fn simulation(&self) -> Simulation {
        match self.latency {
            LatencyChoice::Realistic => Simulation::with_latency(LatencyProfile::realistic()),
            LatencyChoice::Instant => Simulation::with_latency(LatencyProfile::none()),
        }
    }

    /// Fresh (logged-out) admin session wired from this configuration.
    pub fn session(&self) -> Session {
        Session::with_settings(
            self.admin.clone(),
            chrono::Duration::minutes(self.session_lifetime_minutes),
            std::time::Duration::from_millis(self.login_delay_ms),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cache_max_age_minutes: None,
            latency: LatencyChoice::default(),
            admin: AdminCredentials::default(),
            session_lifetime_minutes: SESSION_LIFETIME_MINUTES,
            login_delay_ms: LOGIN_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.page_size, 8);
        assert_eq!(config.cache_max_age_minutes, None);
        assert_eq!(config.latency, LatencyChoice::Realistic);
        assert_eq!(config.session_lifetime_minutes, 30);
        assert_eq!(config.login_delay_ms, 500);
        assert!(config.admin.verify("admin", "admin123"));
    }

    #[test]
    fn test_latency_choice() {
        let config = Config::from_json(r#"{"latency": "instant"}"#).unwrap();
        assert_eq!(config.latency, LatencyChoice::Instant);
        assert!(config
            .simulation()
            .latency()
            .for_operation(crate::api::Operation::ListStories)
            .is_zero());

        let realistic = Config::default().simulation();
        assert_eq!(
            realistic
                .latency()
                .for_operation(crate::api::Operation::CreateStory),
            std::time::Duration::from_millis(800)
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{"page_size": 12, "cache_max_age_minutes": 5}"#).unwrap();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.cache_max_age_minutes, Some(5));
        assert_eq!(config.session_lifetime_minutes, 30);
        assert!(config.admin.verify("admin", "admin123"));
    }

    #[test]
    fn test_round_trip() {
        let mut config = Config::default();
        config.admin = AdminCredentials::new("editor", "s3cret");
        config.session_lifetime_minutes = 5;

        let json = config.to_json().unwrap();
        let parsed = Config::from_json(&json).unwrap();
        assert_eq!(parsed.admin, config.admin);
        assert_eq!(parsed.session_lifetime_minutes, 5);
    }

    #[test]
    fn test_cache_max_age_conversion() {
        let config = Config::default();
        assert!(config.cache_max_age().is_none());

        let config = Config {
            cache_max_age_minutes: Some(10),
            ..Default::default()
        };
        assert_eq!(config.cache_max_age(), Some(chrono::Duration::minutes(10)));
    }

    #[tokio::test]
    async fn test_session_uses_configured_credentials() {
        let config = Config {
            admin: AdminCredentials::new("editor", "s3cret"),
            login_delay_ms: 0,
            ..Default::default()
        };
        let mut session = config.session();

        assert!(session.login("admin", "admin123").await.is_err());
        assert!(session.login("editor", "s3cret").await.is_ok());
    }
}
