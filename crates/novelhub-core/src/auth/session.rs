use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Role, User};

use super::credentials::AdminCredentials;

/// Session expiry time in minutes.
/// Admin sessions lapse after 30 minutes and require a fresh login.
pub const SESSION_LIFETIME_MINUTES: i64 = 30;

/// Simulated delay for the login round trip in milliseconds.
pub const LOGIN_DELAY_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub user: User,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionData {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn time_until_expiry(&self) -> Duration {
        self.expires_at - Utc::now()
    }

    /// Get minutes remaining until expiry (for display)
    pub fn minutes_until_expiry(&self) -> i64 {
        self.time_until_expiry().num_minutes().max(0)
    }
}

/// In-memory admin session with automatic expiry.
///
/// Holds at most one logged-in user. Nothing is persisted; restarting the
/// process logs the admin out.
pub struct Session {
    credentials: AdminCredentials,
    lifetime: Duration,
    login_delay: StdDuration,
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_settings(
            AdminCredentials::default(),
            Duration::minutes(SESSION_LIFETIME_MINUTES),
            StdDuration::from_millis(LOGIN_DELAY_MS),
        )
    }

    pub fn with_settings(
        credentials: AdminCredentials,
        lifetime: Duration,
        login_delay: StdDuration,
    ) -> Self {
        Self {
            credentials,
            lifetime,
            login_delay,
            data: None,
        }
    }

    /// Verify the credentials and open a session.
    ///
    /// Takes the simulated login round trip before checking, so failures
    /// cost as much as successes.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User, AuthError> {
        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        if !self.credentials.verify(username, password) {
            warn!(username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let user = User {
            id: "1".to_string(),
            username: username.to_string(),
            role: Role::Admin,
        };
        let now = Utc::now();
        self.data = Some(SessionData {
            user: user.clone(),
            created_at: now,
            expires_at: now + self.lifetime,
        });
        info!(username, "Login accepted");
        Ok(user)
    }

    /// Drop the session data
    pub fn logout(&mut self) {
        if let Some(data) = self.data.take() {
            info!(username = %data.user.username, "Logged out");
        }
    }

    /// Get the logged-in user if the session is valid
    pub fn current_user(&self) -> Option<&User> {
        match &self.data {
            Some(data) if !data.is_expired() => Some(&data.user),
            _ => None,
        }
    }

    /// Check if session is valid (exists and not expired)
    pub fn is_valid(&self) -> bool {
        self.data.as_ref().map(|d| !d.is_expired()).unwrap_or(false)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_session() -> Session {
        Session::with_settings(
            AdminCredentials::default(),
            Duration::minutes(SESSION_LIFETIME_MINUTES),
            StdDuration::ZERO,
        )
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let mut session = instant_session();
        let user = session.login("admin", "admin123").await.unwrap();

        assert_eq!(user.username, "admin");
        assert!(user.is_admin());
        assert!(session.is_valid());
        assert_eq!(session.current_user().unwrap().id, "1");

        let data = session.data.as_ref().unwrap();
        assert!(data.minutes_until_expiry() > 25);
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials() {
        let mut session = instant_session();
        let err = session.login("admin", "hunter2").await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!session.is_valid());
        assert!(session.current_user().is_none());
    }

    #[tokio::test]
    async fn test_custom_credentials() {
        let mut session = Session::with_settings(
            AdminCredentials::new("editor", "s3cret"),
            Duration::minutes(30),
            StdDuration::ZERO,
        );

        assert!(session.login("admin", "admin123").await.is_err());
        assert!(session.login("editor", "s3cret").await.is_ok());
    }

    #[tokio::test]
    async fn test_session_expires() {
        let mut session = Session::with_settings(
            AdminCredentials::default(),
            Duration::zero(),
            StdDuration::ZERO,
        );
        session.login("admin", "admin123").await.unwrap();

        // Zero lifetime: any elapsed time puts the session past expiry
        tokio::time::sleep(StdDuration::from_millis(5)).await;
        assert!(!session.is_valid());
        assert!(session.current_user().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let mut session = instant_session();
        session.login("admin", "admin123").await.unwrap();
        assert!(session.is_valid());

        session.logout();
        assert!(!session.is_valid());
        assert!(session.data.is_none());
    }
}
