//! Database configuration
//!
//! The whole section is optional: without it the service keeps sessions in
//! memory.

use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use super::error::ValidationError;

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Minimum connections to maintain
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Run migrations on startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Pool options derived from this configuration.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout())
            .idle_timeout(Some(self.idle_timeout()))
    }

    /// Open a connection pool.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        self.pool_options().connect(&self.url).await
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("STUDY_HUB__DATABASE__URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_idle_timeout() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        serde_json::from_value(serde_json::json!({ "url": url })).unwrap()
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = config("postgres://localhost/study_hub");
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(5));
        assert!(!config.run_migrations);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_url() {
        assert_eq!(
            config("").validate(),
            Err(ValidationError::MissingRequired("STUDY_HUB__DATABASE__URL"))
        );
    }

    #[test]
    fn test_validation_invalid_url() {
        assert_eq!(
            config("mysql://localhost/test").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
    }

    #[test]
    fn test_validation_invalid_pool_size() {
        let config = DatabaseConfig {
            min_connections: 10,
            max_connections: 5,
            ..config("postgresql://localhost/test")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPoolSize));
    }

    #[test]
    fn test_validation_pool_too_large() {
        let config = DatabaseConfig {
            max_connections: 150,
            ..config("postgresql://localhost/test")
        };
        assert_eq!(config.validate(), Err(ValidationError::PoolSizeTooLarge));
    }
}
