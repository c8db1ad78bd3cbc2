use serde::Deserialize;
use std::env;

use crate::constants::INACTIVITY_TIMEOUT_SECS;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // Forfeiture policy
    pub inactivity_timeout_secs: i64,

    // CORS
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            inactivity_timeout_secs: env::var("INACTIVITY_TIMEOUT_SECS")
                .unwrap_or_else(|_| INACTIVITY_TIMEOUT_SECS.to_string())
                .parse()?,

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.inactivity_timeout_secs <= 0 {
            anyhow::bail!("INACTIVITY_TIMEOUT_SECS must be > 0");
        }

        if self.cors_allowed_origins.trim().is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; requests may be blocked");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
            inactivity_timeout_secs: INACTIVITY_TIMEOUT_SECS,
            cors_allowed_origins: "*".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_matches_policy_constant() {
        let config = Config::default();
        assert_eq!(config.inactivity_timeout_secs, INACTIVITY_TIMEOUT_SECS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = Config {
            inactivity_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
