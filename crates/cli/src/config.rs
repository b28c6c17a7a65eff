//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DISPATCH_SEED_CLIENTS` - demo dataset client count (default: 5)
//! - `DISPATCH_SEED_DELIVERIES` - demo dataset delivery count (default: 40)
//! - `RUST_LOG` - tracing filter, consumed by `tracing_subscriber`

use thiserror::Error;

const DEFAULT_SEED_CLIENTS: usize = 5;
const DEFAULT_SEED_DELIVERIES: usize = 40;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Demo dataset sizing.
#[derive(Debug, Clone, Copy)]
pub struct DemoConfig {
    /// Clients to register.
    pub clients: usize,
    /// Deliveries to create against them.
    pub deliveries: usize,
}

impl DemoConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            clients: get_usize_or("DISPATCH_SEED_CLIENTS", DEFAULT_SEED_CLIENTS)?,
            deliveries: get_usize_or("DISPATCH_SEED_DELIVERIES", DEFAULT_SEED_DELIVERIES)?,
        })
    }
}

fn get_usize_or(key: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = DemoConfig::from_env().unwrap();
        assert!(config.clients > 0);
        assert!(config.deliveries > 0);
    }
}
