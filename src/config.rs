//! Environment-provided configuration.

/// Base URL of the surface API, e.g. `http://localhost:3000`.
pub const API_HOST_VAR: &str = "SURFVIEW_API_HOST";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_host: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{API_HOST_VAR} is not set; point it at the surface API base URL, e.g. http://localhost:3000")]
    MissingApiHost,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_HOST_VAR) {
            Ok(host) if !host.trim().is_empty() => Ok(Config { api_host: host }),
            _ => Err(ConfigError::MissingApiHost),
        }
    }
}
