use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub meter_api: MeterApiConfig,
    pub server: ServerConfig,
}

/// Connection settings for the meter cloud. The bearer token is threaded
/// explicitly from here into the client; nothing reads it ambiently.
#[derive(Debug, Clone, Deserialize)]
pub struct MeterApiConfig {
    pub base_url: String,
    pub auth_token: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let base_url = env::var("METER_API_BASE_URL")
            .map_err(|_| config::ConfigError::Message("METER_API_BASE_URL must be set".into()))?;

        let auth_token = env::var("METER_API_TOKEN")
            .map_err(|_| config::ConfigError::Message("METER_API_TOKEN must be set".into()))?;

        let timeout_secs = env::var("METER_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let host = env::var("SERVER_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("SERVER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        Ok(Config {
            meter_api: MeterApiConfig {
                base_url,
                auth_token,
                timeout_secs,
            },
            server: ServerConfig { host, port },
        })
    }
}
