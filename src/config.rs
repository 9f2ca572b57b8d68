use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::path::Path;

/// Fallback API key used when neither `SPLEXXO_API_KEY` nor `auth.api_key` is set.
///
/// This value is public. Production deployments should always configure their own key.
pub const DEFAULT_API_KEY: &str = "JACKER";

/// Upstream lookup endpoint
pub const DEFAULT_UPSTREAM_URL: &str = "https://splexxo123-7saw.vercel.app/api/seller";

/// Access key the relay presents to the upstream service
pub const DEFAULT_UPSTREAM_KEY: &str = "SPLEXXO";

/// Environment variable holding the relay's own API key
pub const API_KEY_ENV: &str = "SPLEXXO_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub upstream: UpstreamSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub api_key: String,
}

impl AuthSettings {
    /// True when the service would accept the published fallback key
    pub fn uses_default_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub access_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 15 }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration files (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with RELAY__)
    /// 4. `SPLEXXO_API_KEY` for the relay's own API key
    pub fn load() -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., RELAY__SERVER__PORT -> server.port
            .add_source(relay_environment())
            .build()?;

        apply_api_key_env(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::from(path.as_ref()))
            .add_source(relay_environment())
            .build()?;

        apply_api_key_env(settings)?.try_deserialize()
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("server.workers", 4)?
        .set_default("auth.api_key", DEFAULT_API_KEY)?
        .set_default("upstream.base_url", DEFAULT_UPSTREAM_URL)?
        .set_default("upstream.access_key", DEFAULT_UPSTREAM_KEY)?
        .set_default("upstream.timeout_secs", default_timeout_secs())
}

fn relay_environment() -> Environment {
    Environment::with_prefix("RELAY")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// `SPLEXXO_API_KEY` wins over every other source for `auth.api_key`
fn apply_api_key_env(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("auth.api_key", key)?
            .build(),
        _ => Ok(settings),
    }
}
