//! Configuration management
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. `config/default.toml` and `config/local.toml` (both optional)
//! 3. environment variables prefixed `BONTHO__`, e.g.
//!    `BONTHO__TELEPHONY__AUTH_TOKEN` or `BONTHO__SERVER__PORT`

use ::config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Twilio REST API root
pub const DEFAULT_TWILIO_API_BASE_URL: &str = "https://api.twilio.com";

/// bcrypt cost for stored phone hashes
pub const DEFAULT_PHONE_HASH_COST: u32 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub numbering: NumberingConfig,
    pub telephony: TelephonyConfig,
    pub callbacks: CallbackConfig,
    pub content: ContentConfig,
    pub database: DatabaseConfig,
    pub invitations: InvitationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Static key expected in the `api_key` query parameter
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberingConfig {
    /// Region local-format numbers are interpreted in
    pub region: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct TelephonyConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Caller number shown to recipients
    pub from_number: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackConfig {
    /// Base URL of the service serving call instructions
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub content_url: String,
    pub neural_net_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationConfig {
    /// bcrypt cost for stored phone hashes
    pub phone_hash_cost: u32,
}

impl Config {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(Environment::with_prefix("BONTHO"))
    }

    fn load_with_env(environment: Environment) -> Result<Self, ConfigError> {
        ::config::Config::builder()
            .add_source(::config::Config::try_from(&Config::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment.prefix_separator("__").separator("__"))
            .build()?
            .try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: "BONTHO".to_string(),
        }
    }
}

impl Default for NumberingConfig {
    fn default() -> Self {
        Self {
            region: "FI".to_string(),
        }
    }
}

impl Default for TelephonyConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            api_base_url: DEFAULT_TWILIO_API_BASE_URL.to_string(),
            request_timeout_secs: 15,
        }
    }
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_url: "http://localhost:4000/content".to_string(),
            neural_net_url: "http://localhost:5000/generate".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/bontho".to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            phone_hash_cost: DEFAULT_PHONE_HASH_COST,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &"***REDACTED***")
            .finish()
    }
}

impl fmt::Debug for TelephonyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelephonyConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"***REDACTED***")
            .field("from_number", &self.from_number)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &mask_password(&self.url))
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

/// Mask password in database URL for logging
pub fn mask_password(url: &str) -> String {
    let Some(at_pos) = url.find('@') else {
        return url.to_string();
    };
    let credentials_start = url.find("://").map(|pos| pos + 3).unwrap_or(0);
    if credentials_start > at_pos {
        return url.to_string();
    }

    match url[credentials_start..at_pos].find(':') {
        Some(colon) => {
            let mut masked = url.to_string();
            masked.replace_range(credentials_start + colon + 1..at_pos, "****");
            masked
        }
        None => url.to_string(),
    }
}
