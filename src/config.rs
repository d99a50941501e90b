//! Configuration module for Gatehouse.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{GatehouseError, Result};

/// Deployment environment.
///
/// Only `Production` turns on the `Secure` attribute of the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (plain HTTP).
    #[default]
    Development,
    /// Production (HTTPS only).
    Production,
}

impl Environment {
    /// Whether cookies should carry the `Secure` attribute.
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    /// String representation used in config files and env vars.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("unknown environment: {s}")),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
    /// The single origin allowed to make credentialed cross-origin requests.
    /// Empty means permissive CORS without credentials.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origin() -> String {
    "http://localhost:5173".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL.
    #[serde(default = "default_db_url")]
    pub url: String,
}

fn default_db_url() -> String {
    "sqlite://data/gatehouse.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign session tokens (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Session token lifetime in days.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: u64,
    /// bcrypt cost factor.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

/// Upper bound on the session token lifetime (ten years).
pub const MAX_TOKEN_TTL_DAYS: u64 = 3650;

fn default_token_ttl_days() -> u64 {
    7
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_cookie_name() -> String {
    "token".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_days: default_token_ttl_days(),
            bcrypt_cost: default_bcrypt_cost(),
            cookie_name: default_cookie_name(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/gatehouse.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(GatehouseError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s)
            .map_err(|e| GatehouseError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables (empty values are ignored):
    /// - `GATEHOUSE_PORT`: listening port
    /// - `GATEHOUSE_JWT_SECRET`: token signing secret
    /// - `GATEHOUSE_ENV`: `development` or `production`
    /// - `GATEHOUSE_DATABASE_URL`: SQLite connection URL
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(port) = non_empty_var("GATEHOUSE_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| GatehouseError::Config(format!("invalid GATEHOUSE_PORT: {port}")))?;
        }
        if let Some(secret) = non_empty_var("GATEHOUSE_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(env) = non_empty_var("GATEHOUSE_ENV") {
            self.server.environment = env.parse().map_err(GatehouseError::Config)?;
        }
        if let Some(url) = non_empty_var("GATEHOUSE_DATABASE_URL") {
            self.database.url = url;
        }
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the JWT secret is not set
    /// - the bcrypt cost is outside 4..=31
    /// - the token lifetime is outside 1..=3650 days
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(GatehouseError::Validation(
                "jwt_secret is not set. \
                 Set it in config.toml or via GATEHOUSE_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(GatehouseError::Validation(format!(
                "bcrypt_cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            )));
        }
        if !(1..=MAX_TOKEN_TTL_DAYS).contains(&self.auth.token_ttl_days) {
            return Err(GatehouseError::Validation(format!(
                "token_ttl_days must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_DAYS, self.auth.token_ttl_days
            )));
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
