//! Database connection parameters resolved from the environment.
//!
//! Values come from process environment variables, after a `.env` file in
//! the working directory (if any) has been merged in. Every variable has a
//! fallback default.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const ENV_FILE: &str = ".env";

pub const DEFAULT_USER: &str = "postgres";
pub const DEFAULT_PASSWORD: &str = "";
pub const DEFAULT_NAME: &str = "postgres";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;

/// Environment variable names, in prompt order
pub const ENV_KEYS: [&str; 5] = ["DB_USER", "DB_PASSWORD", "DB_NAME", "DB_HOST", "DB_PORT"];

#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub user: String,
    pub password: String,
    pub name: String,
    pub host: String,
    pub port: u16,
}

// Keeps the password out of logs
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            name: DEFAULT_NAME.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl DbConfig {
    /// Merge `.env` into the environment, then read the `DB_*` variables
    pub fn load() -> Result<Self> {
        match dotenv::dotenv() {
            Ok(path) => info!(target: "config", "Loaded {}", path.display()),
            Err(e) => debug!(target: "config", "No .env loaded: {}", e),
        }
        Self::from_env()
    }

    /// Read the `DB_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, applying defaults for missing keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, fallback: &str| lookup(key).unwrap_or_else(|| fallback.to_string());

        let port = match lookup("DB_PORT") {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            user: get("DB_USER", DEFAULT_USER),
            password: get("DB_PASSWORD", DEFAULT_PASSWORD),
            name: get("DB_NAME", DEFAULT_NAME),
            host: get("DB_HOST", DEFAULT_HOST),
            port,
        })
    }

    /// Whether any connection setting exists, either as a `.env` file in
    /// `dir` or as a `DB_*` variable in the environment
    pub fn is_configured(dir: &Path) -> bool {
        dir.join(ENV_FILE).exists() || ENV_KEYS.iter().any(|key| std::env::var_os(key).is_some())
    }

    /// `postgres://` URL; contains the password, never log it
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }

    /// `user@host:port/name`, for display
    pub fn connection_details(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name)
    }

    /// Contents of a `.env` file holding these settings
    pub fn to_env_file(&self) -> String {
        format!(
            "DB_USER={}\nDB_PASSWORD={}\nDB_NAME={}\nDB_HOST={}\nDB_PORT={}\n",
            self.user, self.password, self.name, self.host, self.port
        )
    }

    pub fn write_env_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_env_file())
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(target: "config", "Saved connection settings to {}", path.display());
        Ok(())
    }
}

/// Parse a port number, rejecting anything outside `u16`
pub fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| anyhow!("DB_PORT must be a number between 0 and 65535, got '{}'", raw))
}
