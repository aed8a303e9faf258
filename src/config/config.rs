use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::data::data_provider::DEFAULT_ROW_LIMIT;
use crate::search_filter::DEFAULT_CHAR_LIMIT;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the key help footer when the browser starts
    pub show_help_on_start: bool,

    /// Cells longer than this are shortened in the grid (never in the detail view)
    pub max_cell_width: usize,

    /// Width of the table list panel
    pub table_list_width: u16,

    /// Use Unicode glyphs for icons
    pub use_glyphs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Upstream row cap passed to the data provider
    pub row_limit: usize,

    /// Maximum length of a search query
    pub search_char_limit: usize,

    /// Seconds to wait for a database connection
    pub connect_timeout_secs: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_help_on_start: false,
            max_cell_width: 100,
            table_list_width: 30,
            use_glyphs: true,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
            search_char_limit: DEFAULT_CHAR_LIMIT,
            connect_timeout_secs: 10,
        }
    }
}

/// Marker glyphs, with ASCII fallbacks for terminals without Unicode fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icons {
    pub table: &'static str,
    pub selected: &'static str,
    pub search: &'static str,
    pub error: &'static str,
    pub database: &'static str,
}

impl Icons {
    pub fn glyphs() -> Self {
        Self {
            table: "▤",
            selected: "▶",
            search: "🔍",
            error: "✗",
            database: "🗄",
        }
    }

    pub fn simple() -> Self {
        Self {
            table: "-",
            selected: ">",
            search: "/",
            error: "[X]",
            database: "[DB]",
        }
    }
}

impl DisplayConfig {
    pub fn icons(&self) -> Icons {
        if self.use_glyphs {
            Icons::glyphs()
        } else {
            Icons::simple()
        }
    }
}

impl Config {
    /// Load config from the default location, creating it if absent
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!(target: "config", "No config at {}, writing defaults", config_path.display());
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        debug!(target: "config", "Loaded {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("pg-explorer").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# pg-explorer Configuration File
# Location: ~/.config/pg-explorer/config.toml (Linux)
#           ~/Library/Application Support/pg-explorer/config.toml (macOS)
#           %APPDATA%\pg-explorer\config.toml (Windows)
#
# Database connection settings live in .env (DB_USER, DB_PASSWORD,
# DB_NAME, DB_HOST, DB_PORT); run `pg-explorer --setup` to create it.

[display]
# Show the key help footer on start (toggle with '?')
show_help_on_start = false

# Cells longer than this are shortened with "..." in the grid.
# The row detail view always shows the full value.
max_cell_width = 100

# Width of the table list panel
table_list_width = 30

# Use Unicode glyphs for icons
# Set to false for ASCII-only mode (better compatibility)
use_glyphs = true

[behavior]
# Maximum number of rows fetched per table
row_limit = 1000

# Maximum length of a search query
search_char_limit = 50

# Seconds to wait for a database connection
connect_timeout_secs = 10
"#
        .to_string()
    }
}
