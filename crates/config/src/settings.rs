// Application settings
// Loaded from ~/.config/pairgrid/settings.json (or $PAIRGRID_CONFIG)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points at an alternate settings file.
pub const CONFIG_ENV: &str = "PAIRGRID_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Table
    #[serde(rename = "table.path")]
    pub table_path: Option<PathBuf>, // None = ./table.txt

    // Generated text
    #[serde(rename = "text.length")]
    pub text_length: usize,

    // Display
    #[serde(rename = "display.nullPlaceholder")]
    pub null_placeholder: String,

    // Reset defaults
    #[serde(rename = "reset.rows")]
    pub reset_rows: usize,

    #[serde(rename = "reset.cols")]
    pub reset_cols: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            table_path: None,
            text_length: 5,
            null_placeholder: String::from("NULL"),
            reset_rows: 3,
            reset_cols: 3,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pairgrid")
            .join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(&path);
            return settings;
        }

        Self::load_from(&path)
    }

    /// Load a specific settings file. Any problem yields defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                log::warn!("error parsing {}: {e}; using default settings", path.display());
                Self::default()
            }),
            Err(e) => {
                log::warn!("error reading {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Parse settings JSON. Lines starting with `//` are comments.
    pub fn from_json(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Table file to use when none is given on the command line.
    pub fn effective_table_path(&self) -> PathBuf {
        self.table_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("table.txt"))
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("error creating config directory: {e}");
                return;
            }
        }

        let default_config = r#"{
    // Table file used when --file is not given (null = ./table.txt)
    "table.path": null,

    // Characters per generated cell part (add-row, reset, init)
    "text.length": 5,

    // Shown in place of absent cells by `pgrid show`
    "display.nullPlaceholder": "NULL",

    // Size used by `pgrid reset` and `pgrid init` without arguments
    "reset.rows": 3,
    "reset.cols": 3
}
"#;

        if let Err(e) = fs::write(path, default_config) {
            log::warn!("error writing default {}: {e}", path.display());
        }
    }
}
