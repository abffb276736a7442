// Application settings
// Loaded from ~/.config/slugsheet/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Host API
    #[serde(rename = "api.base")]
    pub api_base: String,

    /// Default site id; `--site` overrides.
    #[serde(rename = "api.site")]
    pub site: Option<String>,

    #[serde(rename = "api.pageLimit")]
    pub page_limit: u32,

    // Redirects
    #[serde(rename = "redirects.auto")]
    pub auto_redirects: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: "https://api.webflow.com".to_string(),
            site: None,
            page_limit: 200,
            auto_redirects: true,
        }
    }
}

/// Written verbatim on first run; `parse` strips the comment lines, so
/// the file reads back as pure defaults.
const DEFAULT_TEMPLATE: &str = r#"{
    // Host API
    "api.base": "https://api.webflow.com",

    // Default site id; the --site flag overrides this
    // "api.site": "64f0c1a2b3d4e5f6a7b8c9d0",

    // Pages fetched per listing request
    "api.pageLimit": 200,

    // Create 301 redirects for slug changes on apply
    "redirects.auto": true
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("slugsheet");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    fn load_from(path: &Path) -> Self {
        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(path);
            return settings;
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) => {
                eprintln!("Error reading settings.json: {}", e);
                Self::default()
            }
        }
    }

    /// Parse settings text. Lines starting with // are treated as
    /// comments; a malformed file falls back to defaults.
    fn parse(contents: &str) -> Self {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        match serde_json::from_str(&cleaned) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Error parsing settings.json: {}", e);
                eprintln!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating config directory: {}", e);
                return;
            }
        }

        if let Err(e) = fs::write(path, DEFAULT_TEMPLATE) {
            eprintln!("Error writing default settings.json: {}", e);
        }
    }

    /// Get the config file path for display/opening
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}
