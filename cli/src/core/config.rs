//! # NutriBot Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads `nutribot.toml`, which supplies:
//! - The USDA FoodData Central endpoint, API key and request timeout
//! - Paths to the JSON-lines data files (foods, myths, swaps) and the chat history
//! - HPB guideline display values for diabetes, blood pressure and cholesterol
//! - Defaults for the HTTP server
//!
//! ## Architecture
//!
//! Configuration sources (first one found wins):
//! 1. An explicit path (`--config` or `NUTRIBOT_CONFIG`)
//! 2. `nutribot.toml` in the current directory or an ancestor (the search stops at a `.git` directory)
//! 3. The user config directory (e.g. `~/.config/nutribot/nutribot.toml`)
//! 4. Built-in defaults
//!
//! After parsing, `~` is expanded in every path and relative paths are anchored
//! at the directory containing the config file (or the current directory when
//! running on defaults). `USDA_API_KEY` overrides the configured key. The result
//! is validated before use.
//!
//! ## Examples
//!
//! ```toml
//! [api]
//! usda_key = "DEMO_KEY"
//! timeout_secs = 10
//!
//! [files]
//! sg_foods = "data/sg_foods.txt"
//!
//! [hpb_guidelines.blood_pressure]
//! sodium_limit = "2000mg sodium per day"
//! ```
//!
//! ```ignore
//! let cfg = config::load_config(None)?;
//! println!("Foods file: {}", cfg.files.sg_foods.display());
//! ```
//!
use crate::core::error::{NutribotError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    env, fs,
    net::{IpAddr, Ipv4Addr},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Name of the project-level configuration file.
pub const CONFIG_FILENAME: &str = "nutribot.toml";

/// The placeholder key shipped by USDA for low-volume testing.
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub hpb_guidelines: Guidelines,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Settings for the USDA FoodData Central fallback.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    #[serde(default = "default_usda_key")]
    pub usda_key: String,
    #[serde(default = "default_usda_url")]
    pub usda_url: String,
    /// Upper bound for a single lookup, connect time included.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Locations of the JSON-lines data files and the chat transcript.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
    #[serde(default = "default_sg_foods")]
    pub sg_foods: PathBuf,
    #[serde(default = "default_myths")]
    pub myths: PathBuf,
    #[serde(default = "default_swaps")]
    pub swaps: PathBuf,
    #[serde(default = "default_chat_history")]
    pub chat_history: PathBuf,
}

/// HPB guideline values shown in the condition answers.
///
/// These are display strings; the assistant interpolates them into templates
/// and never computes with them.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Guidelines {
    #[serde(default)]
    pub diabetes: DiabetesGuidelines,
    #[serde(default)]
    pub blood_pressure: BloodPressureGuidelines,
    #[serde(default)]
    pub cholesterol: CholesterolGuidelines,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct DiabetesGuidelines {
    pub fasting_glucose_normal: String,
    pub sugar_limit: String,
    pub fiber_recommendation: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct BloodPressureGuidelines {
    pub normal: String,
    pub sodium_limit: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct CholesterolGuidelines {
    pub ldl_target: String,
}

/// Defaults for `nutribot srv`; command-line flags override them.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the browser frontend (index.html, script.js, ...).
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: PathBuf,
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

fn default_usda_key() -> String {
    DEMO_API_KEY.to_string()
}
fn default_usda_url() -> String {
    "https://api.nal.usda.gov/fdc/v1/foods/search".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_sg_foods() -> PathBuf {
    PathBuf::from("data/sg_foods.txt")
}
fn default_myths() -> PathBuf {
    PathBuf::from("data/myths.txt")
}
fn default_swaps() -> PathBuf {
    PathBuf::from("data/swaps.txt")
}
fn default_chat_history() -> PathBuf {
    PathBuf::from("data/chat_history.txt")
}
fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
fn default_port() -> u16 {
    5000
}
fn default_frontend_dir() -> PathBuf {
    PathBuf::from("frontend")
}
fn default_enable_cors() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            usda_key: default_usda_key(),
            usda_url: default_usda_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Whether a real key (not the shared demo key) is configured.
    pub fn is_configured(&self) -> bool {
        !self.usda_key.is_empty() && self.usda_key != DEMO_API_KEY
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            sg_foods: default_sg_foods(),
            myths: default_myths(),
            swaps: default_swaps(),
            chat_history: default_chat_history(),
        }
    }
}

impl Default for DiabetesGuidelines {
    fn default() -> Self {
        Self {
            fasting_glucose_normal: "4.0 - 7.0 mmol/L".to_string(),
            sugar_limit: "less than 10% of daily energy intake (about 10 teaspoons)".to_string(),
            fiber_recommendation: "25g (women) to 30g (men) per day".to_string(),
        }
    }
}

impl Default for BloodPressureGuidelines {
    fn default() -> Self {
        Self {
            normal: "below 130/80 mmHg".to_string(),
            sodium_limit: "2000mg sodium per day (about 1 teaspoon of salt)".to_string(),
        }
    }
}

impl Default for CholesterolGuidelines {
    fn default() -> Self {
        Self {
            ldl_target: "below 3.4 mmol/L (below 2.6 mmol/L if you have heart disease or diabetes)"
                .to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            frontend_dir: default_frontend_dir(),
            enable_cors: default_enable_cors(),
        }
    }
}

/// Loads, resolves and validates the configuration.
///
/// `explicit` is the path given with `--config`; when it is set the file must
/// exist. Otherwise the project and user locations are searched and built-in
/// defaults are used if neither has a file.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let (mut config, base_dir) = match locate_config(explicit)? {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            let config = load_config_from_path(&path)?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (config, base_dir)
        }
        None => {
            debug!("No {} found, using built-in defaults.", CONFIG_FILENAME);
            let cwd = env::current_dir().context("Failed to get current directory")?;
            (Config::default(), cwd)
        }
    };
    resolve_config_paths(&mut config, &base_dir);
    apply_api_key_override(&mut config, env::var("USDA_API_KEY").ok());
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn locate_config(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(anyhow!(NutribotError::Config(format!(
                "Config file '{}' does not exist.",
                path.display()
            ))));
        }
        return Ok(Some(path.to_path_buf()));
    }
    if let Some(project) = find_project_config_path()? {
        return Ok(Some(project));
    }
    Ok(user_config_path().filter(|p| p.is_file()))
}

fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("sg", "NutriBot", "nutribot")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let mut path: &Path = &current_dir;
    loop {
        let candidate = path.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping config search.",
                path.display()
            );
            return Ok(None);
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => return Ok(None),
        }
    }
}

/// Parses a config file without resolving its paths.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
    if expanded.is_relative() {
        base_dir.join(expanded)
    } else {
        expanded
    }
}

fn resolve_config_paths(config: &mut Config, base_dir: &Path) {
    let files = &mut config.files;
    for path in [
        &mut files.sg_foods,
        &mut files.myths,
        &mut files.swaps,
        &mut files.chat_history,
    ] {
        *path = resolve_path(path, base_dir);
        debug!("Resolved data path: {}", path.display());
    }
    config.server.frontend_dir = resolve_path(&config.server.frontend_dir, base_dir);
}

fn apply_api_key_override(config: &mut Config, key: Option<String>) {
    if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
        debug!("Using USDA API key from environment.");
        config.api.usda_key = key;
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.api.usda_url.trim().is_empty() {
        return Err(anyhow!(NutribotError::Config(
            "api.usda_url cannot be empty.".to_string()
        )));
    }
    if config.api.timeout_secs == 0 {
        return Err(anyhow!(NutribotError::Config(
            "api.timeout_secs must be greater than zero.".to_string()
        )));
    }
    let files = &config.files;
    for (key, path) in [
        ("sg_foods", &files.sg_foods),
        ("myths", &files.myths),
        ("swaps", &files.swaps),
        ("chat_history", &files.chat_history),
    ] {
        if path.as_os_str().is_empty() {
            return Err(anyhow!(NutribotError::Config(format!(
                "files.{} cannot be empty.",
                key
            ))));
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [api]
            usda_key = "abc123"
            timeout_secs = 5

            [files]
            sg_foods = "db/foods.txt"

            [hpb_guidelines.blood_pressure]
            sodium_limit = "2000mg"

            [server]
            port = 8080
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.api.usda_key, "abc123");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.usda_url, default_usda_url()); // Default
        assert_eq!(config.files.sg_foods, PathBuf::from("db/foods.txt"));
        assert_eq!(config.files.myths, default_myths()); // Default
        assert_eq!(config.hpb_guidelines.blood_pressure.sodium_limit, "2000mg");
        assert_eq!(
            config.hpb_guidelines.blood_pressure.normal,
            BloodPressureGuidelines::default().normal
        );
        assert_eq!(config.server.port, 8080);
        assert!(config.server.enable_cors);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[api]\nusda_kye = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_path_resolution() {
        let mut config = Config::default();
        config.files.myths = PathBuf::from("~/nutri/myths.txt");
        config.files.swaps = PathBuf::from("/absolute/swaps.txt");

        resolve_config_paths(&mut config, Path::new("/srv/nutribot"));

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(config.files.sg_foods, PathBuf::from("/srv/nutribot/data/sg_foods.txt"));
        assert_eq!(config.files.myths, home_dir.join("nutri/myths.txt"));
        assert_eq!(config.files.swaps, PathBuf::from("/absolute/swaps.txt"));
        assert_eq!(config.server.frontend_dir, PathBuf::from("/srv/nutribot/frontend"));
    }

    #[test]
    fn test_api_key_override() {
        let mut config = Config::default();
        assert!(!config.api.is_configured());

        apply_api_key_override(&mut config, Some("   ".to_string()));
        assert_eq!(config.api.usda_key, DEMO_API_KEY);

        apply_api_key_override(&mut config, Some("real-key".to_string()));
        assert_eq!(config.api.usda_key, "real-key");
        assert!(config.api.is_configured());
    }

    #[test]
    fn test_validate_config_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("timeout_secs must be greater than zero"));
    }

    #[test]
    fn test_validate_config_rejects_empty_path() {
        let mut config = Config::default();
        config.files.swaps = PathBuf::new();
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("files.swaps"));
    }

    #[test]
    fn test_load_config_explicit_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "[files]\nsg_foods = \"foods.txt\"\n").unwrap();

        let config = load_config(Some(&config_path)).unwrap();
        assert_eq!(config.files.sg_foods, temp_dir.path().join("foods.txt"));
        assert_eq!(config.files.myths, temp_dir.path().join("data/myths.txt"));
    }

    #[test]
    fn test_load_config_explicit_missing_file() {
        let temp_dir = tempdir().unwrap();
        let result = load_config(Some(&temp_dir.path().join("missing.toml")));
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }
}
