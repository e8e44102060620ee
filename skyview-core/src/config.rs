use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::Coordinates;

/// Environment variable checked before the config file for the API key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Used when no credential is configured. Every provider call will be rejected.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_GOOGLE_MAPS_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
///
/// [default_location]
/// latitude = 40.7128
/// longitude = -74.006
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Overrides for the provider endpoints.
    pub geocode_url: Option<String>,
    pub conditions_url: Option<String>,

    /// Position reported by the CLI geolocation source.
    pub default_location: Option<Coordinates>,
}

impl Config {
    /// Load config from the platform location, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skyview", "skyview")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        let trimmed = api_key.trim();
        self.api_key = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Resolve the credential: environment first, then this config, then the placeholder.
    pub fn resolve_api_key(&self) -> String {
        let from_env = std::env::var(API_KEY_ENV).ok();
        self.resolve_api_key_with(from_env.as_deref())
    }

    fn resolve_api_key_with(&self, from_env: Option<&str>) -> String {
        from_env
            .filter(|k| !k.trim().is_empty())
            .or(self.api_key.as_deref().filter(|k| !k.trim().is_empty()))
            .map(str::to_string)
            .unwrap_or_else(|| {
                tracing::warn!(
                    "No API key configured; set {API_KEY_ENV} or run `skyview configure`"
                );
                PLACEHOLDER_API_KEY.to_string()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.default_location = Some(Coordinates::new(52.37, 4.89));
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn blank_api_key_is_cleared() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn env_key_wins_over_file_key() {
        let cfg = Config { api_key: Some("FILE".into()), ..Default::default() };
        assert_eq!(cfg.resolve_api_key_with(Some("ENV")), "ENV");
        assert_eq!(cfg.resolve_api_key_with(Some("")), "FILE");
        assert_eq!(cfg.resolve_api_key_with(None), "FILE");
    }

    #[test]
    fn placeholder_when_unset() {
        let cfg = Config::default();
        assert_eq!(cfg.resolve_api_key_with(None), PLACEHOLDER_API_KEY);
    }
}
