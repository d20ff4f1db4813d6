use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Get the pickapal config directory path (~/.pickapal)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pickapal"))
}

/// Get the user config file path (~/.pickapal/config.toml)
pub fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Project-local config file, checked in the working directory
pub const LOCAL_CONFIG_FILE: &str = "pickapal.toml";

// ============================================================================
// TOML Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PickConfig {
    #[serde(default)]
    pub roster: RosterConfig,

    #[serde(default)]
    pub picker: PickerConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RosterConfig {
    /// Names added on launch, validated like typed input
    #[serde(default)]
    pub seed_names: Vec<String>,

    /// Initial state of the remove-on-pick toggle
    #[serde(default)]
    pub remove_on_pick: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PickerConfig {
    /// Fixed RNG seed for repeatable picks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Terminal event poll interval in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl PickConfig {
    /// Load config from TOML files
    ///
    /// Priority order (highest to lowest):
    /// 1. ./pickapal.toml (project-specific)
    /// 2. ~/.pickapal/config.toml (user defaults)
    /// 3. Built-in defaults
    ///
    /// Files are merged key by key, so a layer only overrides what it sets.
    /// Unreadable or invalid files are logged and skipped.
    pub fn load() -> Self {
        let layers = [user_config_path(), Some(PathBuf::from(LOCAL_CONFIG_FILE))];

        let mut merged = toml::Table::new();
        for path in layers.iter().flatten() {
            if let Some(table) = Self::load_table(path) {
                merge_tables(&mut merged, table);
            }
        }

        match Self::from_table(merged) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring merged config: {}", e);
                PickConfig::default()
            }
        }
    }

    /// Load a single config file, failing on any error
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_toml(&contents).map_err(|e| ConfigError::parse(path, e))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Render config as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build config from an already-parsed TOML table
    pub fn from_table(table: toml::Table) -> Result<Self, toml::de::Error> {
        toml::Value::Table(table).try_into()
    }

    /// Read one layer as a raw table, skipping it if it does not fit the schema
    fn load_table(path: &Path) -> Option<toml::Table> {
        if !path.exists() {
            return None;
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(path, e))
            .and_then(|contents| {
                Self::from_toml(&contents).map_err(|e| ConfigError::parse(path, e))?;
                contents
                    .parse::<toml::Table>()
                    .map_err(|e| ConfigError::parse(path, e))
            });

        match parsed {
            Ok(table) => {
                debug!("Loaded config layer from {}", path.display());
                Some(table)
            }
            Err(e) => {
                warn!("Skipping config: {}", e);
                None
            }
        }
    }

    /// Write this config to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
            }
        }

        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::io(path, e))
    }
}

/// Merge `overlay` into `base`; nested tables merge, other values replace
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        let merged = match (base.remove(&key), value) {
            (Some(toml::Value::Table(mut existing)), toml::Value::Table(nested)) => {
                merge_tables(&mut existing, nested);
                toml::Value::Table(existing)
            }
            (_, value) => value,
        };
        base.insert(key, merged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_dir_returns_path() {
        if let Some(path) = config_dir() {
            assert!(path.ends_with(".pickapal"));
        }
    }

    #[test]
    fn test_defaults() {
        let config = PickConfig::default();
        assert!(config.roster.seed_names.is_empty());
        assert!(!config.roster.remove_on_pick);
        assert_eq!(config.picker.seed, None);
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = PickConfig::from_toml(
            r#"
            [roster]
            seed_names = ["Elisha", "Andre"]
            "#,
        )
        .unwrap();

        assert_eq!(config.roster.seed_names, vec!["Elisha", "Andre"]);
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_load_from_reports_path_on_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[roster\nseed_names = 3").unwrap();

        let err = PickConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = PickConfig::default();
        config.roster.remove_on_pick = true;
        config.picker.seed = Some(9);
        config.write_to(&path).unwrap();

        assert_eq!(PickConfig::load_from(&path).unwrap(), config);
    }

    fn layered(user: &str, local: &str) -> PickConfig {
        let mut merged = toml::Table::new();
        merge_tables(&mut merged, user.parse().unwrap());
        merge_tables(&mut merged, local.parse().unwrap());
        PickConfig::from_table(merged).unwrap()
    }

    #[test]
    fn test_merge_keeps_base_names_when_overlay_has_none() {
        let merged = layered(
            "[roster]\nseed_names = [\"Jasmine\"]\n[picker]\nseed = 1\n",
            "[roster]\nremove_on_pick = true\n",
        );

        assert_eq!(merged.roster.seed_names, vec!["Jasmine"]);
        assert_eq!(merged.picker.seed, Some(1));
        assert!(merged.roster.remove_on_pick);
    }

    #[test]
    fn test_merge_keeps_user_settings_the_overlay_omits() {
        let merged = layered(
            "[roster]\nremove_on_pick = true\n[ui]\ntick_rate_ms = 250\n",
            "[roster]\nseed_names = [\"Ana\"]\n",
        );

        assert!(merged.roster.remove_on_pick);
        assert_eq!(merged.ui.tick_rate_ms, 250);
        assert_eq!(merged.roster.seed_names, vec!["Ana"]);
    }

    #[test]
    fn test_merge_overlay_value_wins() {
        let merged = layered(
            "[roster]\nremove_on_pick = true\n[ui]\ntick_rate_ms = 250\n",
            "[roster]\nremove_on_pick = false\n",
        );

        assert!(!merged.roster.remove_on_pick);
        assert_eq!(merged.ui.tick_rate_ms, 250);
    }

    #[test]
    fn test_invalid_layer_is_skipped() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\ntick_rate_ms = \"fast\"").unwrap();

        assert!(PickConfig::load_table(file.path()).is_none());
    }

    #[test]
    fn test_load_doesnt_panic() {
        // Should never panic, even if no config files exist
        let _ = PickConfig::load();
    }
}
