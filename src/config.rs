//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treemaze/treemaze.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `TREEMAZE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for treemaze.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Room count used when none is given on the command line
    pub size: usize,
    /// Smallest size the CLI accepts
    pub min_size: usize,
    /// Largest size the CLI accepts
    pub max_size: usize,
    /// Fixed seed for reproducible mazes (random when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: 10,
            min_size: 10,
            max_size: 50,
            seed: None,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub size: Option<usize>,
    pub min_size: Option<usize>,
    pub max_size: Option<usize>,
    pub seed: Option<u64>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for treemaze.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treemaze").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treemaze.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(raw.as_ref()) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            size: overlay.size.unwrap_or(self.size),
            min_size: overlay.min_size.unwrap_or(self.min_size),
            max_size: overlay.max_size.unwrap_or(self.max_size),
            seed: overlay.seed.or(self.seed),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// An explicit `config_file` must exist; the global file is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            let path = expand_path(path);
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(&path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply TREEMAZE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TREEMAZE").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<usize>("size") {
            settings.size = val;
        }
        if let Ok(val) = config.get::<usize>("min_size") {
            settings.min_size = val;
        }
        if let Ok(val) = config.get::<usize>("max_size") {
            settings.max_size = val;
        }
        if let Ok(val) = config.get::<u64>("seed") {
            settings.seed = Some(val);
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }

    /// Bounds must be non-empty and start at one room or more.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.min_size == 0 || self.min_size > self.max_size {
            return Err(ApplicationError::Config {
                message: format!(
                    "invalid size bounds: min_size={} max_size={}",
                    self.min_size, self.max_size
                ),
            });
        }
        Ok(())
    }

    /// Resolve the requested room count against the configured bounds.
    ///
    /// Returns the offending size on failure.
    pub fn resolve_size(&self, requested: Option<usize>) -> Result<usize, usize> {
        let size = requested.unwrap_or(self.size);
        if (self.min_size..=self.max_size).contains(&size) {
            Ok(size)
        } else {
            Err(size)
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treemaze configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treemaze/treemaze.toml
#   File:   treemaze --config <file>
#   Env:    TREEMAZE_* environment variables (e.g. TREEMAZE_SEED=42)

# Number of rooms when --size is not given
# size = 10

# Accepted range for the number of rooms
# min_size = 10
# max_size = 50

# Fixed seed for reproducible mazes
# seed = 42

# Colored output
# color = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn given_defaults_when_created_then_match_the_game_menu() {
        let settings = Settings::default();
        assert_eq!(settings.size, 10);
        assert_eq!((settings.min_size, settings.max_size), (10, 50));
        assert_eq!(settings.seed, None);
        assert!(settings.color);
    }

    #[test]
    fn given_config_file_when_loading_then_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "size = 20\nseed = 7\ncolor = false").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(settings.size, 20);
        assert_eq!(settings.seed, Some(7));
        assert!(!settings.color);
        assert_eq!(settings.max_size, 50);
    }

    #[test]
    fn given_missing_config_file_when_loading_then_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn given_malformed_toml_when_loading_then_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "size = \"many\"").unwrap();
        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn given_inverted_bounds_when_validating_then_rejected() {
        let settings = Settings {
            min_size: 30,
            max_size: 20,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn given_bounds_when_resolving_size_then_range_is_inclusive() {
        let settings = Settings::default();
        assert_eq!(settings.resolve_size(None), Ok(10));
        assert_eq!(settings.resolve_size(Some(50)), Ok(50));
        assert_eq!(settings.resolve_size(Some(9)), Err(9));
        assert_eq!(settings.resolve_size(Some(51)), Err(51));
    }

    #[test]
    fn given_tilde_path_when_expanding_then_uses_home() {
        let home = std::env::var("HOME").expect("HOME should be set");
        let expanded = expand_path(Path::new("~/maze.toml"));
        assert!(expanded.to_string_lossy().starts_with(&home));
    }

    #[test]
    fn given_settings_when_serialized_then_template_keys_match() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("size = 10"));
        assert!(!toml.contains("seed"));
        for key in ["size", "min_size", "max_size", "seed", "color"] {
            assert!(Settings::template().contains(&format!("# {key} = ")));
        }
    }
}
