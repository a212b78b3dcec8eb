//! Settings loaded once at startup from defaults, the user settings file, and env.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

static DEFAULT_SETTINGS: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-settings.toml"));
static USER_SETTINGS_PATH: &str = "fvi/settings.toml";

const CONFIG_ENV: &str = "FVI_CONFIG";

/// Editor commands and the default editor flavour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Terminal editor program followed by its arguments.
    pub vim: Vec<String>,
    /// Graphical editor program followed by its arguments.
    pub gvim: Vec<String>,
    /// Whether the graphical editor is the default.
    pub gui: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vim: vec!["vim".into()],
            gvim: vec!["gvim".into()],
            gui: false,
        }
    }
}

/// Raw shape of a settings layer. Every key is optional so layers can be merged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct SettingsLayer {
    #[serde(default)]
    vim: Option<String>,
    #[serde(default)]
    gvim: Option<String>,
    #[serde(default)]
    gui: Option<toml::Value>,
}

/// Failure to load the user settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Environment overrides for the editor settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    vim: Option<String>,
    gvim: Option<String>,
    gui: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            vim: env::var("FVI_VIM").ok(),
            gvim: env::var("FVI_GVIM").ok(),
            gui: env::var("FVI_GUI").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(vim: &str, gui: &str) -> Self {
        Self {
            vim: Some(vim.to_owned()),
            gvim: None,
            gui: Some(gui.to_owned()),
        }
    }

    fn into_layer(self) -> SettingsLayer {
        SettingsLayer {
            vim: self.vim,
            gvim: self.gvim,
            gui: self.gui.map(toml::Value::String),
        }
    }
}

impl Settings {
    /// Load settings from the built-in defaults, the user settings file, and env overrides.
    ///
    /// Problems with the user file are reported and the file is ignored; only a broken
    /// built-in default layer is an error.
    pub fn load() -> Result<Self> {
        Self::load_with_layers(user_settings_path(), EnvOverrides::from_env())
    }

    fn load_with_layers(user: Option<PathBuf>, env_overrides: EnvOverrides) -> Result<Self> {
        let mut layers = vec![SettingsLayer::parse(&DEFAULT_SETTINGS)
            .context("built-in default settings are invalid")?];

        if let Some(path) = user {
            match SettingsLayer::from_file(&path) {
                Ok(Some(layer)) => layers.push(layer),
                Ok(None) => {}
                Err(err @ ConfigError::Parse { .. }) => {
                    tracing::error!(error = %err, "ignoring settings file");
                }
                Err(err) => tracing::warn!(error = %err, "ignoring settings file"),
            }
        }

        layers.push(env_overrides.into_layer());

        let merged = layers
            .into_iter()
            .reduce(SettingsLayer::merge)
            .unwrap_or_default();
        Ok(merged.resolve())
    }
}

impl SettingsLayer {
    /// `Ok(None)` when the file does not exist.
    fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&data)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn merge(self, overlay: Self) -> Self {
        Self {
            vim: overlay.vim.or(self.vim),
            gvim: overlay.gvim.or(self.gvim),
            gui: overlay.gui.or(self.gui),
        }
    }

    fn resolve(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            vim: self.vim.map(split_command).unwrap_or(defaults.vim),
            gvim: self.gvim.map(split_command).unwrap_or(defaults.gvim),
            gui: self.gui.as_ref().map(gui_flag).unwrap_or(defaults.gui),
        }
    }
}

fn split_command(command: String) -> Vec<String> {
    command.split_whitespace().map(str::to_owned).collect()
}

/// `y`/`yes` in any case enables the graphical editor; other strings disable it. Booleans are
/// taken at face value and any other type falls back to the default.
fn gui_flag(value: &toml::Value) -> bool {
    match value {
        toml::Value::String(text) => matches!(text.trim().to_lowercase().as_str(), "y" | "yes"),
        toml::Value::Boolean(flag) => *flag,
        _ => Settings::default().gui,
    }
}

fn user_settings_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    config_dir().map(|base| base.join(USER_SETTINGS_PATH))
}
