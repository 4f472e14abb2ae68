//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/crumbs/crumbs.toml`
//! 3. Local config: `<outline_dir>/.crumbs.toml`
//! 4. Environment variables: `CRUMBS_*` prefix
//!
//! Command line flags are applied on top by the CLI.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

pub const LOCAL_CONFIG_FILE: &str = ".crumbs.toml";

/// Settings consumed by outline parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory icon names are resolved against (default: empty, names stay relative)
    pub images_path: PathBuf,
    /// Icon file extension without the dot (default: none)
    pub images_suffix: String,
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub images_path: Option<PathBuf>,
    pub images_suffix: Option<String>,
}

/// Get the XDG config directory for crumbs.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "crumbs").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("crumbs.toml"))
}

/// Get the path to the local config file next to an outline.
pub fn local_config_path(outline_dir: &Path) -> PathBuf {
    outline_dir.join(LOCAL_CONFIG_FILE)
}

/// Expand `~`, `$VAR` and `${VAR}`; leaves the input untouched on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
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
    /// Overlay values win when specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            images_path: overlay
                .images_path
                .clone()
                .unwrap_or_else(|| self.images_path.clone()),
            images_suffix: overlay
                .images_suffix
                .clone()
                .unwrap_or_else(|| self.images_suffix.clone()),
        }
    }

    /// Expand shell variables and tilde in `images_path`, drop a leading dot
    /// from `images_suffix`.
    fn normalize(&mut self) {
        let expanded = expand_env_vars(self.images_path.to_string_lossy().as_ref());
        self.images_path = PathBuf::from(expanded);

        if let Some(stripped) = self.images_suffix.strip_prefix('.') {
            self.images_suffix = stripped.to_string();
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `outline_dir` - Directory of the outline being parsed, for local config
    pub fn load(outline_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), outline_dir)
    }

    /// Same as [`load`](Self::load) with an explicit global config file.
    pub fn load_from(
        global_path: Option<&Path>,
        outline_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(dir) = outline_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!(path = %local_path.display(), "loading local config");
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.normalize();

        Ok(current)
    }

    /// Apply CRUMBS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CRUMBS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("images_path") {
            settings.images_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("images_suffix") {
            settings.images_suffix = val;
        }

        Ok(settings)
    }

    /// Apply command line overrides (highest precedence).
    pub fn with_overrides(mut self, images_path: Option<&Path>, images_suffix: Option<&str>) -> Self {
        let overlay = RawSettings {
            images_path: images_path.map(Path::to_path_buf),
            images_suffix: images_suffix.map(str::to_string),
        };
        self = self.merge_with(&overlay);
        self.normalize();
        self
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# crumbs configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/crumbs/crumbs.toml
#   Local:  <outline_dir>/.crumbs.toml
#   Env:    CRUMBS_IMAGES_PATH, CRUMBS_IMAGES_SUFFIX
#   CLI:    --images-path, --images-suffix

# Directory that [[icon]] names are resolved against (~ and $VAR expand)
# images_path = "~/icons"

# File extension appended to icon names, without the dot
# images_suffix = "png"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
