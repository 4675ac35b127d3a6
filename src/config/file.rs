//! Configuration file support for persistent settings.
//!
//! This module loads configuration from a TOML file located at
//! `~/.config/fileshare/config.toml` (or the platform-specific equivalent).
//! Values from the file serve as defaults that CLI arguments can override.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! package_name = "me.example.app"
//!
//! [share]
//! action = "android.intent.action.SEND"
//!
//! [[share.roots]]
//! name = "downloads"
//! path = "~/Downloads"
//!
//! [[share.roots]]
//! name = "cache"
//! path = "/tmp/fileshare"
//!
//! [clear]
//! dry_run = false
//! confirm = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::share::ProviderRoot;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can tell which values are present in the
/// file and layer them under the CLI arguments.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Package name; the provider authority is `<package_name>.provider`
    pub package_name: Option<String>,

    /// Sharing options
    #[serde(default)]
    pub share: FileShareConfig,

    /// Directory cleanup options
    #[serde(default)]
    pub clear: FileClearConfig,
}

/// Sharing options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileShareConfig {
    /// Action put on new intents (e.g. `"android.intent.action.VIEW"`)
    pub action: Option<String>,

    /// Named directories whose files may be shared
    pub roots: Option<Vec<FileRootConfig>>,
}

/// A single `[[share.roots]]` entry.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileRootConfig {
    /// Name used as the first path segment of content URIs
    pub name: String,

    /// Directory on disk; a leading `~` is expanded
    pub path: PathBuf,
}

impl FileRootConfig {
    /// Convert to a [`ProviderRoot`], expanding a leading `~` in the path.
    #[must_use]
    pub fn to_provider_root(&self) -> ProviderRoot {
        ProviderRoot::new(self.name.clone(), expand_tilde(&self.path))
    }
}

/// Cleanup options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileClearConfig {
    /// Whether `clear` only lists entries by default
    pub dry_run: Option<bool>,

    /// Whether `clear` asks before deleting. Defaults to `true` when absent.
    pub confirm: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The file lives at `<config_dir>/fileshare/config.toml`, where
    /// `<config_dir>` is the platform-specific configuration directory
    /// (e.g. `~/.config` on Linux, `%APPDATA%` on Windows).
    ///
    /// Returns `None` if the config directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fileshare").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML
    /// or unexpected fields.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })
    }

    /// Roots from the file as provider roots, or `None` if none are configured.
    #[must_use]
    pub fn provider_roots(&self) -> Option<Vec<ProviderRoot>> {
        self.share
            .roots
            .as_ref()
            .filter(|roots| !roots.is_empty())
            .map(|roots| roots.iter().map(FileRootConfig::to_provider_root).collect())
    }
}
