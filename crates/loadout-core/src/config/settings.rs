//! Engine Settings
//!
//! Loaded once at startup from `~/.loadout/settings.json`. Every field has
//! a default, so a missing or partial file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::common::paths::DEFAULT_ROOT_FOLDER_NAME;
use crate::common::{default_root_dir, LoadoutError, LoadoutResult};
use crate::manifest::FileManifest;

/// Default maximum number of profiles
pub const DEFAULT_PROFILE_LIMIT: usize = 15;

/// Marker subfolder required by the install-folder layout
pub const CONFIG_SUBFOLDER: &str = "Config";

/// How the registered external path maps to the client config directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// The registered path is the config directory itself
    #[default]
    ConfigFolder,
    /// The registered path is the client install directory, holding `Config/`
    InstallFolder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root archive directory holding one folder per profile
    pub root_dir: PathBuf,
    pub profile_limit: usize,
    pub layout: Layout,
    /// Files copied between the client and a profile folder
    pub client_files: FileManifest,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir()
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_ROOT_FOLDER_NAME)),
            profile_limit: DEFAULT_PROFILE_LIMIT,
            layout: Layout::default(),
            client_files: FileManifest::client_config(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when absent
    pub fn load(path: &Path) -> LoadoutResult<Self> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&data)?;
        settings.validate()?;

        info!(
            "Loaded settings from {:?} (root: {:?}, limit: {}, layout: {:?})",
            path, settings.root_dir, settings.profile_limit, settings.layout
        );
        Ok(settings)
    }

    pub fn validate(&self) -> LoadoutResult<()> {
        if self.profile_limit == 0 {
            return Err(LoadoutError::Config(
                "profile_limit must be at least 1".to_string(),
            ));
        }
        self.client_files.validate().map_err(LoadoutError::Config)
    }
}
