//! Manifest Types
//!
//! The fixed file lists a client config directory and a profile folder
//! are expected to hold.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Descriptor written inside every profile folder
pub const DESCRIPTOR_FILE: &str = "profileDetails.json";

/// Client game settings file
pub const GAME_SETTINGS_FILE: &str = "game.cfg";

/// Client keybindings file (may not exist on a fresh install)
pub const KEYBINDINGS_FILE: &str = "input.ini";

/// Client persisted settings file
pub const PERSISTED_SETTINGS_FILE: &str = "PersistedSettings.json";

/// Required/optional split of expected file names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileManifest {
    pub required: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
}

impl FileManifest {
    pub fn new<R, O>(required: R, optional: O) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            optional: optional.into_iter().map(Into::into).collect(),
        }
    }

    /// Files expected in the client's live config directory
    pub fn client_config() -> Self {
        Self::new(
            [GAME_SETTINGS_FILE, PERSISTED_SETTINGS_FILE],
            [KEYBINDINGS_FILE],
        )
    }

    /// Files expected in a profile folder: the descriptor plus the client files
    pub fn manager_folder(client: &FileManifest) -> Self {
        let mut required = vec![DESCRIPTOR_FILE.to_string()];
        required.extend(client.required.iter().cloned());
        Self {
            required,
            optional: client.optional.clone(),
        }
    }

    /// Required files first, then optional, in declaration order
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(String::as_str)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.all().any(|f| f == file_name)
    }

    /// Keep only the names this manifest knows about
    pub fn filter<I>(&self, names: I) -> HashSet<String>
    where
        I: IntoIterator<Item = String>,
    {
        names.into_iter().filter(|n| self.contains(n)).collect()
    }

    /// Validate manifest structure
    pub fn validate(&self) -> Result<(), String> {
        if self.required.is_empty() {
            return Err("Manifest must define at least one required file".to_string());
        }

        let mut seen = HashSet::new();
        for name in self.all() {
            if !is_valid_file_name(name) {
                return Err(format!("Invalid manifest file name: {:?}", name));
            }
            if !seen.insert(name) {
                return Err(format!("Duplicate manifest file name: {}", name));
            }
        }

        if self.contains(DESCRIPTOR_FILE) {
            return Err(format!(
                "{} is reserved for the profile descriptor",
                DESCRIPTOR_FILE
            ));
        }

        Ok(())
    }
}

impl Default for FileManifest {
    fn default() -> Self {
        Self::client_config()
    }
}

fn is_valid_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}
