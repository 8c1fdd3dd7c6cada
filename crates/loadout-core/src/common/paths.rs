//! Path Utilities
//!
//! Common path resolution for Loadout directories and files.

use std::path::PathBuf;

use super::error::LoadoutError;

/// Default folder name for the root archive directory
pub const DEFAULT_ROOT_FOLDER_NAME: &str = "LoadoutProfiles";

/// Get the Loadout base directory (`~/.loadout/`)
pub fn loadout_dir() -> Result<PathBuf, LoadoutError> {
    let home = dirs::home_dir()
        .ok_or_else(|| LoadoutError::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(".loadout"))
}

/// Get a path within the Loadout directory
///
/// # Example
/// ```ignore
/// let store = loadout_path("store.json")?;
/// ```
pub fn loadout_path(relative_path: &str) -> Result<PathBuf, LoadoutError> {
    Ok(loadout_dir()?.join(relative_path))
}

/// Get the key-value store file
pub fn store_path() -> Result<PathBuf, LoadoutError> {
    loadout_path("store.json")
}

/// Get the settings file
pub fn settings_path() -> Result<PathBuf, LoadoutError> {
    loadout_path("settings.json")
}

/// Get the default root archive directory
///
/// Lives under the user's documents folder, falling back to
/// `~/Documents` when the platform does not report one.
pub fn default_root_dir() -> Result<PathBuf, LoadoutError> {
    let documents = match dirs::document_dir() {
        Some(dir) => dir,
        None => dirs::home_dir()
            .ok_or_else(|| {
                LoadoutError::Config("Could not determine home directory".to_string())
            })?
            .join("Documents"),
    };
    Ok(documents.join(DEFAULT_ROOT_FOLDER_NAME))
}
