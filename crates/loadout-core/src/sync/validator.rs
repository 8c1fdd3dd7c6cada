//! External Path Validator
//!
//! Resolves the registered external path to the client's live config
//! directory, checking it on every call.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::common::{LoadoutError, LoadoutResult};
use crate::config::{ConfigStore, Layout, CONFIG_SUBFOLDER, EXTERNAL_CONFIG_PATH_KEY};

#[derive(Clone)]
pub struct PathValidator {
    store: Arc<dyn ConfigStore>,
    layout: Layout,
}

impl PathValidator {
    pub fn new(store: Arc<dyn ConfigStore>, layout: Layout) -> Self {
        Self { store, layout }
    }

    /// Return the client config directory, or why it cannot be used.
    pub async fn validate(&self) -> LoadoutResult<PathBuf> {
        let configured = self
            .store
            .get(EXTERNAL_CONFIG_PATH_KEY)
            .filter(|p| !p.trim().is_empty())
            .ok_or(LoadoutError::PathNotConfigured)?;
        let path = PathBuf::from(configured);

        if !is_dir(&path).await {
            warn!("External path {:?} does not exist", path);
            return Err(LoadoutError::PathNotFound(path));
        }

        match self.layout {
            Layout::ConfigFolder => {
                debug!("External config directory: {:?}", path);
                Ok(path)
            }
            Layout::InstallFolder => {
                let config_dir = path.join(CONFIG_SUBFOLDER);
                if !is_dir(&config_dir).await {
                    warn!("External path {:?} has no {} folder", path, CONFIG_SUBFOLDER);
                    return Err(LoadoutError::RequiredSubfolderMissing {
                        path,
                        subfolder: CONFIG_SUBFOLDER.to_string(),
                    });
                }
                debug!("External config directory: {:?}", config_dir);
                Ok(config_dir)
            }
        }
    }
}

async fn is_dir(path: &std::path::Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryStore;
    use tempfile::TempDir;

    fn validator_for(path: Option<&std::path::Path>, layout: Layout) -> PathValidator {
        let store = match path {
            Some(p) => MemoryStore::with_value(EXTERNAL_CONFIG_PATH_KEY, &p.to_string_lossy()),
            None => MemoryStore::new(),
        };
        PathValidator::new(Arc::new(store), layout)
    }

    #[tokio::test]
    async fn test_not_configured() {
        let validator = validator_for(None, Layout::ConfigFolder);
        assert!(matches!(
            validator.validate().await,
            Err(LoadoutError::PathNotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("gone");
        let validator = validator_for(Some(&gone), Layout::ConfigFolder);
        match validator.validate().await {
            Err(LoadoutError::PathNotFound(p)) => assert_eq!(p, gone),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_config_folder_layout() {
        let dir = TempDir::new().unwrap();
        let validator = validator_for(Some(dir.path()), Layout::ConfigFolder);
        assert_eq!(validator.validate().await.unwrap(), dir.path());
    }

    #[tokio::test]
    async fn test_install_layout_requires_subfolder() {
        let dir = TempDir::new().unwrap();
        let validator = validator_for(Some(dir.path()), Layout::InstallFolder);
        assert!(matches!(
            validator.validate().await,
            Err(LoadoutError::RequiredSubfolderMissing { .. })
        ));

        std::fs::create_dir(dir.path().join(CONFIG_SUBFOLDER)).unwrap();
        assert_eq!(
            validator.validate().await.unwrap(),
            dir.path().join(CONFIG_SUBFOLDER)
        );
    }
}
