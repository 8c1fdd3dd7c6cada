//! Profile Registry
//!
//! In-memory list of profiles, hydrated from the root directory at
//! startup and kept in step with the folders on every mutation.

use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{CreateProfileDto, Profile, UpdateProfileDto, DEFAULT_COLOR};
use crate::common::{LoadoutError, LoadoutResult};
use crate::manifest::OnMissing;
use crate::sync::{ExportReport, ProfileStore, ScanReport};

/// Reveals a folder to the user
pub trait FolderOpener: Send + Sync {
    fn open(&self, path: &Path) -> LoadoutResult<()>;
}

/// Opens folders with the platform file manager
#[derive(Debug, Default)]
pub struct OpenFolderOpener;

impl FolderOpener for OpenFolderOpener {
    fn open(&self, path: &Path) -> LoadoutResult<()> {
        open::that(path)?;
        Ok(())
    }
}

pub struct ProfileRegistry {
    store: ProfileStore,
    profiles: RwLock<Vec<Profile>>,
    limit: usize,
    opener: Arc<dyn FolderOpener>,
}

impl ProfileRegistry {
    pub fn new(store: ProfileStore, limit: usize) -> Self {
        Self::with_opener(store, limit, Arc::new(OpenFolderOpener))
    }

    pub fn with_opener(store: ProfileStore, limit: usize, opener: Arc<dyn FolderOpener>) -> Self {
        Self {
            store,
            profiles: RwLock::new(Vec::new()),
            limit,
            opener,
        }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Load every complete profile folder under the root
    pub async fn initialize(&self) -> LoadoutResult<ScanReport> {
        self.store.ensure_root_exists().await?;
        let report = self.store.scan_profiles(OnMissing::SkipAndWarn).await?;

        let mut profiles = self.profiles.write().await;
        *profiles = report.profiles.clone();
        info!(
            "Registry initialized with {} profiles ({} folders skipped)",
            profiles.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Snapshot the client's current config as a new profile
    pub async fn create(&self, dto: CreateProfileDto) -> LoadoutResult<Profile> {
        let id = Uuid::new_v4().to_string();

        if self.profiles.read().await.len() >= self.limit {
            return Err(LoadoutError::CreationLimitReached(self.limit));
        }

        let violations = dto.validate();
        if !violations.is_empty() {
            return Err(LoadoutError::Validation(violations));
        }

        let profile = Profile {
            id,
            name: dto.name,
            color: dto.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            is_favorite: dto.is_favorite.unwrap_or(false),
        };

        self.store.import_from_external(&profile).await?;

        // Another create may have filled the last slot during the import
        let mut profiles = self.profiles.write().await;
        if profiles.len() >= self.limit {
            warn!("Limit reached while importing '{}', rolling back", profile.name);
            self.store.delete_profile_folder(&profile).await;
            return Err(LoadoutError::CreationLimitReached(self.limit));
        }
        profiles.push(profile.clone());

        info!("Created profile '{}' ({})", profile.name, profile.id);
        Ok(profile)
    }

    pub async fn get(&self, id: &str) -> LoadoutResult<Profile> {
        self.profiles
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| LoadoutError::ProfileNotFound(id.to_string()))
    }

    pub async fn get_all(&self) -> Vec<Profile> {
        self.profiles.read().await.clone()
    }

    /// Merge `dto` into the profile, renaming its folder when the name changes
    pub async fn update(&self, id: &str, dto: UpdateProfileDto) -> LoadoutResult<Profile> {
        let violations = dto.validate();
        if !violations.is_empty() {
            return Err(LoadoutError::Validation(violations));
        }

        let mut profiles = self.profiles.write().await;
        let index = profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LoadoutError::ProfileNotFound(id.to_string()))?;

        let current = profiles[index].clone();
        let updated = Profile {
            id: current.id.clone(),
            name: dto.name.unwrap_or_else(|| current.name.clone()),
            color: dto.color.unwrap_or_else(|| current.color.clone()),
            is_favorite: dto.is_favorite.unwrap_or(current.is_favorite),
        };

        let renamed = updated.name != current.name;
        if renamed {
            self.store.rename_profile_folder(&current, &updated).await?;
        }

        // The entry only changes once the folder and descriptor agree
        if let Err(e) = self.store.write_descriptor(&updated).await {
            error!("Descriptor write for '{}' failed: {}", updated.name, e);
            if renamed {
                if let Err(revert) = self.store.rename_profile_folder(&updated, &current).await {
                    error!("Could not restore folder for '{}': {}", current.name, revert);
                }
            }
            return Err(e);
        }
        profiles[index] = updated.clone();

        info!("Updated profile '{}' ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Remove the profile and, best-effort, its folder
    pub async fn delete(&self, id: &str) -> LoadoutResult<Profile> {
        let mut profiles = self.profiles.write().await;
        let index = profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LoadoutError::ProfileNotFound(id.to_string()))?;

        self.store.delete_profile_folder(&profiles[index]).await;
        let removed = profiles.remove(index);

        info!("Deleted profile '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Copy the profile's files over the client's live config
    pub async fn export_to_client(&self, id: &str) -> LoadoutResult<ExportReport> {
        let profile = self.get(id).await?;
        self.store.export_to_external(&profile).await
    }

    pub async fn open_folder_in_file_explorer(&self, id: &str) -> LoadoutResult<()> {
        let profile = self.get(id).await?;
        let path = self.store.profile_folder_path(&profile).await?;
        info!("Opening {:?}", path);
        self.opener.open(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Layout, MemoryStore, EXTERNAL_CONFIG_PATH_KEY};
    use crate::manifest::{
        FileManifest, DESCRIPTOR_FILE, GAME_SETTINGS_FILE, PERSISTED_SETTINGS_FILE,
    };
    use crate::sync::PathValidator;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingOpener {
        opened: Mutex<Vec<PathBuf>>,
    }

    impl FolderOpener for RecordingOpener {
        fn open(&self, path: &Path) -> LoadoutResult<()> {
            self.opened.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    fn setup(limit: usize) -> (TempDir, PathBuf, ProfileRegistry, Arc<RecordingOpener>) {
        let tmp = TempDir::new().unwrap();
        let client = tmp.path().join("client");
        fs::create_dir(&client).unwrap();
        fs::write(client.join(GAME_SETTINGS_FILE), "fov=90").unwrap();
        fs::write(client.join(PERSISTED_SETTINGS_FILE), "{}").unwrap();

        let config = MemoryStore::with_value(EXTERNAL_CONFIG_PATH_KEY, &client.to_string_lossy());
        let store = ProfileStore::new(
            tmp.path().join("root"),
            PathValidator::new(Arc::new(config), Layout::ConfigFolder),
            FileManifest::client_config(),
        );
        let opener = Arc::new(RecordingOpener::default());
        let registry = ProfileRegistry::with_opener(store, limit, opener.clone());
        (tmp, client, registry, opener)
    }

    fn dto(name: &str) -> CreateProfileDto {
        CreateProfileDto {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn folder_count(registry: &ProfileRegistry) -> usize {
        fs::read_dir(registry.store().root()).unwrap().count()
    }

    #[tokio::test]
    async fn test_create_builds_complete_folder() {
        let (_tmp, _client, registry, _) = setup(15);
        registry.initialize().await.unwrap();

        let profile = registry.create(dto("Ranked")).await.unwrap();
        assert_eq!(profile.color, DEFAULT_COLOR);
        assert!(!profile.is_favorite);

        let folder = registry.store().profile_folder_path(&profile).await.unwrap();
        assert!(folder.join(DESCRIPTOR_FILE).exists());
        assert!(folder.join(GAME_SETTINGS_FILE).exists());
        assert_eq!(registry.get(&profile.id).await.unwrap(), profile);
    }

    #[tokio::test]
    async fn test_invalid_name_creates_nothing() {
        let (_tmp, _client, registry, _) = setup(15);
        registry.initialize().await.unwrap();

        let err = registry.create(dto("")).await.unwrap_err();
        assert!(matches!(err, LoadoutError::Validation(_)));
        assert!(registry.get_all().await.is_empty());
        assert_eq!(folder_count(&registry), 0);
    }

    #[tokio::test]
    async fn test_limit_reached() {
        let (_tmp, _client, registry, _) = setup(1);
        registry.initialize().await.unwrap();
        registry.create(dto("One")).await.unwrap();

        let err = registry.create(dto("Two")).await.unwrap_err();
        assert!(matches!(err, LoadoutError::CreationLimitReached(1)));
        assert_eq!(registry.get_all().await.len(), 1);
        assert_eq!(folder_count(&registry), 1);
    }

    #[tokio::test]
    async fn test_create_then_delete() {
        let (_tmp, _client, registry, _) = setup(15);
        registry.initialize().await.unwrap();
        let profile = registry.create(dto("Temp")).await.unwrap();

        let removed = registry.delete(&profile.id).await.unwrap();
        assert_eq!(removed, profile);
        assert!(matches!(
            registry.get(&profile.id).await,
            Err(LoadoutError::ProfileNotFound(_))
        ));
        assert_eq!(folder_count(&registry), 0);
        assert!(matches!(
            registry.delete(&profile.id).await,
            Err(LoadoutError::ProfileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_renames_folder_and_rewrites_descriptor() {
        let (_tmp, _client, registry, _) = setup(15);
        registry.initialize().await.unwrap();
        let profile = registry.create(dto("Old")).await.unwrap();

        let updated = registry
            .update(
                &profile.id,
                UpdateProfileDto {
                    name: Some("New".into()),
                    is_favorite: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.color, profile.color);

        let root = registry.store().root().to_path_buf();
        assert!(!root.join(format!("Old_{}", profile.id)).exists());
        let folder = root.join(format!("New_{}", profile.id));
        let descriptor: Profile =
            serde_json::from_str(&fs::read_to_string(folder.join(DESCRIPTOR_FILE)).unwrap())
                .unwrap();
        assert_eq!(descriptor, updated);
    }

    #[tokio::test]
    async fn test_failed_descriptor_write_rolls_back_update() {
        let (tmp, client, registry, _) = setup(15);
        registry.initialize().await.unwrap();
        let profile = registry.create(dto("Old")).await.unwrap();

        // a directory where the temp descriptor goes makes the write fail
        let old_folder = registry.store().root().join(format!("Old_{}", profile.id));
        fs::create_dir(old_folder.join(format!(".{}.tmp", DESCRIPTOR_FILE))).unwrap();

        let result = registry
            .update(
                &profile.id,
                UpdateProfileDto {
                    name: Some("New".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(LoadoutError::Io(_))));

        assert_eq!(registry.get(&profile.id).await.unwrap(), profile);
        assert!(old_folder.join(DESCRIPTOR_FILE).exists());
        assert!(!registry
            .store()
            .root()
            .join(format!("New_{}", profile.id))
            .exists());

        let config = MemoryStore::with_value(EXTERNAL_CONFIG_PATH_KEY, &client.to_string_lossy());
        let reopened = ProfileRegistry::new(
            ProfileStore::new(
                tmp.path().join("root"),
                PathValidator::new(Arc::new(config), Layout::ConfigFolder),
                FileManifest::client_config(),
            ),
            15,
        );
        let report = reopened.initialize().await.unwrap();
        assert_eq!(report.profiles, vec![profile]);
        assert!(report.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_failed_import_leaves_no_entry() {
        let (_tmp, client, registry, _) = setup(15);
        registry.initialize().await.unwrap();
        fs::remove_file(client.join(GAME_SETTINGS_FILE)).unwrap();

        assert!(matches!(
            registry.create(dto("Broken")).await,
            Err(LoadoutError::MissingRequiredFiles { .. })
        ));
        assert!(registry.get_all().await.is_empty());
        assert_eq!(folder_count(&registry), 0);
    }

    #[tokio::test]
    async fn test_update_validation_and_not_found() {
        let (_tmp, _client, registry, _) = setup(15);
        registry.initialize().await.unwrap();

        let bad = UpdateProfileDto {
            color: Some("#FFF".into()),
            ..Default::default()
        };
        assert!(matches!(
            registry.update("nope", bad).await,
            Err(LoadoutError::Validation(_))
        ));
        assert!(matches!(
            registry.update("nope", UpdateProfileDto::default()).await,
            Err(LoadoutError::ProfileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_folders() {
        let (_tmp, _client, registry, _) = setup(15);
        registry.initialize().await.unwrap();

        let (a, b) = tokio::join!(registry.create(dto("Same")), registry.create(dto("Same")));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.id, b.id);
        assert_eq!(registry.get_all().await.len(), 2);
        assert_eq!(folder_count(&registry), 2);
    }

    #[tokio::test]
    async fn test_initialize_reloads_created_profiles() {
        let (tmp, client, registry, _) = setup(15);
        registry.initialize().await.unwrap();
        let profile = registry.create(dto("Kept")).await.unwrap();

        let config = MemoryStore::with_value(EXTERNAL_CONFIG_PATH_KEY, &client.to_string_lossy());
        let reopened = ProfileRegistry::new(
            ProfileStore::new(
                tmp.path().join("root"),
                PathValidator::new(Arc::new(config), Layout::ConfigFolder),
                FileManifest::client_config(),
            ),
            15,
        );
        let report = reopened.initialize().await.unwrap();
        assert_eq!(report.profiles, vec![profile]);
    }

    #[tokio::test]
    async fn test_export_and_open_folder() {
        let (_tmp, client, registry, opener) = setup(15);
        registry.initialize().await.unwrap();
        let profile = registry.create(dto("Ranked")).await.unwrap();
        fs::write(client.join(GAME_SETTINGS_FILE), "changed").unwrap();

        let report = registry.export_to_client(&profile.id).await.unwrap();
        assert!(report.is_success());
        assert_eq!(fs::read_to_string(client.join(GAME_SETTINGS_FILE)).unwrap(), "fov=90");

        registry.open_folder_in_file_explorer(&profile.id).await.unwrap();
        let opened = opener.opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].ends_with(format!("Ranked_{}", profile.id)));
    }
}
