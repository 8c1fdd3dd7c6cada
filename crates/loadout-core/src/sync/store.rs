//! Profile Store
//!
//! Owns the root archive directory. Each profile lives in its own
//! `{name}_{id}` folder holding the client files plus the
//! `profileDetails.json` descriptor, which is always written last so a
//! folder without a readable descriptor is treated as incomplete.

use serde::Serialize;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::transfer::{FileTransferer, TransferError};
use super::validator::PathValidator;
use crate::common::{LoadoutError, LoadoutResult};
use crate::config::{ConfigStore, Settings};
use crate::manifest::{check, FileManifest, OnMissing, DESCRIPTOR_FILE};
use crate::profiles::Profile;

/// A folder under the root that scan did not surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFolder {
    pub folder: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub profiles: Vec<Profile>,
    pub skipped: Vec<SkippedFolder>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCopy {
    pub file: String,
    pub error: String,
}

/// Per-file outcome of an export; failures never abort the export
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportReport {
    pub copied: Vec<String>,
    pub missing: Vec<String>,
    pub failed: Vec<FailedCopy>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct ProfileStore {
    root: PathBuf,
    validator: PathValidator,
    transferer: FileTransferer,
    client_files: FileManifest,
    manager_files: FileManifest,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>, validator: PathValidator, client_files: FileManifest) -> Self {
        let manager_files = FileManifest::manager_folder(&client_files);
        Self {
            root: root.into(),
            validator,
            transferer: FileTransferer::new(),
            client_files,
            manager_files,
        }
    }

    pub fn from_settings(settings: &Settings, config: Arc<dyn ConfigStore>) -> Self {
        Self::new(
            settings.root_dir.clone(),
            PathValidator::new(config, settings.layout),
            settings.client_files.clone(),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist yet
    pub async fn ensure_root_exists(&self) -> LoadoutResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        debug!("Root directory ready at {:?}", self.root);
        Ok(())
    }

    pub fn folder_name_for(&self, profile: &Profile) -> String {
        format!("{}_{}", profile.name, profile.id)
    }

    /// Existing folder for `profile`
    pub async fn profile_folder_path(&self, profile: &Profile) -> LoadoutResult<PathBuf> {
        let path = self.root.join(self.folder_name_for(profile));
        if is_dir(&path).await {
            Ok(path)
        } else {
            Err(LoadoutError::FolderNotFound(path))
        }
    }

    pub async fn create_profile_folder(&self, profile: &Profile) -> LoadoutResult<PathBuf> {
        let path = self.root.join(self.folder_name_for(profile));
        tokio::fs::create_dir_all(&path).await?;
        debug!("Created profile folder {:?}", path);
        Ok(path)
    }

    /// Remove the profile's folder and everything in it.
    ///
    /// Failures are logged and swallowed.
    pub async fn delete_profile_folder(&self, profile: &Profile) {
        let path = self.root.join(self.folder_name_for(profile));
        match tokio::fs::remove_dir_all(&path).await {
            Ok(()) => info!("Deleted profile folder {:?}", path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Profile folder {:?} was already gone", path)
            }
            Err(e) => error!("Failed to delete profile folder {:?}: {}", path, e),
        }
    }

    /// Move `old`'s folder to the name derived from `new`
    pub async fn rename_profile_folder(&self, old: &Profile, new: &Profile) -> LoadoutResult<PathBuf> {
        let from = self.profile_folder_path(old).await?;
        let to = self.root.join(self.folder_name_for(new));
        if from == to {
            return Ok(to);
        }
        tokio::fs::rename(&from, &to).await?;
        info!("Renamed profile folder {:?} -> {:?}", from, to);
        Ok(to)
    }

    /// Read every complete profile folder under the root, in directory
    /// listing order.
    ///
    /// With `OnMissing::Abort` the first bad folder fails the scan;
    /// with `OnMissing::SkipAndWarn` it is logged and reported.
    pub async fn scan_profiles(&self, on_missing: OnMissing) -> LoadoutResult<ScanReport> {
        let mut report = ScanReport::default();
        if !is_dir(&self.root).await {
            warn!("Root directory {:?} does not exist, nothing to scan", self.root);
            return Ok(report);
        }

        let mut seen_ids = HashSet::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    // the listing cannot continue past a failed read
                    let root = self.root.display().to_string();
                    skip_folder(&mut report, on_missing, root, e.into())?;
                    break;
                }
            };
            let folder = entry.file_name().to_string_lossy().into_owned();

            match tokio::fs::metadata(entry.path()).await {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => continue,
                Err(e) => {
                    skip_folder(&mut report, on_missing, folder, e.into())?;
                    continue;
                }
            }

            let read = self.read_profile_folder(&entry.path(), &folder).await;
            match read {
                Ok(profile) if !seen_ids.insert(profile.id.clone()) => {
                    let err = LoadoutError::Config(format!("duplicate profile id {}", profile.id));
                    skip_folder(&mut report, on_missing, folder, err)?;
                }
                Ok(profile) => {
                    debug!("Found profile '{}' ({})", profile.name, profile.id);
                    report.profiles.push(profile);
                }
                Err(e) => skip_folder(&mut report, on_missing, folder, e)?,
            }
        }

        info!(
            "Scanned {:?}: {} profiles, {} skipped",
            self.root,
            report.profiles.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    async fn read_profile_folder(&self, dir: &Path, folder: &str) -> LoadoutResult<Profile> {
        let files = list_files(dir).await?;
        let result = check(&files, &self.manager_files.required, &self.manager_files.optional);
        if !result.is_complete() {
            return Err(LoadoutError::MissingRequiredFiles {
                dir: dir.to_path_buf(),
                files: result.missing_required,
            });
        }

        let data = tokio::fs::read_to_string(dir.join(DESCRIPTOR_FILE)).await?;
        let profile: Profile = serde_json::from_str(&data)?;

        let expected = self.folder_name_for(&profile);
        if expected != folder {
            return Err(LoadoutError::Config(format!(
                "descriptor expects folder '{}'",
                expected
            )));
        }
        Ok(profile)
    }

    /// Copy the client's config files into a new folder for `profile`.
    ///
    /// Missing required files fail before the folder is created. Missing
    /// optional files are skipped. A copy failure removes the partial
    /// folder. The descriptor is written last.
    pub async fn import_from_external(&self, profile: &Profile) -> LoadoutResult<PathBuf> {
        let config_dir = self.validator.validate().await?;
        let present = self.client_files.filter(list_files(&config_dir).await?);

        let result = check(&present, &self.client_files.required, &self.client_files.optional);
        if !result.is_complete() {
            error!(
                "Client directory {:?} is missing required files: {:?}",
                config_dir, result.missing_required
            );
            return Err(LoadoutError::MissingRequiredFiles {
                dir: config_dir,
                files: result.missing_required,
            });
        }
        for file in &result.missing_optional {
            warn!("Optional file {} not present in {:?}, skipping", file, config_dir);
        }

        let folder = self.create_profile_folder(profile).await?;
        for file in self.client_files.all().filter(|f| present.contains(*f)) {
            let copied = self
                .transferer
                .copy(&config_dir.join(file), &folder.join(file))
                .await;
            if let Err(TransferError::CopyFailed {
                source_path,
                destination,
                cause,
            }) = copied
            {
                error!("Import of '{}' failed: {}", profile.name, cause);
                self.delete_profile_folder(profile).await;
                return Err(LoadoutError::ImportCopyFailed {
                    source_path,
                    destination,
                    cause,
                });
            }
        }

        if let Err(e) = self.write_descriptor(profile).await {
            self.delete_profile_folder(profile).await;
            return Err(e);
        }

        info!("Imported profile '{}' into {:?}", profile.name, folder);
        Ok(folder)
    }

    /// Copy a profile's files back over the client's config directory.
    pub async fn export_to_external(&self, profile: &Profile) -> LoadoutResult<ExportReport> {
        let config_dir = self.validator.validate().await?;
        let folder = self.profile_folder_path(profile).await?;
        let present = self.manager_files.filter(list_files(&folder).await?);

        let mut report = ExportReport::default();
        let result = check(&present, &self.manager_files.required, &self.manager_files.optional);
        for file in result
            .missing_required
            .into_iter()
            .chain(result.missing_optional)
        {
            warn!("Profile folder {:?} has no {}", folder, file);
            report.missing.push(file);
        }

        for file in self.client_files.all().filter(|f| present.contains(*f)) {
            match self
                .transferer
                .copy(&folder.join(file), &config_dir.join(file))
                .await
            {
                Ok(()) => report.copied.push(file.to_string()),
                Err(e) => {
                    error!("Export of {} failed: {}", file, e);
                    report.failed.push(FailedCopy {
                        file: file.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Exported profile '{}': {} copied, {} missing, {} failed",
            profile.name,
            report.copied.len(),
            report.missing.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Write the descriptor through a temp file renamed into place
    pub async fn write_descriptor(&self, profile: &Profile) -> LoadoutResult<()> {
        let folder = self.profile_folder_path(profile).await?;
        let json = serde_json::to_string_pretty(profile)?;

        let tmp = folder.join(format!(".{}.tmp", DESCRIPTOR_FILE));
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, folder.join(DESCRIPTOR_FILE)).await?;

        debug!("Wrote descriptor for '{}'", profile.name);
        Ok(())
    }
}

/// Record `folder` as skipped, or fail with `err` under `OnMissing::Abort`
fn skip_folder(
    report: &mut ScanReport,
    on_missing: OnMissing,
    folder: String,
    err: LoadoutError,
) -> LoadoutResult<()> {
    if on_missing == OnMissing::Abort {
        return Err(err);
    }
    warn!("Skipping {}: {}", folder, err);
    report.skipped.push(SkippedFolder {
        folder,
        reason: err.to_string(),
    });
    Ok(())
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Names of the files directly inside `dir`, following symlinks.
///
/// Dangling links are left out.
async fn list_files(dir: &Path) -> io::Result<HashSet<String>> {
    let mut names = HashSet::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        match tokio::fs::metadata(entry.path()).await {
            Ok(meta) if meta.is_file() => {
                names.insert(entry.file_name().to_string_lossy().into_owned());
            }
            Ok(_) => {}
            Err(e) => debug!("Ignoring unreadable entry {:?}: {}", entry.path(), e),
        }
    }
    Ok(names)
}
