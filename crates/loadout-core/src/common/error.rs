//! Common Error Types
//!
//! Unified error handling with JSON-RPC error code mapping.

use std::path::PathBuf;

use crate::profiles::Violation;

/// JSON-RPC error codes
///
/// Standard codes: -32768 to -32000
/// Custom codes: -32099 to -32000
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Standard JSON-RPC errors
    ParseError = -32700,
    InvalidRequest = -32600,
    MethodNotFound = -32601,
    InvalidParams = -32602,
    InternalError = -32603,

    // Profile errors
    ProfileNotFound = -32010,
    CreationLimitReached = -32011,
    FolderNotFound = -32012,

    // External config directory errors
    PathNotConfigured = -32020,
    PathNotFound = -32021,
    RequiredSubfolderMissing = -32022,

    // Transfer errors
    MissingRequiredFiles = -32030,
    ImportCopyFailed = -32031,

    // Generic application error
    GenericError = -32000,
}

impl ErrorCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

/// Application error type.
///
/// Callers match on the variant; the message text is for humans only.
#[derive(Debug, thiserror::Error)]
pub enum LoadoutError {
    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    #[error("Profile not found with ID: {0}")]
    ProfileNotFound(String),

    #[error("Profiles limit reached: [{0}]")]
    CreationLimitReached(usize),

    #[error("No folder has been found for the given profile: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("The external config path has not been set")]
    PathNotConfigured,

    #[error("The folder given does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("The folder {} does not contain the required '{subfolder}' folder", .path.display())]
    RequiredSubfolderMissing { path: PathBuf, subfolder: String },

    #[error("The folder {} does not contain the required file(s): {}", .dir.display(), .files.join(", "))]
    MissingRequiredFiles { dir: PathBuf, files: Vec<String> },

    #[error(
        "Error copying file from {} to {}: {cause}",
        .source_path.display(),
        .destination.display()
    )]
    ImportCopyFailed {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LoadoutError {
    /// Convert to JSON-RPC error code
    pub fn code(&self) -> ErrorCode {
        match self {
            LoadoutError::Validation(_) => ErrorCode::InvalidParams,
            LoadoutError::ProfileNotFound(_) => ErrorCode::ProfileNotFound,
            LoadoutError::CreationLimitReached(_) => ErrorCode::CreationLimitReached,
            LoadoutError::FolderNotFound(_) => ErrorCode::FolderNotFound,
            LoadoutError::PathNotConfigured => ErrorCode::PathNotConfigured,
            LoadoutError::PathNotFound(_) => ErrorCode::PathNotFound,
            LoadoutError::RequiredSubfolderMissing { .. } => ErrorCode::RequiredSubfolderMissing,
            LoadoutError::MissingRequiredFiles { .. } => ErrorCode::MissingRequiredFiles,
            LoadoutError::ImportCopyFailed { .. } => ErrorCode::ImportCopyFailed,
            LoadoutError::Io(_) | LoadoutError::Config(_) => ErrorCode::GenericError,
            LoadoutError::Json(_) => ErrorCode::InternalError,
        }
    }

    /// Structured payload attached to the JSON-RPC error object, if any
    pub fn data(&self) -> Option<serde_json::Value> {
        match self {
            LoadoutError::Validation(violations) => Some(serde_json::json!({
                "violations": violations,
            })),
            LoadoutError::MissingRequiredFiles { dir, files } => Some(serde_json::json!({
                "dir": dir.display().to_string(),
                "files": files,
            })),
            LoadoutError::ImportCopyFailed {
                source_path,
                destination,
                ..
            } => Some(serde_json::json!({
                "source": source_path.display().to_string(),
                "destination": destination.display().to_string(),
            })),
            _ => None,
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
