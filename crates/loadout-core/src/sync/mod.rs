//! Profile/Folder Synchronization
//!
//! Moves client config files between the live external directory and
//! per-profile folders under the root archive directory.

pub mod store;
pub mod transfer;
pub mod validator;

pub use store::{ExportReport, FailedCopy, ProfileStore, ScanReport, SkippedFolder};
pub use transfer::{FileTransferer, TransferError};
pub use validator::PathValidator;
