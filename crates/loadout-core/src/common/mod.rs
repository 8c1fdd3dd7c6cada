//! Common Utilities
//!
//! Shared error handling, result alias, and path resolution.

pub mod error;
pub mod paths;
pub mod result;

pub use error::{ErrorCode, LoadoutError};
pub use paths::{default_root_dir, loadout_dir, settings_path, store_path};
pub use result::LoadoutResult;
