//! Manifest System
//!
//! Expected file lists and the checker that compares them with what is on disk.

pub mod checker;
pub mod types;

pub use checker::{check, CheckResult, OnMissing};
pub use types::{
    FileManifest, DESCRIPTOR_FILE, GAME_SETTINGS_FILE, KEYBINDINGS_FILE, PERSISTED_SETTINGS_FILE,
};
