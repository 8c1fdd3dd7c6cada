//! Configuration
//!
//! The persisted key-value store and the startup settings file.

pub mod settings;
pub mod store;

pub use settings::{Layout, Settings, CONFIG_SUBFOLDER, DEFAULT_PROFILE_LIMIT};
pub use store::{ConfigStore, JsonFileStore, MemoryStore, EXTERNAL_CONFIG_PATH_KEY};
