//! Loadout core library
//!
//! Saves snapshots of a game client's configuration files as named
//! profiles and copies them back on demand.

pub mod common;
pub mod config;
pub mod manifest;
pub mod profiles;
pub mod rpc;
pub mod sync;

pub use common::{ErrorCode, LoadoutError, LoadoutResult};
pub use config::{ConfigStore, JsonFileStore, Layout, MemoryStore, Settings};
pub use profiles::{CreateProfileDto, Profile, ProfileRegistry, UpdateProfileDto};
pub use rpc::Dispatcher;
pub use sync::{ExportReport, ProfileStore, ScanReport};
