//! Profiles
//!
//! The profile model, its request DTOs and the in-memory registry.

pub mod dto;
pub mod registry;

use serde::{Deserialize, Serialize};

pub use dto::{CreateProfileDto, UpdateProfileDto, Violation};
pub use registry::{FolderOpener, OpenFolderOpener, ProfileRegistry};

/// Color used when a request or descriptor does not carry one
pub const DEFAULT_COLOR: &str = "#FFFFFF";

/// Longest accepted profile name, in characters
pub const MAX_NAME_LEN: usize = 20;

/// Exact length of a color token (`#RRGGBB`)
pub const COLOR_LEN: usize = 7;

/// A saved snapshot of the client's configuration files.
///
/// Serialized as the `profileDetails.json` descriptor and as RPC results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(rename = "isFavorite", alias = "isFav", default)]
    pub is_favorite: bool,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_shape() {
        let profile = Profile {
            id: "abc".into(),
            name: "Ranked".into(),
            color: "#FF0000".into(),
            is_favorite: true,
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            value,
            json!({ "id": "abc", "name": "Ranked", "color": "#FF0000", "isFavorite": true })
        );
    }

    #[test]
    fn test_legacy_key_and_default_color() {
        let profile: Profile =
            serde_json::from_value(json!({ "id": "abc", "name": "Old", "isFav": true })).unwrap();
        assert!(profile.is_favorite);
        assert_eq!(profile.color, DEFAULT_COLOR);
    }
}
