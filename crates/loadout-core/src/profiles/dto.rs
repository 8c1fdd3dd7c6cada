//! Request DTOs
//!
//! Plain input structs with explicit validation. Validation returns every
//! violation at once; an empty list means the input is acceptable.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{COLOR_LEN, MAX_NAME_LEN};

/// One failed field constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileDto {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

impl CreateProfileDto {
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        check_name(&self.name, &mut violations);
        if let Some(color) = &self.color {
            check_color(color, &mut violations);
        }
        violations
    }
}

/// Partial update; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

impl UpdateProfileDto {
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut violations);
        }
        if let Some(color) = &self.color {
            check_color(color, &mut violations);
        }
        violations
    }
}

// Not allowed in folder names on Windows
const FORBIDDEN_NAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

fn check_name(name: &str, violations: &mut Vec<Violation>) {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        violations.push(Violation::new(
            "name",
            format!("must be between 1 and {} characters", MAX_NAME_LEN),
        ));
    }
    if name.chars().any(|c| FORBIDDEN_NAME_CHARS.contains(&c) || c.is_control()) {
        violations.push(Violation::new(
            "name",
            "must not contain path separators or reserved characters",
        ));
    }
    if name == "." || name == ".." {
        violations.push(Violation::new("name", "must not be a relative path component"));
    }
}

fn check_color(color: &str, violations: &mut Vec<Violation>) {
    if color.chars().count() != COLOR_LEN {
        violations.push(Violation::new(
            "color",
            format!("must be exactly {} characters", COLOR_LEN),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str) -> CreateProfileDto {
        CreateProfileDto {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(create("a").validate().is_empty());
        assert!(create(&"x".repeat(20)).validate().is_empty());
        assert_eq!(create("").validate()[0].field, "name");
        assert!(!create(&"x".repeat(21)).validate().is_empty());
        // counted in characters, not bytes
        assert!(create(&"é".repeat(20)).validate().is_empty());
    }

    #[test]
    fn test_name_rejects_separators() {
        assert!(!create("a/b").validate().is_empty());
        assert!(!create("a\\b").validate().is_empty());
        assert!(!create("..").validate().is_empty());
    }

    #[test]
    fn test_color_length() {
        let mut dto = create("Ranked");
        dto.color = Some("#FFF".into());
        assert_eq!(dto.validate()[0].field, "color");
        dto.color = Some("#A1B2C3".into());
        assert!(dto.validate().is_empty());
    }

    #[test]
    fn test_update_checks_only_present_fields() {
        assert!(UpdateProfileDto::default().validate().is_empty());
        let dto = UpdateProfileDto {
            name: Some(String::new()),
            color: Some("red".into()),
            is_favorite: None,
        };
        assert_eq!(dto.validate().len(), 2);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let dto: UpdateProfileDto =
            serde_json::from_str(r#"{ "isFavorite": true }"#).unwrap();
        assert_eq!(dto.is_favorite, Some(true));
        assert!(dto.name.is_none());
    }
}
