use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Suffix appended to a category name to form its file name.
pub const RESPONSES_FILE_SUFFIX: &str = "_responses.json";

/// Stored documents carry no schema; whatever JSON the client posted is kept.
pub type ResponseDocument = serde_json::Value;

/// One sample of a density curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Validated `type` value naming a response category.
///
/// The key is used verbatim as a file name prefix, so anything that could
/// escape the data directory is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::validation("Type parameter is required"));
        }
        if raw.contains(['/', '\\', '\0']) || raw == "." || raw == ".." {
            return Err(DomainError::validation(format!(
                "invalid type parameter `{raw}`"
            )));
        }
        Ok(Self(raw))
    }

    /// Parse an optional query value, treating absence like an empty value.
    pub fn from_query(raw: Option<&str>) -> Result<Self, DomainError> {
        Self::parse(raw.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}{}", self.0, RESPONSES_FILE_SUFFIX)
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
