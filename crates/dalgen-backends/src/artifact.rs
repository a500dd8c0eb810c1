use serde::{Deserialize, Serialize};

/// One named unit of generated text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artifact {
    /// File name the sink should use, unique within a run.
    pub name: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Lowercased entity name safe to use as an artifact file stem.
pub(crate) fn file_stem(entity_name: &str) -> String {
    entity_name
        .trim()
        .to_lowercase()
        .replace(char::is_whitespace, "_")
}
