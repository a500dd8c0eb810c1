use std::fs;
use std::path::Path;

use dalgen_core::Entity;
use thiserror::Error;

/// Errors loading an entity description file.
#[derive(Debug, Error)]
pub enum EntityFileError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid entity json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid entity toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported entity file extension '{0}', expected .json or .toml")]
    UnsupportedExtension(String),
}

/// Load an entity description from a JSON or TOML file, chosen by extension.
pub fn load_entity(path: &Path) -> Result<Entity, EntityFileError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let contents = fs::read_to_string(path).map_err(|source| EntityFileError::Io {
        path: path.display().to_string(),
        source,
    })?;

    match extension.as_str() {
        "json" => Ok(serde_json::from_str(&contents)?),
        "toml" => Ok(toml::from_str(&contents)?),
        other => Err(EntityFileError::UnsupportedExtension(other.to_string())),
    }
}
