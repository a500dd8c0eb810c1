use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::artifact::Artifact;
use crate::output::ArtifactSink;

/// Sink writing each artifact as a file under a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Create the sink, creating the root directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an artifact will be written to.
    pub fn path_for(&self, artifact: &Artifact) -> PathBuf {
        self.root.join(&artifact.name)
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, artifact: &Artifact) -> io::Result<u64> {
        fs::write(self.path_for(artifact), artifact.contents.as_bytes())?;
        Ok(artifact.contents.len() as u64)
    }
}
