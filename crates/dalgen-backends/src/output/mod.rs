pub mod fs;

use std::io;

use crate::artifact::Artifact;

/// Destination for generated artifacts.
///
/// The sink owns physical placement and may fail per artifact; templates
/// never see it and the engine records failures instead of retrying.
pub trait ArtifactSink {
    /// Persist one artifact, returning the bytes written.
    fn write(&mut self, artifact: &Artifact) -> io::Result<u64>;
}

/// Sink collecting artifacts in memory, for tests and embedders.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Vec<Artifact>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, artifact: &Artifact) -> io::Result<u64> {
        self.artifacts.push(artifact.clone());
        Ok(artifact.contents.len() as u64)
    }
}
