//! Dialect backends and the generation engine for dalgen.
//!
//! This crate turns a validated entity description into named text
//! artifacts: one template per output target, a registry dispatching over
//! them, and an engine orchestrating validation, the keyless advisory, and
//! sink writes.

pub mod artifact;
pub mod engine;
pub mod errors;
pub mod mysql;
pub mod output;
pub mod php;
pub mod report;
pub mod template;
pub mod tsql;

pub use artifact::Artifact;
pub use engine::{
    AlwaysConfirm, AlwaysDecline, GenerationEngine, GenerationOutcome, KeylessPrompt,
};
pub use errors::GenerationError;
pub use output::{ArtifactSink, MemorySink, fs::DirectorySink};
pub use report::{GenerationReport, TargetReport, TargetStatus};
pub use template::{DialectTemplate, TemplateRegistry};
