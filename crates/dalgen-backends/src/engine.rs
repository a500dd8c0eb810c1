use tracing::{info, warn};

use dalgen_core::{Entity, Target, ValidationFailure, validate};

use crate::errors::GenerationError;
use crate::output::ArtifactSink;
use crate::report::{GenerationReport, TargetStatus};
use crate::template::TemplateRegistry;

/// Caller-supplied decision point for entities without a primary key.
///
/// Without a primary key the keyed CRUD artifacts cannot exist, so the
/// engine asks before continuing with structural artifacts only.
pub trait KeylessPrompt {
    /// Whether to continue with degraded, structural-only generation.
    fn confirm_keyless(&self, entity: &Entity) -> bool;
}

/// Prompt that always confirms degraded generation.
pub struct AlwaysConfirm;

impl KeylessPrompt for AlwaysConfirm {
    fn confirm_keyless(&self, _entity: &Entity) -> bool {
        true
    }
}

/// Prompt that always declines degraded generation.
pub struct AlwaysDecline;

impl KeylessPrompt for AlwaysDecline {
    fn confirm_keyless(&self, _entity: &Entity) -> bool {
        false
    }
}

/// Result of a generation run.
///
/// Validation failures and a declined keyless advisory are ordinary values,
/// not errors; [`GenerationError`] is reserved for contract violations.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// Validation failed; nothing was generated or written.
    Invalid(ValidationFailure),
    /// The keyless advisory was declined; nothing was written.
    Cancelled,
    /// Generation ran; the report carries per-target outcomes.
    Completed(GenerationReport),
}

/// Orchestrates validation, template dispatch, and sink writes.
pub struct GenerationEngine {
    registry: TemplateRegistry,
}

impl GenerationEngine {
    pub fn new() -> Self {
        Self {
            registry: TemplateRegistry::new(),
        }
    }

    pub fn with_registry(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Run one generation request against a frozen entity snapshot.
    ///
    /// Targets run sequentially in request order. An unregistered target is
    /// skipped and recorded; a sink failure is recorded against its target
    /// and remaining targets still run.
    pub fn run(
        &self,
        entity: &Entity,
        targets: &[Target],
        sink: &mut dyn ArtifactSink,
        prompt: &dyn KeylessPrompt,
    ) -> Result<GenerationOutcome, GenerationError> {
        if let Err(failure) = validate(entity, targets) {
            info!(entity = %entity.name, failure = %failure, "validation failed");
            return Ok(GenerationOutcome::Invalid(failure));
        }

        if !entity.has_primary_key() {
            if !prompt.confirm_keyless(entity) {
                info!(entity = %entity.name, "keyless generation declined");
                return Ok(GenerationOutcome::Cancelled);
            }
            warn!(
                entity = %entity.name,
                "no primary key, continuing with structural artifacts only"
            );
        }

        info!(entity = %entity.name, targets = targets.len(), "generation started");

        let mut report = GenerationReport::default();
        for &target in targets {
            let Some(template) = self.registry.resolve(target) else {
                warn!(target = target.label(), "no template registered, skipping");
                report.record(target, TargetStatus::SkippedUnimplemented);
                continue;
            };

            let artifacts = template.generate_content(entity)?;
            info!(
                target = target.label(),
                artifacts = artifacts.len(),
                "artifacts generated"
            );

            let mut written = Vec::with_capacity(artifacts.len());
            let mut sink_error = None;
            for artifact in &artifacts {
                match sink.write(artifact) {
                    Ok(bytes) => {
                        info!(
                            target = target.label(),
                            artifact = %artifact.name,
                            bytes,
                            "artifact written"
                        );
                        written.push(artifact.name.clone());
                    }
                    Err(err) => {
                        warn!(
                            target = target.label(),
                            artifact = %artifact.name,
                            error = %err,
                            "sink write failed"
                        );
                        sink_error = Some(err.to_string());
                        break;
                    }
                }
            }

            report.artifacts_written.extend(written.iter().cloned());
            match sink_error {
                Some(error) => report.record(target, TargetStatus::SinkFailed { error }),
                None => report.record(target, TargetStatus::Generated { artifacts: written }),
            }
        }

        report.success = report.generated_count() > 0 && !report.has_sink_failure();
        info!(
            entity = %entity.name,
            success = report.success,
            artifacts = report.artifacts_written.len(),
            "generation finished"
        );

        Ok(GenerationOutcome::Completed(report))
    }
}

impl Default for GenerationEngine {
    fn default() -> Self {
        Self::new()
    }
}
