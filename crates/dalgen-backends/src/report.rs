use serde::{Deserialize, Serialize};

use dalgen_core::Target;

/// Outcome of one requested target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetStatus {
    /// The template ran and every artifact reached the sink.
    Generated { artifacts: Vec<String> },
    /// The target is recognized but has no registered template.
    SkippedUnimplemented,
    /// The sink rejected an artifact for this target.
    SinkFailed { error: String },
}

/// Per-target entry in a generation report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetReport {
    pub target: Target,
    #[serde(flatten)]
    pub status: TargetStatus,
}

/// Report for one generation run.
///
/// Partial success is normal: skipped targets never poison siblings, and a
/// sink failure is recorded against its own target only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationReport {
    /// True when at least one target generated and no sink write failed.
    pub success: bool,
    pub targets: Vec<TargetReport>,
    /// Names of artifacts written through the sink, in write order.
    pub artifacts_written: Vec<String>,
}

impl GenerationReport {
    pub fn record(&mut self, target: Target, status: TargetStatus) {
        self.targets.push(TargetReport { target, status });
    }

    /// Number of targets that generated completely.
    pub fn generated_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|entry| matches!(entry.status, TargetStatus::Generated { .. }))
            .count()
    }

    pub fn has_sink_failure(&self) -> bool {
        self.targets
            .iter()
            .any(|entry| matches!(entry.status, TargetStatus::SinkFailed { .. }))
    }
}
