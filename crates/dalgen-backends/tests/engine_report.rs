use std::io;

use dalgen_backends::{
    AlwaysConfirm, AlwaysDecline, Artifact, ArtifactSink, GenerationEngine, GenerationOutcome,
    MemorySink, TargetStatus,
};
use dalgen_core::{Attribute, Entity, LogicalType, Target, ValidationFailure};

fn customer() -> Entity {
    Entity {
        name: "Customer".to_string(),
        database_name: String::new(),
        schema_name: String::new(),
        namespace: String::new(),
        attributes: vec![
            Attribute {
                name: "Id".to_string(),
                data_type: LogicalType::Integer,
                size: None,
                is_primary_key: true,
                auto_increment: true,
                is_foreign_key: false,
                reference: None,
            },
            Attribute {
                name: "Name".to_string(),
                data_type: LogicalType::Text,
                size: Some(50),
                is_primary_key: false,
                auto_increment: false,
                is_foreign_key: false,
                reference: None,
            },
        ],
    }
}

fn keyless(entity: &Entity) -> Entity {
    let mut entity = entity.clone();
    for attribute in &mut entity.attributes {
        attribute.is_primary_key = false;
        attribute.auto_increment = false;
    }
    entity
}

/// Sink that rejects artifacts whose name matches a suffix.
struct RejectingSink {
    inner: MemorySink,
    reject_suffix: &'static str,
}

impl ArtifactSink for RejectingSink {
    fn write(&mut self, artifact: &Artifact) -> io::Result<u64> {
        if artifact.name.ends_with(self.reject_suffix) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        }
        self.inner.write(artifact)
    }
}

#[test]
fn empty_target_set_touches_nothing() {
    let engine = GenerationEngine::new();
    let mut sink = MemorySink::new();

    let outcome = engine
        .run(&customer(), &[], &mut sink, &AlwaysConfirm)
        .expect("engine run");

    assert!(matches!(
        outcome,
        GenerationOutcome::Invalid(ValidationFailure::NoOutput)
    ));
    assert!(sink.artifacts().is_empty());
}

#[test]
fn invalid_attribute_produces_no_artifacts() {
    let mut entity = customer();
    entity.attributes[1].name = String::new();
    let engine = GenerationEngine::new();
    let mut sink = MemorySink::new();

    let outcome = engine
        .run(&entity, &[Target::Tsql], &mut sink, &AlwaysConfirm)
        .expect("engine run");

    assert!(matches!(
        outcome,
        GenerationOutcome::Invalid(ValidationFailure::InvalidAttributeName { index: 1 })
    ));
    assert!(sink.artifacts().is_empty());
}

#[test]
fn unregistered_target_is_skipped_without_poisoning_siblings() {
    // Scenario: TSQL plus Oracle, where Oracle has no template.
    let engine = GenerationEngine::new();
    let mut sink = MemorySink::new();

    let outcome = engine
        .run(
            &customer(),
            &[Target::Tsql, Target::Oracle],
            &mut sink,
            &AlwaysConfirm,
        )
        .expect("engine run");

    let GenerationOutcome::Completed(report) = outcome else {
        panic!("expected completed outcome");
    };

    assert!(report.success);
    assert_eq!(report.targets.len(), 2);
    assert_eq!(report.targets[0].target, Target::Tsql);
    assert!(matches!(
        report.targets[0].status,
        TargetStatus::Generated { .. }
    ));
    assert_eq!(report.targets[1].target, Target::Oracle);
    assert_eq!(report.targets[1].status, TargetStatus::SkippedUnimplemented);
    // Table plus four procedures from TSQL alone.
    assert_eq!(report.artifacts_written.len(), 5);
}

#[test]
fn declined_keyless_advisory_cancels_with_no_writes() {
    let engine = GenerationEngine::new();
    let mut sink = MemorySink::new();

    let outcome = engine
        .run(
            &keyless(&customer()),
            &[Target::Tsql],
            &mut sink,
            &AlwaysDecline,
        )
        .expect("engine run");

    assert!(matches!(outcome, GenerationOutcome::Cancelled));
    assert!(sink.artifacts().is_empty());
}

#[test]
fn confirmed_keyless_generation_is_structural_only() {
    // Scenario: keyless entity, TSQL and PHP confirmed, only the table and
    // class artifacts come out.
    let engine = GenerationEngine::new();
    let mut sink = MemorySink::new();

    let outcome = engine
        .run(
            &keyless(&customer()),
            &[Target::Tsql, Target::Php],
            &mut sink,
            &AlwaysConfirm,
        )
        .expect("engine run");

    let GenerationOutcome::Completed(report) = outcome else {
        panic!("expected completed outcome");
    };

    assert!(report.success);
    assert_eq!(report.generated_count(), 2);
    assert_eq!(
        report.artifacts_written,
        vec![
            "customer_create_table.sql".to_string(),
            "customer.class.php".to_string()
        ]
    );
    for artifact in sink.artifacts() {
        assert!(
            !artifact.name.contains("insert")
                && !artifact.name.contains("select")
                && !artifact.name.contains("update")
                && !artifact.name.contains("delete")
                && !artifact.name.contains("dal"),
            "unexpected keyed artifact {}",
            artifact.name
        );
    }
}

#[test]
fn sink_failure_is_scoped_to_its_target() {
    let engine = GenerationEngine::new();
    let mut sink = RejectingSink {
        inner: MemorySink::new(),
        reject_suffix: ".php",
    };

    let outcome = engine
        .run(
            &customer(),
            &[Target::Php, Target::Tsql],
            &mut sink,
            &AlwaysConfirm,
        )
        .expect("engine run");

    let GenerationOutcome::Completed(report) = outcome else {
        panic!("expected completed outcome");
    };

    // PHP failed at its first artifact, TSQL still ran to completion.
    assert!(!report.success);
    assert!(matches!(
        report.targets[0].status,
        TargetStatus::SinkFailed { .. }
    ));
    assert!(matches!(
        report.targets[1].status,
        TargetStatus::Generated { .. }
    ));
    assert_eq!(report.artifacts_written.len(), 5);
    assert!(
        report
            .artifacts_written
            .iter()
            .all(|name| name.ends_with(".sql"))
    );
}

#[test]
fn duplicate_targets_simply_run_twice() {
    // Deduplication is the boundary's business; the engine honors the list.
    let engine = GenerationEngine::new();
    let mut sink = MemorySink::new();

    let outcome = engine
        .run(
            &customer(),
            &[Target::Tsql, Target::Tsql],
            &mut sink,
            &AlwaysConfirm,
        )
        .expect("engine run");

    let GenerationOutcome::Completed(report) = outcome else {
        panic!("expected completed outcome");
    };
    assert_eq!(report.generated_count(), 2);
}
