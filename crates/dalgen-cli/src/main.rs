mod entity_file;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use schemars::schema_for;
use thiserror::Error;

use dalgen_backends::{
    AlwaysConfirm, AlwaysDecline, DirectorySink, GenerationEngine, GenerationError,
    GenerationOutcome, KeylessPrompt, TargetStatus,
};
use dalgen_core::{Entity, Target};

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("entity file error: {0}")]
    EntityFile(#[from] entity_file::EntityFileError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "dalgen", version, about = "Table and DAL artifact generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate artifacts for an entity description.
    Generate(GenerateArgs),
    /// List known targets and whether a backend is registered.
    Targets,
    /// Print the JSON Schema for entity description files.
    EntitySchema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Entity description file (.json or .toml).
    entity: PathBuf,
    /// Output target(s), e.g. tsql, mysql, php. Repeatable.
    #[arg(long = "target", value_name = "TARGET", required = true)]
    targets: Vec<String>,
    /// Directory artifacts are written to.
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// Continue with structural artifacts when the entity has no primary key.
    #[arg(long, default_value_t = false)]
    allow_keyless: bool,
    /// Optional path for a JSON generation report.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Targets => run_targets(),
        Command::EntitySchema => run_entity_schema(),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<ExitCode, CliError> {
    let entity = entity_file::load_entity(&args.entity)?;
    let targets = parse_targets(&args.targets)?;

    let mut sink = DirectorySink::new(&args.out)?;
    let engine = GenerationEngine::new();
    let prompt: &dyn KeylessPrompt = if args.allow_keyless {
        &AlwaysConfirm
    } else {
        &AlwaysDecline
    };

    let outcome = engine.run(&entity, &targets, &mut sink, prompt)?;
    match outcome {
        GenerationOutcome::Invalid(failure) => {
            eprintln!("input validation error: {failure}");
            Ok(ExitCode::FAILURE)
        }
        GenerationOutcome::Cancelled => {
            eprintln!(
                "entity '{}' has no primary key; keyed CRUD artifacts cannot be generated. \
Re-run with --allow-keyless to generate structural artifacts only.",
                entity.name
            );
            Ok(ExitCode::SUCCESS)
        }
        GenerationOutcome::Completed(report) => {
            for entry in &report.targets {
                match &entry.status {
                    TargetStatus::Generated { artifacts } => {
                        println!("{}: generated {} artifact(s)", entry.target, artifacts.len());
                    }
                    TargetStatus::SkippedUnimplemented => {
                        println!("{}: skipped (no backend implemented)", entry.target);
                    }
                    TargetStatus::SinkFailed { error } => {
                        println!("{}: sink failed ({error})", entry.target);
                    }
                }
            }
            println!(
                "{} artifact(s) written to {}",
                report.artifacts_written.len(),
                args.out.display()
            );

            if let Some(path) = &args.report {
                std::fs::write(path, serde_json::to_vec_pretty(&report)?)?;
            }

            Ok(if report.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn run_targets() -> Result<ExitCode, CliError> {
    let registry = GenerationEngine::new();
    let registered = registry.registry().registered_targets();

    for target in Target::ALL {
        let kind = if target.is_sql_dialect() {
            "sql dialect"
        } else {
            "dal language"
        };
        let status = if registered.contains(&target) {
            "implemented"
        } else {
            "not implemented"
        };
        println!("{:<8} {kind:<12} {status}", target.label());
    }

    Ok(ExitCode::SUCCESS)
}

fn run_entity_schema() -> Result<ExitCode, CliError> {
    let schema = schema_for!(Entity);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(ExitCode::SUCCESS)
}

/// Parse and de-duplicate target flags, preserving request order.
fn parse_targets(raw: &[String]) -> Result<Vec<Target>, CliError> {
    let mut targets = Vec::new();
    for value in raw {
        let target: Target = value
            .parse()
            .map_err(|err| CliError::InvalidConfig(format!("{err}")))?;
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::parse_targets;
    use dalgen_core::Target;

    #[test]
    fn parse_targets_dedupes_and_preserves_order() {
        let raw = vec![
            "mysql".to_string(),
            "tsql".to_string(),
            "mysql".to_string(),
        ];
        let targets = parse_targets(&raw).expect("parse targets");
        assert_eq!(targets, vec![Target::MySql, Target::Tsql]);
    }

    #[test]
    fn parse_targets_rejects_unknown_identifiers() {
        let raw = vec!["sqlite".to_string()];
        assert!(parse_targets(&raw).is_err());
    }
}
