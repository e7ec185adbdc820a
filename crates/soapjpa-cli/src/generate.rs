//! Generate command implementation

use crate::codegen::{entity, factory, fields};
use crate::project::Project;
use crate::writer::OutputWriter;
use anyhow::{Context, Result};
use soapjpa_core::{
    ArtifactKind, ClassGraph, ClassSet, GenerationReport, GeneratorConfig, LogLevel,
};
use soapjpa_logging::{LogSink, init_logging};
use std::path::PathBuf;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Command line values of `soapjpa generate`; each one overrides the project file
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub model: Option<String>,
    pub output: Option<String>,
    pub config: Option<String>,
    pub identity_name: Option<String>,
    pub identity_type: Option<String>,
    pub threads: Option<usize>,
    pub verbose: bool,
}

/// Everything a run needs once the project file and flags are merged
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub config: GeneratorConfig,
    pub model: PathBuf,
    pub output: PathBuf,
    pub log_level: LogLevel,
}

/// Merge the project file with the command line
pub fn settings(project: Project, options: &GenerateOptions) -> Result<RunSettings> {
    project.validate()?;
    let log_level = if options.verbose {
        LogLevel::Debug
    } else {
        project.log_level()?
    };

    let model = options
        .model
        .as_ref()
        .map(PathBuf::from)
        .or(project.paths.model)
        .context("No class model given: pass --model or set [paths] model")?;
    let output = options
        .output
        .as_ref()
        .map(PathBuf::from)
        .or(project.paths.output)
        .context("No output directory given: pass --output or set [paths] output")?;

    let mut config = project.generator;
    if let Some(name) = &options.identity_name {
        config.identity_field_name = name.clone();
    }
    if let Some(ty) = &options.identity_type {
        config.identity_field_type = ty.clone();
    }
    if let Some(threads) = options.threads {
        config.worker_threads = Some(threads);
    }
    if config.generation_date.is_none() {
        let now = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("Failed to format generation date")?;
        config.generation_date = Some(now);
    }
    config.validate().context("Invalid generator options")?;

    Ok(RunSettings {
        config,
        model,
        output,
        log_level,
    })
}

/// Plan the run and write every artifact below the writer's root
pub fn generate(
    classes: &ClassSet,
    config: &GeneratorConfig,
    writer: &OutputWriter,
) -> Result<GenerationReport> {
    let graph = ClassGraph::new(classes, config)?;
    let plan = graph.plan()?;

    let report = GenerationReport::new();
    report.add_warnings(plan.warnings.iter().cloned());

    tracing::info!("Generation of the JPA objects...");
    for context in &plan.entities {
        let outcome =
            writer.write_if_absent(&entity::source_file(context), || entity::render_entity(context))?;
        report.record(ArtifactKind::Entity, outcome);
    }
    log_counts(&report, ArtifactKind::Entity);

    tracing::info!("Generation of the Field objects...");
    let provider = &plan.field_provider;
    let outcome = writer.write(
        &factory::field_provider_file(provider),
        &factory::render_field_provider(provider),
    )?;
    report.record(ArtifactKind::FieldProvider, outcome);

    for context in &plan.fields {
        let outcome =
            writer.write_if_absent(&fields::source_file(context), || fields::render_fields(context))?;
        report.record(ArtifactKind::Fields, outcome);
    }
    log_counts(&report, ArtifactKind::Fields);

    let outcome = writer.write(
        &factory::factory_file(&plan.factory),
        &factory::render_factory(&plan.factory),
    )?;
    report.record(ArtifactKind::Factory, outcome);

    Ok(report)
}

fn log_counts(report: &GenerationReport, kind: ArtifactKind) {
    let counts = report.counts(kind);
    tracing::info!(
        "{} files were generated and {} were skipped",
        counts.created,
        counts.skipped
    );
}

/// Generate command entry point
pub fn run(options: GenerateOptions) -> Result<()> {
    let project = Project::load(options.config.as_deref())?;
    let settings = settings(project, &options)?;

    init_logging(settings.log_level);

    let classes = ClassSet::from_file(&settings.model)
        .with_context(|| format!("Failed to load class model: {:?}", settings.model))?;

    let writer = OutputWriter::new(&settings.output);
    tracing::info!(
        "Directory for generated JPA files: {}",
        writer.root().display()
    );
    tracing::info!(
        "Factory will be placed to the package: {}",
        settings.config.factory_package
    );

    let report = generate(&classes, &settings.config, &writer)?;

    let entities = report.counts(ArtifactKind::Entity);
    let fields = report.counts(ArtifactKind::Fields);
    let total = report.total();
    println!(
        "✓ Entities: {} generated, {} skipped",
        entities.created, entities.skipped
    );
    println!(
        "✓ Field interfaces: {} generated, {} skipped",
        fields.created, fields.skipped
    );
    println!("✓ Files written: {}", total.created);

    println!("✓ Model warnings: {}", report.warnings().len());

    let logged = LogSink::global().drain();
    if !logged.is_empty() {
        println!("\nCaptured {} log warnings:", logged.len());
        for record in &logged {
            println!("  ⚠ {}", record.message);
        }
    }

    Ok(())
}
