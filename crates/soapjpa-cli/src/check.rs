//! Check command implementation

use crate::project::{DEFAULT_PROJECT_FILE, Project};
use anyhow::{Context, Result};
use soapjpa_core::{ClassGraph, ClassSet, Diagnostics, FieldMap, GeneratorConfig, LogLevel, Warning};
use soapjpa_logging::init_logging;
use std::path::PathBuf;

/// What `check` found in a class model
#[derive(Debug)]
pub struct ModelSummary {
    pub classes: usize,
    pub entities: usize,
    pub top_level: usize,
    pub field_providers: usize,

    /// Field map of the class asked for with `--class`
    pub field_map: Option<FieldMap>,
    pub warnings: Vec<Warning>,
}

/// Build the lookup tables of `classes`, and optionally resolve one class
pub fn summarize(
    classes: &ClassSet,
    config: &GeneratorConfig,
    class: Option<&str>,
) -> Result<ModelSummary> {
    let graph = ClassGraph::new(classes, config)?;
    let mut diagnostics = Diagnostics::new();

    let field_map = match class {
        Some(name) => {
            let class = graph.class(name)?;
            Some(graph.field_map(class, &mut diagnostics)?)
        }
        None => None,
    };

    Ok(ModelSummary {
        classes: classes.len(),
        entities: graph.targets().len(),
        top_level: graph.roots().len(),
        field_providers: graph.field_providers().len(),
        field_map,
        warnings: diagnostics.into_warnings(),
    })
}

/// Check command entry point
pub fn run(config: Option<String>, model: Option<String>, class: Option<String>) -> Result<()> {
    init_logging(LogLevel::Warn);

    let path = config.as_deref().unwrap_or(DEFAULT_PROJECT_FILE);
    println!("Checking project: {path}");

    let project = Project::load(config.as_deref())?;
    project.validate()?;

    let generator = &project.generator;
    println!(
        "✓ Identity: {} ({})",
        generator.identity_field_name, generator.identity_field_type
    );
    println!(
        "✓ Suffixes: entity {}, fields {}",
        generator.entity_suffix, generator.fields_suffix
    );

    let model = model.map(PathBuf::from).or_else(|| project.paths.model.clone());
    if let Some(model) = model {
        let classes = ClassSet::from_file(&model)
            .with_context(|| format!("Failed to load class model: {model:?}"))?;
        let summary = summarize(&classes, generator, class.as_deref())?;

        println!("✓ Classes: {}", summary.classes);
        println!(
            "✓ Entities: {} ({} top-level)",
            summary.entities, summary.top_level
        );
        println!("✓ Field providers: {}", summary.field_providers);

        if let Some(fields) = &summary.field_map {
            println!("{}", serde_json::to_string_pretty(fields)?);
        }
        for warning in &summary.warnings {
            println!("⚠ {warning}");
        }
    } else if class.is_some() {
        anyhow::bail!("--class needs a class model: pass --model or set [paths] model");
    }

    println!("\nProject is valid!");

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::fixtures::{config, offer_set};
    use soapjpa_core::{FieldKind, GenerationError};

    #[test]
    fn summarize___counts_tables() {
        let summary = summarize(&offer_set(), &config(), None).unwrap();

        assert_eq!(summary.classes, 6);
        assert_eq!(summary.entities, 5);
        assert_eq!(summary.top_level, 3);
        assert_eq!(summary.field_providers, 5);
        assert!(summary.field_map.is_none());
    }

    #[test]
    fn summarize___resolves_requested_class() {
        let summary = summarize(&offer_set(), &config(), Some("com.pi.Offer$Item")).unwrap();

        let fields = summary.field_map.unwrap();
        let keys: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["amount", "label"]);
        assert_eq!(fields["amount"].kind, FieldKind::Primitive);
    }

    #[test]
    fn summarize___unknown_class_fails() {
        let err = summarize(&offer_set(), &config(), Some("com.pi.Nope")).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GenerationError>(),
            Some(GenerationError::UnknownClass(name)) if name == "com.pi.Nope"
        ));
    }
}
