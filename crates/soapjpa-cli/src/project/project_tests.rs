#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

// Project parsing tests

#[test]
fn Project___from_str___parses_valid_toml() {
    let toml = r#"
[generator]
identity_field_name = "ID"
identity_field_type = "java.lang.Integer"
forbidden_suffixes = ["ObjectFactory", "Impl"]
factory_package = "com.pi.factory"
worker_threads = 4
log_level = "debug"

[paths]
model = "target/stubs.json"
output = "target/generated-sources/jpa"
"#;

    let project = Project::from_str(toml).unwrap();

    assert_eq!(project.generator.identity_field_name, "ID");
    assert_eq!(project.generator.identity_field_type, "java.lang.Integer");
    assert_eq!(project.generator.forbidden_suffixes, vec!["ObjectFactory", "Impl"]);
    assert_eq!(project.generator.factory_package, "com.pi.factory");
    assert_eq!(project.generator.worker_threads, Some(4));
    assert_eq!(project.paths.model, Some(PathBuf::from("target/stubs.json")));
    assert_eq!(
        project.paths.output,
        Some(PathBuf::from("target/generated-sources/jpa"))
    );
}

#[test]
fn Project___from_str___missing_keys_use_defaults() {
    let toml = r#"
[generator]
entity_suffix = "Entity"
"#;

    let project = Project::from_str(toml).unwrap();

    assert_eq!(project.generator.entity_suffix, "Entity");
    assert_eq!(project.generator.identity_field_name, "id");
    assert_eq!(project.generator.fields_suffix, "Fields");
    assert!(project.paths.model.is_none());
}

#[test]
fn Project___from_str___empty_document_is_default() {
    let project = Project::from_str("").unwrap();

    assert_eq!(project.generator.entity_suffix, "JPA");
    assert!(project.generator.generation_date.is_none());
}

#[test]
fn Project___from_str___invalid_toml_fails() {
    let result = Project::from_str("[generator\nidentity_field_name = ");

    assert!(result.is_err());
}

#[test]
fn Project___from_file___missing_file_fails() {
    let dir = TempDir::new().unwrap();

    let result = Project::from_file(dir.path().join("soapjpa.toml"));

    assert!(result.is_err());
}

#[test]
fn Project___from_file___reads_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("soapjpa.toml");
    std::fs::write(&path, "[paths]\noutput = \"out\"\n").unwrap();

    let project = Project::from_file(&path).unwrap();

    assert_eq!(project.paths.output, Some(PathBuf::from("out")));
}

// Project validation tests

#[test]
fn Project___validate___accepts_defaults() {
    assert!(Project::default().validate().is_ok());
}

#[test]
fn Project___validate___rejects_unsupported_identity_type() {
    let project = Project::from_str(
        r#"
[generator]
identity_field_type = "java.util.UUID"
"#,
    )
    .unwrap();

    let err = project.validate().unwrap_err();

    assert!(format!("{err:#}").contains("unsupported identity field type"));
}

#[test]
fn Project___validate___rejects_unknown_log_level() {
    let project = Project::from_str("[generator]\nlog_level = \"chatty\"\n").unwrap();

    assert!(project.validate().is_err());
}

#[test]
fn Project___validate___rejects_empty_output_path() {
    let project = Project::from_str("[paths]\noutput = \"\"\n").unwrap();

    assert!(project.validate().is_err());
}

#[test]
fn Project___log_level___parses_name() {
    let project = Project::from_str("[generator]\nlog_level = \"WARN\"\n").unwrap();

    assert_eq!(project.log_level().unwrap(), LogLevel::Warn);
}
