//! Generator configuration

use crate::cast::CastType;
use crate::error::{GenerationError, GenerationResult};
use crate::resolver::is_primitive;
use serde::{Deserialize, Serialize};

/// Configuration for one generation run
///
/// Every value is threaded explicitly through [`ClassGraph`](crate::ClassGraph);
/// nothing is read from process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Field name treated as the entity identity (matched case-insensitively)
    #[serde(default = "default_identity_field_name")]
    pub identity_field_name: String,

    /// Fully qualified type of the identity field in generated entities
    #[serde(default = "default_identity_field_type")]
    pub identity_field_type: String,

    /// Classes whose simple name ends with one of these are never generated
    #[serde(default = "default_forbidden_suffixes")]
    pub forbidden_suffixes: Vec<String>,

    /// Suffix appended to every generated entity name
    #[serde(default = "default_entity_suffix")]
    pub entity_suffix: String,

    /// Suffix appended to every generated field-constant interface
    #[serde(default = "default_fields_suffix")]
    pub fields_suffix: String,

    /// Package of the generated entity factory
    #[serde(default = "default_factory_package")]
    pub factory_package: String,

    /// Package of the field provider interface
    #[serde(default = "default_fields_package")]
    pub fields_package: String,

    /// Timestamp stamped into every generated file
    ///
    /// Left empty, generated files carry no date. The CLI fills it with the
    /// start time of the run so all files of one run share it.
    #[serde(default)]
    pub generation_date: Option<String>,

    /// Size of the worker pool building field maps (None = available parallelism)
    #[serde(default)]
    pub worker_threads: Option<usize>,

    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_identity_field_name() -> String {
    "id".to_string()
}

fn default_identity_field_type() -> String {
    "java.lang.Long".to_string()
}

fn default_forbidden_suffixes() -> Vec<String> {
    vec![
        "ObjectFactory".to_string(),
        "Factory".to_string(),
        "Impl".to_string(),
    ]
}

fn default_entity_suffix() -> String {
    "JPA".to_string()
}

fn default_fields_suffix() -> String {
    "Fields".to_string()
}

fn default_factory_package() -> String {
    "org.apache.maven.soap.jpa.factory".to_string()
}

fn default_fields_package() -> String {
    "org.apache.maven.soap.jpa.fields".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            identity_field_name: default_identity_field_name(),
            identity_field_type: default_identity_field_type(),
            forbidden_suffixes: default_forbidden_suffixes(),
            entity_suffix: default_entity_suffix(),
            fields_suffix: default_fields_suffix(),
            factory_package: default_factory_package(),
            fields_package: default_fields_package(),
            generation_date: None,
            worker_threads: None,
            log_level: default_log_level(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Set the identity field name and type
    pub fn with_identity(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.identity_field_name = name.into();
        self.identity_field_type = ty.into();
        self
    }

    /// Set the generation timestamp
    pub fn with_generation_date(mut self, date: impl Into<String>) -> Self {
        self.generation_date = Some(date.into());
        self
    }

    /// Set the worker pool size
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    /// Whether a simple class name ends with a forbidden suffix
    pub fn is_forbidden(&self, simple_name: &str) -> bool {
        self.forbidden_suffixes
            .iter()
            .any(|suffix| simple_name.ends_with(suffix.as_str()))
    }

    /// Number of workers to use for a run over `jobs` classes
    pub fn effective_workers(&self, jobs: usize) -> usize {
        let wanted = self.worker_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        wanted.clamp(1, jobs.max(1))
    }

    /// Validate the configuration
    pub fn validate(&self) -> GenerationResult<()> {
        if self.identity_field_name.trim().is_empty() {
            return Err(GenerationError::Config(
                "identity field name cannot be empty".to_string(),
            ));
        }

        if self.identity_field_type.trim().is_empty() {
            return Err(GenerationError::Config(
                "identity field type cannot be empty".to_string(),
            ));
        }

        if !is_primitive(&self.identity_field_type)
            && !CastType::is_target(&self.identity_field_type)
        {
            return Err(GenerationError::Config(format!(
                "unsupported identity field type: {}",
                self.identity_field_type
            )));
        }

        if self.entity_suffix.is_empty() {
            return Err(GenerationError::Config(
                "entity suffix cannot be empty".to_string(),
            ));
        }

        if self.fields_suffix.is_empty() {
            return Err(GenerationError::Config(
                "fields suffix cannot be empty".to_string(),
            ));
        }

        if self.forbidden_suffixes.iter().any(|s| s.is_empty()) {
            return Err(GenerationError::Config(
                "forbidden suffixes cannot contain an empty entry".to_string(),
            ));
        }

        if self.worker_threads == Some(0) {
            return Err(GenerationError::Config(
                "worker_threads must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
