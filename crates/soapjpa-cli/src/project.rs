//! Project file (`soapjpa.toml`) parsing and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use soapjpa_core::{GeneratorConfig, LogLevel};
use std::path::{Path, PathBuf};

/// Project file looked up in the working directory when none is given
pub const DEFAULT_PROJECT_FILE: &str = "soapjpa.toml";

/// soapjpa.toml structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub paths: PathsSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsSection {
    /// JSON class model of the SOAP stubs
    #[serde(default)]
    pub model: Option<PathBuf>,

    /// Root directory of the generated sources
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Project {
    /// Load project from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read project file: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse project from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse project file")
    }

    /// Load the project named on the command line, or `soapjpa.toml` when
    /// present, or the defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_PROJECT_FILE).exists() => {
                Self::from_file(DEFAULT_PROJECT_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// Console log level configured for the generator
    pub fn log_level(&self) -> Result<LogLevel> {
        LogLevel::parse(&self.generator.log_level)
            .with_context(|| format!("Invalid log level: {}", self.generator.log_level))
    }

    /// Validate the project
    pub fn validate(&self) -> Result<()> {
        self.generator
            .validate()
            .context("Invalid [generator] section")?;

        self.log_level()?;

        if let Some(model) = &self.paths.model
            && model.as_os_str().is_empty()
        {
            anyhow::bail!("Model path cannot be empty");
        }

        if let Some(output) = &self.paths.output
            && output.as_os_str().is_empty()
        {
            anyhow::bail!("Output path cannot be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "project/project_tests.rs"]
mod project_tests;
