//! Writes generated sources under the output root

use crate::codegen::SourceFile;
use anyhow::{Context, Result};
use soapjpa_core::WriteOutcome;
use std::fs;
use std::path::{Path, PathBuf};

/// Materializes [`SourceFile`]s below one output directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a source file
    pub fn path_of(&self, file: &SourceFile) -> PathBuf {
        self.root.join(file.relative_path())
    }

    /// Write `file` unless it already exists.
    ///
    /// Existing files are left untouched and `render` is not called, so hand
    /// edits of generated classes survive later runs.
    pub fn write_if_absent(
        &self,
        file: &SourceFile,
        render: impl FnOnce() -> String,
    ) -> Result<WriteOutcome> {
        let path = self.path_of(file);
        if path.exists() {
            tracing::debug!(path = %path.display(), "file exists, skipped");
            return Ok(WriteOutcome::Skipped);
        }

        self.write_file(&path, &render())?;
        Ok(WriteOutcome::Created)
    }

    /// Write `file`, replacing any previous content
    pub fn write(&self, file: &SourceFile, content: &str) -> Result<WriteOutcome> {
        let path = self.path_of(file);
        self.write_file(&path, content)?;
        Ok(WriteOutcome::Created)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {dir:?}"))?;
        }

        fs::write(path, content).with_context(|| format!("Failed to write {path:?}"))?;
        tracing::debug!(path = %path.display(), "file written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "writer/writer_tests.rs"]
mod writer_tests;
