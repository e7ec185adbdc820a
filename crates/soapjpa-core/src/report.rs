//! Warnings and per-run counters

use crate::descriptor::FieldKind;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;

/// A non-fatal problem found while resolving a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Stub type with no generated counterpart; the field is omitted
    UnmappedType {
        class: String,
        accessor: String,
        type_name: String,
        field_kind: FieldKind,
    },

    /// Collection accessor without a generic argument
    UntypedCollection { class: String, accessor: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnmappedType {
                class,
                accessor,
                type_name,
                field_kind: FieldKind::InnerClass,
            } => write!(
                f,
                "{class}.{accessor}(): can not transfer type {type_name} to an inner entity class; \
                 probably a class instead of an interface, the field is omitted"
            ),
            Warning::UnmappedType {
                class,
                accessor,
                type_name,
                field_kind,
            } => write!(
                f,
                "{class}.{accessor}(): no entity for {field_kind} type {type_name}, the field is omitted"
            ),
            Warning::UntypedCollection { class, accessor } => write!(
                f,
                "{class}.{accessor}(): collection without element type, using java.lang.Object"
            ),
        }
    }
}

/// Warnings collected while resolving one class
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and forward it to the log
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// Kind of generated artifact, used to group counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Entity,
    Fields,
    Factory,
    FieldProvider,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Entity => write!(f, "entity"),
            ArtifactKind::Fields => write!(f, "fields"),
            ArtifactKind::Factory => write!(f, "factory"),
            ArtifactKind::FieldProvider => write!(f, "field provider"),
        }
    }
}

/// Result of materializing one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// Newly rendered and written
    Created,
    /// Already present at the output location, left untouched
    Skipped,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub created: usize,
    pub skipped: usize,
}

/// Created/skipped counters shared by everything that writes artifacts
///
/// Updates are append-only and serialized through a lock, so the report can be
/// shared by reference between workers.
#[derive(Debug, Default)]
pub struct GenerationReport {
    counts: Mutex<BTreeMap<ArtifactKind, Counts>>,
    warnings: Mutex<Vec<Warning>>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, kind: ArtifactKind, outcome: WriteOutcome) {
        let mut counts = self.counts.lock();
        let entry = counts.entry(kind).or_default();
        match outcome {
            WriteOutcome::Created => entry.created += 1,
            WriteOutcome::Skipped => entry.skipped += 1,
        }
    }

    pub fn add_warnings(&self, warnings: impl IntoIterator<Item = Warning>) {
        self.warnings.lock().extend(warnings);
    }

    pub fn counts(&self, kind: ArtifactKind) -> Counts {
        self.counts.lock().get(&kind).copied().unwrap_or_default()
    }

    pub fn total(&self) -> Counts {
        self.counts
            .lock()
            .values()
            .fold(Counts::default(), |acc, c| Counts {
                created: acc.created + c.created,
                skipped: acc.skipped + c.skipped,
            })
    }

    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.lock().clone()
    }
}
