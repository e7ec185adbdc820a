//! soapjpa-core - Type resolution and class-graph transformation engine
//!
//! Given the object model of SOAP stubs produced by a WSDL-to-code tool, this
//! crate decides what the parallel set of JPA entity classes must look like:
//! - [`ClassSet`] is the read-only class model (classes, accessors, fields)
//! - [`resolve_return_type`] classifies one accessor into a [`FieldDescriptor`]
//! - [`build_field_map`] assembles the ordered [`FieldMap`] of a class
//! - [`correct_ownership`] rewrites nested types that belong to another stub
//! - [`ClassGraph`] drives the whole run and produces rendering contexts
//!
//! Rendering the contexts into source text and writing files is left to the
//! caller.

mod cast;
mod config;
mod context;
mod descriptor;
mod driver;
mod error;
mod fields;
mod model;
pub mod naming;
mod report;
mod resolver;
mod stranger;

pub use cast::CastType;
pub use config::GeneratorConfig;
pub use context::{
    EntityContext, FactoryContext, FieldProviderInterfaceContext, FieldsContext, GenerationPlan,
};
pub use descriptor::{FieldDescriptor, FieldKind};
pub use driver::{ClassGraph, ConstructorIndex, FieldProviderIndex, TargetTypeTable};
pub use error::{GenerationError, GenerationResult};
pub use fields::{FieldMap, build_field_map, collect_parent_fields};
pub use model::{ClassDef, ClassId, ClassModel, ClassSet, FieldModel, Implementation, MethodModel};
pub use report::{ArtifactKind, Counts, Diagnostics, GenerationReport, Warning, WriteOutcome};
pub use resolver::{
    OBJECT_TYPE, PRIMITIVES, RESERVED_TYPES, ResolveRequest, extract_generic_type,
    has_identity_field, is_primitive, is_reserved, resolve_return_type,
};
pub use stranger::{OwnershipCorrection, correct_ownership, find_strangers};

/// Log levels understood by the generator's logging front end
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }

    /// Parse a level name as written in configuration files ("info", "WARN", ...)
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ClassGraph, ClassSet, FieldDescriptor, FieldKind, FieldMap, GenerationError,
        GenerationPlan, GenerationResult, GeneratorConfig, LogLevel,
    };
}
