//! Resolved description of one generated field

use crate::cast::CastType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a field is rendered and persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    Primitive,
    ArrayOfPrimitives,
    ArrayOfComplexTypes,
    ArrayOfInnerClasses,
    Collection,
    ComplexType,
    InnerClass,
}

impl FieldKind {
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            FieldKind::ArrayOfPrimitives
                | FieldKind::ArrayOfComplexTypes
                | FieldKind::ArrayOfInnerClasses
        )
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldKind::Primitive => "PRIMITIVE",
            FieldKind::ArrayOfPrimitives => "ARRAY_OF_PRIMITIVES",
            FieldKind::ArrayOfComplexTypes => "ARRAY_OF_COMPLEX_TYPES",
            FieldKind::ArrayOfInnerClasses => "ARRAY_OF_INNER_CLASSES",
            FieldKind::Collection => "COLLECTION",
            FieldKind::ComplexType => "COMPLEX_TYPE",
            FieldKind::InnerClass => "INNER_CLASS",
        };
        write!(f, "{name}")
    }
}

/// The resolved type of one logical field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub kind: FieldKind,

    /// Generated type (or the primitive itself); `None` when unmapped
    pub resolved_type_name: Option<String>,

    /// Stub type after generic/array unwrapping
    pub original_type_name: String,

    pub original_simple_name: String,

    /// The stub type or one of its ancestors declares the identity field
    pub has_identity_field: bool,

    /// Declared fields on the stub type
    pub field_count: usize,

    /// The stub type maps to a generated entity
    pub is_known_entity: bool,

    /// Collection element is a nested class
    pub is_generic_inner_nesting: bool,

    /// Cast applied to the identity field, when its type differs from the configured one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<CastType>,

    /// Concrete substitutes named by a type-discriminator annotation
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub polymorphic_implementations: BTreeSet<String>,

    /// Stub accessor the value is read from; differs from the field name under an override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessor: Option<String>,
}

impl FieldDescriptor {
    pub fn new(
        kind: FieldKind,
        resolved_type_name: Option<String>,
        original_type_name: impl Into<String>,
        original_simple_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            resolved_type_name,
            original_type_name: original_type_name.into(),
            original_simple_name: original_simple_name.into(),
            has_identity_field: false,
            field_count: 0,
            is_known_entity: false,
            is_generic_inner_nesting: false,
            cast: None,
            polymorphic_implementations: BTreeSet::new(),
            accessor: None,
        }
    }

    /// A primitive-valued descriptor; both names are the primitive itself
    pub fn primitive(kind: FieldKind, type_name: &str, simple_name: &str) -> Self {
        Self::new(kind, Some(type_name.to_string()), type_name, simple_name)
    }

    pub fn with_identity(mut self, has_identity_field: bool) -> Self {
        self.has_identity_field = has_identity_field;
        self
    }

    pub fn with_field_count(mut self, field_count: usize) -> Self {
        self.field_count = field_count;
        self
    }

    pub fn with_known_entity(mut self, is_known_entity: bool) -> Self {
        self.is_known_entity = is_known_entity;
        self
    }

    pub fn with_generic_inner(mut self, is_generic_inner: bool) -> Self {
        self.is_generic_inner_nesting = is_generic_inner;
        self
    }

    pub fn with_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = Some(accessor.into());
        self
    }

    /// A descriptor is usable only when it has a target type
    pub fn is_defined(&self) -> bool {
        self.resolved_type_name.is_some()
    }

    pub fn requires_cast(&self) -> bool {
        self.cast.is_some()
    }

    /// Polymorphic field: the declared type stands in for several concrete ones
    pub fn is_abstract(&self) -> bool {
        !self.polymorphic_implementations.is_empty()
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == FieldKind::Primitive
    }

    pub fn is_string(&self) -> bool {
        self.resolved_type_name.as_deref() == Some("java.lang.String")
    }

    /// Declared type of the generated field
    pub fn render(&self) -> String {
        let ty = self.resolved_type_name.as_deref().unwrap_or("java.lang.Object");
        match self.kind {
            FieldKind::ArrayOfComplexTypes
            | FieldKind::ArrayOfInnerClasses
            | FieldKind::Collection => format!("java.util.List<{ty}>"),
            FieldKind::ArrayOfPrimitives => format!("{ty}[]"),
            _ => ty.to_string(),
        }
    }
}
