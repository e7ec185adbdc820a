//! Rendering contexts handed to the template/emitter layer.
//!
//! Every context is a plain serializable record; maps are `BTreeMap`s and
//! sets are `BTreeSet`s so that anything rendered from them comes out in the
//! same order on every run.

use crate::descriptor::FieldDescriptor;
use crate::driver::FieldProviderIndex;
use crate::fields::FieldMap;
use crate::report::Warning;
use crate::stranger::OwnershipCorrection;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Everything needed to render one entity class (and, recursively, its
/// nested entity classes)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityContext {
    pub package: String,

    /// Simple name of the stub class
    pub class_name: String,

    /// Simple name of the generated class
    pub entity_name: String,

    /// Fully qualified name of the generated class
    pub target_name: String,

    /// Qualified stub name with `.` separators
    pub stub_class: String,

    /// Rendered as an embeddable nested class instead of a top-level entity
    pub is_embedded: bool,

    /// Generated superclass, or `java.lang.Object`
    pub superclass: String,

    pub fields: FieldMap,

    /// Field name -> constant name (`secondName` -> `SECOND_NAME`)
    pub constant_names: BTreeMap<String, String>,

    /// Stub types the generated class can be constructed from
    pub constructors: BTreeSet<String>,

    pub identity_field_name: String,
    pub identity_field_type: String,
    pub fields_package: String,

    /// Generated field-constant interface of this class
    pub field_provider: Option<String>,

    pub generation_date: Option<String>,

    pub nested: Vec<EntityContext>,

    /// Stranger fields moved under this class
    pub corrections: Vec<OwnershipCorrection>,
}

impl EntityContext {
    /// The identity field, matched case-insensitively
    pub fn identity(&self) -> Option<(&str, &FieldDescriptor)> {
        self.fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&self.identity_field_name))
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    /// Number of entity classes in this tree, the root included
    pub fn class_count(&self) -> usize {
        1 + self.nested.iter().map(EntityContext::class_count).sum::<usize>()
    }
}

/// Everything needed to render one field-constant interface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldsContext {
    pub package: String,
    pub class_name: String,

    /// Simple name of the generated interface
    pub interface_name: String,

    pub is_inner: bool,
    pub is_embedded: bool,

    /// Constant name -> field name (`SECOND_NAME` -> `secondName`)
    pub constants: BTreeMap<String, String>,

    /// Fields with a primitive type
    pub primitive_fields: BTreeSet<String>,

    /// Constant names of complex fields whose type has no identity accessor
    pub identityless_fields: BTreeSet<String>,

    pub nested: Vec<FieldsContext>,

    /// Nested class name -> its first field, capitalized
    pub nested_first_fields: BTreeMap<String, String>,

    /// First field of this class, capitalized; empty when there are no fields
    pub first_field: String,

    pub is_containing_ident_field: bool,

    /// Generated entity of the same stub
    pub entity_class: Option<String>,

    pub stub_class: String,

    pub identity_field_name: String,
    pub identity_field_type: String,
    pub fields_package: String,
    pub factory_package: String,
    pub generation_date: Option<String>,
}

impl FieldsContext {
    pub fn field_count(&self) -> usize {
        self.constants.len()
    }
}

/// Context of the factory that maps stub classes to field providers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactoryContext {
    pub package: String,
    pub field_providers: FieldProviderIndex,
    pub fields_package: String,
    pub generation_date: Option<String>,
}

/// Context of the `IFieldProvider` interface every field-constant interface extends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldProviderInterfaceContext {
    pub package: String,
    pub identity_field_type: String,
    pub generation_date: Option<String>,
}

/// All contexts of one run, sorted by stub name
#[derive(Debug, Clone, Serialize)]
pub struct GenerationPlan {
    pub entities: Vec<EntityContext>,
    pub fields: Vec<FieldsContext>,
    pub factory: FactoryContext,
    pub field_provider: FieldProviderInterfaceContext,
    pub warnings: Vec<Warning>,
}

impl GenerationPlan {
    /// Number of entity classes including nested ones
    pub fn entity_class_count(&self) -> usize {
        self.entities.iter().map(EntityContext::class_count).sum()
    }
}
