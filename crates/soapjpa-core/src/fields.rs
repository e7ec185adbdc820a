//! Field-map construction.
//!
//! A [`FieldMap`] holds one [`FieldDescriptor`] per logical field of a class,
//! keyed by the generated field name and ordered alphabetically.

use crate::cast::{CastType, same_identity_type};
use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::error::{GenerationError, GenerationResult};
use crate::model::{ClassModel, ClassSet, FieldModel, MethodModel};
use crate::naming::{extract_field_name, recapitalize_removing_underscores};
use crate::report::{Diagnostics, Warning};
use crate::resolver::{ResolveRequest, is_reserved, resolve_return_type};
use std::collections::BTreeMap;

/// Generated field name -> resolved descriptor, sorted by name
pub type FieldMap = BTreeMap<String, FieldDescriptor>;

/// Declared fields of `class` followed by those of its direct superclass.
///
/// Only one level of inheritance is searched.
pub fn collect_parent_fields<'a>(classes: &'a ClassSet, class: &'a ClassModel) -> Vec<&'a FieldModel> {
    let mut fields: Vec<&FieldModel> = class.fields.iter().collect();
    if let Some(parent) = classes.superclass_of(class) {
        fields.extend(parent.fields.iter());
    }
    fields
}

/// Own accessors first, then those of the direct superclass
fn collect_accessors<'a>(
    classes: &'a ClassSet,
    class: &'a ClassModel,
) -> Vec<(&'a ClassModel, &'a MethodModel)> {
    let mut accessors: Vec<_> = class.accessors().map(|m| (class, m)).collect();
    if let Some(parent) = classes.superclass_of(class) {
        accessors.extend(parent.accessors().map(|m| (parent, m)));
    }
    accessors
}

/// Build the field map of `class`.
///
/// Undefined descriptors and reserved types are dropped (with a warning for
/// unmapped stub types). When two accessors map to the same field name the
/// first one wins.
///
/// # Errors
///
/// [`GenerationError::UnmappedCast`] when the identity field has a type that
/// cannot be converted to the configured identity type.
pub fn build_field_map(
    request: &ResolveRequest<'_>,
    class: &ClassModel,
    diagnostics: &mut Diagnostics,
) -> GenerationResult<FieldMap> {
    let declared = collect_parent_fields(request.classes, class);
    let mut map = FieldMap::new();

    for (owner, method) in collect_accessors(request.classes, class) {
        let mut descriptor = resolve_return_type(request, owner, method, diagnostics);

        if is_reserved(&descriptor.original_type_name)
            || descriptor
                .resolved_type_name
                .as_deref()
                .is_some_and(is_reserved)
        {
            continue;
        }

        if !descriptor.is_defined() {
            // the resolver already reported unmapped inner classes
            if descriptor.kind != FieldKind::InnerClass {
                diagnostics.warn(Warning::UnmappedType {
                    class: class.qualified_name.clone(),
                    accessor: method.name.clone(),
                    type_name: descriptor.original_type_name.clone(),
                    field_kind: descriptor.kind,
                });
            }
            continue;
        }

        let mut field_name = extract_field_name(&method.name);

        if let Some(field) = declared
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(&field_name))
        {
            if let Some(name) = &field.name_override {
                field_name = recapitalize_removing_underscores(name);
            }

            if !matches!(
                descriptor.kind,
                FieldKind::Primitive | FieldKind::ArrayOfPrimitives
            ) {
                descriptor.polymorphic_implementations.extend(
                    field
                        .concrete_implementations()
                        .map(str::to_string),
                );
            }
        }

        if map.contains_key(&field_name) {
            tracing::debug!(
                class = %class.qualified_name,
                field = %field_name,
                accessor = %method.name,
                "duplicate field, keeping the first accessor"
            );
            continue;
        }

        if field_name.eq_ignore_ascii_case(request.identity_field_name)
            && !same_identity_type(&descriptor.original_type_name, request.identity_field_type)
        {
            let cast = CastType::of(&descriptor.original_type_name, request.identity_field_type)
                .ok_or_else(|| GenerationError::UnmappedCast {
                    class: class.qualified_name.clone(),
                    field: field_name.clone(),
                    from: descriptor.original_type_name.clone(),
                    to: request.identity_field_type.to_string(),
                })?;
            descriptor.cast = Some(cast);
        }

        map.insert(field_name, descriptor.with_accessor(&method.name));
    }

    Ok(map)
}

#[cfg(test)]
#[path = "fields/fields_tests.rs"]
mod fields_tests;
