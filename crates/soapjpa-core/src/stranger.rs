//! Ownership correction for "stranger" fields.
//!
//! A stranger is a field typed with a nested class that lexically belongs to
//! another top-level stub. When that nested class has no identity field it
//! is embedded into the entity being generated, so its logical owner becomes
//! the current class. Fields whose type has an identity keep their owner and
//! are referenced as independent entities.
//!
//! Nothing here mutates the class set or the input field map; the caller
//! applies the returned [`OwnershipCorrection`]s.

use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::driver::TargetTypeTable;
use crate::fields::FieldMap;
use crate::model::{ClassModel, ClassSet};
use crate::naming::{is_within, parent_path, simple_name};
use serde::Serialize;

/// One rewritten field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnershipCorrection {
    /// Key of the field in the field map
    pub field: String,

    /// Qualified name of the class that lexically declares the nested type
    pub previous_owner: String,

    /// Qualified name of the class now owning it
    pub new_owner: String,

    /// Qualified name of the nested stub type, before correction
    pub stub_type: String,

    /// The descriptor with owner segments rewritten
    pub descriptor: FieldDescriptor,
}

fn is_nested_reference(descriptor: &FieldDescriptor) -> bool {
    match descriptor.kind {
        FieldKind::InnerClass => true,
        FieldKind::Collection => descriptor.is_generic_inner_nesting,
        _ => false,
    }
}

/// Entries of `fields` whose nested type belongs to another top-level class.
///
/// A type under `current_class` (on a segment boundary) is never a stranger.
pub fn find_strangers<'m>(
    current_class: &str,
    fields: &'m FieldMap,
) -> Vec<(&'m str, &'m FieldDescriptor)> {
    fields
        .iter()
        .filter(|(_, d)| {
            is_nested_reference(d)
                && !d.has_identity_field
                && !is_within(&d.original_type_name, current_class)
        })
        .map(|(name, d)| (name.as_str(), d))
        .collect()
}

/// Replace every path segment equal to `from` with `to`
fn replace_segment(path: &str, from: &str, to: &str) -> String {
    path.split('.')
        .map(|segment| if segment == from { to } else { segment })
        .collect::<Vec<_>>()
        .join(".")
}

/// Compute the corrections for the strangers of `fields`, moving them under `current`.
///
/// The previous owner's simple name is replaced by the current class's simple
/// name in the stub type name. The generated type name is re-rooted from the
/// previous owner's entity to the current one when both are in `targets`.
pub fn correct_ownership(
    classes: &ClassSet,
    targets: &TargetTypeTable,
    current: &ClassModel,
    fields: &FieldMap,
) -> Vec<OwnershipCorrection> {
    find_strangers(&current.qualified_name, fields)
        .into_iter()
        .map(|(field, descriptor)| {
            let stub_type = descriptor.original_type_name.clone();
            let previous_owner = classes
                .by_name(&stub_type)
                .and_then(|nested| classes.enclosing_of(nested))
                .map_or_else(
                    || parent_path(&stub_type).to_string(),
                    |owner| owner.qualified_name.clone(),
                );

            let mut corrected = descriptor.clone();
            corrected.original_type_name = replace_segment(
                &stub_type,
                simple_name(&previous_owner),
                &current.name,
            );

            if let (Some(resolved), Some(from), Some(to)) = (
                descriptor.resolved_type_name.as_deref(),
                targets.get(&previous_owner),
                targets.get(&current.qualified_name),
            ) && let Some(rest) = resolved.strip_prefix(from).filter(|r| r.starts_with('.'))
            {
                corrected.resolved_type_name = Some(format!("{to}{rest}"));
            }

            tracing::debug!(
                field,
                from = %previous_owner,
                to = %current.qualified_name,
                "moving stranger field to the generated class"
            );

            OwnershipCorrection {
                field: field.to_string(),
                previous_owner,
                new_owner: current.qualified_name.clone(),
                stub_type,
                descriptor: corrected,
            }
        })
        .collect()
}
