//! Type resolution for accessor return types.
//!
//! [`resolve_return_type`] classifies the return type of one `get...()`
//! accessor into a [`FieldKind`] and maps it onto the generated type. Rules
//! are applied in order, first match wins:
//!
//! 1. primitive set → [`FieldKind::Primitive`]
//! 2. `java.util.List<X>` / `java.util.Set<X>` → [`FieldKind::Collection`]
//! 3. `X[]` → array of primitives, of inner classes, or of complex types
//! 4. anything else → [`FieldKind::InnerClass`] or [`FieldKind::ComplexType`]
//!
//! Nested class separators (`$`) are normalized to `.` before classification.

use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::driver::TargetTypeTable;
use crate::model::{ClassModel, ClassSet, MethodModel};
use crate::naming::{is_within, simple_name};
use crate::report::{Diagnostics, Warning};
use once_cell::sync::Lazy;
use regex::Regex;

/// Universal root type, used when a collection has no generic argument
pub const OBJECT_TYPE: &str = "java.lang.Object";

/// Types stored as plain columns
pub const PRIMITIVES: &[&str] = &[
    "java.lang.String",
    "int",
    "java.lang.Integer",
    "long",
    "java.lang.Long",
    "double",
    "java.lang.Double",
    "boolean",
    "java.lang.Boolean",
    "byte",
    "java.lang.Byte",
    "float",
    "java.lang.Float",
    "short",
    "java.lang.Short",
    "char",
    "java.lang.Character",
    "java.math.BigInteger",
    "java.math.BigDecimal",
];

/// Types the stub generator emits as noise; fields of these types are never generated
pub const RESERVED_TYPES: &[&str] = &["org.apache.xmlbeans.XmlObject"];

const COLLECTION_FAMILIES: &[&str] = &["java.util.List", "java.util.Set"];

const ARRAY_MARKER: &str = "[]";

#[allow(clippy::expect_used)] // Safe: the pattern is a literal
static GENERIC_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([\w.]+)>").expect("generic type pattern is valid"));

pub fn is_primitive(type_name: &str) -> bool {
    PRIMITIVES.contains(&type_name)
}

pub fn is_reserved(type_name: &str) -> bool {
    RESERVED_TYPES.contains(&type_name)
}

fn is_collection(type_name: &str) -> bool {
    let base = type_name.split('<').next().unwrap_or(type_name).trim();
    COLLECTION_FAMILIES.contains(&base)
}

fn generic_argument(type_name: &str) -> Option<&str> {
    GENERIC_TYPE
        .captures(type_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the type between `<` and `>`, or [`OBJECT_TYPE`] when there is none.
///
/// ```
/// use soapjpa_core::extract_generic_type;
///
/// assert_eq!(extract_generic_type("java.util.List<my.class.Name>"), "my.class.Name");
/// assert_eq!(extract_generic_type("java.util.List"), "java.lang.Object");
/// ```
pub fn extract_generic_type(collection_type: &str) -> String {
    generic_argument(collection_type)
        .unwrap_or(OBJECT_TYPE)
        .to_string()
}

/// Whether `type_name`, or any ancestor reachable through superclass links,
/// declares a field or accessor named `identity_field_name`.
///
/// The walk stops at arrays, primitives, the root object type and at classes
/// that are not part of `classes`.
pub fn has_identity_field(classes: &ClassSet, type_name: &str, identity_field_name: &str) -> bool {
    let mut current = type_name.replace('$', ".");

    // a superclass cycle in malformed input cannot be longer than the set
    for _ in 0..=classes.len() {
        if current.ends_with(ARRAY_MARKER) || is_primitive(&current) || current == OBJECT_TYPE {
            return false;
        }

        let Some(class) = classes.by_name(&current) else {
            return false;
        };

        if class.declares_member(identity_field_name) {
            return true;
        }

        match &class.superclass {
            Some(parent) => current = parent.clone(),
            None => return false,
        }
    }

    false
}

/// Lookup tables and identity settings shared by every accessor of one class
#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
    pub classes: &'a ClassSet,

    /// Top-level class being generated; arrays of its nested classes are inner arrays
    pub outermost: &'a ClassModel,

    pub targets: &'a TargetTypeTable,

    pub identity_field_name: &'a str,

    pub identity_field_type: &'a str,

    pub entity_suffix: &'a str,
}

/// Resolve the return type of `method`, declared on `owner`.
///
/// Unmapped types produce an undefined descriptor (no resolved type name);
/// the caller drops those.
pub fn resolve_return_type(
    request: &ResolveRequest<'_>,
    owner: &ClassModel,
    method: &MethodModel,
    diagnostics: &mut Diagnostics,
) -> FieldDescriptor {
    let raw = method.return_type.trim();
    let type_name = raw.replace('$', ".");

    if is_primitive(&type_name) {
        return FieldDescriptor::primitive(
            FieldKind::Primitive,
            &type_name,
            simple_name(&type_name),
        );
    }

    if is_collection(&type_name) {
        return resolve_collection(request, owner, method, raw, &type_name, diagnostics);
    }

    if let Some(element) = type_name.strip_suffix(ARRAY_MARKER) {
        return resolve_array(request, element);
    }

    resolve_single(request, owner, method, raw, &type_name, diagnostics)
}

fn resolve_collection(
    request: &ResolveRequest<'_>,
    owner: &ClassModel,
    method: &MethodModel,
    raw: &str,
    type_name: &str,
    diagnostics: &mut Diagnostics,
) -> FieldDescriptor {
    let element = match generic_argument(type_name) {
        Some(element) => element,
        None => {
            diagnostics.warn(Warning::UntypedCollection {
                class: owner.qualified_name.clone(),
                accessor: method.name.clone(),
            });
            OBJECT_TYPE
        }
    };

    let element_class = request.classes.by_name(element);
    let is_generic_inner = raw.contains('$') || element_class.is_some_and(ClassModel::is_nested);
    let resolved = request
        .targets
        .get(element)
        .unwrap_or(element)
        .to_string();

    FieldDescriptor::new(
        FieldKind::Collection,
        Some(resolved),
        element,
        simple_name(element),
    )
    .with_identity(has_identity_field(
        request.classes,
        element,
        request.identity_field_name,
    ))
    .with_field_count(element_class.map_or(0, |c| c.fields.len()))
    .with_known_entity(request.targets.contains(element))
    .with_generic_inner(is_generic_inner)
}

fn resolve_array(request: &ResolveRequest<'_>, element: &str) -> FieldDescriptor {
    if is_primitive(element) {
        return FieldDescriptor::primitive(FieldKind::ArrayOfPrimitives, element, element);
    }

    let known = request.targets.contains(element);

    if is_within(element, &request.outermost.qualified_name) {
        // nested entities are declared inside the outermost entity, so the
        // simple generated name is in scope there
        let resolved = format!("{}{}", simple_name(element), request.entity_suffix);
        return FieldDescriptor::new(
            FieldKind::ArrayOfInnerClasses,
            Some(resolved),
            element,
            simple_name(element),
        )
        .with_known_entity(known);
    }

    FieldDescriptor::new(
        FieldKind::ArrayOfComplexTypes,
        request.targets.get(element).map(str::to_string),
        element,
        simple_name(element),
    )
    .with_known_entity(known)
}

fn resolve_single(
    request: &ResolveRequest<'_>,
    owner: &ClassModel,
    method: &MethodModel,
    raw: &str,
    type_name: &str,
    diagnostics: &mut Diagnostics,
) -> FieldDescriptor {
    let class = request.classes.by_name(type_name);
    let is_inner = raw.contains('$') || class.is_some_and(ClassModel::is_nested);
    let resolved = request.targets.get(type_name).map(str::to_string);

    let kind = if is_inner {
        if resolved.is_none() {
            diagnostics.warn(Warning::UnmappedType {
                class: owner.qualified_name.clone(),
                accessor: method.name.clone(),
                type_name: type_name.to_string(),
                field_kind: FieldKind::InnerClass,
            });
        }
        FieldKind::InnerClass
    } else {
        FieldKind::ComplexType
    };

    let known = resolved.is_some();
    FieldDescriptor::new(kind, resolved, type_name, simple_name(type_name))
        .with_identity(has_identity_field(
            request.classes,
            type_name,
            request.identity_field_name,
        ))
        .with_field_count(class.map_or(0, |c| c.fields.len()))
        .with_known_entity(known)
}
