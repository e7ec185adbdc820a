//! Entity class emitter.
//!
//! A top-level [`EntityContext`] becomes an `@Entity` class; its nested
//! contexts (nested stubs and embedded stranger types) become `@Embeddable`
//! static inner classes. Every stub type in the constructor set gets a
//! constructor copying the stub's values, converting nested entities and
//! applying the identity cast.

use super::SourceFile;
use super::java::{
    doc_comment, escape, generated_annotation, indent, java_name, package_declaration,
};
use soapjpa_core::naming::capitalize;
use soapjpa_core::{CastType, EntityContext, FieldDescriptor, FieldKind, OBJECT_TYPE};

/// Where the entity of `context` is written
pub fn source_file(context: &EntityContext) -> SourceFile {
    SourceFile::new(&context.package, &context.entity_name)
}

/// Render the complete source of a top-level entity
pub fn render_entity(context: &EntityContext) -> String {
    let mut code = package_declaration(&context.package);
    code.push_str("import javax.persistence.*;\n\n");
    render_class(&mut code, context, 0);
    code
}

fn render_class(code: &mut String, context: &EntityContext, depth: usize) {
    let pad = indent(depth);
    let inner = indent(depth + 1);

    code.push_str(&doc_comment(&class_doc(context), depth));
    code.push_str(&generated_annotation(
        context.generation_date.as_deref(),
        depth,
    ));
    code.push_str(&pad);
    code.push_str(if context.is_embedded {
        "@Embeddable\n"
    } else {
        "@Entity\n"
    });

    let modifiers = if depth == 0 {
        "public class"
    } else {
        "public static class"
    };
    code.push_str(&format!("{pad}{modifiers} {}", context.entity_name));
    if context.superclass != OBJECT_TYPE {
        code.push_str(&format!(" extends {}", java_name(&context.superclass)));
    }
    code.push_str(" implements java.io.Serializable {\n");

    for (name, descriptor) in &context.fields {
        code.push('\n');
        if descriptor.is_abstract() {
            let implementations: Vec<_> = descriptor
                .polymorphic_implementations
                .iter()
                .map(String::as_str)
                .collect();
            code.push_str(&doc_comment(
                &[format!("One of: {}", implementations.join(", "))],
                depth + 1,
            ));
        }
        for annotation in field_annotations(context, name, descriptor) {
            code.push_str(&format!("{inner}{annotation}\n"));
        }
        code.push_str(&format!(
            "{inner}private {} {name};\n",
            declared_type(context, name, descriptor)
        ));
    }

    code.push_str(&format!("\n{inner}public {}() {{\n{inner}}}\n", context.entity_name));

    for stub in &context.constructors {
        render_constructor(code, context, stub, depth + 1);
    }

    for (name, descriptor) in &context.fields {
        render_accessors(code, name, &declared_type(context, name, descriptor), depth + 1);
    }

    for nested in &context.nested {
        code.push('\n');
        render_class(code, nested, depth + 1);
    }

    code.push_str(&format!("{pad}}}\n"));
}

fn class_doc(context: &EntityContext) -> Vec<String> {
    let mut lines = vec![format!(
        "Persistent counterpart of {{@link {}}}.",
        java_name(&context.stub_class)
    )];
    for correction in &context.corrections {
        lines.push(format!(
            "<p>Field {{@code {}}} holds {}, declared under {}.",
            correction.field,
            java_name(&correction.stub_type),
            java_name(&correction.previous_owner)
        ));
    }
    lines
}

fn is_identity(context: &EntityContext, name: &str) -> bool {
    name.eq_ignore_ascii_case(&context.identity_field_name)
}

fn identity_cast(context: &EntityContext, name: &str, descriptor: &FieldDescriptor) -> Option<CastType> {
    if is_identity(context, name) {
        descriptor.cast
    } else {
        None
    }
}

/// Declared Java type of a generated field
fn declared_type(context: &EntityContext, name: &str, descriptor: &FieldDescriptor) -> String {
    match identity_cast(context, name, descriptor) {
        Some(cast) => cast.target_type().to_string(),
        None => java_name(&descriptor.render()),
    }
}

fn field_annotations(context: &EntityContext, name: &str, descriptor: &FieldDescriptor) -> Vec<String> {
    let column = || {
        let constant = context
            .constant_names
            .get(name)
            .map_or_else(|| name.to_string(), Clone::clone);
        format!("@Column(name = \"{}\")", escape(&constant))
    };

    // embeddables carry no identity of their own
    if is_identity(context, name) && !context.is_embedded {
        return vec!["@Id".to_string(), column()];
    }

    if descriptor.is_abstract() {
        return vec!["@Transient".to_string()];
    }

    match descriptor.kind {
        FieldKind::Primitive => vec![column()],
        FieldKind::ArrayOfPrimitives => vec!["@Lob".to_string(), column()],
        FieldKind::ArrayOfComplexTypes | FieldKind::ArrayOfInnerClasses | FieldKind::Collection
            if descriptor.has_identity_field =>
        {
            vec!["@OneToMany(cascade = CascadeType.ALL)".to_string()]
        }
        FieldKind::ArrayOfComplexTypes | FieldKind::ArrayOfInnerClasses | FieldKind::Collection => {
            vec!["@ElementCollection".to_string()]
        }
        FieldKind::ComplexType | FieldKind::InnerClass if descriptor.has_identity_field => {
            vec!["@ManyToOne(cascade = CascadeType.ALL)".to_string()]
        }
        FieldKind::ComplexType | FieldKind::InnerClass => vec!["@Embedded".to_string()],
    }
}

/// The stub value is wrapped into a generated entity rather than copied
fn converts(descriptor: &FieldDescriptor) -> bool {
    descriptor.is_known_entity
        && !descriptor.is_abstract()
        && !matches!(
            descriptor.kind,
            FieldKind::Primitive | FieldKind::ArrayOfPrimitives
        )
}

/// Stub type of a field's values; stranger fields keep the type they were declared with
fn stub_type<'c>(
    context: &'c EntityContext,
    name: &str,
    descriptor: &'c FieldDescriptor,
) -> &'c str {
    context
        .corrections
        .iter()
        .find(|c| c.field == name)
        .map_or(&descriptor.original_type_name, |c| &c.stub_type)
}

fn render_constructor(code: &mut String, context: &EntityContext, stub: &str, depth: usize) {
    let pad = indent(depth);
    let body = indent(depth + 1);

    code.push_str(&format!(
        "\n{pad}public {}({} source) {{\n",
        context.entity_name,
        java_name(stub)
    ));

    for (name, descriptor) in &context.fields {
        let getter = match &descriptor.accessor {
            Some(accessor) => format!("source.{accessor}()"),
            None => format!("source.get{}()", capitalize(name)),
        };
        let target = descriptor
            .resolved_type_name
            .as_deref()
            .map(java_name)
            .unwrap_or_else(|| OBJECT_TYPE.to_string());

        if let Some(cast) = identity_cast(context, name, descriptor) {
            code.push_str(&format!(
                "{body}this.{name} = {getter} == null ? null : {};\n",
                cast.java_expression(&getter)
            ));
        } else if !converts(descriptor) {
            code.push_str(&format!("{body}this.{name} = {getter};\n"));
        } else if descriptor.kind.is_array() || descriptor.kind == FieldKind::Collection {
            let element = java_name(stub_type(context, name, descriptor));
            let step = indent(depth + 2);
            code.push_str(&format!("{body}if ({getter} != null) {{\n"));
            code.push_str(&format!("{step}this.{name} = new java.util.ArrayList<>();\n"));
            code.push_str(&format!("{step}for ({element} item : {getter}) {{\n"));
            code.push_str(&format!("{step}    this.{name}.add(new {target}(item));\n"));
            code.push_str(&format!("{step}}}\n"));
            code.push_str(&format!("{body}}}\n"));
        } else {
            code.push_str(&format!(
                "{body}this.{name} = {getter} == null ? null : new {target}({getter});\n"
            ));
        }
    }

    code.push_str(&format!("{pad}}}\n"));
}

fn render_accessors(code: &mut String, name: &str, ty: &str, depth: usize) {
    let pad = indent(depth);
    let body = indent(depth + 1);
    let suffix = capitalize(name);

    code.push_str(&format!("\n{pad}public {ty} get{suffix}() {{\n"));
    code.push_str(&format!("{body}return {name};\n"));
    code.push_str(&format!("{pad}}}\n"));

    code.push_str(&format!("\n{pad}public void set{suffix}({ty} {name}) {{\n"));
    code.push_str(&format!("{body}this.{name} = {name};\n"));
    code.push_str(&format!("{pad}}}\n"));
}

#[cfg(test)]
#[path = "entity/entity_tests.rs"]
mod entity_tests;
