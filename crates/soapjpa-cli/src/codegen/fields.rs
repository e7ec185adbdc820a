//! Field-constant interface emitter.
//!
//! Every field becomes a `String` constant holding its name; nested stub
//! classes become nested interfaces. Static helpers expose the remaining
//! context (primitive and identity-less fields, first fields of nested
//! classes) to query builders.

use super::SourceFile;
use super::java::{doc_comment, escape, generated_annotation, indent, java_name, package_declaration};
use soapjpa_core::FieldsContext;
use soapjpa_core::naming::to_constant_name;

/// Simple name of the interface every field-constant interface extends
pub const FIELD_PROVIDER: &str = "IFieldProvider";

pub fn source_file(context: &FieldsContext) -> SourceFile {
    SourceFile::new(&context.package, &context.interface_name)
}

/// Render the complete source of a top-level field-constant interface
pub fn render_fields(context: &FieldsContext) -> String {
    let mut code = package_declaration(&context.package);
    render_interface(&mut code, context, 0);
    code
}

fn render_interface(code: &mut String, context: &FieldsContext, depth: usize) {
    let pad = indent(depth);
    let inner = indent(depth + 1);

    code.push_str(&doc_comment(
        &[
            format!("Field names of {{@link {}}}.", java_name(&context.stub_class)),
            format!(
                "<p>Providers are looked up through {{@code {}.JPAEntitiesFactory}}.",
                context.factory_package
            ),
        ],
        depth,
    ));
    code.push_str(&generated_annotation(context.generation_date.as_deref(), depth));
    code.push_str(&format!(
        "{pad}public interface {} extends {}.{FIELD_PROVIDER} {{\n",
        context.interface_name, context.fields_package
    ));

    if !context.constants.is_empty() {
        code.push('\n');
    }
    for (constant, field) in &context.constants {
        code.push_str(&format!("{inner}String {constant} = \"{}\";\n", escape(field)));
    }

    if let Some(entity) = &context.entity_class {
        render_getter(
            code,
            "Class<?>",
            "entityClass",
            &format!("{}.class", java_name(entity)),
            depth + 1,
        );
    }
    render_getter(
        code,
        "Class<?>",
        "stubClass",
        &format!("{}.class", java_name(&context.stub_class)),
        depth + 1,
    );
    render_getter(
        code,
        "String",
        "firstField",
        &format!("\"{}\"", escape(&context.first_field)),
        depth + 1,
    );
    render_getter(
        code,
        "boolean",
        "isContainingIdentField",
        &context.is_containing_ident_field.to_string(),
        depth + 1,
    );

    let primitives: Vec<String> = context
        .primitive_fields
        .iter()
        .map(|f| to_constant_name(f))
        .collect();
    render_getter(
        code,
        "java.util.List<String>",
        "primitiveFields",
        &list_of(&primitives),
        depth + 1,
    );

    let identityless: Vec<String> = context.identityless_fields.iter().cloned().collect();
    render_getter(
        code,
        "java.util.List<String>",
        "identitylessFields",
        &list_of(&identityless),
        depth + 1,
    );

    if !context.nested_first_fields.is_empty() {
        let entries: Vec<String> = context
            .nested_first_fields
            .iter()
            .map(|(class, field)| {
                format!("java.util.Map.entry(\"{}\", \"{}\")", escape(class), escape(field))
            })
            .collect();
        render_getter(
            code,
            "java.util.Map<String, String>",
            "nestedFirstFields",
            &format!("java.util.Map.ofEntries({})", entries.join(", ")),
            depth + 1,
        );
    }

    for nested in &context.nested {
        code.push('\n');
        render_interface(code, nested, depth + 1);
    }

    code.push_str(&format!("{pad}}}\n"));
}

fn list_of(constants: &[String]) -> String {
    format!("java.util.Arrays.asList({})", constants.join(", "))
}

fn render_getter(code: &mut String, ty: &str, name: &str, value: &str, depth: usize) {
    let pad = indent(depth);
    code.push_str(&format!(
        "\n{pad}static {ty} {name}() {{\n{pad}    return {value};\n{pad}}}\n"
    ));
}
