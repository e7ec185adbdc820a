//! Factory and field-provider interface emitters

use super::SourceFile;
use super::fields::FIELD_PROVIDER;
use super::java::{doc_comment, escape, generated_annotation, java_name, package_declaration};
use soapjpa_core::{FactoryContext, FieldProviderInterfaceContext};

/// Simple name of the generated factory
pub const FACTORY_NAME: &str = "JPAEntitiesFactory";

pub fn factory_file(context: &FactoryContext) -> SourceFile {
    SourceFile::new(&context.package, FACTORY_NAME)
}

pub fn field_provider_file(context: &FieldProviderInterfaceContext) -> SourceFile {
    SourceFile::new(&context.package, FIELD_PROVIDER)
}

/// Render the factory mapping stub classes to their field providers
pub fn render_factory(context: &FactoryContext) -> String {
    let provider = format!("{}.{FIELD_PROVIDER}", context.fields_package);

    let mut code = package_declaration(&context.package);
    code.push_str(&doc_comment(
        &["Looks up the field-constant interface of a SOAP stub class.".to_string()],
        0,
    ));
    code.push_str(&generated_annotation(context.generation_date.as_deref(), 0));
    code.push_str(&format!("public final class {FACTORY_NAME} {{\n\n"));
    code.push_str(&format!(
        "    private static final java.util.Map<String, Class<? extends {provider}>> FIELD_PROVIDERS =\n"
    ));
    code.push_str("            new java.util.HashMap<>();\n\n");

    code.push_str("    static {\n");
    for (stub, fields) in context.field_providers.iter() {
        code.push_str(&format!(
            "        FIELD_PROVIDERS.put(\"{}\", {}.class);\n",
            escape(&java_name(stub)),
            java_name(fields)
        ));
    }
    code.push_str("    }\n\n");

    code.push_str(&format!("    private {FACTORY_NAME}() {{\n    }}\n\n"));

    code.push_str(&format!(
        "    public static Class<? extends {provider}> getFieldProvider(Class<?> stubClass) {{\n"
    ));
    code.push_str("        return FIELD_PROVIDERS.get(stubClass.getCanonicalName());\n");
    code.push_str("    }\n");
    code.push_str("}\n");
    code
}

/// Render the interface every field-constant interface extends
pub fn render_field_provider(context: &FieldProviderInterfaceContext) -> String {
    let mut code = package_declaration(&context.package);
    code.push_str(&doc_comment(
        &["Common parent of the generated field-constant interfaces.".to_string()],
        0,
    ));
    code.push_str(&generated_annotation(context.generation_date.as_deref(), 0));
    code.push_str(&format!("public interface {FIELD_PROVIDER} {{\n\n"));
    code.push_str("    /** Type of the identity field of every generated entity */\n");
    code.push_str(&format!(
        "    Class<?> IDENTITY_TYPE = {}.class;\n",
        java_name(&context.identity_field_type)
    ));
    code.push_str("}\n");
    code
}
