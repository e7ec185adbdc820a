//! Pieces shared by the Java emitters.

/// Identifier put into `@Generated` annotations
pub const GENERATOR_NAME: &str = "soapjpa";

/// One level of Java indentation
pub const INDENT: &str = "    ";

/// Java source spelling of a qualified or binary name (`a.B$C` -> `a.B.C`)
pub fn java_name(name: &str) -> String {
    name.replace('$', ".")
}

/// Indentation for a nesting depth
pub fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// Package declaration followed by a blank line; nothing for the default package
pub fn package_declaration(package: &str) -> String {
    if package.is_empty() {
        String::new()
    } else {
        format!("package {package};\n\n")
    }
}

/// `@Generated` line for a type declaration, when a date is known
pub fn generated_annotation(date: Option<&str>, depth: usize) -> String {
    match date {
        Some(date) => format!(
            "{}@javax.annotation.Generated(value = \"{}\", date = \"{}\")\n",
            indent(depth),
            GENERATOR_NAME,
            escape(date)
        ),
        None => String::new(),
    }
}

/// Javadoc block; nothing when `lines` is empty
pub fn doc_comment(lines: &[String], depth: usize) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let pad = indent(depth);
    let mut code = format!("{pad}/**\n");
    for line in lines {
        code.push_str(&format!("{pad} * {line}\n"));
    }
    code.push_str(&format!("{pad} */\n"));
    code
}

/// Escape a value for a Java string literal
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
