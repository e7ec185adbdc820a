//! Naming convention utilities for generated code.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `getSecondName` | [`extract_field_name`] | `secondName` |
//! | `regex_like` | [`recapitalize_removing_underscores`] | `regexLike` |
//! | `secondName` | [`to_constant_name`] | `SECOND_NAME` |
//! | `word` | [`capitalize`] | `Word` |
//! | `a.b.Outer$Inner` | [`simple_name`] | `Inner` |
//! | `a.b.Outer$Inner` | [`suffixed_name`] (`JPA`) | `a.b.OuterJPA.InnerJPA` |

/// Prefix of accessor methods the generator reads fields from
pub const GETTER_PREFIX: &str = "get";

/// Whether a method with this name and parameter count is an accessor
pub fn is_accessor(name: &str, parameter_count: usize) -> bool {
    parameter_count == 0 && name.len() > GETTER_PREFIX.len() && name.starts_with(GETTER_PREFIX)
}

/// Derive a field name from an accessor name.
///
/// # Examples
///
/// ```
/// use soapjpa_core::naming::extract_field_name;
///
/// assert_eq!(extract_field_name("getSecondName"), "secondName");
/// assert_eq!(extract_field_name("getId"), "id");
/// ```
pub fn extract_field_name(getter: &str) -> String {
    let rest = getter.strip_prefix(GETTER_PREFIX).unwrap_or(getter);
    let mut chars = rest.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Turn an underscore-delimited name back into camelCase.
///
/// Splits on `_`, capitalizes every segment after the first and joins them.
/// Names without underscores are returned unchanged, so applying it twice is
/// the same as applying it once.
///
/// # Examples
///
/// ```
/// use soapjpa_core::naming::recapitalize_removing_underscores;
///
/// assert_eq!(recapitalize_removing_underscores("regex_like"), "regexLike");
/// assert_eq!(recapitalize_removing_underscores("regexLike"), "regexLike");
/// assert_eq!(recapitalize_removing_underscores("EEOInfoRequestDate"), "EEOInfoRequestDate");
/// ```
pub fn recapitalize_removing_underscores(value: &str) -> String {
    value
        .split('_')
        .enumerate()
        .map(|(i, segment)| {
            if i == 0 {
                segment.to_string()
            } else {
                capitalize(segment)
            }
        })
        .collect()
}

/// Convert a lowerCamel field name into an UPPER_UNDERSCORE constant name.
///
/// Every upper-case letter after the first character starts a new word.
///
/// # Examples
///
/// ```
/// use soapjpa_core::naming::to_constant_name;
///
/// assert_eq!(to_constant_name("secondName"), "SECOND_NAME");
/// assert_eq!(to_constant_name("id"), "ID");
/// ```
pub fn to_constant_name(field: &str) -> String {
    let mut result = String::with_capacity(field.len() + 4);

    for (i, c) in field.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(c.to_uppercase());
    }

    result
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use soapjpa_core::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Last path segment of a qualified name, with `$` and `.` treated alike.
pub fn simple_name(qualified: &str) -> &str {
    qualified
        .rfind(['.', '$'])
        .map_or(qualified, |pos| &qualified[pos + 1..])
}

/// Everything before the last path segment, or an empty string.
pub fn parent_path(qualified: &str) -> &str {
    qualified.rfind(['.', '$']).map_or("", |pos| &qualified[..pos])
}

/// `name` is `owner` itself or lies under it, on a segment boundary.
///
/// ```
/// use soapjpa_core::naming::is_within;
///
/// assert!(is_within("a.Offer$Item", "a.Offer"));
/// assert!(!is_within("a.OfferLine.Item", "a.Offer"));
/// ```
pub fn is_within(name: &str, owner: &str) -> bool {
    name.strip_prefix(owner)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['.', '$']))
}

/// Name of a generated type: every class segment of a binary name gets `suffix`.
///
/// # Examples
///
/// ```
/// use soapjpa_core::naming::suffixed_name;
///
/// assert_eq!(suffixed_name("a.B$C", "JPA"), "a.BJPA.CJPA");
/// assert_eq!(suffixed_name("a.B", "Fields"), "a.BFields");
/// ```
pub fn suffixed_name(binary_name: &str, suffix: &str) -> String {
    let mut name = binary_name.replace('$', &format!("{suffix}."));
    name.push_str(suffix);
    name
}
