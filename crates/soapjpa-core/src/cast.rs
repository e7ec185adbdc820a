//! Identity field cast rules

use serde::{Deserialize, Serialize};

/// Conversion applied when a stub's identity field type differs from the
/// configured identity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CastType {
    StringToLong,
    StringToInt,
    StringToFloat,
}

const STRING: &str = "java.lang.String";

/// (source type, identity type) -> cast
const CAST_TABLE: &[(&str, &str, CastType)] = &[
    (STRING, "java.lang.Long", CastType::StringToLong),
    (STRING, "java.lang.Integer", CastType::StringToInt),
    (STRING, "java.lang.Float", CastType::StringToFloat),
];

/// Primitive spelling -> wrapper class
const BOXED: &[(&str, &str)] = &[
    ("int", "java.lang.Integer"),
    ("long", "java.lang.Long"),
    ("float", "java.lang.Float"),
    ("double", "java.lang.Double"),
    ("short", "java.lang.Short"),
    ("byte", "java.lang.Byte"),
    ("boolean", "java.lang.Boolean"),
    ("char", "java.lang.Character"),
];

/// Whether two type names denote the same identity type: equal ignoring
/// case, or a primitive and its wrapper class. No cast is needed between them.
pub(crate) fn same_identity_type(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
        || BOXED
            .iter()
            .any(|(p, w)| (a == *p && b == *w) || (a == *w && b == *p))
}

impl CastType {
    /// Look up the cast from `from` to `to`, `None` when the pair is not supported
    pub fn of(from: &str, to: &str) -> Option<Self> {
        CAST_TABLE
            .iter()
            .find(|(f, t, _)| *f == from && *t == to)
            .map(|(_, _, cast)| *cast)
    }

    /// Whether some supported cast produces `ty`
    pub fn is_target(ty: &str) -> bool {
        CAST_TABLE.iter().any(|(_, t, _)| *t == ty)
    }

    /// Fully qualified type produced by the conversion
    pub fn target_type(&self) -> &'static str {
        match self {
            CastType::StringToLong => "java.lang.Long",
            CastType::StringToInt => "java.lang.Integer",
            CastType::StringToFloat => "java.lang.Float",
        }
    }

    /// Java expression converting `value` to the target type
    pub fn java_expression(&self, value: &str) -> String {
        match self {
            CastType::StringToLong => format!("Long.valueOf({value})"),
            CastType::StringToInt => format!("Integer.valueOf({value})"),
            CastType::StringToFloat => format!("Float.valueOf({value})"),
        }
    }
}

impl std::fmt::Display for CastType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CastType::StringToLong => write!(f, "STRING_TO_LONG"),
            CastType::StringToInt => write!(f, "STRING_TO_INT"),
            CastType::StringToFloat => write!(f, "STRING_TO_FLOAT"),
        }
    }
}
