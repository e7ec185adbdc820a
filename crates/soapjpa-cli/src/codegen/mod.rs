//! Java source emitters for a [`GenerationPlan`].
//!
//! Each emitter turns one rendering context into the text of one `.java`
//! file. Every artifact is described by a [`SourceFile`] (package and type
//! name) first, so the caller can decide whether a file needs rendering at
//! all before paying for it.
//!
//! # Artifacts
//!
//! | Context | Emitter | File |
//! |---------|---------|------|
//! | [`EntityContext`](soapjpa_core::EntityContext) | [`entity::render_entity`] | `<package>/<Class>JPA.java` |
//! | [`FieldsContext`](soapjpa_core::FieldsContext) | [`fields::render_fields`] | `<package>/<Class>Fields.java` |
//! | [`FactoryContext`](soapjpa_core::FactoryContext) | [`factory::render_factory`] | `<factory package>/JPAEntitiesFactory.java` |
//! | [`FieldProviderInterfaceContext`](soapjpa_core::FieldProviderInterfaceContext) | [`factory::render_field_provider`] | `<fields package>/IFieldProvider.java` |
//!
//! All emitters build text with `push_str`/`format!`; generated names are
//! always written fully qualified, so the only import is `javax.persistence.*`.

pub mod entity;
pub mod factory;
pub mod fields;
pub mod java;

use std::path::PathBuf;

/// Location of one generated Java type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub package: String,
    pub type_name: String,
}

impl SourceFile {
    pub fn new(package: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            type_name: type_name.into(),
        }
    }

    /// Path relative to the output root: one directory per package segment
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(format!("{}.java", self.type_name));
        path
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::path::Path;

    #[test]
    fn SourceFile___relative_path___package_becomes_directories() {
        let file = SourceFile::new("com.pi", "OfferJPA");

        assert_eq!(file.relative_path(), Path::new("com/pi/OfferJPA.java"));
    }

    #[test]
    fn SourceFile___relative_path___default_package_is_root() {
        let file = SourceFile::new("", "OfferJPA");

        assert_eq!(file.relative_path(), Path::new("OfferJPA.java"));
    }
}
