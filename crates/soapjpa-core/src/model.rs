//! Read-only object model of the SOAP stubs.
//!
//! The front end that parses stub sources is external; it hands over the
//! classes as [`ClassDef`] trees (usually as JSON), and [`ClassSet`] turns
//! them into an arena addressed by [`ClassId`] with lookups by qualified name.
//!
//! # Naming
//!
//! - `qualified_name` is the dotted canonical name (`com.example.Offer.Item`)
//! - `binary_name` separates nested classes with `$` (`com.example.Offer$Item`)
//!
//! # JSON Shape
//!
//! ```json
//! {
//!   "classes": [{
//!     "package": "com.example",
//!     "name": "Offer",
//!     "interface": true,
//!     "superclass": "com.example.Base",
//!     "fields": [{ "name": "regex_like", "type": "java.lang.String", "name_override": "regex_like" }],
//!     "methods": [{ "name": "getItems", "returns": "java.util.List<com.example.Offer$Item>" }],
//!     "nested": [{ "name": "Item", "methods": [] }]
//!   }]
//! }
//! ```

use crate::error::{GenerationError, GenerationResult};
use crate::naming;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Index of a class inside its [`ClassSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

/// One entry of a type-discriminator annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implementation {
    /// Element name the discriminator uses
    pub name: String,

    /// Concrete type; the generic leading entry has none
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// A declared field of a stub class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldModel {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    /// Explicit element name from a naming-override annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_override: Option<String>,

    /// Entries of a multi-implementation annotation, in declaration order
    #[serde(default, rename = "implementations", skip_serializing_if = "Vec::is_empty")]
    pub alternate_implementations: Vec<Implementation>,
}

impl FieldModel {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            name_override: None,
            alternate_implementations: Vec::new(),
        }
    }

    /// Attach a naming-override value
    pub fn with_override(mut self, name: impl Into<String>) -> Self {
        self.name_override = Some(name.into());
        self
    }

    /// Append a discriminator entry
    pub fn with_implementation(mut self, name: impl Into<String>, type_name: Option<&str>) -> Self {
        self.alternate_implementations.push(Implementation {
            name: name.into(),
            type_name: type_name.map(str::to_string),
        });
        self
    }

    /// Names of the concrete implementations, skipping entries without a type
    pub fn concrete_implementations(&self) -> impl Iterator<Item = &str> {
        self.alternate_implementations
            .iter()
            .filter(|imp| imp.type_name.is_some())
            .map(|imp| imp.name.as_str())
    }
}

/// A method of a stub class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodModel {
    pub name: String,

    /// Parameter types
    #[serde(default)]
    pub parameters: Vec<String>,

    /// Generic fully qualified return type, e.g. `java.util.List<a.B$C>` or `a.D[]`
    #[serde(rename = "returns")]
    pub return_type: String,
}

impl MethodModel {
    /// A zero-argument method
    pub fn getter(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: return_type.into(),
        }
    }

    /// Whether this method is a `get...()` accessor
    pub fn is_accessor(&self) -> bool {
        naming::is_accessor(&self.name, self.parameters.len())
    }
}

/// Input description of a class, as produced by the parsing front end
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassDef {
    /// Package; ignored for nested classes, which share their parent's
    #[serde(default)]
    pub package: String,

    pub name: String,

    #[serde(default, rename = "interface")]
    pub is_interface: bool,

    /// Qualified name of the superclass, if any
    #[serde(default)]
    pub superclass: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldModel>,

    #[serde(default)]
    pub methods: Vec<MethodModel>,

    #[serde(default)]
    pub nested: Vec<ClassDef>,
}

impl ClassDef {
    /// A top-level class
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// A nested class (package comes from the enclosing class)
    pub fn nested(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn field(mut self, field: FieldModel) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a zero-argument accessor
    pub fn getter(mut self, name: impl Into<String>, return_type: impl Into<String>) -> Self {
        self.methods.push(MethodModel::getter(name, return_type));
        self
    }

    pub fn method(mut self, method: MethodModel) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_nested(mut self, nested: ClassDef) -> Self {
        self.nested.push(nested);
        self
    }
}

/// A stub class or interface
#[derive(Debug, Clone)]
pub struct ClassModel {
    pub id: ClassId,
    pub name: String,
    pub package: String,
    pub qualified_name: String,
    pub binary_name: String,
    pub is_interface: bool,
    pub enclosing: Option<ClassId>,
    pub superclass: Option<String>,
    pub fields: Vec<FieldModel>,
    pub methods: Vec<MethodModel>,
    pub nested: Vec<ClassId>,
}

impl ClassModel {
    pub fn is_nested(&self) -> bool {
        self.enclosing.is_some()
    }

    /// Zero-argument `get...` methods, in declaration order
    pub fn accessors(&self) -> impl Iterator<Item = &MethodModel> {
        self.methods.iter().filter(|m| m.is_accessor())
    }

    /// Whether the class itself declares a field or accessor for `field_name`
    /// (case-insensitive)
    pub fn declares_member(&self, field_name: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.name.eq_ignore_ascii_case(field_name))
            || self
                .accessors()
                .any(|m| naming::extract_field_name(&m.name).eq_ignore_ascii_case(field_name))
    }
}

#[derive(Debug, Deserialize)]
struct ModelFile {
    classes: Vec<ClassDef>,
}

/// The full set of input classes, top-level and nested
#[derive(Debug, Clone, Default)]
pub struct ClassSet {
    classes: Vec<ClassModel>,
    by_name: HashMap<String, ClassId>,
}

impl ClassSet {
    /// Build the arena from class definitions
    pub fn from_defs(defs: Vec<ClassDef>) -> GenerationResult<Self> {
        let mut set = Self::default();
        for def in defs {
            set.insert(def, None)?;
        }
        Ok(set)
    }

    /// Parse a JSON model document
    pub fn from_json(json: &str) -> GenerationResult<Self> {
        let file: ModelFile = serde_json::from_str(json)?;
        Self::from_defs(file.classes)
    }

    /// Read and parse a JSON model file
    pub fn from_file(path: impl AsRef<Path>) -> GenerationResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    fn insert(&mut self, def: ClassDef, enclosing: Option<ClassId>) -> GenerationResult<ClassId> {
        if def.name.trim().is_empty() {
            return Err(GenerationError::InvalidModel(
                "class name cannot be empty".to_string(),
            ));
        }

        let (package, qualified_name, binary_name) = match enclosing {
            Some(parent) => {
                let parent = &self.classes[parent.0];
                (
                    parent.package.clone(),
                    format!("{}.{}", parent.qualified_name, def.name),
                    format!("{}${}", parent.binary_name, def.name),
                )
            }
            None if def.package.is_empty() => (String::new(), def.name.clone(), def.name.clone()),
            None => {
                let qualified = format!("{}.{}", def.package, def.name);
                (def.package.clone(), qualified.clone(), qualified)
            }
        };

        if self.by_name.contains_key(&qualified_name) {
            return Err(GenerationError::InvalidModel(format!(
                "duplicate class: {qualified_name}"
            )));
        }

        let id = ClassId(self.classes.len());
        self.classes.push(ClassModel {
            id,
            name: def.name,
            package,
            qualified_name: qualified_name.clone(),
            binary_name,
            is_interface: def.is_interface,
            enclosing,
            superclass: def.superclass.map(|s| s.replace('$', ".")),
            fields: def.fields,
            methods: def.methods,
            nested: Vec::new(),
        });
        self.by_name.insert(qualified_name, id);

        for nested in def.nested {
            let child = self.insert(nested, Some(id))?;
            self.classes[id.0].nested.push(child);
        }

        Ok(id)
    }

    pub fn get(&self, id: ClassId) -> &ClassModel {
        &self.classes[id.0]
    }

    /// Look up a class by qualified or binary name
    pub fn by_name(&self, name: &str) -> Option<&ClassModel> {
        let id = match self.by_name.get(name) {
            Some(id) => *id,
            None => *self.by_name.get(&name.replace('$', "."))?,
        };
        Some(&self.classes[id.0])
    }

    /// All classes in definition order, parents before their nested classes
    pub fn classes(&self) -> impl Iterator<Item = &ClassModel> {
        self.classes.iter()
    }

    pub fn top_level(&self) -> impl Iterator<Item = &ClassModel> {
        self.classes.iter().filter(|c| !c.is_nested())
    }

    pub fn nested_of(&self, id: ClassId) -> impl Iterator<Item = &ClassModel> {
        self.classes[id.0].nested.iter().map(|n| &self.classes[n.0])
    }

    /// The declared superclass, when it is part of this set
    pub fn superclass_of(&self, class: &ClassModel) -> Option<&ClassModel> {
        class.superclass.as_deref().and_then(|s| self.by_name(s))
    }

    pub fn enclosing_of(&self, class: &ClassModel) -> Option<&ClassModel> {
        class.enclosing.map(|id| &self.classes[id.0])
    }

    /// The top-level class that lexically contains `id` (itself when top-level)
    pub fn outermost(&self, id: ClassId) -> &ClassModel {
        let mut current = &self.classes[id.0];
        while let Some(parent) = current.enclosing {
            current = &self.classes[parent.0];
        }
        current
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
#[path = "model/model_tests.rs"]
mod model_tests;
