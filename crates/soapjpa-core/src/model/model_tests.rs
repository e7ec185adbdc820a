#![allow(non_snake_case)]

use super::*;

fn offer_set() -> ClassSet {
    ClassSet::from_defs(vec![
        ClassDef::new("com.example", "Offer")
            .interface()
            .getter("getId", "java.lang.Long")
            .getter("getItems", "java.util.List<com.example.Offer$Item>")
            .method(MethodModel {
                name: "getByIndex".to_string(),
                parameters: vec!["int".to_string()],
                return_type: "com.example.Offer$Item".to_string(),
            })
            .with_nested(
                ClassDef::nested("Item")
                    .getter("getLabel", "java.lang.String")
                    .with_nested(ClassDef::nested("Detail")),
            ),
        ClassDef::new("com.example", "Base").field(FieldModel::new("number", "int")),
    ])
    .unwrap()
}

#[test]
fn ClassSet___from_defs___registers_nested_classes() {
    let set = offer_set();

    assert_eq!(set.len(), 4);
    assert!(set.by_name("com.example.Offer.Item").is_some());
    assert!(set.by_name("com.example.Offer.Item.Detail").is_some());
}

#[test]
fn ClassSet___by_name___accepts_binary_names() {
    let set = offer_set();

    let item = set.by_name("com.example.Offer$Item").unwrap();

    assert_eq!(item.qualified_name, "com.example.Offer.Item");
    assert_eq!(item.binary_name, "com.example.Offer$Item");
    assert_eq!(item.package, "com.example");
    assert!(item.is_nested());
}

#[test]
fn ClassSet___top_level___excludes_nested() {
    let set = offer_set();

    let names: Vec<_> = set.top_level().map(|c| c.name.as_str()).collect();

    assert_eq!(names, vec!["Offer", "Base"]);
}

#[test]
fn ClassSet___outermost___walks_to_top_level() {
    let set = offer_set();
    let detail = set.by_name("com.example.Offer.Item.Detail").unwrap();

    assert_eq!(set.outermost(detail.id).name, "Offer");
}

#[test]
fn ClassSet___from_defs___rejects_duplicates() {
    let result = ClassSet::from_defs(vec![
        ClassDef::new("a", "B"),
        ClassDef::new("a", "B"),
    ]);

    assert!(matches!(result, Err(GenerationError::InvalidModel(_))));
}

#[test]
fn ClassSet___from_defs___rejects_empty_name() {
    let result = ClassSet::from_defs(vec![ClassDef::new("a", "")]);

    assert!(result.is_err());
}

#[test]
fn ClassSet___from_defs___default_package_uses_simple_name() {
    let set = ClassSet::from_defs(vec![ClassDef::new("", "A")]).unwrap();

    assert!(set.by_name("A").is_some());
}

#[test]
fn ClassSet___from_json___parses_model_document() {
    let json = r#"{
        "classes": [{
            "package": "com.example",
            "name": "Holder",
            "superclass": "com.example.Base",
            "fields": [{
                "name": "lstTest",
                "type": "java.util.List<java.lang.Object>",
                "implementations": [
                    {"name": "Object"},
                    {"name": "SimpleClassOne", "type": "com.example.SimpleClassOne"}
                ]
            }],
            "methods": [{"name": "getLstTest", "returns": "java.util.List<java.lang.Object>"}],
            "nested": [{"name": "Inner"}]
        }]
    }"#;

    let set = ClassSet::from_json(json).unwrap();
    let holder = set.by_name("com.example.Holder").unwrap();

    assert_eq!(holder.superclass.as_deref(), Some("com.example.Base"));
    assert_eq!(holder.fields[0].alternate_implementations.len(), 2);
    assert_eq!(
        holder.fields[0].concrete_implementations().collect::<Vec<_>>(),
        vec!["SimpleClassOne"]
    );
    assert_eq!(holder.accessors().count(), 1);
    assert_eq!(set.nested_of(holder.id).count(), 1);
}

#[test]
fn ClassSet___from_json___invalid_json_is_error() {
    let result = ClassSet::from_json("{\"classes\": [");

    assert!(matches!(result, Err(GenerationError::Json(_))));
}

#[test]
fn ClassModel___accessors___skips_methods_with_parameters() {
    let set = offer_set();
    let offer = set.by_name("com.example.Offer").unwrap();

    let names: Vec<_> = offer.accessors().map(|m| m.name.as_str()).collect();

    assert_eq!(names, vec!["getId", "getItems"]);
}

#[test]
fn ClassModel___declares_member___matches_field_or_accessor() {
    let set = offer_set();
    let offer = set.by_name("com.example.Offer").unwrap();
    let base = set.by_name("com.example.Base").unwrap();

    assert!(offer.declares_member("id"));
    assert!(offer.declares_member("ID"));
    assert!(base.declares_member("number"));
    assert!(!base.declares_member("id"));
}

#[test]
fn ClassSet___superclass_of___resolves_known_classes_only() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("a", "Base"),
        ClassDef::new("a", "Child").extends("a.Base"),
        ClassDef::new("a", "Orphan").extends("java.lang.Object"),
    ])
    .unwrap();

    let child = set.by_name("a.Child").unwrap();
    let orphan = set.by_name("a.Orphan").unwrap();

    assert_eq!(set.superclass_of(child).unwrap().name, "Base");
    assert!(set.superclass_of(orphan).is_none());
}
