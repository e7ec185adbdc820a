#![allow(non_snake_case)]

use super::*;
use crate::driver::TargetTypeTable;
use crate::model::ClassDef;

fn build(
    set: &ClassSet,
    class: &str,
    identity_type: &str,
) -> (GenerationResult<FieldMap>, Diagnostics) {
    let table: TargetTypeTable = [("t.Address", "t.AddressJPA")].into_iter().collect();
    let class = set.by_name(class).unwrap();
    let request = ResolveRequest {
        classes: set,
        outermost: set.outermost(class.id),
        targets: &table,
        identity_field_name: "id",
        identity_field_type: identity_type,
        entity_suffix: "JPA",
    };

    let mut diagnostics = Diagnostics::new();
    let map = build_field_map(&request, class, &mut diagnostics);
    (map, diagnostics)
}

#[test]
fn collect_parent_fields___fields_only_on_superclass___reports_inherited() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("t", "Parent").field(FieldModel::new("number", "int")),
        ClassDef::new("t", "Child").extends("t.Parent"),
    ])
    .unwrap();
    let child = set.by_name("t.Child").unwrap();

    let fields = collect_parent_fields(&set, child);

    assert!(fields.iter().any(|f| f.name == "number"));
    assert!(!fields.iter().any(|f| f.name == "nonExistingField"));
}

#[test]
fn collect_parent_fields___only_direct_superclass() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("t", "GrandParent").field(FieldModel::new("deep", "int")),
        ClassDef::new("t", "Parent")
            .extends("t.GrandParent")
            .field(FieldModel::new("number", "int")),
        ClassDef::new("t", "Child")
            .extends("t.Parent")
            .field(FieldModel::new("own", "int")),
    ])
    .unwrap();
    let child = set.by_name("t.Child").unwrap();

    let names: Vec<_> = collect_parent_fields(&set, child)
        .iter()
        .map(|f| f.name.as_str())
        .collect();

    assert_eq!(names, vec!["own", "number"]);
}

#[test]
fn build_field_map___name_override___recapitalized() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("t", "Search")
            .getter("getRegexLike", "java.lang.String")
            .getter("getEEOInfoRequestDate", "java.lang.String")
            .field(FieldModel::new("regexLike", "java.lang.String").with_override("regex_like"))
            .field(
                FieldModel::new("eeoInfoRequestDate", "java.lang.String")
                    .with_override("EEOInfoRequestDate"),
            ),
    ])
    .unwrap();

    let (map, _) = build(&set, "t.Search", "java.lang.Long");
    let keys: Vec<_> = map.unwrap().into_keys().collect();

    assert_eq!(keys, vec!["EEOInfoRequestDate", "regexLike"]);
}

#[test]
fn build_field_map___name_override___keeps_stub_accessor() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("t", "Price")
            .getter("getValue", "java.lang.String")
            .field(FieldModel::new("value", "java.lang.String").with_override("Amount")),
    ])
    .unwrap();

    let (map, _) = build(&set, "t.Price", "java.lang.Long");
    let map = map.unwrap();

    assert_eq!(map["Amount"].accessor.as_deref(), Some("getValue"));
}

#[test]
fn build_field_map___discriminator_annotation___polymorphic_implementations() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("t", "SimpleClassWithPolymorphicField")
            .getter("getLstTest", "java.util.List<java.lang.Object>")
            .field(
                FieldModel::new("lstTest", "java.util.List<java.lang.Object>")
                    .with_implementation("Object", None)
                    .with_implementation("SimpleClassOne", Some("t.SimpleClassOne"))
                    .with_implementation("SimpleClassTwo", Some("t.SimpleClassTwo")),
            ),
    ])
    .unwrap();

    let (map, _) = build(&set, "t.SimpleClassWithPolymorphicField", "java.lang.Long");
    let map = map.unwrap();
    let descriptor = &map["lstTest"];

    assert!(descriptor.is_abstract());
    assert_eq!(
        descriptor
            .polymorphic_implementations
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>(),
        vec!["SimpleClassOne", "SimpleClassTwo"]
    );
}

#[test]
fn build_field_map___string_identity___cast_to_long() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("t", "Offer").getter("getId", "java.lang.String"),
    ])
    .unwrap();

    let (map, _) = build(&set, "t.Offer", "java.lang.Long");
    let map = map.unwrap();

    assert_eq!(map["id"].cast, Some(CastType::StringToLong));
    assert!(map["id"].requires_cast());
}

#[test]
fn build_field_map___matching_identity_type___no_cast() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("t", "Offer").getter("getId", "long"),
        ClassDef::new("t", "Boxed").getter("getID", "java.lang.Long"),
    ])
    .unwrap();

    let (primitive, _) = build(&set, "t.Offer", "java.lang.Long");
    let (boxed, _) = build(&set, "t.Boxed", "java.lang.Long");

    assert!(!primitive.unwrap()["id"].requires_cast());
    assert!(!boxed.unwrap()["iD"].requires_cast());
}

#[test]
fn build_field_map___unsupported_identity_type___unmapped_cast_error() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("t", "Offer").getter("getId", "java.lang.Boolean"),
    ])
    .unwrap();

    let (map, _) = build(&set, "t.Offer", "java.lang.Long");

    match map {
        Err(GenerationError::UnmappedCast { class, from, to, .. }) => {
            assert_eq!(class, "t.Offer");
            assert_eq!(from, "java.lang.Boolean");
            assert_eq!(to, "java.lang.Long");
        }
        other => panic!("expected UnmappedCast, got {other:?}"),
    }
}

#[test]
fn build_field_map___inherited_accessors___included_first_wins() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("t", "Base")
            .getter("getName", "int")
            .getter("getCode", "java.lang.String"),
        ClassDef::new("t", "Derived")
            .extends("t.Base")
            .getter("getName", "java.lang.String"),
    ])
    .unwrap();

    let (map, _) = build(&set, "t.Derived", "java.lang.Long");
    let map = map.unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(
        map["name"].resolved_type_name.as_deref(),
        Some("java.lang.String")
    );
    assert!(map.contains_key("code"));
}

#[test]
fn build_field_map___unmapped_and_reserved___dropped() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("t", "Person")
            .getter("getAddress", "t.Address")
            .getter("getForeign", "x.Unknown")
            .getter("getRaw", "org.apache.xmlbeans.XmlObject")
            .getter("getName", "java.lang.String")
            .method(MethodModel {
                name: "getByIndex".to_string(),
                parameters: vec!["int".to_string()],
                return_type: "java.lang.String".to_string(),
            }),
        ClassDef::new("t", "Address").getter("getCity", "java.lang.String"),
    ])
    .unwrap();

    let (map, diagnostics) = build(&set, "t.Person", "java.lang.Long");
    let keys: Vec<_> = map.unwrap().into_keys().collect();

    assert_eq!(keys, vec!["address", "name"]);
    assert!(matches!(
        diagnostics.warnings(),
        [Warning::UnmappedType { type_name, field_kind: FieldKind::ComplexType, .. }]
            if type_name == "x.Unknown"
    ));
}
