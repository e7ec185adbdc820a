#![allow(non_snake_case)]

use super::*;
use crate::fixtures::{config, offer_plan};
use soapjpa_core::{ClassDef, ClassGraph, ClassSet, FieldModel};

fn offer_source() -> String {
    let plan = offer_plan();
    let offer = plan
        .entities
        .iter()
        .find(|e| e.class_name == "Offer")
        .unwrap();
    render_entity(offer)
}

fn render_class_of(set: ClassSet, class_name: &str) -> String {
    let config = config();
    let plan = ClassGraph::new(&set, &config).unwrap().plan().unwrap();
    let entity = plan
        .entities
        .iter()
        .find(|e| e.class_name == class_name)
        .unwrap();
    render_entity(entity)
}

#[test]
fn source_file___uses_entity_name_and_package() {
    let plan = offer_plan();

    let file = source_file(&plan.entities[0]);

    assert_eq!(file, SourceFile::new("com.pi", "BaseJPA"));
}

#[test]
fn render_entity___declares_entity_with_superclass() {
    let source = offer_source();

    assert!(source.starts_with("package com.pi;\n\nimport javax.persistence.*;\n"));
    assert!(source.contains("@Entity\npublic class OfferJPA extends com.pi.BaseJPA implements java.io.Serializable {"));
    assert!(source.contains("Persistent counterpart of {@link com.pi.Offer}."));
}

#[test]
fn render_entity___stamps_generation_date() {
    let source = offer_source();

    assert!(source.contains(
        "@javax.annotation.Generated(value = \"soapjpa\", date = \"2015-03-03T10:00:00Z\")\n@Entity"
    ));
}

#[test]
fn render_entity___identity_field_uses_cast_type() {
    let source = offer_source();

    assert!(source.contains("    @Id\n    @Column(name = \"ID\")\n    private java.lang.Long id;"));
    assert!(source.contains(
        "this.id = source.getId() == null ? null : Long.valueOf(source.getId());"
    ));
    assert!(source.contains("public java.lang.Long getId() {"));
}

#[test]
fn render_entity___primitive_field_uses_constant_column() {
    let source = offer_source();

    assert!(source.contains("    @Column(name = \"SECOND_NAME\")\n    private java.lang.String secondName;"));
    assert!(source.contains("this.secondName = source.getSecondName();"));
}

#[test]
fn render_entity___byte_array_is_lob() {
    let source = offer_source();

    assert!(source.contains("    @Lob\n    @Column(name = \"PAYLOAD\")\n    private byte[] payload;"));
}

#[test]
fn render_entity___entity_reference_is_many_to_one() {
    let source = offer_source();

    assert!(source.contains(
        "    @ManyToOne(cascade = CascadeType.ALL)\n    private com.pi.CandidateJPA candidate;"
    ));
    assert!(source.contains(
        "this.candidate = source.getCandidate() == null ? null : new com.pi.CandidateJPA(source.getCandidate());"
    ));
}

#[test]
fn render_entity___collection_of_nested_copies_items() {
    let source = offer_source();

    assert!(source.contains(
        "    @ElementCollection\n    private java.util.List<com.pi.OfferJPA.ItemJPA> items;"
    ));
    assert!(source.contains("for (com.pi.Offer.Item item : source.getItems()) {"));
    assert!(source.contains("this.items.add(new com.pi.OfferJPA.ItemJPA(item));"));
}

#[test]
fn render_entity___nested_classes_are_embeddable() {
    let source = offer_source();

    assert!(source.contains("    @Embeddable\n    public static class ItemJPA implements java.io.Serializable {"));
    assert!(source.contains("        public ItemJPA(com.pi.Offer.Item source) {"));
    assert!(source.contains("            this.amount = source.getAmount();"));
}

#[test]
fn render_entity___stranger_is_embedded_with_own_constructor() {
    let source = offer_source();

    assert!(source.contains("    private com.pi.OfferJPA.NoteJPA note;"));
    assert!(source.contains("    public static class NoteJPA implements java.io.Serializable {"));
    assert!(source.contains("        public NoteJPA(com.pi.Candidate.Note source) {"));
    assert!(source.contains(
        "<p>Field {@code note} holds com.pi.Candidate.Note, declared under com.pi.Candidate."
    ));
}

#[test]
fn render_entity___braces_balance() {
    let source = offer_source();

    let open = source.matches('{').count();
    let close = source.matches('}').count();
    assert_eq!(open, close);
}

#[test]
fn render_entity___without_superclass_has_no_extends() {
    let plan = offer_plan();
    let base = &plan.entities[0];

    let source = render_entity(base);

    assert!(source.contains("public class BaseJPA implements java.io.Serializable {"));
    assert!(source.contains("public BaseJPA(com.pi.Base source) {"));
}

#[test]
fn render_entity___stranger_collection_iterates_declared_stub_type() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("a", "Offer")
            .interface()
            .getter("getNotes", "java.util.List<a.Candidate$Note>"),
        ClassDef::new("a", "Candidate")
            .interface()
            .getter("getId", "java.lang.Long")
            .with_nested(ClassDef::nested("Note").getter("getText", "java.lang.String")),
    ])
    .unwrap();

    let source = render_class_of(set, "Offer");

    assert!(source.contains("for (a.Candidate.Note item : source.getNotes()) {"));
    assert!(source.contains("this.notes.add(new a.OfferJPA.NoteJPA(item));"));
    assert!(source.contains("        public NoteJPA(a.Candidate.Note source) {"));
    assert!(!source.contains("a.Offer.Note item"));
}

#[test]
fn render_entity___renamed_field_reads_stub_accessor() {
    let set = ClassSet::from_defs(vec![
        ClassDef::new("a", "Price")
            .interface()
            .getter("getValue", "java.lang.String")
            .field(FieldModel::new("value", "java.lang.String").with_override("Amount")),
    ])
    .unwrap();

    let source = render_class_of(set, "Price");

    assert!(source.contains("    private java.lang.String Amount;"));
    assert!(source.contains("this.Amount = source.getValue();"));
    assert!(!source.contains("source.getAmount()"));
}
