//! Stub model shared by the CLI unit tests

use soapjpa_core::{ClassDef, ClassGraph, ClassSet, GenerationPlan, GeneratorConfig};

pub const GENERATION_DATE: &str = "2015-03-03T10:00:00Z";

pub fn offer_set() -> ClassSet {
    ClassSet::from_defs(vec![
        ClassDef::new("com.pi", "Offer")
            .interface()
            .extends("com.pi.Base")
            .getter("getId", "java.lang.String")
            .getter("getSecondName", "java.lang.String")
            .getter("getItems", "java.util.List<com.pi.Offer$Item>")
            .getter("getCandidate", "com.pi.Candidate")
            .getter("getNote", "com.pi.Candidate$Note")
            .getter("getPayload", "byte[]")
            .with_nested(
                ClassDef::nested("Item")
                    .interface()
                    .getter("getLabel", "java.lang.String")
                    .getter("getAmount", "int"),
            ),
        ClassDef::new("com.pi", "Base")
            .interface()
            .getter("getCreated", "java.lang.String"),
        ClassDef::new("com.pi", "Candidate")
            .interface()
            .getter("getId", "java.lang.Long")
            .getter("getName", "java.lang.String")
            .with_nested(ClassDef::nested("Note").getter("getText", "java.lang.String")),
        ClassDef::new("com.pi", "ObjectFactory").getter("getAnything", "java.lang.String"),
    ])
    .unwrap()
}

pub fn config() -> GeneratorConfig {
    GeneratorConfig::default()
        .with_generation_date(GENERATION_DATE)
        .with_worker_threads(2)
}

pub fn offer_plan() -> GenerationPlan {
    let set = offer_set();
    let config = config();
    ClassGraph::new(&set, &config).unwrap().plan().unwrap()
}
