//! End-to-end pipeline tests: document in, bindings out

use serde_json::json;
use trellis_graph_ir::Term;
use trellis_pipeline::{PatternSpec, Pipeline, PipelineError};

#[test]
fn full_scan_yields_one_binding_per_triple() {
    let doc = json!({
        "http://schema.org/name": "Manu Sporny",
        "http://schema.org/url": {"@id": "http://manu.sporny.org/"},
        "http://schema.org/image": {"@id": "http://manu.sporny.org/images/manu.png"}
    });

    let pipeline = Pipeline::new(doc, PatternSpec::new("?s", "?p", "?o"))
        .with_subject(Term::iri("http://example.org/manu"));

    let bindings: Vec<_> = pipeline.run_sync().unwrap().collect();
    assert_eq!(bindings.len(), 3);

    // Every binding shares the supplied subject
    for b in &bindings {
        assert_eq!(b.get("s"), Some(&Term::iri("http://example.org/manu")));
    }
}

#[test]
fn literal_objects_stay_literals() {
    let doc = json!({"http://schema.org/name": "Manu Sporny"});

    let pipeline = Pipeline::new(doc, PatternSpec::new("?s", "?p", "?o"));
    let bindings: Vec<_> = pipeline.run_sync().unwrap().collect();

    let name = bindings[0].get("o").unwrap();
    assert!(name.is_literal());
    assert_eq!(name, &Term::string("Manu Sporny"));
}

#[test]
fn fixed_object_selects_matching_predicate() {
    let doc = json!({
        "http://schema.org/name": "Manu Sporny",
        "http://schema.org/url": {"@id": "http://manu.sporny.org/"}
    });

    let pipeline = Pipeline::new(doc, PatternSpec::new("?s", "?p", "<http://manu.sporny.org/>"));
    let bindings: Vec<_> = pipeline.run_sync().unwrap().collect();

    assert_eq!(bindings.len(), 1);
    assert_eq!(
        bindings[0].get("p"),
        Some(&Term::iri("http://schema.org/url"))
    );
}

#[tokio::test]
async fn async_path_equals_sync_path() {
    let doc = json!({
        "http://schema.org/name": "Manu Sporny",
        "http://schema.org/url": {"@id": "http://manu.sporny.org/"},
        "http://schema.org/image": {"@id": "http://manu.sporny.org/images/manu.png"}
    });

    let pipeline = Pipeline::new(doc, PatternSpec::new("?s", "?p", "?o"))
        .with_subject(Term::iri("http://example.org/manu"))
        .with_limit(2);

    let sync: Vec<_> = pipeline.run_sync().unwrap().collect();
    let concurrent: Vec<_> = pipeline.run().await.unwrap().collect();
    assert_eq!(sync, concurrent);
    assert_eq!(sync.len(), 2);
}

#[tokio::test]
async fn async_malformed_document_surfaces_before_query() {
    let pipeline = Pipeline::new(
        json!({"http://e.org/p": {"nested": "object without @id"}}),
        PatternSpec::new("?s", "?p", "?o"),
    );

    match pipeline.run().await {
        Err(PipelineError::Normalize(_)) => {}
        other => panic!("expected normalize error, got {other:?}"),
    }
}

#[test]
fn repeated_variable_unifies_across_positions() {
    let doc = json!({
        "http://schema.org/url": {"@id": "http://example.org/manu"},
        "http://schema.org/name": "Manu Sporny"
    });

    // Subject equals the url object, so (?x, ?p, ?x) matches exactly once
    let pipeline = Pipeline::new(doc, PatternSpec::new("?x", "?p", "?x"))
        .with_subject(Term::iri("http://example.org/manu"));

    let bindings: Vec<_> = pipeline.run_sync().unwrap().collect();
    assert_eq!(bindings.len(), 1);
    assert_eq!(
        bindings[0].get("x"),
        Some(&Term::iri("http://example.org/manu"))
    );
}
