//! The two-phase ingest-then-query pipeline
//!
//! Phase one normalizes the document and inserts every triple into a fresh
//! store. Phase two evaluates the pattern against a frozen snapshot. The
//! query phase can never observe a partially populated store:
//!
//! - In [`Pipeline::run_sync`], the store is owned by the ingest code and
//!   only its completed snapshot is handed to the query.
//! - In [`Pipeline::run`], the normalizer feeds a channel whose close is the
//!   end-of-sequence marker; one ingest task owns the store (single writer)
//!   and the query phase starts only after its join handle resolves.

use crate::error::{PipelineError, Result};
use serde_json::Value as JsonValue;
use tokio::sync::mpsc;
use tracing::debug;
use trellis_graph_ir::Term;
use trellis_graph_json_ld::{normalize, NormalizeOptions};
use trellis_query::{Bindings, TriplePattern, VarRegistry};
use trellis_store::TripleStore;

/// Channel depth for the async ingest path
const INGEST_CHANNEL_CAPACITY: usize = 64;

/// A pattern given as three position strings
///
/// Parsed by [`TriplePattern::parse`]: `?name` is a variable, `<iri>` an
/// IRI, `_:label` a blank node; a bare object string is a plain literal.
#[derive(Debug, Clone)]
pub struct PatternSpec {
    pub s: String,
    pub p: String,
    pub o: String,
}

impl PatternSpec {
    /// Create a pattern spec from three position strings
    pub fn new(s: impl Into<String>, p: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            s: s.into(),
            p: p.into(),
            o: o.into(),
        }
    }
}

/// One normalize-ingest-query pass over a single document
///
/// The store and variable registry are created per invocation and scoped to
/// it; nothing is process-global.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use trellis_pipeline::{PatternSpec, Pipeline};
///
/// let doc = json!({"http://schema.org/name": "Manu Sporny"});
/// let pipeline = Pipeline::new(doc, PatternSpec::new("?s", "?p", "?o"));
///
/// let bindings: Vec<_> = pipeline.run_sync().unwrap().collect();
/// assert_eq!(bindings.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    doc: JsonValue,
    pattern: PatternSpec,
    subject: Option<Term>,
    limit: Option<usize>,
}

impl Pipeline {
    /// Create a pipeline for one document and one pattern
    pub fn new(doc: JsonValue, pattern: PatternSpec) -> Self {
        Self {
            doc,
            pattern,
            subject: None,
            limit: None,
        }
    }

    /// Use an explicit subject for the document's triples
    pub fn with_subject(mut self, subject: Term) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Cap the number of query results
    ///
    /// Zero means unrestricted, matching the query layer.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            subject: self.subject.clone(),
        }
    }

    /// Run synchronously: normalize, ingest, then query
    ///
    /// Returns the lazy binding sequence over the finished store's snapshot.
    pub fn run_sync(&self) -> Result<Bindings> {
        let graph = normalize(&self.doc, &self.normalize_options())?;

        let mut store = TripleStore::with_capacity(graph.len());
        let added = store.insert_all(graph)?;
        debug!(added, "ingest phase complete");

        self.query_phase(&store)
    }

    /// Run with tokio: normalization feeds a channel, one ingest task owns
    /// the store, and the query phase starts after ingest completes
    ///
    /// Closing the channel is the end-of-sequence marker; all insertions are
    /// serialized in the ingest task.
    pub async fn run(&self) -> Result<Bindings> {
        let (tx, mut rx) = mpsc::channel(INGEST_CHANNEL_CAPACITY);

        let doc = self.doc.clone();
        let opts = self.normalize_options();
        let producer = tokio::spawn(async move {
            let graph = normalize(&doc, &opts)?;
            for triple in graph {
                // Receiver only drops on ingest failure; surfaced there
                if tx.send(triple).await.is_err() {
                    break;
                }
            }
            Ok::<_, PipelineError>(())
            // tx dropped here: end of sequence
        });

        let ingest = tokio::spawn(async move {
            let mut store = TripleStore::new();
            while let Some(triple) = rx.recv().await {
                store.insert(triple)?;
            }
            debug!(total = store.len(), "ingest phase complete");
            Ok::<_, PipelineError>(store)
        });

        producer
            .await
            .map_err(|e| PipelineError::Task(e.to_string()))??;
        let store = ingest
            .await
            .map_err(|e| PipelineError::Task(e.to_string()))??;

        self.query_phase(&store)
    }

    fn query_phase(&self, store: &TripleStore) -> Result<Bindings> {
        let mut vars = VarRegistry::new();
        let pattern = TriplePattern::parse(
            &self.pattern.s,
            &self.pattern.p,
            &self.pattern.o,
            &mut vars,
        )?;

        let bindings = trellis_query::run(&pattern, &vars, store, self.limit)?;
        debug!("query phase started");
        Ok(bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn demo_doc() -> JsonValue {
        json!({
            "http://schema.org/name": "Manu Sporny",
            "http://schema.org/url": {"@id": "http://manu.sporny.org/"},
            "http://schema.org/image": {"@id": "http://manu.sporny.org/images/manu.png"}
        })
    }

    #[test]
    fn test_run_sync_full_scan() {
        let pipeline = Pipeline::new(demo_doc(), PatternSpec::new("?s", "?p", "?o"));
        let bindings: Vec<_> = pipeline.run_sync().unwrap().collect();
        assert_eq!(bindings.len(), 3);
    }

    #[test]
    fn test_run_sync_fixed_object() {
        let pipeline = Pipeline::new(
            demo_doc(),
            PatternSpec::new("?s", "?p", "<http://manu.sporny.org/>"),
        )
        .with_subject(Term::iri("http://example.org/manu"));

        let bindings: Vec<_> = pipeline.run_sync().unwrap().collect();
        assert_eq!(bindings.len(), 1);
        assert_eq!(
            bindings[0].get("p"),
            Some(&Term::iri("http://schema.org/url"))
        );
    }

    #[test]
    fn test_run_sync_malformed_document() {
        let pipeline = Pipeline::new(
            json!({"http://e.org/p": [1, 2]}),
            PatternSpec::new("?s", "?p", "?o"),
        );
        let err = pipeline.run_sync().unwrap_err();
        assert!(matches!(err, PipelineError::Normalize(_)));
    }

    #[tokio::test]
    async fn test_run_async_matches_sync() {
        let pipeline = Pipeline::new(demo_doc(), PatternSpec::new("?s", "?p", "?o"))
            .with_subject(Term::iri("http://example.org/manu"));

        let sync: Vec<_> = pipeline.run_sync().unwrap().collect();
        let asynchronous: Vec<_> = pipeline.run().await.unwrap().collect();
        assert_eq!(sync, asynchronous);
    }

    #[tokio::test]
    async fn test_run_async_malformed_document() {
        let pipeline = Pipeline::new(
            json!({"http://e.org/p": null}),
            PatternSpec::new("?s", "?p", "?o"),
        );
        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(err, PipelineError::Normalize(_)));
    }

    #[test]
    fn test_limit_flows_through() {
        let pipeline = Pipeline::new(demo_doc(), PatternSpec::new("?s", "?p", "?o")).with_limit(2);
        let bindings: Vec<_> = pipeline.run_sync().unwrap().collect();
        assert_eq!(bindings.len(), 2);
    }
}
