//! Two-phase ingest-then-query orchestration
//!
//! Wires the Trellis components into one pass: normalize a document into
//! triples, ingest them into a fresh store, then evaluate a triple pattern
//! against the finished store. Ingest completion is an explicit barrier -
//! the query phase never sees a partially populated store.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use trellis_pipeline::{PatternSpec, Pipeline};
//!
//! let doc = json!({
//!     "http://schema.org/name": "Manu Sporny",
//!     "http://schema.org/url": {"@id": "http://manu.sporny.org/"}
//! });
//!
//! let pipeline = Pipeline::new(doc, PatternSpec::new("?s", "?p", "<http://manu.sporny.org/>"));
//! let bindings: Vec<_> = pipeline.run_sync().unwrap().collect();
//! assert_eq!(bindings.len(), 1);
//! ```

mod error;
mod pipeline;

pub use error::{PipelineError, Result};
pub use pipeline::{PatternSpec, Pipeline};
