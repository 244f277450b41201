//! Document normalization for the Trellis pipeline
//!
//! Converts a subject-implicit JSON document (a mapping of predicate IRIs to
//! literal or reference values) into a [`Graph`](trellis_graph_ir::Graph) of
//! triples. This covers the simple mapping case only: context processing,
//! `@list`, `@graph`, and nested node expansion belong to a full JSON-LD
//! processor, not this crate.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use trellis_graph_json_ld::{normalize, NormalizeOptions};
//! use trellis_graph_ir::Term;
//!
//! let doc = json!({
//!     "http://schema.org/name": "Manu Sporny",
//!     "http://schema.org/url": {"@id": "http://manu.sporny.org/"}
//! });
//!
//! let opts = NormalizeOptions::with_subject(Term::iri("http://example.org/manu"));
//! let graph = normalize(&doc, &opts).unwrap();
//! assert_eq!(graph.len(), 2);
//! ```

pub mod error;
mod normalize;

pub use error::{NormalizeError, Result};
pub use normalize::{normalize, NormalizeOptions};
