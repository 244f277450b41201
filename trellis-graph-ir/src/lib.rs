//! Term, triple, and graph intermediate representation
//!
//! This crate provides the canonical types for representing RDF-like data
//! flowing through the Trellis pipeline: normalizers produce them, the store
//! owns them, and the query engine matches against them.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - IRIs are stored in expanded form; prefix
//!    handling is an input-layer concern.
//!
//! 2. **Literals are not IRIs** - A literal always carries an explicit
//!    datatype. Plain strings use `xsd:string`, language-tagged strings use
//!    `rdf:langString`. There is no "untyped" term.
//!
//! 3. **Bag semantics by default** - [`Graph`] uses `Vec<Triple>` and
//!    preserves both duplicates and emission order. Set semantics live in
//!    the store, which dedupes on insert.
//!
//! # Example
//!
//! ```
//! use trellis_graph_ir::{Graph, Term};
//!
//! let mut graph = Graph::new();
//! graph.add_triple(
//!     Term::iri("http://example.org/alice"),
//!     Term::iri("http://schema.org/name"),
//!     Term::string("Alice"),
//! );
//! assert_eq!(graph.len(), 1);
//! ```

pub mod datatype;
mod graph;
mod term;
mod triple;

pub use datatype::Datatype;
pub use graph::Graph;
pub use term::{BlankId, LiteralValue, Term};
pub use triple::Triple;
