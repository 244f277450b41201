//! Triple-pattern query evaluation for the Trellis pipeline
//!
//! Evaluates a single declarative triple pattern (fixed terms + variables)
//! against a store snapshot by full scan, producing a lazy sequence of
//! variable bindings in insertion order. This is deliberately not a SPARQL
//! engine: one pattern, no joins, no filters - the full query language is an
//! external collaborator's concern.
//!
//! # Example
//!
//! ```
//! use trellis_graph_ir::{Term, Triple};
//! use trellis_query::{run, TriplePattern, VarRegistry};
//! use trellis_store::TripleStore;
//!
//! let mut store = TripleStore::new();
//! store.insert(Triple::new(
//!     Term::iri("http://example.org/alice"),
//!     Term::iri("http://schema.org/name"),
//!     Term::string("Alice"),
//! )).unwrap();
//!
//! let mut vars = VarRegistry::new();
//! let pattern = TriplePattern::parse("?s", "<http://schema.org/name>", "?name", &mut vars).unwrap();
//!
//! let bindings: Vec<_> = run(&pattern, &vars, &store, None).unwrap().collect();
//! assert_eq!(bindings.len(), 1);
//! assert_eq!(bindings[0].get("name"), Some(&Term::string("Alice")));
//! ```

mod binding;
mod error;
mod pattern;
mod run;
mod var_registry;

pub use binding::Binding;
pub use error::{QueryError, Result};
pub use pattern::{PatternRef, PatternTerm, TriplePattern};
pub use run::{run, run_snapshot, Bindings};
pub use var_registry::{VarId, VarRegistry};
