//! In-memory triple store for the Trellis pipeline
//!
//! A transient, process-lifetime store: triples go in during the ingest
//! phase, a frozen snapshot comes out for the query phase. Nothing is
//! persisted.
//!
//! # Example
//!
//! ```
//! use trellis_graph_ir::{Term, Triple};
//! use trellis_store::TripleStore;
//!
//! let mut store = TripleStore::new();
//! let t = Triple::new(
//!     Term::iri("http://example.org/alice"),
//!     Term::iri("http://schema.org/name"),
//!     Term::string("Alice"),
//! );
//!
//! assert!(store.insert(t.clone()).unwrap());
//! assert!(!store.insert(t).unwrap()); // idempotent
//! assert_eq!(store.len(), 1);
//! ```

mod error;
mod store;

pub use error::{Result, StoreError};
pub use store::TripleStore;
