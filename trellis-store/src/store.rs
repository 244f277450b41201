//! The in-memory triple store
//!
//! Owns a set of triples with idempotent insertion. Iteration order is
//! insertion order, which pins down reproducible query output for a given
//! insertion sequence.
//!
//! Single-writer: the store is `&mut self` for mutation and shared only
//! after ingestion completes (see the pipeline crate). `snapshot()` freezes
//! the current contents for the read side.

use crate::error::{Result, StoreError};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use trellis_graph_ir::{Term, Triple};
use tracing::debug;

/// An in-memory set of triples with insertion-order iteration
///
/// # Design Decisions
///
/// - **Vec + hash set**: the `Vec` preserves insertion order for scans; the
///   `FxHashSet` makes duplicate inserts O(1) no-ops. Terms are `Arc`-backed,
///   so holding each triple twice costs pointers, not string copies.
/// - **Validation on insert**: the subject/predicate invariant is enforced
///   here, so a malformed triple is never observable in the store.
#[derive(Debug, Default, Clone)]
pub struct TripleStore {
    /// Triples in insertion order
    triples: Vec<Triple>,
    /// Set view for idempotent insertion
    seen: FxHashSet<Triple>,
}

impl TripleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triples: Vec::with_capacity(capacity),
            seen: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert a triple, returning whether it was newly added
    ///
    /// Inserting an already-present triple is an O(1) no-op returning
    /// `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::InvalidTriple`] when the subject is a
    /// literal or an empty IRI, or the predicate is not a non-empty IRI.
    /// A failing insert leaves the store untouched.
    pub fn insert(&mut self, triple: Triple) -> Result<bool> {
        validate(&triple)?;

        if self.seen.contains(&triple) {
            return Ok(false);
        }

        self.seen.insert(triple.clone());
        self.triples.push(triple);
        Ok(true)
    }

    /// Insert every triple of an iterator, returning how many were new
    pub fn insert_all(&mut self, triples: impl IntoIterator<Item = Triple>) -> Result<usize> {
        let mut added = 0;
        for triple in triples {
            if self.insert(triple)? {
                added += 1;
            }
        }
        debug!(added, total = self.len(), "triples ingested");
        Ok(added)
    }

    /// Check whether a triple is present
    pub fn contains(&self, triple: &Triple) -> bool {
        self.seen.contains(triple)
    }

    /// Iterate over triples in insertion order
    ///
    /// The iterator is finite and restartable; with the single-writer rule
    /// upheld, it reflects the store contents at call time.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Freeze the current contents into a shared, immutable snapshot
    ///
    /// Inserts performed after this call are not visible through the
    /// returned snapshot.
    pub fn snapshot(&self) -> Arc<[Triple]> {
        Arc::from(self.triples.as_slice())
    }

    /// Current cardinality
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

/// Enforce the subject/predicate invariant
fn validate(triple: &Triple) -> Result<()> {
    match &triple.s {
        Term::Iri(iri) if iri.is_empty() => {
            return Err(StoreError::invalid("subject IRI must not be empty"));
        }
        Term::Literal { .. } => {
            return Err(StoreError::invalid(
                "subject must be an IRI or blank node, not a literal",
            ));
        }
        _ => {}
    }

    match &triple.p {
        Term::Iri(iri) if iri.is_empty() => {
            return Err(StoreError::invalid("predicate IRI must not be empty"));
        }
        Term::Iri(_) => {}
        other => {
            return Err(StoreError::invalid(format!(
                "predicate must be an IRI, got {other}"
            )));
        }
    }

    Ok(())
}

impl Extend<Triple> for TripleStore {
    /// Extend, skipping invalid triples
    ///
    /// Prefer [`TripleStore::insert_all`] when errors must surface.
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        for triple in iter {
            let _ = self.insert(triple);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_graph_ir::Term;

    fn triple(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(Term::iri(s), Term::iri(p), Term::string(o))
    }

    #[test]
    fn test_insert_and_len() {
        let mut store = TripleStore::new();
        assert!(store.is_empty());

        let added = store
            .insert(triple("http://e.org/s", "http://e.org/p", "o"))
            .unwrap();
        assert!(added);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_idempotent() {
        let mut store = TripleStore::new();
        let t = triple("http://e.org/s", "http://e.org/p", "o");

        assert!(store.insert(t.clone()).unwrap());
        assert!(!store.insert(t).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_round_trip_single_triple() {
        let mut store = TripleStore::new();
        let t = triple("http://e.org/s", "http://e.org/p", "o");
        store.insert(t.clone()).unwrap();

        let all: Vec<_> = store.iter().cloned().collect();
        assert_eq!(all, vec![t]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = TripleStore::new();
        // Insert in reverse-sorted order; iteration must not re-sort
        store
            .insert(triple("http://e.org/z", "http://e.org/p", "1"))
            .unwrap();
        store
            .insert(triple("http://e.org/a", "http://e.org/p", "2"))
            .unwrap();

        let subjects: Vec<_> = store.iter().map(|t| t.s.as_iri().unwrap()).collect();
        assert_eq!(subjects, vec!["http://e.org/z", "http://e.org/a"]);
    }

    #[test]
    fn test_empty_subject_rejected() {
        let mut store = TripleStore::new();
        let err = store
            .insert(triple("", "http://e.org/p", "o"))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidTriple { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_predicate_rejected() {
        let mut store = TripleStore::new();
        let err = store.insert(triple("http://e.org/s", "", "o")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidTriple { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_literal_subject_rejected() {
        let mut store = TripleStore::new();
        let t = Triple::new(
            Term::string("not a subject"),
            Term::iri("http://e.org/p"),
            Term::string("o"),
        );
        assert!(store.insert(t).is_err());
    }

    #[test]
    fn test_non_iri_predicate_rejected() {
        let mut store = TripleStore::new();
        let t = Triple::new(
            Term::iri("http://e.org/s"),
            Term::blank("b0"),
            Term::string("o"),
        );
        assert!(store.insert(t).is_err());
    }

    #[test]
    fn test_blank_subject_allowed() {
        let mut store = TripleStore::new();
        let t = Triple::new(
            Term::blank("b0"),
            Term::iri("http://e.org/p"),
            Term::string("o"),
        );
        assert!(store.insert(t).unwrap());
    }

    #[test]
    fn test_snapshot_isolated_from_later_inserts() {
        let mut store = TripleStore::new();
        store
            .insert(triple("http://e.org/a", "http://e.org/p", "1"))
            .unwrap();

        let snap = store.snapshot();
        store
            .insert(triple("http://e.org/b", "http://e.org/p", "2"))
            .unwrap();

        assert_eq!(snap.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_all_counts_new_only() {
        let mut store = TripleStore::new();
        let t = triple("http://e.org/s", "http://e.org/p", "o");
        let added = store
            .insert_all(vec![t.clone(), t.clone(), t])
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(store.len(), 1);
    }
}
