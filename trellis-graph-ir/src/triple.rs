//! A triple: one (subject, predicate, object) fact
//!
//! Triples are immutable once constructed. Equality and hashing are
//! structural over all three terms; ordering is SPO lexicographic so a
//! sorted sequence of triples is deterministic.

use crate::Term;
use serde::{Deserialize, Serialize};

/// An RDF triple
///
/// The type itself places no restriction on which terms appear in which
/// position; the store enforces the subject/predicate invariants at insert
/// time so malformed triples never become observable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    /// Subject term
    pub s: Term,
    /// Predicate term
    pub p: Term,
    /// Object term
    pub o: Term,
}

impl Triple {
    /// Create a new triple
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Self { s, p, o }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.s, self.p, self.o)
    }
}
