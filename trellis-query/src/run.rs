//! Pattern scan over a store snapshot
//!
//! Evaluation is a single full scan: every stored triple is unified against
//! the pattern positionally. Fixed positions must match exactly; variable
//! positions bind to the observed term, and the same variable occurring in
//! two positions must unify to equal terms. Bindings come out in the
//! snapshot's insertion order, truncated after `limit` results.

use crate::binding::Binding;
use crate::error::Result;
use crate::pattern::{PatternRef, PatternTerm, TriplePattern};
use crate::var_registry::{VarId, VarRegistry};
use std::sync::Arc;
use trellis_graph_ir::{Term, Triple};
use trellis_store::TripleStore;
use tracing::debug;

/// Run a pattern against a store, yielding bindings lazily
///
/// Snapshots the store at call time; the iterator never observes later
/// inserts. `limit` of `None` or `Some(0)` means unrestricted.
///
/// # Errors
///
/// Fails with [`QueryError::InvalidPattern`](crate::QueryError::InvalidPattern)
/// before any scanning when the pattern does not validate.
pub fn run(
    pattern: &TriplePattern,
    vars: &VarRegistry,
    store: &TripleStore,
    limit: Option<usize>,
) -> Result<Bindings> {
    run_snapshot(pattern, vars, store.snapshot(), limit)
}

/// Run a pattern against an already-frozen snapshot
pub fn run_snapshot(
    pattern: &TriplePattern,
    vars: &VarRegistry,
    snapshot: Arc<[Triple]>,
    limit: Option<usize>,
) -> Result<Bindings> {
    pattern.validate(vars)?;

    let var_ids = pattern.variables();
    let schema: Arc<[Arc<str>]> = var_ids.iter().map(|&id| vars.name(id)).collect();

    debug!(
        triples = snapshot.len(),
        vars = schema.len(),
        ?limit,
        "pattern scan started"
    );

    Ok(Bindings {
        pattern: pattern.clone(),
        var_ids,
        schema,
        snapshot,
        pos: 0,
        // Non-positive limit means unrestricted
        remaining: limit.filter(|&n| n > 0),
    })
}

/// Lazy iterator over the solutions of a pattern scan
///
/// Yields [`Binding`]s in the snapshot's insertion order.
#[derive(Debug)]
pub struct Bindings {
    pattern: TriplePattern,
    /// Pattern variables in first-appearance order (schema order)
    var_ids: Vec<VarId>,
    schema: Arc<[Arc<str>]>,
    snapshot: Arc<[Triple]>,
    pos: usize,
    /// Results left to emit; None is unrestricted
    remaining: Option<usize>,
}

impl Bindings {
    /// The variable names every yielded binding will carry
    pub fn schema(&self) -> &[Arc<str>] {
        &self.schema
    }
}

impl Iterator for Bindings {
    type Item = Binding;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }

        while self.pos < self.snapshot.len() {
            let triple = &self.snapshot[self.pos];
            self.pos += 1;

            if let Some(row) = unify(&self.pattern, &self.var_ids, triple) {
                if let Some(n) = &mut self.remaining {
                    *n -= 1;
                }
                return Some(Binding::new(self.schema.clone(), row));
            }
        }

        None
    }
}

/// Unify one triple against the pattern
///
/// Returns the bound terms in `var_ids` order, or None if any fixed
/// position mismatches or a variable would be bound inconsistently.
fn unify(pattern: &TriplePattern, var_ids: &[VarId], triple: &Triple) -> Option<Vec<Term>> {
    let mut row: Vec<Option<Term>> = vec![None; var_ids.len()];

    let bind = |row: &mut Vec<Option<Term>>, id: VarId, term: &Term| -> bool {
        let slot = var_ids
            .iter()
            .position(|&v| v == id)
            .expect("pattern variable missing from schema");
        match &row[slot] {
            Some(bound) => bound == term,
            None => {
                row[slot] = Some(term.clone());
                true
            }
        }
    };

    match &pattern.s {
        PatternRef::Var(v) => {
            if !bind(&mut row, *v, &triple.s) {
                return None;
            }
        }
        fixed => {
            if !fixed.matches(&triple.s) {
                return None;
            }
        }
    }

    match &pattern.p {
        PatternRef::Var(v) => {
            if !bind(&mut row, *v, &triple.p) {
                return None;
            }
        }
        fixed => {
            if !fixed.matches(&triple.p) {
                return None;
            }
        }
    }

    match &pattern.o {
        PatternTerm::Var(v) => {
            if !bind(&mut row, *v, &triple.o) {
                return None;
            }
        }
        fixed => {
            if !fixed.matches(&triple.o) {
                return None;
            }
        }
    }

    // Every variable was visited, so every slot is filled
    Some(row.into_iter().map(|t| t.expect("unbound variable slot")).collect())
}
