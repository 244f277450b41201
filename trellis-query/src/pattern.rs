//! Triple pattern types for query representation
//!
//! Defines [`PatternRef`] (variable or constant for subject/predicate
//! positions, where literal values are invalid) and [`PatternTerm`]
//! (variable or any constant term for the object position), combined into a
//! [`TriplePattern`] matched against stored triples.

use crate::error::{QueryError, Result};
use crate::var_registry::{VarId, VarRegistry};
use std::sync::Arc;
use trellis_graph_ir::{BlankId, Term};

/// A reference position in a triple pattern - variable, IRI, or blank node
///
/// Used for subject and predicate positions where literal values are not
/// valid. This makes the invariant compile-time enforced: only `PatternRef`
/// can appear in s/p positions, while `PatternTerm` (which additionally
/// allows any constant term) is used for the object position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternRef {
    /// Variable binding
    Var(VarId),
    /// Constant expanded IRI
    Iri(Arc<str>),
    /// Constant blank node
    Blank(BlankId),
}

impl PatternRef {
    /// Check if this position is a variable
    pub fn is_var(&self) -> bool {
        matches!(self, PatternRef::Var(_))
    }

    /// Get the variable if this is a Var position
    pub fn as_var(&self) -> Option<VarId> {
        match self {
            PatternRef::Var(v) => Some(*v),
            _ => None,
        }
    }

    /// Check whether a stored term matches this fixed position
    ///
    /// Always false for variables; variable binding is the scan's concern.
    pub fn matches(&self, term: &Term) -> bool {
        match self {
            PatternRef::Var(_) => false,
            PatternRef::Iri(iri) => term.as_iri() == Some(iri.as_ref()),
            PatternRef::Blank(id) => term.as_blank() == Some(id),
        }
    }
}

/// An object position in a triple pattern - variable or constant term
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternTerm {
    /// Variable binding
    Var(VarId),
    /// Constant term (IRI, blank node, or literal)
    Const(Term),
}

impl PatternTerm {
    /// Check if this position is a variable
    pub fn is_var(&self) -> bool {
        matches!(self, PatternTerm::Var(_))
    }

    /// Get the variable if this is a Var position
    pub fn as_var(&self) -> Option<VarId> {
        match self {
            PatternTerm::Var(v) => Some(*v),
            _ => None,
        }
    }

    /// Check whether a stored term matches this fixed position
    pub fn matches(&self, term: &Term) -> bool {
        match self {
            PatternTerm::Var(_) => false,
            PatternTerm::Const(t) => t == term,
        }
    }
}

impl From<PatternRef> for PatternTerm {
    fn from(r: PatternRef) -> Self {
        match r {
            PatternRef::Var(v) => PatternTerm::Var(v),
            PatternRef::Iri(iri) => PatternTerm::Const(Term::Iri(iri)),
            PatternRef::Blank(id) => PatternTerm::Const(Term::BlankNode(id)),
        }
    }
}

/// A triple pattern for matching stored triples
///
/// Subject and predicate use [`PatternRef`] (never a literal); the object
/// uses [`PatternTerm`], which additionally allows literal constants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriplePattern {
    /// Subject position
    pub s: PatternRef,
    /// Predicate position
    pub p: PatternRef,
    /// Object position
    pub o: PatternTerm,
}

impl TriplePattern {
    /// Create a new triple pattern
    pub fn new(s: PatternRef, p: PatternRef, o: PatternTerm) -> Self {
        Self { s, p, o }
    }

    /// Parse a pattern from three position strings
    ///
    /// - `?name` is a variable (registered in `vars`)
    /// - `_:label` is a blank node constant
    /// - `<iri>` or a bare string is an IRI in subject/predicate position
    /// - in object position, `<iri>` is an IRI and a bare string is a plain
    ///   string literal
    pub fn parse(s: &str, p: &str, o: &str, vars: &mut VarRegistry) -> Result<Self> {
        let s = parse_ref(s, vars)?;
        let p = parse_ref(p, vars)?;
        let o = parse_term(o, vars);
        let pattern = Self::new(s, p, o);
        pattern.validate(vars)?;
        Ok(pattern)
    }

    /// Get the distinct variables of this pattern in first-appearance order
    pub fn variables(&self) -> Vec<VarId> {
        let mut vars = Vec::with_capacity(3);
        let mut push = |v: VarId| {
            if !vars.contains(&v) {
                vars.push(v);
            }
        };
        if let Some(v) = self.s.as_var() {
            push(v);
        }
        if let Some(v) = self.p.as_var() {
            push(v);
        }
        if let Some(v) = self.o.as_var() {
            push(v);
        }
        vars
    }

    /// Reject patterns whose constant positions name a pattern variable
    ///
    /// A constant whose lexical form is `?x` while `?x` is also used as a
    /// variable elsewhere in the pattern is almost always a caller mistake;
    /// it is reported rather than silently treated as a fixed value.
    pub fn validate(&self, vars: &VarRegistry) -> Result<()> {
        let used = self.variables();

        let check = |lexical: &str| -> Result<()> {
            let Some(name) = lexical.strip_prefix('?') else {
                return Ok(());
            };
            if let Some(id) = vars.get(name) {
                if used.contains(&id) {
                    return Err(QueryError::invalid_pattern(format!(
                        "constant position '{lexical}' collides with pattern variable ?{name}"
                    )));
                }
            }
            Ok(())
        };

        if let PatternRef::Iri(iri) = &self.s {
            check(iri)?;
        }
        if let PatternRef::Iri(iri) = &self.p {
            check(iri)?;
        }
        if let PatternTerm::Const(term) = &self.o {
            match term {
                Term::Iri(iri) => check(iri)?,
                Term::Literal { value, .. } => {
                    if let Some(s) = value.as_str() {
                        check(s)?;
                    }
                }
                Term::BlankNode(_) => {}
            }
        }

        Ok(())
    }
}

fn parse_ref(input: &str, vars: &mut VarRegistry) -> Result<PatternRef> {
    if let Some(name) = input.strip_prefix('?') {
        if name.is_empty() {
            return Err(QueryError::invalid_pattern("empty variable name '?'"));
        }
        return Ok(PatternRef::Var(vars.get_or_insert(name)));
    }
    if let Some(label) = input.strip_prefix("_:") {
        return Ok(PatternRef::Blank(BlankId::new(label)));
    }
    let iri = input
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(input);
    if iri.is_empty() {
        return Err(QueryError::invalid_pattern("empty IRI position"));
    }
    Ok(PatternRef::Iri(Arc::from(iri)))
}

fn parse_term(input: &str, vars: &mut VarRegistry) -> PatternTerm {
    if let Some(name) = input.strip_prefix('?') {
        if !name.is_empty() {
            return PatternTerm::Var(vars.get_or_insert(name));
        }
    }
    if let Some(label) = input.strip_prefix("_:") {
        return PatternTerm::Const(Term::blank(label));
    }
    if let Some(iri) = input
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return PatternTerm::Const(Term::iri(iri));
    }
    PatternTerm::Const(Term::string(input))
}
