//! Query solution bindings
//!
//! A [`Binding`] is one query solution: an assignment of a concrete term to
//! every variable of the pattern, in first-appearance order.

use std::sync::Arc;
use trellis_graph_ir::Term;

/// One query solution - variable name to term assignments
///
/// The schema (variable names) is shared across all bindings of a run;
/// each binding owns only its row of terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    schema: Arc<[Arc<str>]>,
    values: Vec<Term>,
}

impl Binding {
    /// Create a binding from a shared schema and a row of values
    ///
    /// `values` must be in schema order; callers are expected to uphold
    /// `values.len() == schema.len()`.
    pub(crate) fn new(schema: Arc<[Arc<str>]>, values: Vec<Term>) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Self { schema, values }
    }

    /// The variable names of this binding, in first-appearance order
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.schema.iter().map(|s| s.as_ref())
    }

    /// Get the term bound to a variable name (without the `?` sigil)
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.schema
            .iter()
            .position(|n| n.as_ref() == name)
            .map(|idx| &self.values[idx])
    }

    /// Iterate over (variable name, term) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.schema
            .iter()
            .map(|s| s.as_ref())
            .zip(self.values.iter())
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the binding has no variables
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render as a JSON object mapping variable names to terms
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .iter()
            .map(|(name, term)| {
                (
                    name.to_string(),
                    serde_json::to_value(term).unwrap_or(serde_json::Value::Null),
                )
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

impl std::fmt::Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, term) in self.iter() {
            if !first {
                write!(f, "  ")?;
            }
            write!(f, "?{} = {}", name, term)?;
            first = false;
        }
        Ok(())
    }
}
