//! Variable registry for query evaluation
//!
//! Maps variable names (e.g. the `s` of `?s`) to compact [`VarId`] indices
//! used throughout pattern matching and binding construction. Names are
//! stored without the `?` sigil; [`TriplePattern::parse`](crate::TriplePattern::parse)
//! strips it.

use std::collections::HashMap;
use std::sync::Arc;

/// Compact variable identifier - index into a binding row
///
/// u16 supports up to 65K variables per query (far beyond any realistic
/// pattern, which has at most three).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u16);

impl VarId {
    /// Get the underlying index value
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Registry mapping variable names to compact VarId indices
///
/// Uses `Arc<str>` for cheap cloning into binding schemas.
#[derive(Debug, Default, Clone)]
pub struct VarRegistry {
    name_to_id: HashMap<Arc<str>, VarId>,
    id_to_name: Vec<Arc<str>>,
}

impl VarRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get existing VarId or insert a new one
    pub fn get_or_insert(&mut self, name: &str) -> VarId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }

        // Guardrail: VarId is u16; exceeding this would silently wrap.
        assert!(
            self.id_to_name.len() < u16::MAX as usize,
            "VarRegistry capacity exceeded ({}); refusing to wrap",
            self.id_to_name.len()
        );

        let id = VarId(self.id_to_name.len() as u16);
        let arc_name: Arc<str> = Arc::from(name);
        self.name_to_id.insert(arc_name.clone(), id);
        self.id_to_name.push(arc_name);
        id
    }

    /// Get the VarId for a name, if it exists
    pub fn get(&self, name: &str) -> Option<VarId> {
        self.name_to_id.get(name).copied()
    }

    /// Get the name for a VarId, returning None if invalid
    pub fn try_name(&self, id: VarId) -> Option<&str> {
        self.id_to_name.get(id.index()).map(|s| s.as_ref())
    }

    /// Get the name for a VarId as a shared string
    ///
    /// # Panics
    ///
    /// Panics if the VarId is not in the registry (indicates a bug).
    pub fn name(&self, id: VarId) -> Arc<str> {
        self.id_to_name[id.index()].clone()
    }

    /// Get the number of registered variables
    pub fn len(&self) -> usize {
        self.id_to_name.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }
}
