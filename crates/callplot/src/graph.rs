//! Call graph types shared by the pipeline stages.

use std::fmt;

use indexmap::IndexSet;

/// A single caller → callee relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallEdge {
    caller: String,
    callee: String,
}

impl CallEdge {
    pub fn new(caller: impl Into<String>, callee: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            callee: callee.into(),
        }
    }

    pub fn caller(&self) -> &str {
        &self.caller
    }

    pub fn callee(&self) -> &str {
        &self.callee
    }
}

impl fmt::Display for CallEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" -> \"{}\"", self.caller, self.callee)
    }
}

/// De-duplicated call edges in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    edges: IndexSet<CallEdge>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edge, returning `false` if it was already present.
    pub fn insert(&mut self, edge: CallEdge) -> bool {
        self.edges.insert(edge)
    }

    pub fn edges(&self) -> impl Iterator<Item = &CallEdge> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, caller: &str, callee: &str) -> bool {
        self.edges.contains(&CallEdge::new(caller, callee))
    }
}

/// Returns true for names that start with a lower-case character.
///
/// `main` is the one lower-case name that is never treated this way.
pub fn is_lowercase_symbol(name: &str) -> bool {
    name != "main" && name.chars().next().is_some_and(char::is_lowercase)
}
