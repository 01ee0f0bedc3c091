//! Lexical scope stack
//!
//! Tracks nested binding scopes during AST traversal. Lookups walk from
//! the innermost scope outwards, so inner declarations shadow outer ones.

use rustc_hash::FxHashMap;

/// Stack of name → value scopes
#[derive(Debug, Clone)]
pub struct ScopeStack<T> {
    scopes: Vec<FxHashMap<String, T>>,
}

impl<T> Default for ScopeStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ScopeStack<T> {
    /// Create a stack with a single (outermost) scope
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Push a new scope
    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the current scope (the outermost scope is never popped)
    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Declare a name in the current scope
    pub fn declare(&mut self, name: impl Into<String>, value: T) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value);
        }
    }

    /// Resolve a name, innermost scope first
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Current depth
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut stack = ScopeStack::new();
        stack.declare("x", 1);
        stack.push();
        stack.declare("x", 2);
        assert_eq!(stack.lookup("x"), Some(&2));
        stack.pop();
        assert_eq!(stack.lookup("x"), Some(&1));
    }

    #[test]
    fn test_pop_drops_bindings() {
        let mut stack = ScopeStack::new();
        stack.push();
        stack.declare("item", "local");
        assert_eq!(stack.depth(), 2);
        stack.pop();
        assert_eq!(stack.lookup("item"), None);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_outermost_scope_is_kept() {
        let mut stack: ScopeStack<u8> = ScopeStack::new();
        stack.pop();
        stack.declare("a", 1);
        assert_eq!(stack.lookup("a"), Some(&1));
    }
}
