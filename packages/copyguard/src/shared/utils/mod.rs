//! Utility modules shared across features
//!
//! - `scope_stack`: Lexical scopes for binding resolution
//! - `tree_sitter`: Tree-sitter AST traversal and extraction

pub mod scope_stack;
pub mod tree_sitter;

pub use scope_stack::ScopeStack;
