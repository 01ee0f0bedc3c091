//! Shared module - Common types and utilities
//!
//! Types shared across all features: source spans, declaration markers
//! and the cancellation token threaded through every traversal.

pub mod cancellation;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use cancellation::CancellationToken;
pub use models::*;
pub use utils::ScopeStack;
