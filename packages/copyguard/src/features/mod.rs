//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains (as needed):
//! - domain/     - Pure models
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations
//!
//! Pipeline per copy procedure:
//! type_graph → closedness → access_paths → completeness → diagnostics,
//! driven by `analyzer`. `java_frontend` is the reference host.

pub mod type_graph;

pub mod closedness;

pub mod access_paths;

pub mod completeness;

pub mod diagnostics;

pub mod analyzer;

// Reference host: Java sources via tree-sitter
pub mod java_frontend;
