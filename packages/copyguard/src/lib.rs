/*
 * Copyguard - Static verifier for deep-copy procedures
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, Marker, CancellationToken)
 * - features/    : Vertical slices (type_graph → closedness → access_paths → completeness → diagnostics)
 * - config/      : Analyzer configuration (presets + YAML)
 *
 * A copy procedure is a method tagged with the copy marker that takes one
 * parameter and must read every copyable member reachable from its type.
 * Hosts supply a `SymbolModel` and `Procedure`s; the analyzer hands back
 * diagnostics and never fails.
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Verifier entry points thread graph, prefix and token
#![allow(clippy::type_complexity)] // Instantiation maps
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::collapsible_if)] // Readability over brevity

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (one per verification stage)
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{AnalyzerConfig, Preset, SentinelPolicy};
pub use errors::{CopyguardError, Result};
pub use features::access_paths::{AccessPath, AccessPathExtractor, AccessPathSet, ALL_ITEMS};
pub use features::analyzer::{
    AnalysisReport, AnalysisStats, CopyProcedureAnalyzer, Parameter, Procedure, ProcedureOutcome,
    ProcedureStatus,
};
pub use features::closedness::{ClosednessVerifier, ClosednessViolation};
pub use features::completeness::{CompletenessReport, CompletenessVerifier};
pub use features::diagnostics::{Diagnostic, DiagnosticDescriptor, FindingReporter, Severity};
pub use features::java_frontend::{JavaFrontend, JavaProgram};
pub use features::type_graph::{
    SymbolModel, TypeDescriptor, TypeGraph, TypeGraphBuilder, TypeKey, TypeRegistry,
};
pub use shared::{CancellationToken, Marker, MarkerSet, Span};
