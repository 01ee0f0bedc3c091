/*
 * Diagnostics
 *
 * Structured findings and the reporter that builds them from verifier
 * outcomes.
 *
 * Architecture:
 * - Domain: Severity, DiagnosticDescriptor table, Diagnostic
 * - Application: FindingReporter (+ JSON export)
 */

pub mod application;
pub mod domain;

pub use application::{FindingReporter, ARITY_MESSAGE};
pub use domain::{
    Diagnostic, DiagnosticDescriptor, Severity, CLOSEDNESS, COMPLETENESS, DESCRIPTORS,
    PATTERN_REWRITE,
};
