/*
 * Diagnostics Domain Models
 */

mod descriptor;
mod diagnostic;

pub use descriptor::{
    DiagnosticDescriptor, Severity, CLOSEDNESS, COMPLETENESS, DESCRIPTORS, PATTERN_REWRITE,
};
pub use diagnostic::Diagnostic;
