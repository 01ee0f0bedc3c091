/*
 * Diagnostic
 *
 * One finding handed to the host. Presentation (squiggles, SARIF, console)
 * is the host's business; this is just the structured payload.
 */

use super::descriptor::{DiagnosticDescriptor, Severity};
use crate::shared::models::Span;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable rule id (`CPY001`, ...)
    pub id: String,
    pub severity: Severity,

    /// Parameter span for closedness, procedure name span otherwise
    pub span: Span,

    /// Name of the copy procedure the finding belongs to
    pub procedure: String,

    /// Positional arguments of the descriptor's message template
    pub message_args: Vec<String>,

    /// Rendered message
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        descriptor: &DiagnosticDescriptor,
        span: Span,
        procedure: impl Into<String>,
        message_args: Vec<String>,
    ) -> Self {
        Self {
            id: descriptor.id.to_string(),
            severity: descriptor.severity,
            span,
            procedure: procedure.into(),
            message: descriptor.format(&message_args),
            message_args,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} [{}] {}: {}",
            self.span, self.severity, self.id, self.procedure, self.message
        )
    }
}
