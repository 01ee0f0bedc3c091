/*
 * Diagnostic Descriptors
 *
 * Static table of the rules copyguard can report. Ids are stable: hosts
 * key suppressions and severity overrides on them.
 */

use serde::{Deserialize, Serialize};

/// Finding severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reportable rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    pub id: &'static str,
    pub title: &'static str,

    /// Message template with positional `{0}`, `{1}` placeholders
    pub message_format: &'static str,
    pub severity: Severity,
}

/// Copy target must be closed; also used for copy procedure misuse
pub const CLOSEDNESS: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "CPY001",
    title: "Copy target must be closed",
    message_format: "{0}",
    severity: Severity::Error,
};

/// Copy procedure does not read every member
pub const COMPLETENESS: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "CPY002",
    title: "Copy procedure is incomplete",
    message_format: "Copy procedure '{0}' does not copy: {1}",
    severity: Severity::Warning,
};

/// Equality comparison that reads better as a pattern. Declared so hosts
/// can configure it; copyguard itself never reports it.
pub const PATTERN_REWRITE: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "CPY003",
    title: "Use pattern matching",
    message_format: "Comparison with '{0}' can be written as a pattern",
    severity: Severity::Info,
};

pub static DESCRIPTORS: [DiagnosticDescriptor; 3] = [CLOSEDNESS, COMPLETENESS, PATTERN_REWRITE];

impl DiagnosticDescriptor {
    pub fn by_id(id: &str) -> Option<&'static DiagnosticDescriptor> {
        DESCRIPTORS.iter().find(|d| d.id == id)
    }

    /// Substitute positional arguments into the template
    ///
    /// Placeholders without a matching argument are left as-is.
    pub fn format(&self, args: &[String]) -> String {
        let mut message = self.message_format.to_string();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", i), arg);
        }
        message
    }
}
