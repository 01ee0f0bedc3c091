/*
 * Finding Reporter
 *
 * Turns verifier outcomes into diagnostics:
 * - Closedness violation → CPY001 at the parameter
 * - Wrong arity → CPY001 at the procedure name
 * - Completeness gaps → one CPY002 at the procedure name listing every
 *   first-missing path, comma-joined in declaration order
 */

use crate::errors::Result;
use crate::features::closedness::ClosednessViolation;
use crate::features::completeness::CompletenessReport;
use crate::features::diagnostics::domain::{Diagnostic, CLOSEDNESS, COMPLETENESS};
use crate::shared::models::Span;

pub const ARITY_MESSAGE: &str = "copy procedure must take exactly one parameter";

#[derive(Debug, Clone, Copy, Default)]
pub struct FindingReporter;

impl FindingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn closedness(
        &self,
        procedure: &str,
        parameter_span: Span,
        violation: &ClosednessViolation,
    ) -> Diagnostic {
        Diagnostic::new(&CLOSEDNESS, parameter_span, procedure, vec![violation.describe()])
    }

    pub fn arity(&self, procedure: &str, name_span: Span) -> Diagnostic {
        Diagnostic::new(&CLOSEDNESS, name_span, procedure, vec![ARITY_MESSAGE.to_string()])
    }

    /// `None` when nothing is missing
    pub fn completeness(
        &self,
        procedure: &str,
        name_span: Span,
        report: &CompletenessReport,
    ) -> Option<Diagnostic> {
        if report.is_complete() {
            return None;
        }
        Some(Diagnostic::new(
            &COMPLETENESS,
            name_span,
            procedure,
            vec![procedure.to_string(), report.joined()],
        ))
    }

    /// Pretty-printed JSON array for hosts that consume findings as data
    pub fn to_json(&self, diagnostics: &[Diagnostic]) -> Result<String> {
        Ok(serde_json::to_string_pretty(diagnostics)?)
    }

    pub fn from_json(&self, json: &str) -> Result<Vec<Diagnostic>> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::access_paths::AccessPath;
    use crate::features::diagnostics::domain::Severity;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_closedness_finding() {
        let violation = ClosednessViolation::RootNotClosed {
            type_name: "Foo".to_string(),
        };
        let diagnostic = FindingReporter::new().closedness("Clone", Span::new(4, 20, 4, 27), &violation);

        assert_eq!(diagnostic.id, "CPY001");
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.span, Span::new(4, 20, 4, 27));
        assert_eq!(diagnostic.message_args, vec!["parameter type 'Foo' must be closed"]);
        assert_eq!(diagnostic.message, "parameter type 'Foo' must be closed");
    }

    #[test]
    fn test_completeness_finding_joins_paths() {
        let report = CompletenessReport {
            missing: vec![AccessPath::parse("B"), AccessPath::parse("I.Y")],
        };
        let diagnostic = FindingReporter::new()
            .completeness("Clone", Span::zero(), &report)
            .unwrap();

        assert_eq!(diagnostic.id, "CPY002");
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.message_args, vec!["Clone", "B, I.Y"]);
    }

    #[test]
    fn test_complete_report_yields_nothing() {
        let report = CompletenessReport::default();
        assert!(FindingReporter::new()
            .completeness("Clone", Span::zero(), &report)
            .is_none());
    }

    #[test]
    fn test_json_export() {
        let reporter = FindingReporter::new();
        let diagnostics = vec![reporter.arity("Clone", Span::new(1, 0, 1, 5))];

        let json = reporter.to_json(&diagnostics).unwrap();
        assert!(json.contains("\"id\": \"CPY001\""));
        assert!(json.contains("\"severity\": \"error\""));
        assert_eq!(reporter.from_json(&json).unwrap(), diagnostics);
    }
}
