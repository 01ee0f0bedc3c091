/*
 * Copy Procedure Analyzer
 *
 * Per-procedure driver wiring the verifiers together:
 *
 * 1. Not tagged as a copy procedure → nothing to do
 * 2. Arity != 1 → CPY001 usage finding, stop
 * 3. Parameter type unresolvable → nothing (conservative)
 * 4. Build the type graph, verify closedness; violation → CPY001, stop
 * 5. Extract access paths, verify completeness; gaps → one CPY002
 *
 * Every internal error (cancellation, depth bound, dangling ids) degrades
 * to "no finding" at this boundary. Hosts run many procedures through one
 * analyzer concurrently, so all state lives on the stack of `analyze`.
 */

use crate::config::AnalyzerConfig;
use crate::errors::Result;
use crate::features::access_paths::AccessPathExtractor;
use crate::features::analyzer::domain::Procedure;
use crate::features::closedness::ClosednessVerifier;
use crate::features::completeness::CompletenessVerifier;
use crate::features::diagnostics::{Diagnostic, FindingReporter, Severity};
use crate::features::type_graph::{SymbolModel, TypeGraphBuilder};
use crate::shared::CancellationToken;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How far analysis of one procedure got
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcedureStatus {
    /// Not tagged with the copy marker
    NotCopyProcedure,

    /// All applicable checks ran (findings may or may not exist)
    Verified,

    /// Parameter type could not be resolved
    Unresolved,

    /// An internal error stopped analysis; no findings
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureOutcome {
    pub status: ProcedureStatus,
    pub diagnostics: Vec<Diagnostic>,
}

impl ProcedureOutcome {
    fn empty(status: ProcedureStatus) -> Self {
        Self {
            status,
            diagnostics: Vec::new(),
        }
    }

    fn verified(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            status: ProcedureStatus::Verified,
            diagnostics,
        }
    }
}

/// Batch statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub procedures: usize,
    pub copy_procedures: usize,
    pub verified: usize,
    pub unresolved: usize,
    pub degraded: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl AnalysisStats {
    fn record(&mut self, outcome: &ProcedureOutcome) {
        self.procedures += 1;
        match outcome.status {
            ProcedureStatus::NotCopyProcedure => {}
            ProcedureStatus::Verified => self.verified += 1,
            ProcedureStatus::Unresolved => self.unresolved += 1,
            ProcedureStatus::Degraded => self.degraded += 1,
        }
        if outcome.status != ProcedureStatus::NotCopyProcedure {
            self.copy_procedures += 1;
        }
        for diagnostic in &outcome.diagnostics {
            match diagnostic.severity {
                Severity::Error => self.errors += 1,
                Severity::Warning => self.warnings += 1,
                Severity::Info => {}
            }
        }
    }
}

/// Findings of a batch, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    pub diagnostics: Vec<Diagnostic>,
    pub stats: AnalysisStats,
}

#[derive(Debug, Clone, Default)]
pub struct CopyProcedureAnalyzer {
    config: AnalyzerConfig,
    reporter: FindingReporter,
}

impl CopyProcedureAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            reporter: FindingReporter::new(),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Findings for one procedure; never fails
    pub fn analyze<M>(&self, procedure: &Procedure, model: &M, cancel: &CancellationToken) -> Vec<Diagnostic>
    where
        M: SymbolModel + ?Sized,
    {
        self.analyze_outcome(procedure, model, cancel).diagnostics
    }

    pub fn analyze_outcome<M>(
        &self,
        procedure: &Procedure,
        model: &M,
        cancel: &CancellationToken,
    ) -> ProcedureOutcome
    where
        M: SymbolModel + ?Sized,
    {
        match self.run(procedure, model, cancel) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!("Skipping '{}': {}", procedure.name, e);
                ProcedureOutcome::empty(ProcedureStatus::Degraded)
            }
        }
    }

    /// Analyze a batch; parallel when enabled in the config
    pub fn analyze_all<M>(
        &self,
        procedures: &[Procedure],
        model: &M,
        cancel: &CancellationToken,
    ) -> AnalysisReport
    where
        M: SymbolModel + Sync + ?Sized,
    {
        tracing::info!("Analyzing {} procedures", procedures.len());

        let outcomes = self.collect_outcomes(procedures, model, cancel);

        let mut report = AnalysisReport::default();
        for outcome in outcomes {
            report.stats.record(&outcome);
            report.diagnostics.extend(outcome.diagnostics);
        }

        tracing::info!(
            "Analyzed {} copy procedures: {} errors, {} warnings, {} skipped",
            report.stats.copy_procedures,
            report.stats.errors,
            report.stats.warnings,
            report.stats.unresolved + report.stats.degraded
        );
        report
    }

    #[cfg(feature = "parallel")]
    fn collect_outcomes<M>(
        &self,
        procedures: &[Procedure],
        model: &M,
        cancel: &CancellationToken,
    ) -> Vec<ProcedureOutcome>
    where
        M: SymbolModel + Sync + ?Sized,
    {
        if self.config.parallel {
            procedures
                .par_iter()
                .map(|procedure| self.analyze_outcome(procedure, model, cancel))
                .collect()
        } else {
            procedures
                .iter()
                .map(|procedure| self.analyze_outcome(procedure, model, cancel))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn collect_outcomes<M>(
        &self,
        procedures: &[Procedure],
        model: &M,
        cancel: &CancellationToken,
    ) -> Vec<ProcedureOutcome>
    where
        M: SymbolModel + Sync + ?Sized,
    {
        procedures
            .iter()
            .map(|procedure| self.analyze_outcome(procedure, model, cancel))
            .collect()
    }

    fn run<M>(&self, procedure: &Procedure, model: &M, cancel: &CancellationToken) -> Result<ProcedureOutcome>
    where
        M: SymbolModel + ?Sized,
    {
        if !procedure.is_copy_procedure() {
            return Ok(ProcedureOutcome::empty(ProcedureStatus::NotCopyProcedure));
        }

        let [parameter] = procedure.parameters.as_slice() else {
            tracing::debug!(
                "'{}' takes {} parameters",
                procedure.name,
                procedure.parameters.len()
            );
            let diagnostic = self.reporter.arity(&procedure.name, procedure.span);
            return Ok(ProcedureOutcome::verified(vec![diagnostic]));
        };

        let Some(type_key) = &parameter.type_key else {
            tracing::debug!("'{}': parameter type unresolved", procedure.name);
            return Ok(ProcedureOutcome::empty(ProcedureStatus::Unresolved));
        };

        let Some(graph) = TypeGraphBuilder::new(model)
            .with_max_depth(self.config.max_type_depth)
            .build(type_key, cancel)?
        else {
            tracing::debug!("'{}': type '{}' unknown to the model", procedure.name, type_key);
            return Ok(ProcedureOutcome::empty(ProcedureStatus::Unresolved));
        };

        let closedness = ClosednessVerifier::new().verify(&graph, cancel)?;
        if let Some(violation) = closedness.outcome.violation() {
            let diagnostic = self
                .reporter
                .closedness(&procedure.name, parameter.span, violation);
            return Ok(ProcedureOutcome::verified(vec![diagnostic]));
        }

        if !self.config.report_completeness {
            return Ok(ProcedureOutcome::verified(Vec::new()));
        }

        let observed = AccessPathExtractor::new().extract(&procedure.body, &parameter.name, cancel)?;
        let report = CompletenessVerifier::new()
            .with_sentinel_policy(self.config.sentinel_policy)
            .with_max_depth(self.config.max_type_depth)
            .verify(&graph, &observed, cancel)?;

        tracing::trace!(
            "'{}': {} paths observed, {} missing",
            procedure.name,
            observed.len(),
            report.missing.len()
        );

        let diagnostics = self
            .reporter
            .completeness(&procedure.name, procedure.span, &report)
            .into_iter()
            .collect();
        Ok(ProcedureOutcome::verified(diagnostics))
    }
}
