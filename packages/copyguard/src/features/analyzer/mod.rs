/*
 * Copy Procedure Analyzer
 *
 * Entry point hosts call per procedure (or per batch). Runs the arity
 * check, closedness and completeness verification, and hands back
 * diagnostics.
 *
 * Architecture:
 * - Domain: Procedure, Parameter
 * - Application: CopyProcedureAnalyzer (single + rayon batch)
 */

pub mod application;
pub mod domain;

pub use application::{
    AnalysisReport, AnalysisStats, CopyProcedureAnalyzer, ProcedureOutcome, ProcedureStatus,
};
pub use domain::{Parameter, Procedure};
