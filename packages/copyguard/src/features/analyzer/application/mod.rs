/*
 * Analyzer Application Layer
 */

mod analyzer;

pub use analyzer::{
    AnalysisReport, AnalysisStats, CopyProcedureAnalyzer, ProcedureOutcome, ProcedureStatus,
};
