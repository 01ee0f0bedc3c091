//! Configuration I/O (YAML loading)
//!
//! Defines the YAML schema types. Loading and export live on
//! `AnalyzerConfig`.

use super::analyzer_config::SentinelPolicy;
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1). Optional here so a missing
    /// field can be reported explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Base preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Field-level overrides applied on top of the preset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_type_depth: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentinel_policy: Option<SentinelPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_marker: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exempt_marker: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_completeness: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}
