//! Analyzer configuration
//!
//! One flat configuration object shared by the graph builder, both
//! verifiers and the reference front end.
//!
//! # Examples
//!
//! ```rust,ignore
//! use copyguard::config::{AnalyzerConfig, Preset};
//!
//! let config = Preset::Strict.config();
//! let config = AnalyzerConfig::from_yaml("copyguard.yaml")?;
//! ```

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigFileV1, ConfigOverrides};
use super::preset::Preset;
use super::validation::{is_marker_identifier, Validatable};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MIN_TYPE_DEPTH: usize = 1;
pub const MAX_TYPE_DEPTH: usize = 4096;

/// How the global `ALL_ITEMS` sentinel (the parameter itself iterated)
/// interacts with collection members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentinelPolicy {
    /// The global sentinel satisfies every collection member
    #[default]
    Permissive,

    /// Only `<member>.ALL_ITEMS` satisfies a collection member
    Strict,
}

/// Copy-procedure analyzer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Maximum nesting depth explored in a type graph
    pub max_type_depth: usize,

    /// Collection member handling of the global sentinel
    pub sentinel_policy: SentinelPolicy,

    /// Annotation name marking a copy procedure (front ends)
    pub copy_marker: String,

    /// Annotation name exempting a member (front ends)
    pub exempt_marker: String,

    /// Emit completeness warnings
    pub report_completeness: bool,

    /// Analyze procedures on the rayon pool in batch mode
    pub parallel: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_type_depth: 64,
            sentinel_policy: SentinelPolicy::Permissive,
            copy_marker: "DeepCopy".to_string(),
            exempt_marker: "DeepCopyIgnore".to_string(),
            report_completeness: true,
            parallel: true,
        }
    }
}

impl AnalyzerConfig {
    /// Start from a preset
    pub fn preset(preset: Preset) -> Self {
        preset.config()
    }

    pub fn with_sentinel_policy(mut self, policy: SentinelPolicy) -> Self {
        self.sentinel_policy = policy;
        self
    }

    pub fn with_max_type_depth(mut self, depth: usize) -> Self {
        self.max_type_depth = depth;
        self
    }

    pub fn with_markers(mut self, copy: impl Into<String>, exempt: impl Into<String>) -> Self {
        self.copy_marker = copy.into();
        self.exempt_marker = exempt.into();
        self
    }

    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML configuration text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        match file.version {
            None => return Err(ConfigError::MissingVersion),
            Some(1) => {}
            Some(found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: vec![1],
                })
            }
        }

        let preset = match file.preset.as_deref() {
            None => Preset::Default,
            Some(name) => Preset::from_str(name)
                .ok_or_else(|| ConfigError::unknown_preset(name, &Preset::NAMES))?,
        };

        let mut config = preset.config();
        if let Some(overrides) = file.overrides {
            config.apply(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Export as YAML (schema v1, every field as an override)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            preset: Some(Preset::Default.as_str().to_string()),
            overrides: Some(ConfigOverrides {
                max_type_depth: Some(self.max_type_depth),
                sentinel_policy: Some(self.sentinel_policy),
                copy_marker: Some(self.copy_marker.clone()),
                exempt_marker: Some(self.exempt_marker.clone()),
                report_completeness: Some(self.report_completeness),
                parallel: Some(self.parallel),
            }),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(depth) = overrides.max_type_depth {
            self.max_type_depth = depth;
        }
        if let Some(policy) = overrides.sentinel_policy {
            self.sentinel_policy = policy;
        }
        if let Some(marker) = overrides.copy_marker {
            self.copy_marker = marker;
        }
        if let Some(marker) = overrides.exempt_marker {
            self.exempt_marker = marker;
        }
        if let Some(report) = overrides.report_completeness {
            self.report_completeness = report;
        }
        if let Some(parallel) = overrides.parallel {
            self.parallel = parallel;
        }
    }
}

impl Validatable for AnalyzerConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(MIN_TYPE_DEPTH..=MAX_TYPE_DEPTH).contains(&self.max_type_depth) {
            return Err(ConfigError::range_with_hint(
                "max_type_depth",
                self.max_type_depth,
                MIN_TYPE_DEPTH,
                MAX_TYPE_DEPTH,
                "Type graphs need at least one level below the parameter",
            ));
        }

        for (field, value) in [
            ("copy_marker", &self.copy_marker),
            ("exempt_marker", &self.exempt_marker),
        ] {
            if !is_marker_identifier(value) {
                return Err(ConfigError::InvalidMarker {
                    field: field.to_string(),
                    value: value.clone(),
                    hint: "Use an annotation name such as 'DeepCopy'".to_string(),
                });
            }
        }

        if self.copy_marker == self.exempt_marker {
            return Err(ConfigError::InvalidMarker {
                field: "exempt_marker".to_string(),
                value: self.exempt_marker.clone(),
                hint: "Copy and exempt markers must differ".to_string(),
            });
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "AnalyzerConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_valid() {
        assert!(AnalyzerConfig::default().validate().is_ok());
        assert!(Preset::Strict.config().validate().is_ok());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = AnalyzerConfig::default().with_max_type_depth(0);
        assert!(matches!(config.validate(), Err(ConfigError::Range { .. })));
    }

    #[test]
    fn test_identical_markers_rejected() {
        let config = AnalyzerConfig::default().with_markers("Copy", "Copy");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMarker { .. })
        ));
    }

    #[test]
    fn test_yaml_overrides_apply_on_preset() {
        let yaml = "version: 1\npreset: strict\noverrides:\n  max_type_depth: 12\n  copy_marker: Cloner\n";
        let config = AnalyzerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.max_type_depth, 12);
        assert_eq!(config.copy_marker, "Cloner");
        assert_eq!(config.sentinel_policy, SentinelPolicy::Strict);
    }

    #[test]
    fn test_yaml_version_checks() {
        assert!(matches!(
            AnalyzerConfig::from_yaml_str("preset: default\n"),
            Err(ConfigError::MissingVersion)
        ));
        assert!(matches!(
            AnalyzerConfig::from_yaml_str("version: 2\n"),
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = AnalyzerConfig::default()
            .with_sentinel_policy(SentinelPolicy::Strict)
            .with_max_type_depth(9);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(AnalyzerConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let yaml = "version: 1\noverrides:\n  exempt_marker: \"not valid\"\n";
        assert!(AnalyzerConfig::from_yaml_str(yaml).is_err());
    }
}
