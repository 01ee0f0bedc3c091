//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use super::analyzer_config::{AnalyzerConfig, SentinelPolicy};
use serde::{Deserialize, Serialize};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Reference behavior
    ///
    /// - Global `ALL_ITEMS` satisfies every collection member
    /// - max_type_depth=64
    #[default]
    Default,

    /// Stricter completeness
    ///
    /// - Only a per-member `ALL_ITEMS` satisfies a collection member
    /// - max_type_depth=256
    Strict,
}

impl Preset {
    pub const NAMES: [&'static str; 2] = ["default", "strict"];

    /// Parse preset from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
        }
    }

    /// Full configuration for this preset
    pub fn config(&self) -> AnalyzerConfig {
        match self {
            Self::Default => AnalyzerConfig::default(),
            Self::Strict => AnalyzerConfig {
                sentinel_policy: SentinelPolicy::Strict,
                max_type_depth: 256,
                ..AnalyzerConfig::default()
            },
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parse_roundtrip() {
        for name in Preset::NAMES {
            let preset = Preset::from_str(name).expect("known preset");
            assert_eq!(preset.as_str(), name);
        }
        assert_eq!(Preset::from_str("STRICT"), Some(Preset::Strict));
        assert_eq!(Preset::from_str("thorough"), None);
    }

    #[test]
    fn test_strict_preset_tightens_sentinel() {
        assert_eq!(Preset::Default.config().sentinel_policy, SentinelPolicy::Permissive);
        assert_eq!(Preset::Strict.config().sentinel_policy, SentinelPolicy::Strict);
    }
}
