//! Configuration System
//!
//! Two tiers:
//! - Preset: `Preset::Default` (reference behavior) or `Preset::Strict`
//! - YAML v1 file: preset + field-level overrides, validated on load
//!
//! # Examples
//!
//! ```rust,ignore
//! use copyguard::config::{AnalyzerConfig, Preset, SentinelPolicy};
//!
//! let config = AnalyzerConfig::preset(Preset::Default)
//!     .with_sentinel_policy(SentinelPolicy::Strict);
//! ```

pub mod analyzer_config;
pub mod error;
pub mod io;
pub mod preset;
pub mod validation;

// Re-exports
pub use analyzer_config::{AnalyzerConfig, SentinelPolicy, MAX_TYPE_DEPTH, MIN_TYPE_DEPTH};
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigFileV1, ConfigOverrides};
pub use preset::Preset;
pub use validation::Validatable;
