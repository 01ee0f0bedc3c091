//! Configuration files on disk

use copyguard::config::{AnalyzerConfig, ConfigError, Preset, SentinelPolicy};
use copyguard::{CancellationToken, CopyProcedureAnalyzer, JavaFrontend};
use pretty_assertions::assert_eq;
use std::io::Write;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_exported_config_reloads_identically() {
    let config = AnalyzerConfig::preset(Preset::Strict).with_markers("Replicate", "NoReplicate");
    let file = write_config(&config.to_yaml().unwrap());

    assert_eq!(AnalyzerConfig::from_yaml(file.path()).unwrap(), config);
}

#[test]
fn test_overrides_on_top_of_preset() {
    let file = write_config(
        "version: 1\npreset: strict\noverrides:\n  report_completeness: false\n  parallel: false\n",
    );
    let config = AnalyzerConfig::from_yaml(file.path()).unwrap();

    assert_eq!(config.sentinel_policy, SentinelPolicy::Strict);
    assert_eq!(config.max_type_depth, 256);
    assert!(!config.report_completeness);
    assert!(!config.parallel);
}

#[test]
fn test_invalid_files_rejected() {
    let missing_version = write_config("preset: default\n");
    assert!(matches!(
        AnalyzerConfig::from_yaml(missing_version.path()),
        Err(ConfigError::MissingVersion)
    ));

    let bad_depth = write_config("version: 1\noverrides:\n  max_type_depth: 0\n");
    assert!(matches!(
        AnalyzerConfig::from_yaml(bad_depth.path()),
        Err(ConfigError::Range { .. })
    ));

    assert!(matches!(
        AnalyzerConfig::from_yaml("/nonexistent/copyguard.yaml"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_loaded_config_drives_front_end_and_analyzer() {
    let file = write_config(
        "version: 1\noverrides:\n  copy_marker: Replicate\n  report_completeness: false\n",
    );
    let config = AnalyzerConfig::from_yaml(file.path()).unwrap();

    let source = r#"
        final class Foo {
            public int a;
            public int b;
            @Replicate static Foo copy(Foo foo) { return null; }
        }
    "#;
    let report = JavaFrontend::new(&config)
        .analyze(&[source], &CopyProcedureAnalyzer::new(config.clone()), &CancellationToken::new())
        .unwrap();

    assert_eq!(report.stats.copy_procedures, 1);
    assert!(report.diagnostics.is_empty());
}
