/*
 * Java Front End
 *
 * Two passes over a set of compilation units:
 * 1. Declarations from every unit go into one `JavaSymbolModel`
 * 2. Methods are lowered against the complete model
 *
 * The split lets a copy procedure in one file read fields of a class
 * declared in another.
 */

use crate::config::AnalyzerConfig;
use crate::errors::Result;
use crate::features::analyzer::{AnalysisReport, CopyProcedureAnalyzer, Procedure};
use crate::features::java_frontend::infrastructure::{
    DeclarationCollector, JavaParser, JavaSymbolModel, MarkerResolver, ProcedureCollector,
};
use crate::shared::CancellationToken;
use std::path::Path;

/// Loaded sources: the shared model plus every lowered method
#[derive(Debug, Clone, Default)]
pub struct JavaProgram {
    pub model: JavaSymbolModel,
    pub procedures: Vec<Procedure>,
}

impl JavaProgram {
    /// Procedures tagged with the copy marker
    pub fn copy_procedures(&self) -> impl Iterator<Item = &Procedure> {
        self.procedures.iter().filter(|p| p.is_copy_procedure())
    }
}

#[derive(Debug, Clone, Default)]
pub struct JavaFrontend {
    resolver: MarkerResolver,
}

impl JavaFrontend {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            resolver: MarkerResolver::from_config(config),
        }
    }

    pub fn load<S: AsRef<str>>(&self, sources: &[S]) -> Result<JavaProgram> {
        let mut parser = JavaParser::new()?;
        let mut trees = Vec::with_capacity(sources.len());
        for source in sources {
            trees.push(parser.parse(source.as_ref())?);
        }

        let mut model = JavaSymbolModel::new();
        for (source, tree) in sources.iter().zip(&trees) {
            let collector = DeclarationCollector::new(source.as_ref(), &self.resolver);
            for class in collector.collect(&tree.root_node()) {
                model.insert(class);
            }
        }

        let mut procedures = Vec::new();
        for (source, tree) in sources.iter().zip(&trees) {
            let collector = ProcedureCollector::new(source.as_ref(), &model, &self.resolver);
            procedures.extend(collector.collect(&tree.root_node()));
        }

        tracing::info!(
            "Loaded {} Java units: {} types, {} procedures",
            sources.len(),
            model.len(),
            procedures.len()
        );
        Ok(JavaProgram { model, procedures })
    }

    pub fn load_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<JavaProgram> {
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            tracing::debug!("Reading {}", path.as_ref().display());
            sources.push(std::fs::read_to_string(path)?);
        }
        self.load(&sources)
    }

    /// Load and run every procedure through `analyzer`
    pub fn analyze<S: AsRef<str>>(
        &self,
        sources: &[S],
        analyzer: &CopyProcedureAnalyzer,
        cancel: &CancellationToken,
    ) -> Result<AnalysisReport> {
        let program = self.load(sources)?;
        Ok(analyzer.analyze_all(&program.procedures, &program.model, cancel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::diagnostics::Severity;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_declarations_visible_across_units() {
        let item = "public final class Item { public int id; public String label; }";
        let copier = r#"
            final class Copier {
                @DeepCopy
                static Item copy(Item src) {
                    Item out = new Item();
                    out.id = src.id;
                    return out;
                }
            }
        "#;

        let frontend = JavaFrontend::default();
        let program = frontend.load(&[item, copier]).unwrap();
        assert_eq!(program.model.len(), 2);
        assert_eq!(program.copy_procedures().count(), 1);

        let report = frontend
            .analyze(&[item, copier], &CopyProcedureAnalyzer::default(), &CancellationToken::new())
            .unwrap();
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].severity, Severity::Warning);
        assert_eq!(
            report.diagnostics[0].message,
            "Copy procedure 'Copier.copy' does not copy: label"
        );
    }

    #[test]
    fn test_custom_markers_from_config() {
        let source = r#"
            final class Foo {
                public int a;
                @Replicate static Foo copy(Foo foo) { return null; }
            }
        "#;
        let config = AnalyzerConfig::default().with_markers("Replicate", "Skip");
        let program = JavaFrontend::new(&config).load(&[source]).unwrap();
        assert_eq!(program.copy_procedures().count(), 1);

        let program = JavaFrontend::default().load(&[source]).unwrap();
        assert_eq!(program.copy_procedures().count(), 0);
    }

    #[test]
    fn test_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Foo.java");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "final class Foo {{ public int a; }}").unwrap();

        let program = JavaFrontend::default().load_files(&[&path]).unwrap();
        assert!(program.model.class("Foo").is_some());

        let missing = dir.path().join("Missing.java");
        assert!(JavaFrontend::default().load_files(&[missing]).is_err());
    }
}
