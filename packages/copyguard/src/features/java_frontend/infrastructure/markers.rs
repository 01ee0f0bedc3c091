//! Annotation → marker resolution
//!
//! Maps the configured annotation names onto structural `Marker` tags once,
//! at load time.
//!
//! A configured name may be simple (`DeepCopy`) or qualified
//! (`com.acme.DeepCopy`):
//! - qualified: `@com.acme.DeepCopy` matches, and so does `@DeepCopy` when
//!   the compilation unit imports it (single or on-demand) or lives in
//!   `com.acme`
//! - simple: `@DeepCopy` matches, and any `@x.y.DeepCopy` matches on its
//!   last segment (the package is unknown)

use crate::config::AnalyzerConfig;
use crate::shared::models::{Marker, MarkerSet};
use crate::shared::utils::tree_sitter::{extract_node_text, find_child_by_kind, named_children};
use tree_sitter::Node;

/// Configured annotation name, split into package and simple name
#[derive(Debug, Clone, PartialEq, Eq)]
struct MarkerName {
    package: Option<String>,
    simple: String,
}

impl MarkerName {
    fn parse(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((package, simple)) => Self {
                package: Some(package.to_string()),
                simple: simple.to_string(),
            },
            None => Self {
                package: None,
                simple: name.to_string(),
            },
        }
    }

    fn matches(&self, written: &str, unit: &UnitImports) -> bool {
        match (written.rsplit_once('.'), &self.package) {
            (Some((package, simple)), Some(expected)) => package == expected && simple == self.simple,
            (Some((_, simple)), None) => simple == self.simple,
            (None, Some(expected)) => written == self.simple && unit.sees(expected, &self.simple),
            (None, None) => written == self.simple,
        }
    }
}

/// Package and imports of the compilation unit holding a declaration
#[derive(Debug, Default)]
struct UnitImports {
    package: Option<String>,
    single: Vec<String>,
    on_demand: Vec<String>,
}

impl UnitImports {
    fn of(declaration: &Node, source: &str) -> Self {
        let mut root = *declaration;
        while let Some(parent) = root.parent() {
            root = parent;
        }

        let mut imports = Self::default();
        for child in named_children(&root) {
            let name = named_children(&child)
                .into_iter()
                .find(|n| matches!(n.kind(), "scoped_identifier" | "identifier"))
                .map(|n| extract_node_text(&n, source).to_string());
            let Some(name) = name else {
                continue;
            };
            match child.kind() {
                "package_declaration" => imports.package = Some(name),
                "import_declaration" if find_child_by_kind(&child, "asterisk").is_some() => {
                    imports.on_demand.push(name)
                }
                "import_declaration" => imports.single.push(name),
                _ => {}
            }
        }
        imports
    }

    /// Whether `simple` written bare refers to `package.simple` in this unit
    fn sees(&self, package: &str, simple: &str) -> bool {
        self.package.as_deref() == Some(package)
            || self.on_demand.iter().any(|p| p == package)
            || self
                .single
                .iter()
                .any(|import| import.rsplit_once('.') == Some((package, simple)))
    }
}

#[derive(Debug, Clone)]
pub struct MarkerResolver {
    copy_marker: MarkerName,
    exempt_marker: MarkerName,
}

impl MarkerResolver {
    pub fn new(copy_marker: impl AsRef<str>, exempt_marker: impl AsRef<str>) -> Self {
        Self {
            copy_marker: MarkerName::parse(copy_marker.as_ref()),
            exempt_marker: MarkerName::parse(exempt_marker.as_ref()),
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(&config.copy_marker, &config.exempt_marker)
    }

    /// Markers carried by a declaration's `modifiers` child
    pub fn resolve(&self, declaration: &Node, source: &str) -> MarkerSet {
        let mut markers = MarkerSet::empty();
        let Some(modifiers) = find_child_by_kind(declaration, "modifiers") else {
            return markers;
        };

        let annotations: Vec<Node> = named_children(&modifiers)
            .into_iter()
            .filter(|node| matches!(node.kind(), "marker_annotation" | "annotation"))
            .collect();
        if annotations.is_empty() {
            return markers;
        }
        let unit = UnitImports::of(declaration, source);

        for annotation in annotations {
            let Some(name) = annotation.child_by_field_name("name") else {
                continue;
            };
            let written: String = extract_node_text(&name, source)
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();

            if self.copy_marker.matches(&written, &unit) {
                markers.insert(Marker::CopyProcedure);
            } else if self.exempt_marker.matches(&written, &unit) {
                markers.insert(Marker::Exempt);
            }
        }
        markers
    }
}

impl Default for MarkerResolver {
    fn default() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }
}
