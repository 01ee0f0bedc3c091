/*
 * Java Front End
 *
 * Feeds Java sources to the analyzer: a `SymbolModel` built from class
 * declarations, and `Procedure`s lowered from method bodies. Copy and
 * exempt markers are annotations whose simple names come from the config.
 *
 * Architecture:
 * - Domain: JavaType, ClassDecl, FieldDecl
 * - Infrastructure: tree-sitter parser, declaration/procedure collectors
 * - Application: JavaFrontend (load + analyze)
 */

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{JavaFrontend, JavaProgram};
pub use domain::{ClassDecl, ClassKind, FieldDecl, JavaType};
pub use infrastructure::{JavaParser, JavaSymbolModel, MarkerResolver};
