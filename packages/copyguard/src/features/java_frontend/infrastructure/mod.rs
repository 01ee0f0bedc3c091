/*
 * Java Front End Infrastructure
 *
 * tree-sitter based readers:
 * - parser: grammar setup
 * - declarations / type_ref / markers: class templates
 * - symbol_model: `SymbolModel` over the collected templates
 * - lowering: method bodies → core syntax model
 */

pub mod declarations;
pub mod lowering;
pub mod markers;
pub mod parser;
pub mod symbol_model;
pub mod type_ref;

pub use declarations::{DeclarationCollector, Modifiers};
pub use lowering::ProcedureCollector;
pub use markers::MarkerResolver;
pub use parser::JavaParser;
pub use symbol_model::{JavaSymbolModel, ResolvedMember};
pub use type_ref::java_type;
