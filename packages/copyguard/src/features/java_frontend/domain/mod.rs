/*
 * Java Front End Domain Models
 */

mod class_decl;
mod java_type;

pub use class_decl::{ClassDecl, ClassKind, FieldDecl};
pub use java_type::{JavaType, COLLECTIONS, MAPS, OBJECT, PRIMITIVES, SCALARS};
