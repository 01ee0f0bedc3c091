/*
 * Access Path Domain Models
 */

mod access_path;
mod syntax;

pub use access_path::{AccessPath, AccessPathSet, PathSegment, ALL_ITEMS};
pub use syntax::{Binding, Block, Expr, MemberSymbol, Stmt};
