/*
 * Access Paths
 *
 * Static extraction of the member paths a copy procedure reads from its
 * parameter. Purely additive: the result is a set, order is irrelevant.
 *
 * Architecture:
 * - Domain: AccessPath, AccessPathSet, procedure body syntax model
 * - Application: AccessPathExtractor
 */

pub mod application;
pub mod domain;

pub use application::AccessPathExtractor;
pub use domain::{
    AccessPath, AccessPathSet, Binding, Block, Expr, MemberSymbol, PathSegment, Stmt, ALL_ITEMS,
};
