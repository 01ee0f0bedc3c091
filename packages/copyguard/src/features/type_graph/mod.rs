/*
 * Type Graph
 *
 * Structural model of a copy parameter's type: which members a copy must
 * reproduce and which types those members lead to.
 *
 * Architecture:
 * - Domain: TypeKey, TypeNode, Member, TypeGraph (identity-keyed arena)
 * - Application: MemberEnumerator, TypeGraphBuilder
 * - Infrastructure: TypeRegistry (in-memory symbol model)
 * - Ports: SymbolModel trait + host descriptors
 */

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{CopyableMember, Enumeration, MemberEnumerator, TypeGraphBuilder};
pub use domain::{Member, MemberKind, TypeGraph, TypeId, TypeKey, TypeNode, TypeNodeKind};
pub use infrastructure::TypeRegistry;
pub use ports::{
    MemberDescriptor, MemberStorage, SymbolModel, TypeDescriptor, TypeShape, Visibility,
};
