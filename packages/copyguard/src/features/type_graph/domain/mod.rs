/*
 * Type Graph Domain Models
 *
 * Pure data: type identities, nodes, member edges and the arena that
 * holds them. No traversal logic lives here.
 */

mod graph;
mod member;
mod type_node;

pub use graph::TypeGraph;
pub use member::{Member, MemberKind};
pub use type_node::{TypeId, TypeKey, TypeNode, TypeNodeKind};
