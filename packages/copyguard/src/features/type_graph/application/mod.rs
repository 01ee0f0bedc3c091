/*
 * Type Graph Application Layer
 */

mod graph_builder;
mod member_enumerator;

pub use graph_builder::TypeGraphBuilder;
pub use member_enumerator::{CopyableMember, Enumeration, MemberEnumerator};
