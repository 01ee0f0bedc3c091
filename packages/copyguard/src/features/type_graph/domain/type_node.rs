/*
 * Type Nodes
 *
 * One node per distinct type identity reachable from a copy parameter.
 */

use super::member::Member;
use serde::{Deserialize, Serialize};

/// Stable type identity
///
/// Distinguishes generic instantiations: `List<A>` and `List<B>` are
/// different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for TypeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl std::fmt::Display for TypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arena index of a node within one `TypeGraph`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Structural category of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeNodeKind {
    Primitive,
    Composite,
    Collection,
}

/// One type reachable in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeNode {
    pub id: TypeId,
    pub key: TypeKey,
    pub display_name: String,

    /// Non-extensible; primitives count as closed
    pub is_closed: bool,
    pub kind: TypeNodeKind,

    /// Public instance members in declaration order, exempted ones
    /// included and flagged. Always empty for primitives and collections.
    pub members: Vec<Member>,

    /// Element types (collections only), one per type argument
    pub element_types: Vec<TypeId>,

    /// Distance from the root in member/element hops
    pub depth: usize,

    /// False when the builder stopped at the depth bound before
    /// materializing this node's members
    pub expanded: bool,
}

impl TypeNode {
    /// Copyable members: public, instance-level, not exempted
    pub fn copyable_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| !m.exempted)
    }

    pub fn has_copyable_members(&self) -> bool {
        self.copyable_members().next().is_some()
    }

    pub fn is_collection(&self) -> bool {
        self.kind == TypeNodeKind::Collection
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == TypeNodeKind::Primitive
    }
}
