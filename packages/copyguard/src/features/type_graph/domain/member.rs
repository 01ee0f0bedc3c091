/*
 * Members
 *
 * A member edge of the type graph: one public instance field or property
 * pointing at the node of its declared type.
 */

use super::type_node::TypeId;
use serde::{Deserialize, Serialize};

/// Member category, derived from the declared type's node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    /// Primitive / well-known leaf type
    Scalar,

    /// User-defined class/struct
    Composite,

    /// Any type exposing element iteration
    Collection,

    /// The host could not resolve the declared type
    Unresolved,
}

/// One public instance member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,

    /// Node of the declared type (`None` for unresolved members)
    pub declared_type: Option<TypeId>,

    /// Marked to skip both verifications
    pub exempted: bool,
}

impl Member {
    pub fn new(name: impl Into<String>, kind: MemberKind, declared_type: Option<TypeId>) -> Self {
        Self {
            name: name.into(),
            kind,
            declared_type,
            exempted: false,
        }
    }

    pub fn exempted(mut self, exempted: bool) -> Self {
        self.exempted = exempted;
        self
    }
}
