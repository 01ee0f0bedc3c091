/*
 * Type Graph Ports
 *
 * The host's symbol model, seen from the core. The host describes one
 * type at a time, keyed by a stable identity; the core never sees the
 * host's own symbol representation.
 */

use crate::features::type_graph::domain::TypeKey;
use crate::shared::models::MarkerSet;
use serde::{Deserialize, Serialize};

/// Declared accessibility of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Protected,
    Internal,
    Private,
}

/// Field or property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStorage {
    Field,
    Property,
}

/// Structural category of a type as the host sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeShape {
    /// Primitive or well-known leaf value type
    Primitive,

    /// User-defined class/struct
    Composite,

    /// Anything exposing element iteration; one key per type argument
    Collection { element_types: Vec<TypeKey> },
}

/// One declared member of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub storage: MemberStorage,
    pub markers: MarkerSet,

    /// `None` when the host could not resolve the member's type
    pub declared_type: Option<TypeKey>,
}

impl MemberDescriptor {
    /// Public instance field of the given type
    pub fn field(name: impl Into<String>, declared_type: impl Into<TypeKey>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            storage: MemberStorage::Field,
            markers: MarkerSet::empty(),
            declared_type: Some(declared_type.into()),
        }
    }

    /// Public instance property of the given type
    pub fn property(name: impl Into<String>, declared_type: impl Into<TypeKey>) -> Self {
        Self {
            storage: MemberStorage::Property,
            ..Self::field(name, declared_type)
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_markers(mut self, markers: MarkerSet) -> Self {
        self.markers = markers;
        self
    }

    pub fn unresolved(mut self) -> Self {
        self.declared_type = None;
        self
    }
}

/// Everything the core needs to know about one type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub key: TypeKey,
    pub display_name: String,

    /// Non-extensible (sealed/final). Primitives are closed.
    pub is_closed: bool,
    pub shape: TypeShape,

    /// Declared members in declaration order
    pub members: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    pub fn primitive(key: impl Into<TypeKey>) -> Self {
        let key = key.into();
        Self {
            display_name: key.to_string(),
            key,
            is_closed: true,
            shape: TypeShape::Primitive,
            members: Vec::new(),
        }
    }

    pub fn composite(key: impl Into<TypeKey>, is_closed: bool) -> Self {
        let key = key.into();
        Self {
            display_name: key.to_string(),
            key,
            is_closed,
            shape: TypeShape::Composite,
            members: Vec::new(),
        }
    }

    pub fn collection(key: impl Into<TypeKey>, element_types: Vec<TypeKey>) -> Self {
        let key = key.into();
        Self {
            display_name: key.to_string(),
            key,
            is_closed: false,
            shape: TypeShape::Collection { element_types },
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.shape, TypeShape::Collection { .. })
    }
}

/// Host symbol model
///
/// Implementations must be safe to query from several analysis threads
/// at once; the batch driver requires `Sync`.
pub trait SymbolModel {
    /// Describe the type with the given identity, `None` if unresolvable
    fn describe(&self, key: &TypeKey) -> Option<TypeDescriptor>;
}

impl<T: SymbolModel + ?Sized> SymbolModel for &T {
    fn describe(&self, key: &TypeKey) -> Option<TypeDescriptor> {
        (**self).describe(key)
    }
}
