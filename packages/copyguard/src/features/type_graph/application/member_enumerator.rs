/*
 * Member Enumerator
 *
 * Decides which members of a type take part in copy verification.
 *
 * Rule: a member is copyable iff it is public, instance-level and not
 * carrying the exempt marker. Collections never enumerate their own
 * members; they expose their element types instead, so the fields of a
 * list implementation are not mistaken for fields of its elements.
 */

use crate::features::type_graph::domain::TypeKey;
use crate::features::type_graph::ports::{MemberDescriptor, TypeDescriptor, TypeShape, Visibility};
use crate::shared::models::Marker;

/// Enumerated member, borrowed from its descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyableMember<'a> {
    pub name: &'a str,
    pub declared_type: Option<&'a TypeKey>,
    pub exempted: bool,
}

impl<'a> From<&'a MemberDescriptor> for CopyableMember<'a> {
    fn from(descriptor: &'a MemberDescriptor) -> Self {
        Self {
            name: &descriptor.name,
            declared_type: descriptor.declared_type.as_ref(),
            exempted: descriptor.markers.contains(Marker::Exempt),
        }
    }
}

/// Result of enumerating one type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enumeration<'a> {
    /// Members in declaration order
    Members(Vec<CopyableMember<'a>>),

    /// The type is a collection: traverse these element types instead
    Elements(&'a [TypeKey]),
}

impl<'a> Enumeration<'a> {
    pub fn members(&self) -> &[CopyableMember<'a>] {
        match self {
            Enumeration::Members(members) => members,
            Enumeration::Elements(_) => &[],
        }
    }
}

/// Stateless member enumerator
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberEnumerator;

impl MemberEnumerator {
    pub fn new() -> Self {
        Self
    }

    /// Copyable members of `ty`, declaration order
    pub fn enumerate<'a>(&self, ty: &'a TypeDescriptor) -> Enumeration<'a> {
        match self.enumerate_all(ty) {
            Enumeration::Members(members) => {
                Enumeration::Members(members.into_iter().filter(|m| !m.exempted).collect())
            }
            elements => elements,
        }
    }

    /// Public instance members of `ty` with exempted ones flagged
    pub fn enumerate_all<'a>(&self, ty: &'a TypeDescriptor) -> Enumeration<'a> {
        match &ty.shape {
            TypeShape::Collection { element_types } => Enumeration::Elements(element_types),
            TypeShape::Primitive => Enumeration::Members(Vec::new()),
            TypeShape::Composite => Enumeration::Members(
                ty.members
                    .iter()
                    .filter(|m| Self::is_visible_instance_member(m))
                    .map(CopyableMember::from)
                    .collect(),
            ),
        }
    }

    fn is_visible_instance_member(member: &MemberDescriptor) -> bool {
        member.visibility == Visibility::Public && !member.is_static
    }
}
