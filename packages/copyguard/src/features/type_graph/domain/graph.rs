/*
 * Type Graph
 *
 * Identity-keyed arena of type nodes. Built fresh for one verification
 * call and discarded afterwards; nothing here is cached across calls.
 *
 * The graph may be cyclic (self-referential types) and may share nodes
 * (diamonds); each identity is stored exactly once.
 */

use super::member::{Member, MemberKind};
use super::type_node::{TypeId, TypeKey, TypeNode, TypeNodeKind};
use crate::errors::{CopyguardError, Result};
use rustc_hash::FxHashMap;

/// Arena of type nodes reachable from one root
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    nodes: Vec<TypeNode>,
    index: FxHashMap<TypeKey, TypeId>,
    root: Option<TypeId>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node for `key`, or return the existing one
    ///
    /// Returns `(id, inserted)`.
    pub fn intern(
        &mut self,
        key: TypeKey,
        display_name: impl Into<String>,
        is_closed: bool,
        kind: TypeNodeKind,
        depth: usize,
    ) -> (TypeId, bool) {
        if let Some(&id) = self.index.get(&key) {
            return (id, false);
        }

        let id = TypeId(self.nodes.len() as u32);
        self.index.insert(key.clone(), id);
        self.nodes.push(TypeNode {
            id,
            key,
            display_name: display_name.into(),
            is_closed,
            kind,
            members: Vec::new(),
            element_types: Vec::new(),
            depth,
            expanded: kind == TypeNodeKind::Primitive,
        });
        (id, true)
    }

    pub fn set_root(&mut self, id: TypeId) {
        self.root = Some(id);
    }

    pub fn root(&self) -> Result<TypeId> {
        self.root
            .ok_or_else(|| CopyguardError::inconsistent("type graph has no root"))
    }

    pub fn root_node(&self) -> Result<&TypeNode> {
        self.node(self.root()?)
    }

    pub fn node(&self, id: TypeId) -> Result<&TypeNode> {
        self.nodes
            .get(id.index())
            .ok_or_else(|| CopyguardError::inconsistent(format!("dangling type id {}", id.0)))
    }

    pub(crate) fn node_mut(&mut self, id: TypeId) -> Result<&mut TypeNode> {
        self.nodes
            .get_mut(id.index())
            .ok_or_else(|| CopyguardError::inconsistent(format!("dangling type id {}", id.0)))
    }

    pub fn lookup(&self, key: &TypeKey) -> Option<TypeId> {
        self.index.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.iter()
    }

    /// Element types of a collection member, empty for other kinds
    pub fn element_types_of(&self, member: &Member) -> Result<&[TypeId]> {
        match (member.kind, member.declared_type) {
            (MemberKind::Collection, Some(id)) => Ok(&self.node(id)?.element_types),
            _ => Ok(&[]),
        }
    }

    /// Nodes a member leads to for closedness purposes
    ///
    /// Composite members lead to their declared type; collection members
    /// lead to their element types (the collection itself is plumbing).
    pub fn closedness_targets(&self, member: &Member) -> Result<Vec<TypeId>> {
        match (member.kind, member.declared_type) {
            (MemberKind::Composite, Some(id)) => Ok(vec![id]),
            (MemberKind::Collection, Some(_)) => Ok(self.element_types_of(member)?.to_vec()),
            _ => Ok(Vec::new()),
        }
    }
}
