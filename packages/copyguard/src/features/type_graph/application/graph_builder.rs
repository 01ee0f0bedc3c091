/*
 * Type Graph Builder
 *
 * Materializes the call-scoped type graph for one copy parameter by
 * querying the host symbol model.
 *
 * # Algorithm
 * - Breadth-first work-list keyed by type identity
 * - Each identity is described once per call (cycles and diamonds
 *   collapse onto the existing node)
 * - Nodes at `max_depth` are interned but left unexpanded; verifiers
 *   treat reaching one as "cannot verify"
 * - One cancellation checkpoint per expanded node
 *
 * # Time Complexity
 * O(types + members) host lookups
 */

use super::member_enumerator::{Enumeration, MemberEnumerator};
use crate::errors::Result;
use crate::features::type_graph::domain::{
    Member, MemberKind, TypeGraph, TypeId, TypeKey, TypeNodeKind,
};
use crate::features::type_graph::ports::{SymbolModel, TypeDescriptor, TypeShape};
use crate::shared::CancellationToken;
use std::collections::VecDeque;

/// Builds a `TypeGraph` rooted at a parameter's declared type
pub struct TypeGraphBuilder<'m, M: SymbolModel + ?Sized> {
    model: &'m M,
    enumerator: MemberEnumerator,
    max_depth: usize,
}

impl<'m, M: SymbolModel + ?Sized> TypeGraphBuilder<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self {
            model,
            enumerator: MemberEnumerator::new(),
            max_depth: 64,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build the graph for `root`
    ///
    /// Returns `Ok(None)` when the root type cannot be resolved.
    pub fn build(&self, root: &TypeKey, cancel: &CancellationToken) -> Result<Option<TypeGraph>> {
        let mut graph = TypeGraph::new();
        let mut pending: VecDeque<(TypeId, TypeDescriptor)> = VecDeque::new();

        let Some(root_id) = self.resolve(&mut graph, &mut pending, root, 0) else {
            tracing::debug!("Root type '{}' is unresolvable", root);
            return Ok(None);
        };
        graph.set_root(root_id);

        while let Some((id, descriptor)) = pending.pop_front() {
            cancel.checkpoint()?;

            let depth = graph.node(id)?.depth;
            if depth >= self.max_depth {
                tracing::trace!("Depth bound reached at '{}'", descriptor.key);
                continue;
            }

            let mut members = Vec::new();
            let mut element_types = Vec::new();

            match self.enumerator.enumerate_all(&descriptor) {
                Enumeration::Elements(keys) => {
                    for key in keys {
                        if let Some(child) = self.resolve(&mut graph, &mut pending, key, depth + 1) {
                            element_types.push(child);
                        }
                    }
                }
                Enumeration::Members(enumerated) => {
                    for member in enumerated {
                        let declared = match member.declared_type {
                            Some(key) => self.resolve(&mut graph, &mut pending, key, depth + 1),
                            None => None,
                        };
                        let kind = match declared {
                            Some(child) => member_kind(graph.node(child)?.kind),
                            None => MemberKind::Unresolved,
                        };
                        members.push(Member::new(member.name, kind, declared).exempted(member.exempted));
                    }
                }
            }

            let node = graph.node_mut(id)?;
            node.members = members;
            node.element_types = element_types;
            node.expanded = true;
        }

        tracing::trace!("Built type graph for '{}' with {} nodes", root, graph.len());
        Ok(Some(graph))
    }

    /// Intern `key`, scheduling it for expansion on first sight
    fn resolve(
        &self,
        graph: &mut TypeGraph,
        pending: &mut VecDeque<(TypeId, TypeDescriptor)>,
        key: &TypeKey,
        depth: usize,
    ) -> Option<TypeId> {
        if let Some(id) = graph.lookup(key) {
            return Some(id);
        }

        let descriptor = self.model.describe(key)?;
        let kind = node_kind(&descriptor.shape);
        let (id, inserted) = graph.intern(
            key.clone(),
            descriptor.display_name.clone(),
            descriptor.is_closed,
            kind,
            depth,
        );
        if inserted && kind != TypeNodeKind::Primitive {
            pending.push_back((id, descriptor));
        }
        Some(id)
    }
}

fn node_kind(shape: &TypeShape) -> TypeNodeKind {
    match shape {
        TypeShape::Primitive => TypeNodeKind::Primitive,
        TypeShape::Composite => TypeNodeKind::Composite,
        TypeShape::Collection { .. } => TypeNodeKind::Collection,
    }
}

fn member_kind(kind: TypeNodeKind) -> MemberKind {
    match kind {
        TypeNodeKind::Primitive => MemberKind::Scalar,
        TypeNodeKind::Composite => MemberKind::Composite,
        TypeNodeKind::Collection => MemberKind::Collection,
    }
}
