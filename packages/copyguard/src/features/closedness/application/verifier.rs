/*
 * Closedness Verifier
 *
 * Confirms every type reachable from a copy parameter is non-extensible,
 * so a future subtype cannot silently add state the copy misses.
 *
 * # Algorithm
 * 1. Root must be closed, otherwise stop with `RootNotClosed`
 * 2. Pre-order walk over copyable members (exempted ones skipped);
 *    composite members lead to their declared type, collection members
 *    to their element types (the collection itself need not be closed)
 * 3. First open type in member order wins; no aggregate report
 *
 * # Termination
 * A visited set of type ids, scoped to one `verify` call, is shared by
 * every top-level member. Reaching a visited id counts as satisfied, so
 * self-referential and mutually-referential graphs terminate after
 * visiting each node at most once. The walk uses an explicit stack and
 * checks cancellation once per step.
 */

use crate::errors::{CopyguardError, Result};
use crate::features::access_paths::domain::ALL_ITEMS;
use crate::features::closedness::domain::ClosednessViolation;
use crate::features::type_graph::domain::{TypeGraph, TypeId};
use crate::shared::CancellationToken;
use rustc_hash::FxHashSet;

/// Verification outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClosednessOutcome {
    Closed,
    Violated(ClosednessViolation),
}

impl ClosednessOutcome {
    pub fn is_closed(&self) -> bool {
        matches!(self, ClosednessOutcome::Closed)
    }

    pub fn violation(&self) -> Option<&ClosednessViolation> {
        match self {
            ClosednessOutcome::Violated(violation) => Some(violation),
            ClosednessOutcome::Closed => None,
        }
    }
}

/// Outcome plus traversal statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosednessReport {
    pub outcome: ClosednessOutcome,

    /// Distinct type nodes examined
    pub types_visited: usize,
}

/// Stateless closedness verifier
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosednessVerifier;

impl ClosednessVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Verify the graph's root parameter type
    pub fn verify(&self, graph: &TypeGraph, cancel: &CancellationToken) -> Result<ClosednessReport> {
        let root = graph.root_node()?;
        let mut visited = FxHashSet::default();
        visited.insert(root.id);

        if !root.is_collection() && !root.is_closed {
            return Ok(ClosednessReport {
                outcome: ClosednessOutcome::Violated(ClosednessViolation::RootNotClosed {
                    type_name: root.display_name.clone(),
                }),
                types_visited: visited.len(),
            });
        }
        if !root.expanded {
            return Err(CopyguardError::depth_exceeded(0, root.display_name.clone()));
        }

        let mut targets: Vec<(String, TypeId)> = Vec::new();
        if root.is_collection() {
            for &element in &root.element_types {
                targets.push((ALL_ITEMS.to_string(), element));
            }
        } else {
            for member in root.copyable_members() {
                for target in graph.closedness_targets(member)? {
                    targets.push((member.name.clone(), target));
                }
            }
        }

        for (member, target) in targets {
            let found = self.first_open_type(graph, target, vec![member], &mut visited, cancel)?;
            if let Some((open, path)) = found {
                let type_name = graph.node(open)?.display_name.clone();
                let violation = match path.as_slice() {
                    [member] if member != ALL_ITEMS => ClosednessViolation::MemberNotClosed {
                        member: member.clone(),
                        type_name,
                    },
                    _ => ClosednessViolation::TransitiveNotClosed {
                        path: path.join("."),
                        type_name,
                    },
                };
                tracing::debug!("Closedness violation: {}", violation);
                return Ok(ClosednessReport {
                    outcome: ClosednessOutcome::Violated(violation),
                    types_visited: visited.len(),
                });
            }
        }

        Ok(ClosednessReport {
            outcome: ClosednessOutcome::Closed,
            types_visited: visited.len(),
        })
    }

    /// Whether `start` and everything reachable from it is closed
    ///
    /// Ids already in `visited` count as satisfied.
    pub fn is_closed_transitively(
        &self,
        graph: &TypeGraph,
        start: TypeId,
        visited: &mut FxHashSet<TypeId>,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        Ok(self
            .first_open_type(graph, start, Vec::new(), visited, cancel)?
            .is_none())
    }

    /// Pre-order search for the first open type reachable from `start`
    ///
    /// Returns the offending node and the member path leading to it,
    /// `path` being the path of `start` itself.
    fn first_open_type(
        &self,
        graph: &TypeGraph,
        start: TypeId,
        path: Vec<String>,
        visited: &mut FxHashSet<TypeId>,
        cancel: &CancellationToken,
    ) -> Result<Option<(TypeId, Vec<String>)>> {
        let mut stack = vec![(start, path)];

        while let Some((id, path)) = stack.pop() {
            cancel.checkpoint()?;

            if !visited.insert(id) {
                continue;
            }

            let node = graph.node(id)?;
            if !node.is_collection() && !node.is_closed {
                return Ok(Some((id, path)));
            }
            if !node.expanded {
                return Err(CopyguardError::depth_exceeded(
                    node.depth,
                    node.display_name.clone(),
                ));
            }

            let mut children: Vec<(TypeId, Vec<String>)> = Vec::new();
            if node.is_collection() {
                for &element in &node.element_types {
                    children.push((element, path.clone()));
                }
            } else {
                for member in node.copyable_members() {
                    for target in graph.closedness_targets(member)? {
                        let mut child_path = path.clone();
                        child_path.push(member.name.clone());
                        children.push((target, child_path));
                    }
                }
            }

            // Reverse so the first member is examined first
            stack.extend(children.into_iter().rev());
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::type_graph::infrastructure::TypeRegistry;
    use crate::features::type_graph::ports::{MemberDescriptor, TypeDescriptor};
    use crate::features::type_graph::TypeGraphBuilder;
    use crate::shared::models::{Marker, MarkerSet};
    use pretty_assertions::assert_eq;

    fn verify(registry: &TypeRegistry, root: &str) -> ClosednessReport {
        let cancel = CancellationToken::new();
        let graph = TypeGraphBuilder::new(registry)
            .build(&root.into(), &cancel)
            .unwrap()
            .unwrap();
        ClosednessVerifier::new().verify(&graph, &cancel).unwrap()
    }

    #[test]
    fn test_open_root_stops_immediately() {
        let registry = TypeRegistry::with_primitives(["int"]).with_type(
            TypeDescriptor::composite("Foo", false)
                .with_member(MemberDescriptor::field("Child", "Open")),
        ).with_type(TypeDescriptor::composite("Open", false));

        let report = verify(&registry, "Foo");
        assert_eq!(
            report.outcome,
            ClosednessOutcome::Violated(ClosednessViolation::RootNotClosed {
                type_name: "Foo".to_string()
            })
        );
        assert_eq!(report.types_visited, 1);
    }

    #[test]
    fn test_immediate_member_not_closed() {
        let registry = TypeRegistry::with_primitives(["int"])
            .with_type(
                TypeDescriptor::composite("Foo", true)
                    .with_member(MemberDescriptor::field("A", "int"))
                    .with_member(MemberDescriptor::field("Shape", "Shape")),
            )
            .with_type(TypeDescriptor::composite("Shape", false));

        let report = verify(&registry, "Foo");
        assert_eq!(
            report.outcome.violation(),
            Some(&ClosednessViolation::MemberNotClosed {
                member: "Shape".to_string(),
                type_name: "Shape".to_string()
            })
        );
    }

    #[test]
    fn test_transitive_member_not_closed() {
        let registry = TypeRegistry::with_primitives(["int"])
            .with_type(
                TypeDescriptor::composite("Outer", true)
                    .with_member(MemberDescriptor::field("I", "Inner")),
            )
            .with_type(
                TypeDescriptor::composite("Inner", true)
                    .with_member(MemberDescriptor::field("Shape", "Shape")),
            )
            .with_type(TypeDescriptor::composite("Shape", false));

        let report = verify(&registry, "Outer");
        assert_eq!(
            report.outcome.violation(),
            Some(&ClosednessViolation::TransitiveNotClosed {
                path: "I.Shape".to_string(),
                type_name: "Shape".to_string()
            })
        );
    }

    #[test]
    fn test_collection_type_itself_need_not_be_closed() {
        let registry = TypeRegistry::with_primitives(["int"])
            .with_type(
                TypeDescriptor::composite("Foo", true)
                    .with_member(MemberDescriptor::field("Items", "List<int>")),
            )
            .with_type(TypeDescriptor::collection("List<int>", vec!["int".into()]));

        assert!(verify(&registry, "Foo").outcome.is_closed());
    }

    #[test]
    fn test_collection_element_not_closed_is_member_violation() {
        let registry = TypeRegistry::new()
            .with_type(
                TypeDescriptor::composite("Foo", true)
                    .with_member(MemberDescriptor::field("Items", "List<Shape>")),
            )
            .with_type(TypeDescriptor::collection("List<Shape>", vec!["Shape".into()]))
            .with_type(TypeDescriptor::composite("Shape", false));

        assert_eq!(
            verify(&registry, "Foo").outcome.violation(),
            Some(&ClosednessViolation::MemberNotClosed {
                member: "Items".to_string(),
                type_name: "Shape".to_string()
            })
        );
    }

    #[test]
    fn test_exempted_member_skipped() {
        let registry = TypeRegistry::with_primitives(["int"])
            .with_type(
                TypeDescriptor::composite("Foo", true).with_member(
                    MemberDescriptor::field("Shape", "Shape")
                        .with_markers(MarkerSet::of(Marker::Exempt)),
                ),
            )
            .with_type(TypeDescriptor::composite("Shape", false));

        assert!(verify(&registry, "Foo").outcome.is_closed());
    }

    #[test]
    fn test_self_reference_terminates() {
        let registry = TypeRegistry::with_primitives(["int"]).with_type(
            TypeDescriptor::composite("Node", true)
                .with_member(MemberDescriptor::field("Value", "int"))
                .with_member(MemberDescriptor::field("Next", "Node"))
                .with_member(MemberDescriptor::field("Children", "List<Node>")),
        ).with_type(TypeDescriptor::collection("List<Node>", vec!["Node".into()]));

        let report = verify(&registry, "Node");
        assert!(report.outcome.is_closed());
        assert!(report.types_visited <= 3);
    }

    #[test]
    fn test_first_violation_in_member_order() {
        let registry = TypeRegistry::new()
            .with_type(
                TypeDescriptor::composite("Foo", true)
                    .with_member(MemberDescriptor::field("First", "A"))
                    .with_member(MemberDescriptor::field("Second", "B")),
            )
            .with_type(TypeDescriptor::composite("A", false))
            .with_type(TypeDescriptor::composite("B", false));

        assert_eq!(verify(&registry, "Foo").outcome.violation().unwrap().type_name(), "A");
    }

    #[test]
    fn test_cancellation_propagates() {
        let registry = TypeRegistry::with_primitives(["int"]).with_type(
            TypeDescriptor::composite("Foo", true).with_member(MemberDescriptor::field("A", "Bar")),
        ).with_type(TypeDescriptor::composite("Bar", true));
        let cancel = CancellationToken::new();
        let graph = TypeGraphBuilder::new(&registry)
            .build(&"Foo".into(), &cancel)
            .unwrap()
            .unwrap();

        cancel.cancel();
        assert!(matches!(
            ClosednessVerifier::new().verify(&graph, &cancel),
            Err(CopyguardError::Cancelled)
        ));
    }

    #[test]
    fn test_is_closed_transitively_respects_visited() {
        let registry = TypeRegistry::new()
            .with_type(
                TypeDescriptor::composite("Foo", true)
                    .with_member(MemberDescriptor::field("Shape", "Shape")),
            )
            .with_type(TypeDescriptor::composite("Shape", false));
        let cancel = CancellationToken::new();
        let graph = TypeGraphBuilder::new(&registry)
            .build(&"Foo".into(), &cancel)
            .unwrap()
            .unwrap();
        let verifier = ClosednessVerifier::new();
        let root = graph.root().unwrap();
        let shape = graph.lookup(&"Shape".into()).unwrap();

        let mut visited = FxHashSet::default();
        assert!(!verifier
            .is_closed_transitively(&graph, root, &mut visited, &cancel)
            .unwrap());

        let mut visited: FxHashSet<TypeId> = [shape].into_iter().collect();
        assert!(verifier
            .is_closed_transitively(&graph, root, &mut visited, &cancel)
            .unwrap());
    }
}
