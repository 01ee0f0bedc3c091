/*
 * Completeness Verifier
 *
 * Cross-references the parameter's type graph with the access paths a
 * copy procedure reads, and reports members the body never touches.
 *
 * # Rules (per member, in precedence order)
 * 1. Collection: satisfied by `<path>.ALL_ITEMS`, or by the bare global
 *    sentinel under `SentinelPolicy::Permissive`
 * 2. Composite with copyable members: own path not required; descend
 *    into each copyable member, first missing sub-path wins
 * 3. Composite without copyable members: own path required
 * 4. Scalar: own path required
 *
 * Exempted and unresolved members are never required. A composite whose
 * type is already on the current descent path is a cycle and falls back
 * to rule 3, which keeps the walk finite.
 *
 * # Reporting
 * One first-missing path per top-level member, in declaration order.
 */

use crate::config::SentinelPolicy;
use crate::errors::{CopyguardError, Result};
use crate::features::access_paths::domain::{AccessPath, AccessPathSet};
use crate::features::type_graph::domain::{Member, MemberKind, TypeGraph, TypeId};
use crate::shared::CancellationToken;

/// Missing paths for one procedure, declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletenessReport {
    pub missing: Vec<AccessPath>,
}

impl CompletenessReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Missing paths joined for the finding message
    pub fn joined(&self) -> String {
        self.missing
            .iter()
            .map(|path| path.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One thing a complete copy must do
enum Requirement {
    /// Read the member at this path
    Read(AccessPath),

    /// Iterate the collection at this path
    Iterate(AccessPath),
}

impl Requirement {
    fn into_path(self) -> AccessPath {
        match self {
            Requirement::Read(path) | Requirement::Iterate(path) => path,
        }
    }
}

struct Frame<'g> {
    member: &'g Member,
    path: AccessPath,

    /// Composite types on the path from the root down to this member
    ancestors: Vec<TypeId>,
}

/// Completeness verifier
#[derive(Debug, Clone, Copy)]
pub struct CompletenessVerifier {
    sentinel_policy: SentinelPolicy,
    max_depth: usize,
}

impl Default for CompletenessVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletenessVerifier {
    pub fn new() -> Self {
        Self {
            sentinel_policy: SentinelPolicy::Permissive,
            max_depth: 64,
        }
    }

    pub fn with_sentinel_policy(mut self, policy: SentinelPolicy) -> Self {
        self.sentinel_policy = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// First missing path of every top-level copyable member
    pub fn verify(
        &self,
        graph: &TypeGraph,
        observed: &AccessPathSet,
        cancel: &CancellationToken,
    ) -> Result<CompletenessReport> {
        let root = graph.root_node()?;
        let mut missing = Vec::new();

        // A collection parameter is copied by iterating it
        if root.is_collection() && !self.collection_satisfied(&AccessPath::root(), observed) {
            missing.push(AccessPath::global_all_items());
        }

        for member in root.copyable_members() {
            if let Some(path) =
                self.first_missing_path(graph, member, observed, &AccessPath::root(), &[root.id], cancel)?
            {
                missing.push(path);
            }
        }

        Ok(CompletenessReport { missing })
    }

    /// Every path a complete copy must read, one walk per top-level member
    ///
    /// Collections contribute `<path>.ALL_ITEMS`.
    pub fn required_paths(&self, graph: &TypeGraph, cancel: &CancellationToken) -> Result<Vec<AccessPath>> {
        let root = graph.root_node()?;
        let mut required = Vec::new();
        if root.is_collection() {
            required.push(AccessPath::global_all_items());
        }

        for member in root.copyable_members() {
            self.walk(graph, member, &AccessPath::root(), &[root.id], cancel, |requirement| {
                required.push(match requirement {
                    Requirement::Read(path) => path,
                    Requirement::Iterate(path) => path.all_items(),
                });
                false
            })?;
        }

        Ok(required)
    }

    /// First required path under `member` absent from `observed`
    ///
    /// `prefix` is the path of the member's owner; `ancestors` the
    /// composite types already on the descent path.
    pub fn first_missing_path(
        &self,
        graph: &TypeGraph,
        member: &Member,
        observed: &AccessPathSet,
        prefix: &AccessPath,
        ancestors: &[TypeId],
        cancel: &CancellationToken,
    ) -> Result<Option<AccessPath>> {
        let mut first = None;
        self.walk(graph, member, prefix, ancestors, cancel, |requirement| {
            let satisfied = match &requirement {
                Requirement::Read(path) => observed.contains(path),
                Requirement::Iterate(path) => self.collection_satisfied(path, observed),
            };
            if !satisfied {
                first = Some(requirement.into_path());
            }
            !satisfied
        })?;
        Ok(first)
    }

    /// Pre-order walk over the requirements below `member`
    ///
    /// `on_requirement` returns true to stop the walk.
    fn walk<F>(
        &self,
        graph: &TypeGraph,
        member: &Member,
        prefix: &AccessPath,
        ancestors: &[TypeId],
        cancel: &CancellationToken,
        mut on_requirement: F,
    ) -> Result<()>
    where
        F: FnMut(Requirement) -> bool,
    {
        let mut stack = vec![Frame {
            member,
            path: prefix.child(&member.name),
            ancestors: ancestors.to_vec(),
        }];

        while let Some(frame) = stack.pop() {
            cancel.checkpoint()?;

            if frame.member.exempted {
                continue;
            }

            let requirement = match (frame.member.kind, frame.member.declared_type) {
                (MemberKind::Collection, _) => Requirement::Iterate(frame.path),
                (MemberKind::Composite, Some(type_id)) => {
                    let node = graph.node(type_id)?;
                    let cyclic = frame.ancestors.contains(&type_id);

                    if cyclic {
                        Requirement::Read(frame.path)
                    } else if !node.expanded || frame.ancestors.len() > self.max_depth {
                        // Unknown member list: cannot tell an empty composite from a deep one
                        return Err(CopyguardError::depth_exceeded(
                            self.max_depth,
                            node.display_name.clone(),
                        ));
                    } else if node.has_copyable_members() {
                        let mut ancestors = frame.ancestors.clone();
                        ancestors.push(type_id);
                        let children: Vec<Frame<'_>> = node
                            .copyable_members()
                            .map(|child| Frame {
                                member: child,
                                path: frame.path.child(&child.name),
                                ancestors: ancestors.clone(),
                            })
                            .collect();
                        stack.extend(children.into_iter().rev());
                        continue;
                    } else {
                        Requirement::Read(frame.path)
                    }
                }
                (MemberKind::Scalar, _) => Requirement::Read(frame.path),
                (MemberKind::Unresolved, _) | (MemberKind::Composite, None) => continue,
            };

            if on_requirement(requirement) {
                break;
            }
        }

        Ok(())
    }

    fn collection_satisfied(&self, path: &AccessPath, observed: &AccessPathSet) -> bool {
        if observed.contains(&path.all_items()) {
            return true;
        }
        if self.sentinel_policy == SentinelPolicy::Permissive && observed.has_global_all_items() {
            tracing::debug!(
                "Collection member '{}' satisfied only by the global ALL_ITEMS sentinel",
                path
            );
            return true;
        }
        false
    }
}
