//! Property-based tests over generated type graphs
//!
//! Invariants that hold for every generated registry:
//! - Closedness verification terminates on cyclic graphs
//! - Reading every required path leaves nothing missing; dropping one
//!   required path yields exactly one missing entry
//! - Exempted members never contribute required paths

use copyguard::features::access_paths::{AccessPath, AccessPathSet};
use copyguard::features::type_graph::{MemberDescriptor, TypeDescriptor};
use copyguard::{
    CancellationToken, ClosednessVerifier, CompletenessVerifier, Marker, MarkerSet, TypeGraph,
    TypeGraphBuilder, TypeRegistry,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum MemberShape {
    Scalar,
    Collection,
    /// Reference to another generated type (index taken modulo type count)
    Ref(usize),
    /// Exempted member of an open type
    ExemptOpen,
}

fn member_shape() -> impl Strategy<Value = MemberShape> {
    prop_oneof![
        3 => Just(MemberShape::Scalar),
        1 => Just(MemberShape::Collection),
        3 => (0usize..8).prop_map(MemberShape::Ref),
        1 => Just(MemberShape::ExemptOpen),
    ]
}

fn type_shapes() -> impl Strategy<Value = Vec<Vec<MemberShape>>> {
    prop::collection::vec(prop::collection::vec(member_shape(), 0..4), 1..5)
}

fn registry(shapes: &[Vec<MemberShape>]) -> TypeRegistry {
    let mut registry = TypeRegistry::with_primitives(["int"])
        .with_type(TypeDescriptor::collection("List<int>", vec!["int".into()]))
        .with_type(TypeDescriptor::composite("Open", false));

    for (index, members) in shapes.iter().enumerate() {
        let mut descriptor = TypeDescriptor::composite(format!("T{}", index), true);
        for (position, shape) in members.iter().enumerate() {
            let name = format!("M{}", position);
            let member = match shape {
                MemberShape::Scalar => MemberDescriptor::field(name, "int"),
                MemberShape::Collection => MemberDescriptor::field(name, "List<int>"),
                MemberShape::Ref(target) => {
                    MemberDescriptor::field(name, format!("T{}", target % shapes.len()))
                }
                MemberShape::ExemptOpen => MemberDescriptor::field(name, "Open")
                    .with_markers(MarkerSet::of(Marker::Exempt)),
            };
            descriptor = descriptor.with_member(member);
        }
        registry.register(descriptor);
    }
    registry
}

fn build(registry: &TypeRegistry) -> TypeGraph {
    TypeGraphBuilder::new(registry)
        .build(&"T0".into(), &CancellationToken::new())
        .unwrap()
        .unwrap()
}

fn exempted_names(shapes: &[Vec<MemberShape>]) -> Vec<String> {
    shapes[0]
        .iter()
        .enumerate()
        .filter(|(_, shape)| matches!(shape, MemberShape::ExemptOpen))
        .map(|(position, _)| format!("M{}", position))
        .collect()
}

proptest! {
    #[test]
    fn prop_closedness_terminates_on_cycles(shapes in type_shapes()) {
        let registry = registry(&shapes);
        let graph = build(&registry);

        let report = ClosednessVerifier::new()
            .verify(&graph, &CancellationToken::new())
            .unwrap();

        // Every generated type is closed; exempted open members are skipped
        prop_assert!(report.outcome.is_closed());
        prop_assert!(report.types_visited <= graph.len());
    }

    #[test]
    fn prop_required_paths_round_trip(shapes in type_shapes(), pick in any::<prop::sample::Index>()) {
        let registry = registry(&shapes);
        let graph = build(&registry);
        let cancel = CancellationToken::new();
        let verifier = CompletenessVerifier::new();

        let required = verifier.required_paths(&graph, &cancel).unwrap();
        let complete: AccessPathSet = required.iter().cloned().collect();
        prop_assert!(verifier.verify(&graph, &complete, &cancel).unwrap().is_complete());

        if !required.is_empty() {
            let dropped = &required[pick.index(required.len())];
            let mut partial = complete.clone();
            partial.remove(dropped);

            let report = verifier.verify(&graph, &partial, &cancel).unwrap();
            prop_assert_eq!(report.missing.len(), 1);

            let expected = if dropped.ends_with_all_items() {
                AccessPath::from_members(
                    dropped.segments()[..dropped.len() - 1]
                        .iter()
                        .map(|segment| segment.to_string()),
                )
            } else {
                dropped.clone()
            };
            prop_assert_eq!(&report.missing[0], &expected);
        }
    }

    #[test]
    fn prop_exempted_members_never_required(shapes in type_shapes()) {
        let registry = registry(&shapes);
        let graph = build(&registry);
        let exempted = exempted_names(&shapes);

        let required = CompletenessVerifier::new()
            .required_paths(&graph, &CancellationToken::new())
            .unwrap();

        for path in &required {
            let first = path.segments()[0].to_string();
            prop_assert!(!exempted.contains(&first), "{} is exempted", path);
        }
    }
}
