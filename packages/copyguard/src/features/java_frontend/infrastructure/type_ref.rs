//! Type syntax → `JavaType`
//!
//! Package qualifiers are dropped (`java.util.List` → `List`), wildcards
//! collapse to their bound (`? extends Item` → `Item`, `?` → `Object`),
//! and `var` reads as "no declared type".

use crate::features::java_frontend::domain::JavaType;
use crate::shared::utils::tree_sitter::{extract_node_text, named_children};
use tree_sitter::Node;

/// Convert a type node; `type_vars` are the type parameters in scope
pub fn java_type(node: &Node, source: &str, type_vars: &[String]) -> Option<JavaType> {
    match node.kind() {
        "integral_type" | "floating_point_type" | "boolean_type" => {
            Some(JavaType::Primitive(extract_node_text(node, source).to_string()))
        }
        "type_identifier" => {
            let name = extract_node_text(node, source);
            if name == "var" {
                None
            } else if type_vars.iter().any(|var| var == name) {
                Some(JavaType::Var(name.to_string()))
            } else {
                Some(JavaType::named(name))
            }
        }
        "scoped_type_identifier" => {
            let last = named_children(node)
                .into_iter()
                .filter(|child| child.kind() == "type_identifier")
                .last()?;
            Some(JavaType::named(extract_node_text(&last, source)))
        }
        "generic_type" => {
            let children = named_children(node);
            let base = children
                .iter()
                .find(|child| matches!(child.kind(), "type_identifier" | "scoped_type_identifier"))?;
            let name = match java_type(base, source, type_vars)? {
                JavaType::Named { name, .. } => name,
                _ => return None,
            };
            let args = children
                .iter()
                .find(|child| child.kind() == "type_arguments")
                .map(|arguments| {
                    named_children(arguments)
                        .iter()
                        .map(|arg| java_type(arg, source, type_vars).unwrap_or_else(JavaType::object))
                        .collect()
                })
                .unwrap_or_default();
            Some(JavaType::generic(name, args))
        }
        "array_type" => {
            let element = node.child_by_field_name("element")?;
            let mut ty = java_type(&element, source, type_vars)?;
            let dimensions = node
                .child_by_field_name("dimensions")
                .map(|d| extract_node_text(&d, source).matches('[').count())
                .unwrap_or(1);
            for _ in 0..dimensions.max(1) {
                ty = JavaType::Array(Box::new(ty));
            }
            Some(ty)
        }
        "annotated_type" => {
            let last = named_children(node).into_iter().last()?;
            java_type(&last, source, type_vars)
        }
        "wildcard" => Some(
            named_children(node)
                .iter()
                .filter(|child| !matches!(child.kind(), "annotation" | "marker_annotation" | "super"))
                .last()
                .and_then(|bound| java_type(bound, source, type_vars))
                .unwrap_or_else(JavaType::object),
        ),
        _ => None,
    }
}

/// Wrap `ty` in one array level per `[` in a declarator's `dimensions`
pub fn with_dimensions(ty: JavaType, declarator: &Node, source: &str) -> JavaType {
    let count = declarator
        .child_by_field_name("dimensions")
        .map(|d| extract_node_text(&d, source).matches('[').count())
        .unwrap_or(0);
    (0..count).fold(ty, |ty, _| JavaType::Array(Box::new(ty)))
}

/// Names of a `type_parameters` node's parameters
pub fn type_parameters(declaration: &Node, source: &str) -> Vec<String> {
    let Some(parameters) = declaration.child_by_field_name("type_parameters") else {
        return Vec::new();
    };
    named_children(&parameters)
        .iter()
        .filter(|param| param.kind() == "type_parameter")
        .filter_map(|param| {
            named_children(param)
                .into_iter()
                .find(|child| matches!(child.kind(), "type_identifier" | "identifier"))
                .map(|name| extract_node_text(&name, source).to_string())
        })
        .collect()
}
