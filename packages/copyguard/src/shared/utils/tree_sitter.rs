//! Tree-sitter Utility Functions
//!
//! Common utilities for working with tree-sitter AST nodes.

use crate::shared::models::Span;
use tree_sitter::Node;

// ═══════════════════════════════════════════════════════════════════════════
// Node Traversal Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Find a direct child node by kind (named or anonymous)
#[inline]
pub fn find_child_by_kind<'a>(node: &Node<'a>, kind: &str) -> Option<Node<'a>> {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find(|child| child.kind() == kind)
}

/// All named children, in source order
pub fn named_children<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    (0..node.named_child_count())
        .filter_map(|i| node.named_child(i))
        .collect()
}

/// All children bound to a grammar field (e.g. every `declarator`)
pub fn children_by_field<'a>(node: &Node<'a>, field: &str) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

/// Find all descendants by kind, in pre-order
pub fn find_descendants_by_kind<'a>(node: &Node<'a>, kind: &str) -> Vec<Node<'a>> {
    let mut result = Vec::new();
    let mut stack = vec![*node];
    while let Some(current) = stack.pop() {
        if current.kind() == kind {
            result.push(current);
        }
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    result
}

// ═══════════════════════════════════════════════════════════════════════════
// Text Extraction Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Extract text content from a node
///
/// Returns an empty string when the node's byte range does not fall on
/// character boundaries of `source`.
#[inline]
pub fn extract_node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Text of the child bound to `field`, if present
pub fn field_text(node: &Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|child| extract_node_text(&child, source).to_string())
}

// ═══════════════════════════════════════════════════════════════════════════
// Span Conversion Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Convert tree-sitter node to Span (1-indexed lines)
#[inline]
pub fn node_to_span(node: &Node) -> Span {
    let start_pos = node.start_position();
    let end_pos = node.end_position();

    Span::new(
        start_pos.row as u32 + 1,
        start_pos.column as u32,
        end_pos.row as u32 + 1,
        end_pos.column as u32,
    )
}
