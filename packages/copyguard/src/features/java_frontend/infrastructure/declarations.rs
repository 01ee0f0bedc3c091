/*
 * Declaration Collector
 *
 * Reads class, interface, record and enum declarations (nested ones
 * included) into `ClassDecl` templates:
 * - class fields: one `FieldDecl` per declarator
 * - record components: public instance properties
 * - interface fields: implicitly static
 * - `final` modifier and exempt marker per declaration
 */

use super::markers::MarkerResolver;
use super::type_ref::{java_type, type_parameters, with_dimensions};
use crate::features::java_frontend::domain::{ClassDecl, ClassKind, FieldDecl};
use crate::features::type_graph::ports::{MemberStorage, Visibility};
use crate::shared::utils::tree_sitter::{
    children_by_field, extract_node_text, field_text, find_child_by_kind, named_children,
};
use tree_sitter::Node;

pub const TYPE_DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "record_declaration",
    "enum_declaration",
];

/// All type declarations under `root`, pre-order
pub fn type_declarations<'t>(root: &Node<'t>) -> Vec<Node<'t>> {
    let mut found = Vec::new();
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        if TYPE_DECLARATION_KINDS.contains(&node.kind()) {
            found.push(node);
        }
        for child in named_children(&node).into_iter().rev() {
            stack.push(child);
        }
    }
    found
}

fn class_kind(node: &Node) -> Option<ClassKind> {
    match node.kind() {
        "class_declaration" => Some(ClassKind::Class),
        "interface_declaration" => Some(ClassKind::Interface),
        "record_declaration" => Some(ClassKind::Record),
        "enum_declaration" => Some(ClassKind::Enum),
        _ => None,
    }
}

/// Modifier keywords present on a declaration
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub visibility: Option<Visibility>,
    pub is_static: bool,
    pub is_final: bool,
}

impl Modifiers {
    pub fn of(declaration: &Node) -> Self {
        let Some(modifiers) = find_child_by_kind(declaration, "modifiers") else {
            return Self::default();
        };
        let has = |keyword: &str| find_child_by_kind(&modifiers, keyword).is_some();

        let visibility = if has("public") {
            Some(Visibility::Public)
        } else if has("protected") {
            Some(Visibility::Protected)
        } else if has("private") {
            Some(Visibility::Private)
        } else {
            None
        };

        Self {
            visibility,
            is_static: has("static"),
            is_final: has("final"),
        }
    }
}

pub struct DeclarationCollector<'a> {
    source: &'a str,
    markers: &'a MarkerResolver,
}

impl<'a> DeclarationCollector<'a> {
    pub fn new(source: &'a str, markers: &'a MarkerResolver) -> Self {
        Self { source, markers }
    }

    pub fn collect(&self, root: &Node) -> Vec<ClassDecl> {
        type_declarations(root)
            .iter()
            .filter_map(|node| self.class(node))
            .collect()
    }

    /// Template for one declaration node
    pub fn class(&self, node: &Node) -> Option<ClassDecl> {
        let kind = class_kind(node)?;
        let name = node.child_by_field_name("name")?;

        let mut class = ClassDecl::new(extract_node_text(&name, self.source), kind);
        class.is_final = Modifiers::of(node).is_final;
        class.type_params = type_parameters(node, self.source);

        if kind == ClassKind::Record {
            if let Some(components) = node.child_by_field_name("parameters") {
                for component in named_children(&components) {
                    if let Some(field) = self.component(&component, &class.type_params) {
                        class.fields.push(field);
                    }
                }
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            for member in named_children(&body) {
                if matches!(member.kind(), "field_declaration" | "constant_declaration") {
                    class.fields.extend(self.fields(&member, kind, &class.type_params));
                }
            }
        }

        tracing::trace!("Collected {:?} '{}' with {} fields", kind, class.name, class.fields.len());
        Some(class)
    }

    fn fields(&self, declaration: &Node, owner: ClassKind, type_vars: &[String]) -> Vec<FieldDecl> {
        let modifiers = Modifiers::of(declaration);
        let markers = self.markers.resolve(declaration, self.source);
        let declared = declaration
            .child_by_field_name("type")
            .and_then(|ty| java_type(&ty, self.source, type_vars));

        let (visibility, is_static) = if owner == ClassKind::Interface {
            (Visibility::Public, true)
        } else {
            (modifiers.visibility.unwrap_or(Visibility::Internal), modifiers.is_static)
        };

        children_by_field(declaration, "declarator")
            .iter()
            .filter_map(|declarator| {
                Some(FieldDecl {
                    name: field_text(declarator, "name", self.source)?,
                    ty: declared
                        .clone()
                        .map(|ty| with_dimensions(ty, declarator, self.source)),
                    visibility,
                    is_static,
                    storage: MemberStorage::Field,
                    markers,
                })
            })
            .collect()
    }

    fn component(&self, component: &Node, type_vars: &[String]) -> Option<FieldDecl> {
        if component.kind() != "formal_parameter" {
            return None;
        }
        Some(FieldDecl {
            name: field_text(component, "name", self.source)?,
            ty: component
                .child_by_field_name("type")
                .and_then(|ty| java_type(&ty, self.source, type_vars)),
            visibility: Visibility::Public,
            is_static: false,
            storage: MemberStorage::Property,
            markers: self.markers.resolve(component, self.source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::java_frontend::infrastructure::parser::JavaParser;
    use crate::features::java_frontend::domain::JavaType;
    use crate::shared::models::Marker;
    use pretty_assertions::assert_eq;

    fn collect(source: &str) -> Vec<ClassDecl> {
        let tree = JavaParser::new().unwrap().parse(source).unwrap();
        let resolver = MarkerResolver::default();
        DeclarationCollector::new(source, &resolver).collect(&tree.root_node())
    }

    #[test]
    fn test_class_fields() {
        let classes = collect(
            r#"
            public final class Foo {
                public int a, b;
                private String secret;
                public static int COUNT;
                @DeepCopyIgnore public Object cache;
                int[] raw;
            }
        "#,
        );
        assert_eq!(classes.len(), 1);
        let foo = &classes[0];
        assert!(foo.is_closed());

        let names: Vec<_> = foo.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "secret", "COUNT", "cache", "raw"]);
        assert_eq!(foo.fields[2].visibility, Visibility::Private);
        assert!(foo.fields[3].is_static);
        assert!(foo.fields[4].markers.contains(Marker::Exempt));
        assert_eq!(foo.fields[5].visibility, Visibility::Internal);
        assert_eq!(
            foo.fields[5].ty,
            Some(JavaType::Array(Box::new(JavaType::Primitive("int".to_string()))))
        );
    }

    #[test]
    fn test_records_enums_and_nesting() {
        let classes = collect(
            r#"
            class Outer {
                public record Point(int x, int y) {}
                enum Color { RED, GREEN }
                interface Shape { int SIDES = 0; }
            }
        "#,
        );
        let names: Vec<_> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Outer", "Point", "Color", "Shape"]);

        let point = &classes[1];
        assert_eq!(point.kind, ClassKind::Record);
        assert!(point.component("x").is_some());
        assert_eq!(point.fields[1].storage, MemberStorage::Property);

        assert_eq!(classes[2].kind, ClassKind::Enum);
        assert!(classes[3].fields[0].is_static);
        assert!(!classes[0].is_closed());
    }

    #[test]
    fn test_generic_template() {
        let classes = collect("final class Box<T> { public T value; }");
        assert_eq!(classes[0].type_params, vec!["T"]);
        assert_eq!(classes[0].fields[0].ty, Some(JavaType::Var("T".to_string())));
    }
}
