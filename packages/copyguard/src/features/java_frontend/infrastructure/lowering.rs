/*
 * Procedure Lowering
 *
 * Turns Java method and constructor declarations into `Procedure`s whose
 * bodies use the core syntax model.
 *
 * # Binding
 * A `ScopeStack` tracks parameters, locals, for-each variables and lambda
 * parameters together with their static types, so a local that shadows
 * the copy parameter is never mistaken for it.
 *
 * # Member resolution
 * `a.b` resolves to a field only when the static type of `a` is known and
 * declares `b`. A zero-argument call to a record component accessor
 * (`p.x()`) resolves as a property read. Everything else is a method call
 * or unresolved.
 *
 * # Nested classes
 * Anonymous and local class bodies are lowered in place. Their method
 * parameters and fields are scoped as locals, so they shadow the copy
 * parameter, while captured reads of it still count.
 *
 * # Fallback
 * Statement kinds without a dedicated rule become nested blocks, other
 * expressions become `Compound`s; reads inside them are still seen.
 *
 * # Depth bound
 * Syntax nested deeper than `MAX_SYNTAX_DEPTH` is not lowered. The
 * procedure then keeps its arity but its parameter types are dropped,
 * which leaves it unresolved.
 */

use super::declarations::type_declarations;
use super::markers::MarkerResolver;
use super::symbol_model::JavaSymbolModel;
use super::type_ref::{java_type, type_parameters, with_dimensions};
use crate::features::access_paths::domain::{Binding, Block, Expr, MemberSymbol, Stmt};
use crate::features::analyzer::domain::{Parameter, Procedure};
use crate::features::java_frontend::domain::JavaType;
use crate::features::type_graph::ports::MemberStorage;
use crate::shared::utils::tree_sitter::{
    children_by_field, extract_node_text, find_child_by_kind, named_children, node_to_span,
};
use crate::shared::ScopeStack;
use tree_sitter::Node;

/// Deepest statement/expression nesting lowered for one procedure
const MAX_SYNTAX_DEPTH: usize = 128;

const STATEMENT_KINDS: &[&str] = &[
    "block",
    "constructor_body",
    "expression_statement",
    "local_variable_declaration",
    "enhanced_for_statement",
    "for_statement",
    "while_statement",
    "do_statement",
    "if_statement",
    "return_statement",
    "throw_statement",
    "yield_statement",
    "try_statement",
    "try_with_resources_statement",
    "synchronized_statement",
    "labeled_statement",
    "assert_statement",
    "break_statement",
    "continue_statement",
];

fn is_statement(node: &Node) -> bool {
    STATEMENT_KINDS.contains(&node.kind())
}

#[derive(Debug, Clone)]
struct Local {
    binding: Binding,
    ty: Option<JavaType>,
}

/// Lowers every method and constructor in one compilation unit
pub struct ProcedureCollector<'a> {
    source: &'a str,
    model: &'a JavaSymbolModel,
    markers: &'a MarkerResolver,
}

impl<'a> ProcedureCollector<'a> {
    pub fn new(source: &'a str, model: &'a JavaSymbolModel, markers: &'a MarkerResolver) -> Self {
        Self {
            source,
            model,
            markers,
        }
    }

    pub fn collect(&self, root: &Node) -> Vec<Procedure> {
        let mut procedures = Vec::new();

        for declaration in type_declarations(root) {
            let Some(name) = declaration.child_by_field_name("name") else {
                continue;
            };
            let class_name = extract_node_text(&name, self.source);
            let type_vars = type_parameters(&declaration, self.source);
            let this_type = JavaType::generic(
                class_name,
                type_vars.iter().map(|var| JavaType::Var(var.clone())).collect(),
            );

            let Some(body) = declaration.child_by_field_name("body") else {
                continue;
            };
            let mut members = named_children(&body);
            // Enum methods live one level down
            if let Some(declarations) = find_child_by_kind(&body, "enum_body_declarations") {
                members.extend(named_children(&declarations));
            }

            for member in members {
                if matches!(member.kind(), "method_declaration" | "constructor_declaration") {
                    let lowerer = BodyLowerer::new(self.source, self.model, &type_vars, this_type.clone());
                    if let Some(procedure) = lowerer.procedure(&member, class_name, self.markers) {
                        procedures.push(procedure);
                    }
                }
            }
        }

        procedures
    }
}

/// Per-procedure lowering state
struct BodyLowerer<'a> {
    source: &'a str,
    model: &'a JavaSymbolModel,
    type_vars: Vec<String>,
    this_type: JavaType,
    scopes: ScopeStack<Local>,
    depth: usize,
    truncated: bool,
}

impl<'a> BodyLowerer<'a> {
    fn new(source: &'a str, model: &'a JavaSymbolModel, class_vars: &[String], this_type: JavaType) -> Self {
        Self {
            source,
            model,
            type_vars: class_vars.to_vec(),
            this_type,
            scopes: ScopeStack::new(),
            depth: 0,
            truncated: false,
        }
    }

    fn text(&self, node: &Node) -> &'a str {
        extract_node_text(node, self.source)
    }

    fn resolve_type(&self, node: Option<Node>) -> Option<JavaType> {
        node.and_then(|ty| java_type(&ty, self.source, &self.type_vars))
    }

    fn procedure(mut self, node: &Node, class_name: &str, markers: &MarkerResolver) -> Option<Procedure> {
        let name = node.child_by_field_name("name")?;
        self.type_vars.extend(type_parameters(node, self.source));

        let mut procedure = Procedure::new(format!("{}.{}", class_name, self.text(&name)))
            .with_span(node_to_span(&name));
        procedure.markers = markers.resolve(node, self.source);

        if let Some(parameters) = node.child_by_field_name("parameters") {
            for parameter in named_children(&parameters) {
                if let Some(lowered) = self.parameter(&parameter, Binding::Parameter) {
                    procedure.parameters.push(lowered);
                }
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            procedure.body = self.block(&body);
        }

        if self.truncated {
            tracing::debug!(
                "'{}': nesting deeper than {} levels, leaving it unresolved",
                procedure.name,
                MAX_SYNTAX_DEPTH
            );
            for parameter in &mut procedure.parameters {
                parameter.type_key = None;
            }
            procedure.body = Block::new();
        }
        Some(procedure)
    }

    fn parameter(&mut self, node: &Node, binding: Binding) -> Option<Parameter> {
        let (name, ty) = match node.kind() {
            "formal_parameter" => {
                let name = node.child_by_field_name("name")?;
                let ty = self
                    .resolve_type(node.child_by_field_name("type"))
                    .map(|ty| with_dimensions(ty, node, self.source));
                (self.text(&name), ty)
            }
            "spread_parameter" => {
                let declarator = find_child_by_kind(node, "variable_declarator")?;
                let name = declarator.child_by_field_name("name")?;
                let element = named_children(node)
                    .into_iter()
                    .find(|child| !matches!(child.kind(), "modifiers" | "variable_declarator"));
                let ty = self.resolve_type(element).map(|ty| JavaType::Array(Box::new(ty)));
                (self.text(&name), ty)
            }
            _ => return None,
        };

        self.scopes.declare(name, Local { binding, ty: ty.clone() });
        Some(Parameter {
            name: name.to_string(),
            type_key: ty.and_then(|ty| ty.key()),
            span: node_to_span(node),
        })
    }

    // ── Statements ──────────────────────────────────────────────────────

    fn block(&mut self, node: &Node) -> Block {
        self.scopes.push();
        let mut out = Block::new();
        for child in named_children(node) {
            self.statement(&child, &mut out);
        }
        self.scopes.pop();
        out
    }

    /// Lower a branch body, which may be a bare statement
    fn branch(&mut self, node: &Node) -> Block {
        if matches!(node.kind(), "block" | "constructor_body") {
            return self.block(node);
        }
        self.scopes.push();
        let mut out = Block::new();
        self.statement(node, &mut out);
        self.scopes.pop();
        out
    }

    fn statement(&mut self, node: &Node, out: &mut Block) {
        if self.depth >= MAX_SYNTAX_DEPTH {
            self.truncated = true;
            return;
        }
        self.depth += 1;
        self.lower_statement(node, out);
        self.depth -= 1;
    }

    fn lower_statement(&mut self, node: &Node, out: &mut Block) {
        match node.kind() {
            "block" | "constructor_body" => {
                let block = self.block(node);
                out.push(Stmt::Block(block));
            }
            "expression_statement" | "throw_statement" | "yield_statement" => {
                if let Some(expr) = named_children(node).first() {
                    out.push(Stmt::Expr(self.expr(expr).0));
                }
            }
            "local_variable_declaration" => self.local_declaration(node, out),
            "enhanced_for_statement" => {
                if let Some(stmt) = self.for_each(node) {
                    out.push(stmt);
                }
            }
            "for_statement" => {
                self.scopes.push();
                let mut inner = Block::new();
                let mut parts = Vec::new();
                for init in children_by_field(node, "init") {
                    if init.kind() == "local_variable_declaration" {
                        self.local_declaration(&init, &mut inner);
                    } else {
                        parts.push(self.expr(&init).0);
                    }
                }
                if let Some(condition) = node.child_by_field_name("condition") {
                    parts.push(self.expr(&condition).0);
                }
                for update in children_by_field(node, "update") {
                    parts.push(self.expr(&update).0);
                }
                let body = node
                    .child_by_field_name("body")
                    .map(|body| self.branch(&body))
                    .unwrap_or_default();
                inner.push(Stmt::Loop { parts, body });
                self.scopes.pop();
                out.push(Stmt::Block(inner));
            }
            "while_statement" | "do_statement" => {
                let parts = node
                    .child_by_field_name("condition")
                    .map(|condition| vec![self.expr(&condition).0])
                    .unwrap_or_default();
                let body = node
                    .child_by_field_name("body")
                    .map(|body| self.branch(&body))
                    .unwrap_or_default();
                out.push(Stmt::Loop { parts, body });
            }
            "if_statement" => {
                let condition = node
                    .child_by_field_name("condition")
                    .map(|condition| self.expr(&condition).0)
                    .unwrap_or(Expr::Literal);
                let then_branch = node
                    .child_by_field_name("consequence")
                    .map(|branch| self.branch(&branch))
                    .unwrap_or_default();
                let else_branch = node
                    .child_by_field_name("alternative")
                    .map(|branch| self.branch(&branch));
                out.push(Stmt::If {
                    condition,
                    then_branch,
                    else_branch,
                });
            }
            "return_statement" => {
                let value = named_children(node).first().map(|expr| self.expr(expr).0);
                out.push(Stmt::Return(value));
            }
            "local_class_declaration" | "class_declaration" | "record_declaration"
            | "enum_declaration" | "interface_declaration" => {
                if let Some(stmt) = self.local_class(node) {
                    out.push(stmt);
                }
            }
            _ if is_statement(node) => {
                self.scopes.push();
                let mut inner = Block::new();
                for child in named_children(node) {
                    if is_statement(&child) {
                        self.statement(&child, &mut inner);
                    } else {
                        inner.push(Stmt::Expr(self.expr(&child).0));
                    }
                }
                self.scopes.pop();
                out.push(Stmt::Block(inner));
            }
            _ => out.push(Stmt::Expr(self.expr(node).0)),
        }
    }

    fn local_declaration(&mut self, node: &Node, out: &mut Block) {
        let declared = self.resolve_type(node.child_by_field_name("type"));

        for declarator in children_by_field(node, "declarator") {
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            let (init, inferred) = match declarator.child_by_field_name("value") {
                Some(value) => {
                    let (expr, ty) = self.expr(&value);
                    (Some(expr), ty)
                }
                None => (None, None),
            };
            let ty = declared
                .clone()
                .map(|ty| with_dimensions(ty, &declarator, self.source))
                .or(inferred);

            let name = self.text(&name);
            self.scopes.declare(
                name,
                Local {
                    binding: Binding::Local,
                    ty,
                },
            );
            out.push(Stmt::Local {
                name: name.to_string(),
                init,
            });
        }
    }

    /// Local class, record, enum or interface declared inside a body
    fn local_class(&mut self, node: &Node) -> Option<Stmt> {
        let body = node.child_by_field_name("body")?;

        self.scopes.push();
        if let Some(components) = node.child_by_field_name("parameters") {
            for component in named_children(&components) {
                self.parameter(&component, Binding::Local);
            }
        }
        let block = self.class_body(&body);
        self.scopes.pop();

        Some(Stmt::Block(block))
    }

    /// Members of an anonymous or local class body
    fn class_body(&mut self, body: &Node) -> Block {
        if self.depth >= MAX_SYNTAX_DEPTH {
            self.truncated = true;
            return Block::new();
        }
        self.depth += 1;
        let block = self.lower_class_body(body);
        self.depth -= 1;
        block
    }

    fn lower_class_body(&mut self, body: &Node) -> Block {
        let mut members = named_children(body);
        if let Some(declarations) = find_child_by_kind(body, "enum_body_declarations") {
            members.extend(named_children(&declarations));
        }

        self.scopes.push();
        let mut out = Block::new();
        for member in members {
            match member.kind() {
                "field_declaration" | "constant_declaration" => self.local_declaration(&member, &mut out),
                "method_declaration" | "constructor_declaration" | "compact_constructor_declaration" => {
                    self.scopes.push();
                    if let Some(parameters) = member.child_by_field_name("parameters") {
                        for parameter in named_children(&parameters) {
                            self.parameter(&parameter, Binding::Local);
                        }
                    }
                    if let Some(body) = member.child_by_field_name("body") {
                        let block = self.block(&body);
                        out.push(Stmt::Block(block));
                    }
                    self.scopes.pop();
                }
                "block" => {
                    let block = self.block(&member);
                    out.push(Stmt::Block(block));
                }
                "static_initializer" => {
                    if let Some(inner) = find_child_by_kind(&member, "block") {
                        let block = self.block(&inner);
                        out.push(Stmt::Block(block));
                    }
                }
                "class_declaration" | "record_declaration" | "enum_declaration" | "interface_declaration" => {
                    if let Some(stmt) = self.local_class(&member) {
                        out.push(stmt);
                    }
                }
                _ => {}
            }
        }
        self.scopes.pop();
        out
    }

    fn for_each(&mut self, node: &Node) -> Option<Stmt> {
        let name = node.child_by_field_name("name")?;
        let value = node.child_by_field_name("value")?;

        let (subject, subject_type) = self.expr(&value);
        let element_type = subject_type
            .and_then(|ty| ty.element_types())
            .and_then(|elements| elements.into_iter().next());
        let ty = self.resolve_type(node.child_by_field_name("type")).or(element_type);

        self.scopes.push();
        let variable = self.text(&name);
        self.scopes.declare(
            variable,
            Local {
                binding: Binding::Local,
                ty,
            },
        );
        let body = node
            .child_by_field_name("body")
            .map(|body| self.branch(&body))
            .unwrap_or_default();
        self.scopes.pop();

        Some(Stmt::for_each(variable, subject, body))
    }

    // ── Expressions ─────────────────────────────────────────────────────

    /// Lowered expression plus its static type, when known
    fn expr(&mut self, node: &Node) -> (Expr, Option<JavaType>) {
        if self.depth >= MAX_SYNTAX_DEPTH {
            self.truncated = true;
            return (Expr::Literal, None);
        }
        self.depth += 1;
        let lowered = self.lower_expr(node);
        self.depth -= 1;
        lowered
    }

    fn lower_expr(&mut self, node: &Node) -> (Expr, Option<JavaType>) {
        match node.kind() {
            "parenthesized_expression" => match named_children(node).first() {
                Some(inner) => self.expr(inner),
                None => (Expr::Literal, None),
            },
            "cast_expression" => {
                let ty = self.resolve_type(node.child_by_field_name("type"));
                match node.child_by_field_name("value") {
                    Some(value) => {
                        let (expr, inner) = self.expr(&value);
                        (expr, ty.or(inner))
                    }
                    None => (Expr::Literal, ty),
                }
            }
            "identifier" => {
                let name = self.text(node);
                match self.scopes.lookup(name) {
                    Some(local) => (Expr::ident(name, local.binding), local.ty.clone()),
                    None => (Expr::ident(name, Binding::Other), None),
                }
            }
            "this" => (Expr::ident("this", Binding::Other), Some(self.this_type.clone())),
            "field_access" => self.field_access(node),
            "method_invocation" => self.method_invocation(node),
            "array_access" => {
                let (target, ty) = match node.child_by_field_name("array") {
                    Some(array) => self.expr(&array),
                    None => (Expr::Literal, None),
                };
                let index = match node.child_by_field_name("index") {
                    Some(index) => self.expr(&index).0,
                    None => Expr::Literal,
                };
                let element = match ty {
                    Some(JavaType::Array(element)) => Some(*element),
                    _ => None,
                };
                (target.index(index), element)
            }
            "assignment_expression" => {
                let (target, ty) = match node.child_by_field_name("left") {
                    Some(left) => self.expr(&left),
                    None => (Expr::Literal, None),
                };
                let value = match node.child_by_field_name("right") {
                    Some(right) => self.expr(&right).0,
                    None => Expr::Literal,
                };
                (
                    Expr::Assign {
                        target: Box::new(target),
                        value: Box::new(value),
                    },
                    ty,
                )
            }
            "lambda_expression" => (self.lambda(node), None),
            "object_creation_expression" => {
                let ty = self.resolve_type(node.child_by_field_name("type"));
                let parts = named_children(node)
                    .iter()
                    .filter_map(|child| match child.kind() {
                        "argument_list" => Some(self.expr(child).0),
                        "class_body" => Some(Expr::Block(self.class_body(child))),
                        _ => None,
                    })
                    .collect();
                (Expr::Compound(parts), ty)
            }
            "string_literal" | "text_block" => (Expr::Literal, Some(JavaType::named("String"))),
            kind if kind.ends_with("_literal") || matches!(kind, "true" | "false") => {
                (Expr::Literal, None)
            }
            _ if is_statement(node) => {
                let mut out = Block::new();
                self.statement(node, &mut out);
                (Expr::Block(out), None)
            }
            _ => {
                let children = named_children(node);
                if children.is_empty() {
                    return (Expr::Literal, None);
                }
                let parts = children.iter().map(|child| self.expr(child).0).collect();
                (Expr::Compound(parts), None)
            }
        }
    }

    fn field_access(&mut self, node: &Node) -> (Expr, Option<JavaType>) {
        let (target, owner) = match node.child_by_field_name("object") {
            Some(object) => self.expr(&object),
            None => (Expr::Literal, None),
        };
        let Some(field) = node.child_by_field_name("field") else {
            return (target, None);
        };
        let name = self.text(&field);

        match owner.as_ref().and_then(|owner| self.model.field(owner, name)) {
            Some(member) => {
                let symbol = match member.storage {
                    MemberStorage::Field => MemberSymbol::Field,
                    MemberStorage::Property => MemberSymbol::Property,
                };
                (target.member(name, symbol), member.ty)
            }
            None => (target.member(name, MemberSymbol::Unresolved), None),
        }
    }

    fn method_invocation(&mut self, node: &Node) -> (Expr, Option<JavaType>) {
        let Some(name) = node.child_by_field_name("name") else {
            return (Expr::Literal, None);
        };
        let name = self.text(&name);
        let arguments: Vec<Expr> = node
            .child_by_field_name("arguments")
            .map(|arguments| {
                named_children(&arguments)
                    .iter()
                    .map(|argument| self.expr(argument).0)
                    .collect()
            })
            .unwrap_or_default();

        let Some(object) = node.child_by_field_name("object") else {
            let callee = Expr::ident(name, Binding::Other);
            return (
                Expr::Invocation {
                    callee: Box::new(callee),
                    arguments,
                },
                None,
            );
        };

        let (target, owner) = self.expr(&object);
        if arguments.is_empty() {
            if let Some(member) = owner.as_ref().and_then(|owner| self.model.accessor(owner, name)) {
                return (target.prop(name), member.ty);
            }
        }
        (target.call(name, arguments), None)
    }

    fn lambda(&mut self, node: &Node) -> Expr {
        self.scopes.push();

        let mut parameters = Vec::new();
        if let Some(params) = node.child_by_field_name("parameters") {
            let names: Vec<Node> = match params.kind() {
                "identifier" => vec![params],
                _ => named_children(&params)
                    .into_iter()
                    .filter_map(|param| match param.kind() {
                        "identifier" => Some(param),
                        "formal_parameter" => param.child_by_field_name("name"),
                        _ => None,
                    })
                    .collect(),
            };
            for name in names {
                let name = self.text(&name);
                self.scopes.declare(
                    name,
                    Local {
                        binding: Binding::Local,
                        ty: None,
                    },
                );
                parameters.push(name.to_string());
            }
        }

        let body = match node.child_by_field_name("body") {
            Some(body) if body.kind() == "block" => self.block(&body),
            Some(body) => vec![Stmt::Expr(self.expr(&body).0)],
            None => Block::new(),
        };

        self.scopes.pop();
        Expr::Lambda { parameters, body }
    }
}
