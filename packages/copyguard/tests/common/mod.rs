//! Common test utilities for copyguard
//!
//! Registry and procedure builders shared by the integration tests.

#![allow(dead_code)]

use copyguard::features::access_paths::{Expr, Stmt};
use copyguard::features::type_graph::{MemberDescriptor, TypeDescriptor};
use copyguard::{Parameter, Procedure, Span, TypeRegistry};

/// `Foo{A:int, B:int}`
pub fn foo_registry(closed: bool) -> TypeRegistry {
    TypeRegistry::with_primitives(["int"]).with_type(
        TypeDescriptor::composite("Foo", closed)
            .with_member(MemberDescriptor::field("A", "int"))
            .with_member(MemberDescriptor::field("B", "int")),
    )
}

/// Copy procedure `Clone(<param>: <type>)` with the given body
pub fn copy_procedure(param: &str, type_key: &str, body: Vec<Stmt>) -> Procedure {
    Procedure::copy("Clone")
        .with_span(Span::new(2, 4, 2, 9))
        .with_parameter(Parameter::new(param, type_key).with_span(Span::new(2, 10, 2, 17)))
        .with_body(body)
}

/// `param.a.b.c;` as field reads
pub fn read(param: &str, path: &str) -> Stmt {
    let expr = path
        .split('.')
        .fold(Expr::param(param), |target, name| target.field(name));
    Stmt::Expr(expr)
}

/// `for item in param.<path> {}`
pub fn iterate(param: &str, path: &str) -> Stmt {
    let Stmt::Expr(subject) = read(param, path) else {
        unreachable!()
    };
    Stmt::for_each("item", subject, Vec::new())
}
