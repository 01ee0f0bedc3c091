/*
 * Access-Path Extractor
 *
 * Collects every member path a procedure body reads from one parameter.
 *
 * Rules:
 * - Each member-access node whose chain bottoms out at the root parameter
 *   records its full path. Inner nodes of a chain are visited too, so
 *   `p.A.B` records both `A` and `A.B`.
 * - Only field/property names extend a chain. A method name or an
 *   indexer in the chain stops it from registering (its inner parts may
 *   still register on their own).
 * - `for x in p` records the bare sentinel; `for x in p.A.B` records
 *   `A.B.ALL_ITEMS`.
 * - A name counts as the root only if the host bound it to the
 *   parameter; a local sharing the name does not count.
 *
 * The walk uses an explicit stack and checks cancellation per node.
 */

use crate::errors::Result;
use crate::features::access_paths::domain::{
    AccessPath, AccessPathSet, Binding, Block, Expr, Stmt,
};
use crate::shared::CancellationToken;

enum Visit<'a> {
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

/// Stateless access-path extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPathExtractor;

impl AccessPathExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the paths `body` reads from parameter `root`
    pub fn extract(&self, body: &Block, root: &str, cancel: &CancellationToken) -> Result<AccessPathSet> {
        let mut paths = AccessPathSet::new();
        let mut stack: Vec<Visit<'_>> = body.iter().rev().map(Visit::Stmt).collect();

        while let Some(visit) = stack.pop() {
            cancel.checkpoint()?;

            match visit {
                Visit::Stmt(stmt) => self.visit_stmt(stmt, root, &mut paths, &mut stack),
                Visit::Expr(expr) => self.visit_expr(expr, root, &mut paths, &mut stack),
            }
        }

        tracing::trace!("Extracted {} access paths rooted at '{}'", paths.len(), root);
        Ok(paths)
    }

    fn visit_stmt<'a>(
        &self,
        stmt: &'a Stmt,
        root: &str,
        paths: &mut AccessPathSet,
        stack: &mut Vec<Visit<'a>>,
    ) {
        match stmt {
            Stmt::Expr(expr) => stack.push(Visit::Expr(expr)),
            Stmt::Local { init, .. } => {
                if let Some(init) = init {
                    stack.push(Visit::Expr(init));
                }
            }
            Stmt::ForEach { subject, body, .. } => {
                if let Some(path) = iteration_path(subject, root) {
                    paths.insert(path);
                }
                push_block(stack, body);
                stack.push(Visit::Expr(subject));
            }
            Stmt::Loop { parts, body } => {
                push_block(stack, body);
                stack.extend(parts.iter().rev().map(Visit::Expr));
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if let Some(else_branch) = else_branch {
                    push_block(stack, else_branch);
                }
                push_block(stack, then_branch);
                stack.push(Visit::Expr(condition));
            }
            Stmt::Return(value) => {
                if let Some(value) = value {
                    stack.push(Visit::Expr(value));
                }
            }
            Stmt::Block(block) => push_block(stack, block),
        }
    }

    fn visit_expr<'a>(
        &self,
        expr: &'a Expr,
        root: &str,
        paths: &mut AccessPathSet,
        stack: &mut Vec<Visit<'a>>,
    ) {
        match expr {
            Expr::MemberAccess { target, .. } => {
                if let Some(path) = member_chain_path(expr, root) {
                    paths.insert(path);
                }
                stack.push(Visit::Expr(target));
            }
            Expr::Invocation { callee, arguments } => {
                stack.extend(arguments.iter().rev().map(Visit::Expr));
                stack.push(Visit::Expr(callee));
            }
            Expr::ElementAccess { target, index } => {
                stack.push(Visit::Expr(index));
                stack.push(Visit::Expr(target));
            }
            Expr::Assign { target, value } => {
                stack.push(Visit::Expr(value));
                stack.push(Visit::Expr(target));
            }
            Expr::Lambda { body, .. } => push_block(stack, body),
            Expr::Block(block) => push_block(stack, block),
            Expr::Compound(children) => stack.extend(children.iter().rev().map(Visit::Expr)),
            Expr::Identifier { .. } | Expr::Literal => {}
        }
    }
}

fn push_block<'a>(stack: &mut Vec<Visit<'a>>, block: &'a Block) {
    stack.extend(block.iter().rev().map(Visit::Stmt));
}

fn is_root(expr: &Expr, root: &str) -> bool {
    matches!(
        expr,
        Expr::Identifier { name, binding: Binding::Parameter } if name == root
    )
}

/// Path of a member-access chain rooted at `root`, if it is one
///
/// Every link must be a field/property access; anything else (method,
/// indexer, unresolved name, other root) yields `None`.
fn member_chain_path(expr: &Expr, root: &str) -> Option<AccessPath> {
    let mut names = Vec::new();
    let mut current = expr;

    loop {
        match current {
            Expr::MemberAccess {
                target,
                name,
                symbol,
            } if symbol.is_data_member() => {
                names.push(name.as_str());
                current = &**target;
            }
            other if is_root(other, root) && !names.is_empty() => {
                return Some(AccessPath::from_members(names.into_iter().rev()));
            }
            _ => return None,
        }
    }
}

/// Path recorded for iterating over `subject`
fn iteration_path(subject: &Expr, root: &str) -> Option<AccessPath> {
    if is_root(subject, root) {
        return Some(AccessPath::global_all_items());
    }
    member_chain_path(subject, root).map(|path| path.all_items())
}
