/*
 * Procedure Body Syntax Model
 *
 * The slice of the host's syntax tree the extractor needs: statements,
 * expressions, and the symbol information the host resolved for each
 * name. Front ends lower their own trees into this model.
 */

use serde::{Deserialize, Serialize};

/// What a bare identifier refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Binding {
    /// A parameter of the enclosing procedure
    Parameter,

    /// A local variable, loop variable or lambda parameter
    Local,

    /// Anything else (types, `this`, unresolved names)
    Other,
}

/// What the name of a member access resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberSymbol {
    Field,
    Property,
    Method,
    Unresolved,
}

impl MemberSymbol {
    /// Only field and property reads form access paths
    pub fn is_data_member(self) -> bool {
        matches!(self, MemberSymbol::Field | MemberSymbol::Property)
    }
}

pub type Block = Vec<Stmt>;

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Identifier {
        name: String,
        binding: Binding,
    },

    /// `target.name`
    MemberAccess {
        target: Box<Expr>,
        name: String,
        symbol: MemberSymbol,
    },

    /// `callee(arguments)`
    Invocation {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },

    /// `target[index]`
    ElementAccess {
        target: Box<Expr>,
        index: Box<Expr>,
    },

    /// `target = value`
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },

    Lambda {
        parameters: Vec<String>,
        body: Block,
    },

    /// Statements nested inside an expression (switch arms, blocks)
    Block(Block),

    Literal,

    /// Any other expression; only its sub-expressions matter
    Compound(Vec<Expr>),
}

impl Expr {
    pub fn ident(name: impl Into<String>, binding: Binding) -> Self {
        Expr::Identifier {
            name: name.into(),
            binding,
        }
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self::ident(name, Binding::Parameter)
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self::ident(name, Binding::Local)
    }

    /// `self.name` resolved as a field
    pub fn field(self, name: impl Into<String>) -> Self {
        self.member(name, MemberSymbol::Field)
    }

    /// `self.name` resolved as a property
    pub fn prop(self, name: impl Into<String>) -> Self {
        self.member(name, MemberSymbol::Property)
    }

    pub fn member(self, name: impl Into<String>, symbol: MemberSymbol) -> Self {
        Expr::MemberAccess {
            target: Box::new(self),
            name: name.into(),
            symbol,
        }
    }

    /// `self.name(arguments)`
    pub fn call(self, name: impl Into<String>, arguments: Vec<Expr>) -> Self {
        Expr::Invocation {
            callee: Box::new(self.member(name, MemberSymbol::Method)),
            arguments,
        }
    }

    /// `self[index]`
    pub fn index(self, index: Expr) -> Self {
        Expr::ElementAccess {
            target: Box::new(self),
            index: Box::new(index),
        }
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Expr(Expr),

    Local {
        name: String,
        init: Option<Expr>,
    },

    /// Iterate over elements of `subject`
    ForEach {
        variable: String,
        subject: Expr,
        body: Block,
    },

    /// Any other loop; `parts` are its header expressions
    Loop {
        parts: Vec<Expr>,
        body: Block,
    },

    If {
        condition: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
    },

    Return(Option<Expr>),

    Block(Block),
}

impl Stmt {
    pub fn for_each(variable: impl Into<String>, subject: Expr, body: Block) -> Self {
        Stmt::ForEach {
            variable: variable.into(),
            subject,
            body,
        }
    }
}
