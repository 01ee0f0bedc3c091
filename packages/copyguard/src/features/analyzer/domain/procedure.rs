//! Procedure model
//!
//! What the host hands the analyzer for one candidate copy procedure.

use crate::features::access_paths::domain::Block;
use crate::features::type_graph::domain::TypeKey;
use crate::shared::models::{Marker, MarkerSet, Span};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// `None` when the host could not resolve the declared type
    pub type_key: Option<TypeKey>,
    pub span: Span,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_key: impl Into<TypeKey>) -> Self {
        Self {
            name: name.into(),
            type_key: Some(type_key.into()),
            span: Span::zero(),
        }
    }

    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_key: None,
            span: Span::zero(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub name: String,

    /// Span of the procedure's name
    pub span: Span,
    pub markers: MarkerSet,
    pub parameters: Vec<Parameter>,
    pub body: Block,
}

impl Procedure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::zero(),
            markers: MarkerSet::empty(),
            parameters: Vec::new(),
            body: Block::new(),
        }
    }

    /// Procedure tagged with the copy marker
    pub fn copy(name: impl Into<String>) -> Self {
        let mut procedure = Self::new(name);
        procedure.markers.insert(Marker::CopyProcedure);
        procedure
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.body = body;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn is_copy_procedure(&self) -> bool {
        self.markers.contains(Marker::CopyProcedure)
    }
}
