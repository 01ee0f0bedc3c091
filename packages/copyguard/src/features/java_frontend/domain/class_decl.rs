//! Java type declarations
//!
//! Generic templates collected from source. Instantiation with concrete
//! type arguments happens in the symbol model.

use super::java_type::JavaType;
use crate::features::type_graph::ports::{MemberStorage, Visibility};
use crate::shared::models::MarkerSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Record,
    Enum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,

    /// `None` when the declared type could not be read
    pub ty: Option<JavaType>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub storage: MemberStorage,
    pub markers: MarkerSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub kind: ClassKind,
    pub is_final: bool,
    pub type_params: Vec<String>,

    /// Fields and record components, declaration order
    pub fields: Vec<FieldDecl>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_final: false,
            type_params: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Records and enums are implicitly final; interfaces never are
    pub fn is_closed(&self) -> bool {
        match self.kind {
            ClassKind::Record | ClassKind::Enum => true,
            ClassKind::Interface => false,
            ClassKind::Class => self.is_final,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Record component accessed through its accessor method
    pub fn component(&self, name: &str) -> Option<&FieldDecl> {
        if self.kind != ClassKind::Record {
            return None;
        }
        self.fields
            .iter()
            .find(|field| field.name == name && field.storage == MemberStorage::Property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closedness_by_kind() {
        let mut class = ClassDecl::new("Foo", ClassKind::Class);
        assert!(!class.is_closed());
        class.is_final = true;
        assert!(class.is_closed());

        assert!(ClassDecl::new("P", ClassKind::Record).is_closed());
        assert!(ClassDecl::new("E", ClassKind::Enum).is_closed());
        assert!(!ClassDecl::new("I", ClassKind::Interface).is_closed());
    }
}
