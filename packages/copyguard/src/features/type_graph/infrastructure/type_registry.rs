/*
 * In-memory Type Registry
 *
 * A `SymbolModel` backed by a map of pre-computed descriptors, for hosts
 * that resolve every type up front (and for tests, which build it by hand).
 */

use crate::features::type_graph::domain::TypeKey;
use crate::features::type_graph::ports::{SymbolModel, TypeDescriptor};
use rustc_hash::FxHashMap;

/// Descriptor map keyed by type identity
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: FxHashMap<TypeKey, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-seeded with closed primitive types
    pub fn with_primitives<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TypeKey>,
    {
        let mut registry = Self::new();
        for name in names {
            registry.register(TypeDescriptor::primitive(name));
        }
        registry
    }

    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Insert or replace a descriptor
    pub fn register(&mut self, descriptor: TypeDescriptor) {
        self.types.insert(descriptor.key.clone(), descriptor);
    }

    pub fn get(&self, key: &TypeKey) -> Option<&TypeDescriptor> {
        self.types.get(key)
    }

    pub fn get_mut(&mut self, key: &TypeKey) -> Option<&mut TypeDescriptor> {
        self.types.get_mut(key)
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.types.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl SymbolModel for TypeRegistry {
    fn describe(&self, key: &TypeKey) -> Option<TypeDescriptor> {
        self.types.get(key).cloned()
    }
}
