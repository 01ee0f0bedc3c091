/*
 * Java Symbol Model
 *
 * `SymbolModel` over the class declarations of a set of Java sources.
 * Descriptors are produced on demand from the rendered key, so generic
 * instantiations need no pre-registration.
 *
 * Classification of a named type, first match wins:
 * 1. Declared in the sources (enums are closed leaves)
 * 2. Immutable library value type → primitive
 * 3. Library collection/map or array → collection
 * 4. `Object` → open composite without members
 * 5. Anything else → unresolvable
 */

use crate::features::java_frontend::domain::{ClassDecl, ClassKind, FieldDecl, JavaType, OBJECT};
use crate::features::type_graph::domain::TypeKey;
use crate::features::type_graph::ports::{
    MemberDescriptor, MemberStorage, SymbolModel, TypeDescriptor,
};
use rustc_hash::FxHashMap;

/// Member found by name on a static type
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMember {
    pub storage: MemberStorage,

    /// Member type after substituting the owner's type arguments
    pub ty: Option<JavaType>,
}

#[derive(Debug, Clone, Default)]
pub struct JavaSymbolModel {
    classes: FxHashMap<String, ClassDecl>,
}

impl JavaSymbolModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration; a later one with the same simple name wins
    pub fn insert(&mut self, class: ClassDecl) {
        if self.classes.contains_key(&class.name) {
            tracing::debug!("Duplicate declaration of '{}', keeping the last one", class.name);
        }
        self.classes.insert(class.name.clone(), class);
    }

    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.get(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Field (or record component) `name` read from a value of type `owner`
    pub fn field(&self, owner: &JavaType, name: &str) -> Option<ResolvedMember> {
        let (class, bindings) = self.instantiation(owner)?;
        class.field(name).map(|field| resolved(field, &bindings))
    }

    /// Record accessor `owner.name()`
    pub fn accessor(&self, owner: &JavaType, name: &str) -> Option<ResolvedMember> {
        let (class, bindings) = self.instantiation(owner)?;
        class.component(name).map(|field| resolved(field, &bindings))
    }

    fn instantiation(&self, ty: &JavaType) -> Option<(&ClassDecl, FxHashMap<String, JavaType>)> {
        let JavaType::Named { name, args } = ty else {
            return None;
        };
        let class = self.classes.get(name)?;
        let bindings = class
            .type_params
            .iter()
            .enumerate()
            .map(|(i, param)| (param.clone(), args.get(i).cloned().unwrap_or_else(JavaType::object)))
            .collect();
        Some((class, bindings))
    }

    fn describe_declared(&self, key: &TypeKey, ty: &JavaType) -> Option<TypeDescriptor> {
        let (class, bindings) = self.instantiation(ty)?;
        if class.kind == ClassKind::Enum {
            return Some(TypeDescriptor::primitive(key.clone()));
        }

        let mut descriptor = TypeDescriptor::composite(key.clone(), class.is_closed());
        for field in &class.fields {
            let declared_type = field
                .ty
                .as_ref()
                .and_then(|ty| ty.substitute(&bindings).key());
            descriptor = descriptor.with_member(MemberDescriptor {
                name: field.name.clone(),
                visibility: field.visibility,
                is_static: field.is_static,
                storage: field.storage,
                markers: field.markers,
                declared_type,
            });
        }
        Some(descriptor)
    }
}

fn resolved(field: &FieldDecl, bindings: &FxHashMap<String, JavaType>) -> ResolvedMember {
    ResolvedMember {
        storage: field.storage,
        ty: field.ty.as_ref().map(|ty| ty.substitute(bindings)),
    }
}

impl SymbolModel for JavaSymbolModel {
    fn describe(&self, key: &TypeKey) -> Option<TypeDescriptor> {
        let ty = JavaType::parse(key.as_str())?;

        if let Some(descriptor) = self.describe_declared(key, &ty) {
            return Some(descriptor);
        }
        if ty.is_scalar() {
            return Some(TypeDescriptor::primitive(key.clone()));
        }
        if let Some(elements) = ty.element_types() {
            let keys = elements.iter().filter_map(JavaType::key).collect();
            return Some(TypeDescriptor::collection(key.clone(), keys));
        }
        if ty.name() == Some(OBJECT) {
            return Some(TypeDescriptor::composite(key.clone(), false));
        }

        tracing::trace!("No declaration for '{}'", key);
        None
    }
}
