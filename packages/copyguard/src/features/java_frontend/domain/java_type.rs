/*
 * Java Type References
 *
 * Structural form of a Java type as written in source, after erasing
 * package qualifiers. The rendered form doubles as the `TypeKey` handed to
 * the core, so each generic instantiation (`Box<Item>`, `Box<String>`)
 * gets its own identity. `JavaType::parse` reads a key back.
 *
 * Key grammar:
 *   type := name [ '<' type { ',' type } '>' ] { '[]' }
 */

use crate::features::type_graph::domain::TypeKey;
use rustc_hash::FxHashMap;
use std::iter::Peekable;
use std::str::Chars;

pub const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// Immutable library value types treated as leaves
pub const SCALARS: &[&str] = &[
    "String",
    "Boolean",
    "Byte",
    "Character",
    "Short",
    "Integer",
    "Long",
    "Float",
    "Double",
    "BigInteger",
    "BigDecimal",
    "UUID",
    "Instant",
    "Duration",
    "Period",
    "LocalDate",
    "LocalTime",
    "LocalDateTime",
    "OffsetDateTime",
    "ZonedDateTime",
];

/// Single-element collection types
pub const COLLECTIONS: &[&str] = &[
    "Iterable",
    "Collection",
    "List",
    "ArrayList",
    "LinkedList",
    "Set",
    "HashSet",
    "LinkedHashSet",
    "TreeSet",
    "SortedSet",
    "Queue",
    "Deque",
    "ArrayDeque",
];

/// Key/value collection types; both type arguments are element types
pub const MAPS: &[&str] = &[
    "Map",
    "HashMap",
    "LinkedHashMap",
    "TreeMap",
    "SortedMap",
    "ConcurrentHashMap",
];

pub const OBJECT: &str = "Object";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Primitive(String),
    Named { name: String, args: Vec<JavaType> },
    Array(Box<JavaType>),

    /// Type parameter of the enclosing class or method
    Var(String),
}

impl JavaType {
    pub fn named(name: impl Into<String>) -> Self {
        JavaType::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<JavaType>) -> Self {
        JavaType::Named {
            name: name.into(),
            args,
        }
    }

    pub fn object() -> Self {
        Self::named(OBJECT)
    }

    /// Simple name of a named type
    pub fn name(&self) -> Option<&str> {
        match self {
            JavaType::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn has_type_vars(&self) -> bool {
        let mut stack = vec![self];
        while let Some(ty) = stack.pop() {
            match ty {
                JavaType::Var(_) => return true,
                JavaType::Named { args, .. } => stack.extend(args),
                JavaType::Array(element) => stack.push(element.as_ref()),
                JavaType::Primitive(_) => {}
            }
        }
        false
    }

    /// Identity for the core; `None` while type variables remain
    pub fn key(&self) -> Option<TypeKey> {
        if self.has_type_vars() {
            return None;
        }
        Some(TypeKey::new(self.to_string()))
    }

    /// Replace type variables; unbound ones erase to `Object`
    pub fn substitute(&self, bindings: &FxHashMap<String, JavaType>) -> JavaType {
        match self {
            JavaType::Var(name) => bindings.get(name).cloned().unwrap_or_else(JavaType::object),
            JavaType::Named { name, args } => JavaType::Named {
                name: name.clone(),
                args: args.iter().map(|arg| arg.substitute(bindings)).collect(),
            },
            JavaType::Array(element) => JavaType::Array(Box::new(element.substitute(bindings))),
            JavaType::Primitive(_) => self.clone(),
        }
    }

    /// Element types if this is a collection or array
    pub fn element_types(&self) -> Option<Vec<JavaType>> {
        match self {
            JavaType::Array(element) => Some(vec![(**element).clone()]),
            JavaType::Named { name, args } if COLLECTIONS.contains(&name.as_str()) => {
                Some(vec![args.first().cloned().unwrap_or_else(JavaType::object)])
            }
            JavaType::Named { name, args } if MAPS.contains(&name.as_str()) => Some(vec![
                args.first().cloned().unwrap_or_else(JavaType::object),
                args.get(1).cloned().unwrap_or_else(JavaType::object),
            ]),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        match self {
            JavaType::Primitive(_) => true,
            JavaType::Named { name, .. } => SCALARS.contains(&name.as_str()),
            _ => false,
        }
    }

    /// Parse a rendered key (`Map<String,Item[]>`)
    pub fn parse(text: &str) -> Option<JavaType> {
        let mut chars = text.chars().peekable();
        let ty = parse_type(&mut chars)?;
        if chars.next().is_some() {
            return None;
        }
        Some(ty)
    }
}

impl std::fmt::Display for JavaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JavaType::Primitive(name) | JavaType::Var(name) => f.write_str(name),
            JavaType::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            JavaType::Array(element) => write!(f, "{}[]", element),
        }
    }
}

fn parse_type(chars: &mut Peekable<Chars<'_>>) -> Option<JavaType> {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '_' || c == '$' {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    if name.is_empty() {
        return None;
    }

    let mut ty = if PRIMITIVES.contains(&name.as_str()) {
        JavaType::Primitive(name)
    } else {
        let mut args = Vec::new();
        if chars.peek() == Some(&'<') {
            chars.next();
            loop {
                args.push(parse_type(chars)?);
                match chars.next()? {
                    ',' => continue,
                    '>' => break,
                    _ => return None,
                }
            }
        }
        JavaType::Named { name, args }
    };

    while chars.peek() == Some(&'[') {
        chars.next();
        if chars.next()? != ']' {
            return None;
        }
        ty = JavaType::Array(Box::new(ty));
    }
    Some(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_and_parse_key() {
        let ty = JavaType::generic(
            "Map",
            vec![
                JavaType::named("String"),
                JavaType::Array(Box::new(JavaType::named("Item"))),
            ],
        );
        assert_eq!(ty.to_string(), "Map<String,Item[]>");
        assert_eq!(JavaType::parse("Map<String,Item[]>"), Some(ty));
        assert_eq!(JavaType::parse("int[][]").map(|t| t.to_string()).as_deref(), Some("int[][]"));
    }

    #[test]
    fn test_malformed_keys_rejected() {
        assert!(JavaType::parse("").is_none());
        assert!(JavaType::parse("List<").is_none());
        assert!(JavaType::parse("List<int>>").is_none());
        assert!(JavaType::parse("int[").is_none());
    }

    #[test]
    fn test_substitution_erases_unbound_vars() {
        let ty = JavaType::generic("List", vec![JavaType::Var("T".to_string())]);
        assert!(ty.key().is_none());

        let mut bindings = FxHashMap::default();
        bindings.insert("T".to_string(), JavaType::named("Item"));
        assert_eq!(ty.substitute(&bindings).to_string(), "List<Item>");
        assert_eq!(ty.substitute(&FxHashMap::default()).to_string(), "List<Object>");
    }

    #[test]
    fn test_element_types() {
        let map = JavaType::parse("HashMap<String,Item>").unwrap();
        assert_eq!(
            map.element_types(),
            Some(vec![JavaType::named("String"), JavaType::named("Item")])
        );
        assert_eq!(
            JavaType::parse("List").unwrap().element_types(),
            Some(vec![JavaType::object()])
        );
        assert!(JavaType::named("Item").element_types().is_none());
    }
}
