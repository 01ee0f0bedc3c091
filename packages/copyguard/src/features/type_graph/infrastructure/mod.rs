/*
 * Type Graph Infrastructure
 */

mod type_registry;

pub use type_registry::TypeRegistry;
