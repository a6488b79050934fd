//! Type identity used as a registry key, and the name table used to resolve
//! type names parsed out of mapper names.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a Rust type plus a short name for diagnostics.
///
/// Two keys are equal when their `TypeId`s are equal; the name is ignored.
/// There is no notion of subtyping: a key only ever matches itself.
#[derive(Clone, Copy, Debug)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name::<T>(),
        }
    }

    /// Key for `T` displayed under `name` instead of its Rust type name.
    pub fn named<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type name with the module path of the outermost type stripped.
///
/// `my_app::models::Foo` becomes `Foo`; generic arguments are kept verbatim,
/// so `alloc::vec::Vec<u8>` becomes `Vec<u8>`. Types that are not a plain
/// path (references, tuples, slices, trait objects) keep their full name.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let head = full.find('<').map_or(full, |idx| &full[..idx]);
    if !head.chars().all(|c| c.is_alphanumeric() || c == '_' || c == ':') {
        return full;
    }
    let start = head.rfind("::").map_or(0, |idx| idx + 2);
    &full[start..]
}

/// Name → type lookup populated by the application.
///
/// Stands in for a global namespace of named types when mapper bindings are
/// inferred from mapper names.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    by_name: HashMap<String, TypeKey>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `T` resolvable under its short type name.
    ///
    /// Returns the key previously bound to that name, if any.
    pub fn insert<T: ?Sized + 'static>(&mut self) -> Option<TypeKey> {
        let key = TypeKey::of::<T>();
        self.by_name.insert(key.name().to_string(), key)
    }

    pub fn insert_as(&mut self, name: impl Into<String>, key: TypeKey) -> Option<TypeKey> {
        self.by_name.insert(name.into(), key)
    }

    pub fn get(&self, name: &str) -> Option<TypeKey> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
