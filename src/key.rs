//! Type identity and binding keys.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime identity of a requested or concrete type.
///
/// Pairs the `TypeId` with `std::any::type_name` for diagnostics. Equality,
/// ordering and hashing only look at the `TypeId`.
///
/// Works for sized types and for trait-object abstractions alike:
///
/// ```rust
/// use ferrous_wire::TypeKey;
///
/// trait Clock: Send + Sync {}
///
/// let concrete = TypeKey::of::<String>();
/// let abstraction = TypeKey::of::<dyn Clock>();
///
/// assert_ne!(concrete, abstraction);
/// assert!(concrete.is_leaf());
/// assert!(!abstraction.is_leaf());
/// assert!(abstraction.name().contains("Clock"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying `TypeId`.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this is a primitive or string leaf type.
    ///
    /// No binding mechanism supplies leaf values, so any constructor taking
    /// one is rejected during constructor selection.
    pub fn is_leaf(&self) -> bool {
        leaf_type_ids().contains(&self.id)
    }
}

fn leaf_type_ids() -> [TypeId; 21] {
    [
        TypeId::of::<bool>(),
        TypeId::of::<char>(),
        TypeId::of::<i8>(),
        TypeId::of::<i16>(),
        TypeId::of::<i32>(),
        TypeId::of::<i64>(),
        TypeId::of::<i128>(),
        TypeId::of::<isize>(),
        TypeId::of::<u8>(),
        TypeId::of::<u16>(),
        TypeId::of::<u32>(),
        TypeId::of::<u64>(),
        TypeId::of::<u128>(),
        TypeId::of::<usize>(),
        TypeId::of::<f32>(),
        TypeId::of::<f64>(),
        TypeId::of::<()>(),
        TypeId::of::<String>(),
        TypeId::of::<str>(),
        TypeId::of::<&'static str>(),
        TypeId::of::<Box<str>>(),
    ]
}

impl PartialEq for TypeKey {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Registry key: a type plus an optional qualifier id.
///
/// `None` is the default (unqualified) binding. Two keys with the same type
/// and different ids address independent bindings.
///
/// ```rust
/// use ferrous_wire::{BindingKey, TypeKey};
///
/// let default = BindingKey::of::<u8>(None);
/// let named = BindingKey::of::<u8>(Some("port"));
///
/// assert_ne!(default, named);
/// assert_eq!(named.qualifier(), Some("port"));
/// assert_eq!(named.to_string(), "u8#port");
/// assert_eq!(default.type_key(), TypeKey::of::<u8>());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingKey {
    ty: TypeKey,
    id: Option<String>,
}

impl BindingKey {
    /// Creates a key from a type key and optional id.
    pub fn new(ty: TypeKey, id: Option<&str>) -> Self {
        Self {
            ty,
            id: id.map(str::to_owned),
        }
    }

    /// Key of `T` with the given id.
    pub fn of<T: ?Sized + 'static>(id: Option<&str>) -> Self {
        Self::new(TypeKey::of::<T>(), id)
    }

    pub(crate) fn from_parts(ty: TypeKey, id: Option<String>) -> Self {
        Self { ty, id }
    }

    /// The type component.
    #[inline]
    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    /// The qualifier id, if any.
    #[inline]
    pub fn qualifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Type name for display.
    #[inline]
    pub fn display_name(&self) -> &'static str {
        self.ty.name()
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}#{}", self.ty.name(), id),
            None => f.write_str(self.ty.name()),
        }
    }
}

/// Helper for creating the unqualified key of `T`.
#[inline(always)]
pub fn key_of_type<T: ?Sized + 'static>() -> BindingKey {
    BindingKey::of::<T>(None)
}
