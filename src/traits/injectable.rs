//! The `Injectable` descriptor trait and abstraction upcasting.

use std::sync::Arc;

use crate::reflect::TypeInfo;

/// A type the container can construct and inject into.
///
/// Implementations describe the type's constructors and marked members once;
/// the container memoizes everything it derives from the descriptor, so
/// `type_info` is called at most once per binding (and once per
/// `(type, id)` pair for host-owned instances).
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{Container, Constructor, Injectable, TypeInfo};
/// use std::sync::Arc;
///
/// struct Database { url: &'static str }
/// struct Repository { db: Arc<Database> }
///
/// impl Injectable for Repository {
///     fn type_info() -> TypeInfo {
///         TypeInfo::builder::<Self>()
///             .constructor(Constructor::public(|db: Arc<Database>| Repository { db }))
///             .build()
///     }
/// }
///
/// let mut container = Container::new();
/// container.bind::<Database>().unwrap()
///     .as_instance(Arc::new(Database { url: "postgres://localhost" })).unwrap();
/// container.bind_self::<Repository>().unwrap();
///
/// let repo = container.resolve::<Repository>().unwrap();
/// assert_eq!(repo.db.url, "postgres://localhost");
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Describes the type's constructors and injectable members.
    fn type_info() -> TypeInfo;
}

/// Conversion of a shared concrete instance into a shared abstraction.
///
/// Every type converts into itself. Trait-object abstractions are wired with
/// the [`implements!`](crate::implements) macro:
///
/// ```rust
/// use ferrous_wire::{implements, Upcast};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> &'static str;
/// }
///
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> &'static str { "hello" }
/// }
///
/// implements!(English => dyn Greeter);
///
/// let greeter = Upcast::<dyn Greeter>::upcast(Arc::new(English));
/// assert_eq!(greeter.greet(), "hello");
/// ```
pub trait Upcast<T: ?Sized> {
    /// Converts `self` into the abstraction.
    fn upcast(self: Arc<Self>) -> Arc<T>;
}

impl<T: ?Sized> Upcast<T> for T {
    #[inline]
    fn upcast(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// Declares that a concrete type can be bound to one or more trait objects.
///
/// Expands to an [`Upcast`] impl per abstraction.
///
/// ```rust
/// use ferrous_wire::implements;
///
/// trait Reader: Send + Sync {}
/// trait Writer: Send + Sync {}
///
/// struct File;
/// impl Reader for File {}
/// impl Writer for File {}
///
/// implements!(File => dyn Reader, dyn Writer);
/// ```
#[macro_export]
macro_rules! implements {
    ($concrete:ty => $($abstraction:ty),+ $(,)?) => {
        $(
            impl $crate::Upcast<$abstraction> for $concrete {
                #[inline]
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$abstraction> {
                    self
                }
            }
        )+
    };
}
