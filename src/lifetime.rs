//! Binding lifetime definitions.

/// How a binding produces its instances.
///
/// Derived from the binding declaration: a fixed instance wins over
/// everything, otherwise `as_cached()` selects `Singleton`.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{Container, Constructor, Injectable, Lifetime, TypeInfo};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Clock;
///
/// impl Injectable for Clock {
///     fn type_info() -> TypeInfo {
///         TypeInfo::builder::<Self>()
///             .constructor(Constructor::public(Clock::default))
///             .build()
///     }
/// }
///
/// let mut container = Container::new();
/// container.bind_self::<Clock>().unwrap().with_id("fresh");
/// container.bind_self::<Clock>().unwrap().with_id("shared").as_cached();
/// container.bind::<Clock>().unwrap().with_id("fixed").as_instance(Arc::new(Clock)).unwrap();
///
/// let lifetimes: Vec<_> = container
///     .descriptors()
///     .unwrap()
///     .into_iter()
///     .map(|d| (d.service_name().map(str::to_owned), d.lifetime))
///     .collect();
///
/// assert!(lifetimes.contains(&(Some("fresh".into()), Lifetime::Transient)));
/// assert!(lifetimes.contains(&(Some("shared".into()), Lifetime::Singleton)));
/// assert!(lifetimes.contains(&(Some("fixed".into()), Lifetime::Instance)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// New instance per resolution, never cached
    Transient,
    /// First constructed instance is retained and reused
    ///
    /// Injection runs once, on that first construction.
    Singleton,
    /// A pre-existing instance supplied at binding time
    ///
    /// Never constructed and never injected by the container.
    Instance,
}
