//! Fluent binding declarations.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::container::Container;
use crate::error::{DiError, DiResult};
use crate::key::TypeKey;
use crate::reflect::erase;
use crate::registration::{BindingRecord, ConcreteType};
use crate::traits::{Injectable, Upcast};

/// Declares one binding for the abstraction `I`.
///
/// Returned by [`Container::bind`]. The declaration is staged when the
/// builder is dropped and committed by the container's next operation.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{implements, Container, Constructor, Injectable, TypeInfo};
/// use std::sync::Arc;
///
/// trait Weapon: Send + Sync {
///     fn damage(&self) -> u32;
/// }
///
/// struct Sword;
/// struct Bow;
/// impl Weapon for Sword { fn damage(&self) -> u32 { 10 } }
/// impl Weapon for Bow { fn damage(&self) -> u32 { 6 } }
///
/// impl Injectable for Sword {
///     fn type_info() -> TypeInfo {
///         TypeInfo::builder::<Self>().constructor(Constructor::public(|| Sword)).build()
///     }
/// }
/// impl Injectable for Bow {
///     fn type_info() -> TypeInfo {
///         TypeInfo::builder::<Self>().constructor(Constructor::public(|| Bow)).build()
///     }
/// }
/// implements!(Sword => dyn Weapon);
/// implements!(Bow => dyn Weapon);
///
/// let mut container = Container::new();
/// container.bind::<dyn Weapon>().unwrap().to::<Sword>().with_id("melee");
/// container.bind::<dyn Weapon>().unwrap().to::<Bow>().with_id("ranged").as_cached();
///
/// assert_eq!(container.resolve_named::<dyn Weapon>("melee").unwrap().damage(), 10);
/// assert_eq!(container.resolve_named::<dyn Weapon>("ranged").unwrap().damage(), 6);
/// ```
pub struct BindingBuilder<'a, I: ?Sized + Send + Sync + 'static> {
    container: &'a mut Container,
    record: Option<BindingRecord>,
    _abstraction: PhantomData<fn() -> Arc<I>>,
}

impl<'a, I> BindingBuilder<'a, I>
where
    I: ?Sized + Send + Sync + 'static,
{
    pub(crate) fn new(container: &'a mut Container) -> Self {
        Self {
            container,
            record: Some(BindingRecord::new(TypeKey::of::<I>())),
            _abstraction: PhantomData,
        }
    }

    fn update(mut self, f: impl FnOnce(&mut BindingRecord)) -> Self {
        if let Some(record) = self.record.as_mut() {
            f(record);
        }
        self
    }

    /// Resolves the binding by constructing `C`.
    pub fn to<C>(self) -> Self
    where
        C: Injectable + Upcast<I>,
    {
        self.update(|record| record.concrete = Some(ConcreteType::of::<I, C>()))
    }

    /// Qualifies the binding with `id`.
    pub fn with_id(self, id: &str) -> Self {
        let id = id.to_owned();
        self.update(move |record| record.id = Some(id))
    }

    /// Retains the first constructed instance and returns it from then on.
    ///
    /// The instance is retained only after its members are injected, so a
    /// member that depends back on this binding still fails with `Circular`.
    pub fn as_cached(self) -> Self {
        self.update(|record| record.cache_instance = true)
    }

    /// Resolves the binding to an existing instance.
    ///
    /// An absent instance is rejected with [`DiError::InvalidArgument`] and
    /// the whole declaration is discarded.
    ///
    /// ```rust
    /// use ferrous_wire::{Container, DiError};
    /// use std::sync::Arc;
    ///
    /// let mut container = Container::new();
    /// let err = container.bind::<String>().unwrap().as_instance(None::<Arc<String>>).err();
    /// assert_eq!(err, Some(DiError::InvalidArgument("instance must not be None")));
    /// assert!(!container.is_bound::<String>(None).unwrap());
    /// ```
    pub fn as_instance(mut self, instance: impl Into<Option<Arc<I>>>) -> DiResult<Self> {
        match instance.into() {
            Some(instance) => Ok(self.update(|record| record.instance = Some(erase(instance)))),
            None => {
                self.record = None;
                Err(DiError::InvalidArgument("instance must not be None"))
            }
        }
    }
}

impl<'a, I> BindingBuilder<'a, I>
where
    I: Injectable,
{
    /// Resolves the binding by constructing `I` itself.
    pub fn to_self(self) -> Self {
        self.to::<I>()
    }
}

impl<'a, I> Drop for BindingBuilder<'a, I>
where
    I: ?Sized + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if let Some(record) = self.record.take() {
            self.container.staged = Some(record);
        }
    }
}
