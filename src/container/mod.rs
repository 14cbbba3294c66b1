//! The dependency injection container.

mod construct;
mod inject;

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use crate::binding::BindingBuilder;
use crate::config::ContainerOptions;
use crate::descriptors::BindingDescriptor;
use crate::error::{DiError, DiResult};
use crate::internal::ResolutionStack;
use crate::key::{BindingKey, TypeKey};
use crate::observer::{DiObserver, Observers};
use crate::reflect::{downcast_instance, AnyArc};
use crate::registration::{BindingEntry, BindingRecord, InjectionEntry, Registry};
use crate::traits::Injectable;

/// Binding registry plus resolution and injection engine.
///
/// Every operation takes `&mut self`: the container is meant to be driven
/// from one logical thread (an application's setup code or main loop) and
/// does no internal locking. Resolved instances are `Arc`s and can be shared
/// freely once returned.
///
/// # Binding protocol
///
/// [`bind`](Self::bind) returns a builder that stages its declaration when it
/// is dropped. The staged declaration is committed by the next `bind`,
/// `resolve*`, `inject*`, [`descriptors`](Self::descriptors) or
/// [`validate`](Self::validate) call, and that is where a duplicate
/// `(type, id)` is reported:
///
/// ```rust
/// use ferrous_wire::{Container, DiError};
/// use std::sync::Arc;
///
/// let mut container = Container::new();
/// container.bind::<u32>().unwrap().as_instance(Arc::new(1u32)).unwrap();
/// container.bind::<u32>().unwrap().as_instance(Arc::new(2u32)).unwrap();
///
/// assert!(matches!(container.resolve::<u32>(), Err(DiError::DuplicateBinding(_))));
/// // The first declaration stays in effect.
/// assert_eq!(*container.resolve::<u32>().unwrap(), 1);
/// ```
///
/// # Abstractions
///
/// ```rust
/// use ferrous_wire::{implements, Container, Constructor, Injectable, TypeInfo};
/// use std::sync::Arc;
///
/// trait Storage: Send + Sync {
///     fn name(&self) -> &'static str;
/// }
///
/// #[derive(Default)]
/// struct Memory;
/// impl Storage for Memory {
///     fn name(&self) -> &'static str { "memory" }
/// }
/// impl Injectable for Memory {
///     fn type_info() -> TypeInfo {
///         TypeInfo::builder::<Self>()
///             .constructor(Constructor::public(Memory::default))
///             .build()
///     }
/// }
/// implements!(Memory => dyn Storage);
///
/// let mut container = Container::new();
/// container.bind::<dyn Storage>().unwrap().to::<Memory>().as_cached();
///
/// let a = container.resolve::<dyn Storage>().unwrap();
/// let b = container.resolve::<dyn Storage>().unwrap();
/// assert_eq!(a.name(), "memory");
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct Container {
    pub(crate) bindings: Registry<BindingEntry>,
    pub(crate) injections: Registry<InjectionEntry>,
    pub(crate) staged: Option<BindingRecord>,
    stack: ResolutionStack,
    observers: Observers,
    options: ContainerOptions,
}

impl Container {
    pub fn new() -> Self {
        Self::with_options(ContainerOptions::default())
    }

    pub fn with_options(options: ContainerOptions) -> Self {
        Self {
            bindings: Registry::new(),
            injections: Registry::new(),
            staged: None,
            stack: ResolutionStack::new(options.max_depth, options.detect_cycles),
            observers: Observers::new(),
            options,
        }
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    /// Registers an observer for binding, resolution and injection events.
    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    // ----- Binding -----

    /// Starts declaring a binding for `I`.
    ///
    /// Commits any staged declaration first, so this is where a duplicate of
    /// the previous declaration surfaces.
    ///
    /// A binding needs a target (`to`, `to_self`) or an instance to resolve;
    /// use [`bind_self`](Self::bind_self) to bind a type to itself.
    pub fn bind<I>(&mut self) -> DiResult<BindingBuilder<'_, I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.commit_staged()?;
        Ok(BindingBuilder::new(self))
    }

    /// Binds `C` to itself; shorthand for `bind::<C>()?.to_self()`.
    pub fn bind_self<C: Injectable>(&mut self) -> DiResult<BindingBuilder<'_, C>> {
        Ok(self.bind::<C>()?.to_self())
    }

    /// Commits the staged declaration, if any.
    ///
    /// The staged record is consumed even when the commit fails.
    pub(crate) fn commit_staged(&mut self) -> DiResult<()> {
        let Some(record) = self.staged.take() else {
            return Ok(());
        };
        let entry = record.into_entry();
        let key = entry.key.clone();
        let lifetime = entry.lifetime;
        self.bindings.try_insert(key.clone(), entry)?;
        self.observers.binding_committed(&key, lifetime);
        Ok(())
    }

    /// Whether a binding exists for `T` with `id`.
    pub fn is_bound<T: ?Sized + 'static>(&mut self, id: Option<&str>) -> DiResult<bool> {
        self.commit_staged()?;
        Ok(self.bindings.contains_key(&BindingKey::of::<T>(id)))
    }

    /// Number of committed bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.len() == 0
    }

    /// Descriptors of all committed bindings, in registration order.
    pub fn descriptors(&mut self) -> DiResult<Vec<BindingDescriptor>> {
        self.commit_staged()?;
        Ok(self
            .bindings
            .iter()
            .map(|(key, entry)| BindingDescriptor::from_entry(key, entry))
            .collect())
    }

    // ----- Resolution -----

    /// Resolves the unqualified binding of `T`.
    pub fn resolve<T>(&mut self) -> DiResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with_id::<T>(None)
    }

    /// Resolves the binding of `T` qualified with `id`.
    pub fn resolve_named<T>(&mut self, id: &str) -> DiResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with_id::<T>(Some(id))
    }

    /// Resolves the binding of `T` with an optional qualifier id.
    pub fn resolve_with_id<T>(&mut self, id: Option<&str>) -> DiResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.commit_staged()?;
        let key = BindingKey::of::<T>(id);
        let any = self.resolve_key(&key)?;
        downcast_instance::<T>(&any)
    }

    /// Resolves a key, notifying observers.
    pub(crate) fn resolve_key(&mut self, key: &BindingKey) -> DiResult<AnyArc> {
        if !self.observers.has_observers() {
            return self.resolve_entry(key);
        }

        let started = Instant::now();
        self.observers.resolving(key);
        let result = self.resolve_entry(key);
        match &result {
            Ok(_) => self.observers.resolved(key, started.elapsed()),
            Err(error) => self.observers.resolution_failed(key, error),
        }
        result
    }

    fn resolve_entry(&mut self, key: &BindingKey) -> DiResult<AnyArc> {
        let entry = self
            .bindings
            .get(key)
            .ok_or_else(|| DiError::NotFound(key.to_string()))?;
        if let Some(instance) = &entry.instance {
            return Ok(instance.clone());
        }
        let resolving = entry.resolving.name();

        self.stack.enter(key)?;
        let result = self.build(key, resolving);
        self.stack.leave(key);
        result
    }

    /// Constructs, injects, shares and (for singletons) caches an instance.
    fn build(&mut self, key: &BindingKey, resolving: &'static str) -> DiResult<AnyArc> {
        let share = match self.bindings.get(key).and_then(|e| e.concrete) {
            Some(concrete) => concrete.share,
            None => return Err(DiError::Unresolvable(resolving)),
        };

        let mut value = self.construct(key, resolving)?;

        let members = self.binding_members(key)?;
        if !members.is_empty() {
            let target: &mut dyn Any = &mut *value;
            self.apply_members(&members, target)?;
            if let Some(entry) = self.bindings.get(key) {
                self.observers.injected(entry.resolving, members.len());
            }
        }

        let shared = share(value)?;
        if let Some(entry) = self.bindings.get_mut(key) {
            if entry.cache_instance {
                entry.instance = Some(shared.clone());
            }
        }
        Ok(shared)
    }

    /// The type a binding constructs, if it exists.
    pub fn resolving_type<T: ?Sized + 'static>(&mut self, id: Option<&str>) -> DiResult<Option<TypeKey>> {
        self.commit_staged()?;
        Ok(self.bindings.get(&BindingKey::of::<T>(id)).map(|e| e.resolving))
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.bindings.keys())
            .field("staged", &self.staged.as_ref().map(|r| r.key()))
            .field("options", &self.options)
            .finish()
    }
}
