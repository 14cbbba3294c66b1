//! Binding records, binding entries and the registry that owns them.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::unsync::OnceCell;

use crate::error::{DiError, DiResult};
use crate::key::{BindingKey, TypeKey};
use crate::lifetime::Lifetime;
use crate::metadata::{ConstructorPlan, MemberPlan};
use crate::reflect::{erase, AnyArc, AnyBox, TypeInfo};
use crate::traits::{Injectable, Upcast};

#[cfg(feature = "ahash")]
type Map<K, V> = HashMap<K, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
type Map<K, V> = HashMap<K, V>;

/// Handle to a concrete type selected with `to::<C>()`.
///
/// `share` turns a constructed `C` into the `Arc<I>` stored for the binding.
#[derive(Clone, Copy)]
pub(crate) struct ConcreteType {
    pub(crate) key: TypeKey,
    pub(crate) describe: fn() -> TypeInfo,
    pub(crate) share: fn(AnyBox) -> DiResult<AnyArc>,
}

impl ConcreteType {
    pub(crate) fn of<I, C>() -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        C: Injectable + Upcast<I>,
    {
        Self {
            key: TypeKey::of::<C>(),
            describe: C::type_info,
            share: share_as::<I, C>,
        }
    }
}

fn share_as<I, C>(value: AnyBox) -> DiResult<AnyArc>
where
    I: ?Sized + Send + Sync + 'static,
    C: Injectable + Upcast<I>,
{
    let concrete = value
        .downcast::<C>()
        .map_err(|_| DiError::TypeMismatch(std::any::type_name::<C>()))?;
    Ok(erase::<I>(Arc::new(*concrete).upcast()))
}

/// Binding intent accumulated by a builder; committed exactly once.
pub(crate) struct BindingRecord {
    pub(crate) binding: TypeKey,
    pub(crate) concrete: Option<ConcreteType>,
    pub(crate) id: Option<String>,
    pub(crate) instance: Option<AnyArc>,
    pub(crate) cache_instance: bool,
}

impl BindingRecord {
    pub(crate) fn new(binding: TypeKey) -> Self {
        Self {
            binding,
            concrete: None,
            id: None,
            instance: None,
            cache_instance: false,
        }
    }

    pub(crate) fn key(&self) -> BindingKey {
        BindingKey::from_parts(self.binding, self.id.clone())
    }

    /// Finalizes the record. The resolving type defaults to the binding type.
    pub(crate) fn into_entry(self) -> BindingEntry {
        let key = self.key();
        let lifetime = if self.instance.is_some() {
            Lifetime::Instance
        } else if self.cache_instance {
            Lifetime::Singleton
        } else {
            Lifetime::Transient
        };
        BindingEntry {
            resolving: self.concrete.map_or(self.binding, |c| c.key),
            concrete: self.concrete,
            instance: self.instance,
            cache_instance: self.cache_instance,
            lifetime,
            metadata: MetadataCache::default(),
            key,
        }
    }
}

/// Memoized per-binding metadata. Each slot is written once, after a fully
/// successful computation, and never invalidated.
#[derive(Default)]
pub(crate) struct MetadataCache {
    pub(crate) type_info: OnceCell<Arc<TypeInfo>>,
    pub(crate) constructor: OnceCell<Arc<ConstructorPlan>>,
    pub(crate) members: OnceCell<Arc<MemberPlan>>,
}

/// A finalized binding, owned by the registry.
pub(crate) struct BindingEntry {
    pub(crate) key: BindingKey,
    pub(crate) resolving: TypeKey,
    pub(crate) concrete: Option<ConcreteType>,
    /// Fixed instance, or the singleton once constructed
    pub(crate) instance: Option<AnyArc>,
    pub(crate) cache_instance: bool,
    pub(crate) lifetime: Lifetime,
    pub(crate) metadata: MetadataCache,
}

impl BindingEntry {
    /// The resolving type qualified with this binding's id.
    pub(crate) fn resolving_key(&self) -> BindingKey {
        BindingKey::from_parts(self.resolving, self.key.qualifier().map(str::to_owned))
    }

    /// Descriptor of the resolving type, computed once.
    pub(crate) fn type_info(&self) -> Option<Arc<TypeInfo>> {
        let concrete = self.concrete?;
        Some(
            self.metadata
                .type_info
                .get_or_init(|| Arc::new((concrete.describe)()))
                .clone(),
        )
    }
}

/// Injection metadata for host-owned instances, keyed by `(concrete type, id)`.
pub(crate) struct InjectionEntry {
    pub(crate) members: Arc<MemberPlan>,
}

/// Keyed storage with unique insertion.
///
/// Small registries stay in a Vec (cache-friendly linear search); the rest
/// spill into a HashMap. `spilled` records the map's insertion order so
/// iteration always follows registration order.
pub(crate) struct Registry<V> {
    small: Vec<(BindingKey, V)>,
    large: Map<BindingKey, V>,
    spilled: Vec<BindingKey>,
    small_threshold: usize,
}

impl<V> Registry<V> {
    pub(crate) fn new() -> Self {
        Self {
            small: Vec::new(),
            large: Map::default(),
            spilled: Vec::new(),
            small_threshold: 16,
        }
    }

    /// Inserts `value`, failing if `key` is already present.
    pub(crate) fn try_insert(&mut self, key: BindingKey, value: V) -> DiResult<()> {
        if self.contains_key(&key) {
            return Err(DiError::DuplicateBinding(key.to_string()));
        }
        if self.small.len() < self.small_threshold {
            self.small.push((key, value));
        } else {
            self.spilled.push(key.clone());
            self.large.insert(key, value);
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn get(&self, key: &BindingKey) -> Option<&V> {
        for (k, v) in &self.small {
            if k == key {
                return Some(v);
            }
        }
        self.large.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &BindingKey) -> Option<&mut V> {
        for (k, v) in &mut self.small {
            if k == key {
                return Some(v);
            }
        }
        self.large.get_mut(key)
    }

    #[inline]
    pub(crate) fn contains_key(&self, key: &BindingKey) -> bool {
        self.small.iter().any(|(k, _)| k == key) || self.large.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.small.len() + self.large.len()
    }

    /// Iterates all entries in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&BindingKey, &V)> {
        self.small
            .iter()
            .map(|(k, v)| (k, v))
            .chain(self.spilled.iter().filter_map(move |k| self.large.get_key_value(k)))
    }

    pub(crate) fn keys(&self) -> Vec<BindingKey> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }
}
