//! Binding descriptors for introspection and diagnostics.

use crate::key::{BindingKey, TypeKey};
use crate::lifetime::Lifetime;
use crate::registration::BindingEntry;

/// Snapshot of one committed binding.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{Container, Constructor, Injectable, Lifetime, TypeInfo};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Renderer;
///
/// impl Injectable for Renderer {
///     fn type_info() -> TypeInfo {
///         TypeInfo::builder::<Self>()
///             .constructor(Constructor::public(Renderer::default))
///             .build()
///     }
/// }
///
/// let mut container = Container::new();
/// container.bind_self::<Renderer>().unwrap().as_cached();
/// container.bind::<u16>().unwrap().with_id("port").as_instance(Arc::new(8080u16)).unwrap();
///
/// let descriptors = container.descriptors().unwrap();
///
/// let renderer = descriptors.iter()
///     .find(|d| d.type_name().contains("Renderer"))
///     .unwrap();
/// assert_eq!(renderer.lifetime, Lifetime::Singleton);
/// assert!(!renderer.is_named());
/// assert!(!renderer.has_constructor_plan);
///
/// container.resolve::<Renderer>().unwrap();
/// let renderer = container.descriptors().unwrap().into_iter()
///     .find(|d| d.type_name().contains("Renderer"))
///     .unwrap();
/// assert!(renderer.has_constructor_plan);
/// assert!(renderer.has_instance);
///
/// let port = descriptors.iter().find(|d| d.is_named()).unwrap();
/// assert_eq!(port.service_name(), Some("port"));
/// assert_eq!(port.type_name(), "u16");
/// assert_eq!(port.lifetime, Lifetime::Instance);
/// ```
#[derive(Debug, Clone)]
pub struct BindingDescriptor {
    /// The binding key (requested type with optional id)
    pub key: BindingKey,
    /// The type the binding constructs
    pub resolving: TypeKey,
    pub lifetime: Lifetime,
    /// Whether a concrete type was declared with `to`/`to_self`
    pub has_target: bool,
    /// Whether an instance is held (fixed, or a constructed singleton)
    pub has_instance: bool,
    /// Whether constructor selection already ran successfully
    pub has_constructor_plan: bool,
    /// Whether member metadata is already memoized
    pub has_member_plan: bool,
}

impl BindingDescriptor {
    pub(crate) fn from_entry(key: &BindingKey, entry: &BindingEntry) -> Self {
        Self {
            key: key.clone(),
            resolving: entry.resolving,
            lifetime: entry.lifetime,
            has_target: entry.concrete.is_some(),
            has_instance: entry.instance.is_some(),
            has_constructor_plan: entry.metadata.constructor.get().is_some(),
            has_member_plan: entry.metadata.members.get().is_some(),
        }
    }

    /// The qualifier id, or `None` for the default binding.
    pub fn service_name(&self) -> Option<&str> {
        self.key.qualifier()
    }

    /// The requested type's name.
    pub fn type_name(&self) -> &'static str {
        self.key.display_name()
    }

    pub fn is_named(&self) -> bool {
        self.service_name().is_some()
    }
}
