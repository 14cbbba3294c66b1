//! Host-owned instances and the containers that hold them.

use std::any::Any;

use crate::key::TypeKey;
use crate::reflect::TypeInfo;
use crate::traits::Injectable;

/// Object-safe view of an injectable value the container did not construct.
///
/// Implemented for every [`Injectable`] type, so host objects can hand out
/// heterogeneous components as `&mut dyn Component`.
pub trait Component: Any + Send + Sync {
    /// Concrete type of the component.
    fn component_type(&self) -> TypeKey;

    /// Descriptor of the component's type.
    fn component_info(&self) -> TypeInfo;

    /// The component as `Any`, for member assignment.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Injectable> Component for T {
    fn component_type(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn component_info(&self) -> TypeInfo {
        T::type_info()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A host object that owns attached components, such as a scene-graph node.
///
/// The only capability the container needs from the host is enumerating the
/// attached components.
///
/// ```rust
/// use ferrous_wire::{Component, ComponentHost};
///
/// struct Node {
///     components: Vec<Box<dyn Component>>,
/// }
///
/// impl ComponentHost for Node {
///     fn components_mut(&mut self) -> Vec<&mut (dyn Component + 'static)> {
///         self.components.iter_mut().map(|c| c.as_mut()).collect()
///     }
/// }
/// ```
pub trait ComponentHost {
    /// Mutable access to every attached component.
    fn components_mut(&mut self) -> Vec<&mut (dyn Component + 'static)>;
}
