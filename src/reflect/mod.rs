//! Per-type injection descriptors.
//!
//! Rust has no runtime reflection, so every injectable type describes itself
//! once through [`Injectable::type_info`](crate::Injectable::type_info). The
//! resulting [`TypeInfo`] is the static equivalent of a reflection scan: the
//! candidate constructors in declaration order, plus the marked fields,
//! properties and methods. The container reads it once per binding and
//! memoizes what it derives from it.

mod args;
mod members;

use std::marker::PhantomData;

use crate::key::TypeKey;

pub use args::{Arguments, ConstructorFn, MethodFn};
pub(crate) use args::{downcast_instance, erase, AnyArc, AnyBox};
pub use members::{
    Constructor, ConstructorInfo, Field, InjectMarker, Method, MethodInfo, ParamInfo, Property,
    PropertyInfo, SlotInfo, Visibility,
};

/// Descriptor of one injectable type.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{Constructor, Field, Injectable, Method, Property, TypeInfo};
/// use std::sync::Arc;
///
/// trait Clock: Send + Sync {}
///
/// #[derive(Default)]
/// struct Scheduler {
///     clock: Option<Arc<dyn Clock>>,
///     backup: Option<Arc<dyn Clock>>,
///     started: bool,
/// }
///
/// impl Injectable for Scheduler {
///     fn type_info() -> TypeInfo {
///         TypeInfo::builder::<Self>()
///             .constructor(Constructor::public(Scheduler::default))
///             .field(Field::new("clock", |s: &mut Self, c: Arc<dyn Clock>| s.clock = Some(c)))
///             .property(
///                 Property::new("backup", |s: &mut Self, c: Arc<dyn Clock>| s.backup = Some(c))
///                     .with_id("backup"),
///             )
///             .method(Method::new("start", |s: &mut Self, _c: Arc<dyn Clock>| s.started = true))
///             .build()
///     }
/// }
///
/// let info = Scheduler::type_info();
/// assert_eq!(info.constructors().len(), 1);
/// assert_eq!(info.fields()[0].name(), "clock");
/// assert_eq!(info.properties()[0].binding_key().qualifier(), Some("backup"));
/// assert_eq!(info.methods()[0].params().len(), 1);
/// assert!(!info.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct TypeInfo {
    ty: TypeKey,
    constructors: Vec<ConstructorInfo>,
    fields: Vec<SlotInfo>,
    properties: Vec<PropertyInfo>,
    methods: Vec<MethodInfo>,
}

impl TypeInfo {
    /// Starts describing `T`.
    pub fn builder<T: Send + Sync + 'static>() -> TypeInfoBuilder<T> {
        TypeInfoBuilder {
            info: TypeInfo {
                ty: TypeKey::of::<T>(),
                constructors: Vec::new(),
                fields: Vec::new(),
                properties: Vec::new(),
                methods: Vec::new(),
            },
            _type: PhantomData,
        }
    }

    /// The described type.
    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    /// Constructors in declaration order.
    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.constructors
    }

    /// Marked fields.
    pub fn fields(&self) -> &[SlotInfo] {
        &self.fields
    }

    /// Marked properties.
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// Marked methods.
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// Whether no member is marked injectable.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.properties.is_empty() && self.methods.is_empty()
    }
}

/// Fluent builder for [`TypeInfo`].
pub struct TypeInfoBuilder<T> {
    info: TypeInfo,
    _type: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> TypeInfoBuilder<T> {
    /// Adds a constructor candidate.
    pub fn constructor(mut self, constructor: Constructor<T>) -> Self {
        self.info.constructors.push(constructor.into_info());
        self
    }

    /// Adds a marked field.
    pub fn field(mut self, field: Field<T>) -> Self {
        self.info.fields.push(field.into_info());
        self
    }

    /// Adds a marked property.
    pub fn property(mut self, property: Property<T>) -> Self {
        self.info.properties.push(property.into_info());
        self
    }

    /// Adds a marked method.
    pub fn method(mut self, method: Method<T>) -> Self {
        self.info.methods.push(method.into_info());
        self
    }

    /// Finishes the descriptor.
    pub fn build(self) -> TypeInfo {
        self.info
    }
}
