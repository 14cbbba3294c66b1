//! Injectable member descriptors: constructors, fields, properties, methods.
//!
//! Each descriptor is built through a typed front (`Constructor<T>`,
//! `Field<T>`, ...) and stored type-erased in [`TypeInfo`](super::TypeInfo).

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::{BindingKey, TypeKey};

use super::args::{downcast_instance, AnyArc, AnyBox, Arguments, ConstructorFn, MethodFn};

type ErasedConstructor = Arc<dyn Fn(&mut Arguments) -> DiResult<AnyBox> + Send + Sync>;
type ErasedSetter = Arc<dyn Fn(&mut dyn Any, &AnyArc) -> DiResult<()> + Send + Sync>;
type ErasedMethod = Arc<dyn Fn(&mut dyn Any, &mut Arguments) -> DiResult<()> + Send + Sync>;

/// Accessibility of a constructor.
///
/// Unmarked private constructors are never candidates; marking one with
/// [`Constructor::inject`] makes it eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// The injectable capability marker carried by a member or parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectMarker {
    /// Optional qualifier id
    pub id: Option<String>,
}

/// A parameter of a constructor or injection method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
    /// Declared parameter type
    pub ty: TypeKey,
    /// Qualifier id from the parameter's own marker
    pub id: Option<String>,
}

impl ParamInfo {
    /// The registry key this parameter resolves through.
    pub fn binding_key(&self) -> BindingKey {
        BindingKey::from_parts(self.ty, self.id.clone())
    }
}

fn params_from(types: Vec<TypeKey>) -> Vec<ParamInfo> {
    types.into_iter().map(|ty| ParamInfo { ty, id: None }).collect()
}

/// An index outside the signature is ignored in release builds.
fn set_param_id(params: &mut [ParamInfo], index: usize, id: &str) {
    debug_assert!(
        index < params.len(),
        "parameter index {} out of range for a signature of {} parameters",
        index,
        params.len()
    );
    if let Some(param) = params.get_mut(index) {
        param.id = Some(id.to_owned());
    }
}

fn downcast_target<T: Any>(target: &mut dyn Any) -> DiResult<&mut T> {
    target
        .downcast_mut::<T>()
        .ok_or(DiError::TypeMismatch(std::any::type_name::<T>()))
}

// ===== Constructors =====

/// Type-erased constructor descriptor.
#[derive(Clone)]
pub struct ConstructorInfo {
    pub(crate) visibility: Visibility,
    pub(crate) marker: Option<InjectMarker>,
    pub(crate) params: Vec<ParamInfo>,
    pub(crate) invoke: ErasedConstructor,
}

impl ConstructorInfo {
    /// Declared accessibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// The injectable marker, if the constructor carries one.
    pub fn marker(&self) -> Option<&InjectMarker> {
        self.marker.as_ref()
    }

    /// Parameters in declaration order.
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }
}

impl std::fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("visibility", &self.visibility)
            .field("marker", &self.marker)
            .field("params", &self.params)
            .finish()
    }
}

/// Typed constructor declaration for `T`.
///
/// ```rust
/// use ferrous_wire::{Constructor, Injectable, TypeInfo};
/// use std::sync::Arc;
///
/// struct Config;
/// struct Server { config: Arc<Config> }
///
/// impl Server {
///     fn new(config: Arc<Config>) -> Self { Server { config } }
/// }
///
/// impl Injectable for Server {
///     fn type_info() -> TypeInfo {
///         TypeInfo::builder::<Self>()
///             .constructor(Constructor::public(Server::new).inject().param_id(0, "primary"))
///             .build()
///     }
/// }
///
/// let info = Server::type_info();
/// let ctor = &info.constructors()[0];
/// assert!(ctor.marker().is_some());
/// assert_eq!(ctor.params()[0].id.as_deref(), Some("primary"));
/// ```
pub struct Constructor<T> {
    info: ConstructorInfo,
    _type: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> Constructor<T> {
    fn with_visibility<Args, F>(visibility: Visibility, f: F) -> Self
    where
        F: ConstructorFn<T, Args>,
    {
        let invoke: ErasedConstructor =
            Arc::new(move |args: &mut Arguments| Ok(Box::new(f.construct(args)?) as AnyBox));
        Self {
            info: ConstructorInfo {
                visibility,
                marker: None,
                params: params_from(F::param_types()),
                invoke,
            },
            _type: PhantomData,
        }
    }

    /// A publicly accessible constructor.
    pub fn public<Args, F>(f: F) -> Self
    where
        F: ConstructorFn<T, Args>,
    {
        Self::with_visibility(Visibility::Public, f)
    }

    /// A constructor that is only usable when marked with [`inject`](Self::inject).
    pub fn private<Args, F>(f: F) -> Self
    where
        F: ConstructorFn<T, Args>,
    {
        Self::with_visibility(Visibility::Private, f)
    }

    /// Marks the constructor injectable; marked constructors are tried first.
    pub fn inject(mut self) -> Self {
        self.info.marker.get_or_insert_with(InjectMarker::default);
        self
    }

    /// Marks the constructor injectable for bindings qualified with `id`.
    pub fn with_id(mut self, id: &str) -> Self {
        self.info.marker = Some(InjectMarker {
            id: Some(id.to_owned()),
        });
        self
    }

    /// Qualifies parameter `index`.
    ///
    /// An `index` outside the signature trips a debug assertion and is
    /// otherwise ignored.
    pub fn param_id(mut self, index: usize, id: &str) -> Self {
        set_param_id(&mut self.info.params, index, id);
        self
    }

    pub(crate) fn into_info(self) -> ConstructorInfo {
        self.info
    }
}

// ===== Fields and properties =====

/// Type-erased field descriptor: a named, directly settable slot.
#[derive(Clone)]
pub struct SlotInfo {
    pub(crate) name: &'static str,
    pub(crate) ty: TypeKey,
    pub(crate) id: Option<String>,
    pub(crate) set: ErasedSetter,
}

impl SlotInfo {
    /// Member name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type of the injected value.
    pub fn value_type(&self) -> TypeKey {
        self.ty
    }

    /// The registry key the slot resolves through.
    pub fn binding_key(&self) -> BindingKey {
        BindingKey::from_parts(self.ty, self.id.clone())
    }
}

impl std::fmt::Debug for SlotInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotInfo")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("id", &self.id)
            .finish()
    }
}

fn erase_setter<T, D, S>(set: S) -> ErasedSetter
where
    T: Any,
    D: ?Sized + Send + Sync + 'static,
    S: Fn(&mut T, Arc<D>) + Send + Sync + 'static,
{
    Arc::new(move |target: &mut dyn Any, value: &AnyArc| {
        let target = downcast_target::<T>(target)?;
        set(target, downcast_instance::<D>(value)?);
        Ok(())
    })
}

/// Typed field declaration for `T`.
pub struct Field<T> {
    info: SlotInfo,
    _type: PhantomData<fn(&mut T)>,
}

impl<T: Any> Field<T> {
    /// A marked field of type `D`, assigned by `set`.
    pub fn new<D, S>(name: &'static str, set: S) -> Self
    where
        D: ?Sized + Send + Sync + 'static,
        S: Fn(&mut T, Arc<D>) + Send + Sync + 'static,
    {
        Self {
            info: SlotInfo {
                name,
                ty: TypeKey::of::<D>(),
                id: None,
                set: erase_setter(set),
            },
            _type: PhantomData,
        }
    }

    /// Qualifies the field.
    pub fn with_id(mut self, id: &str) -> Self {
        self.info.id = Some(id.to_owned());
        self
    }

    pub(crate) fn into_info(self) -> SlotInfo {
        self.info
    }
}

/// Type-erased property descriptor.
///
/// Computed accessors have no storage and cannot be injected.
#[derive(Clone, Debug)]
pub struct PropertyInfo {
    pub(crate) slot: SlotInfo,
    pub(crate) has_storage: bool,
}

impl PropertyInfo {
    /// Member name.
    pub fn name(&self) -> &'static str {
        self.slot.name
    }

    /// Whether the property has backing storage to assign into.
    pub fn has_storage(&self) -> bool {
        self.has_storage
    }

    /// The registry key the property resolves through.
    pub fn binding_key(&self) -> BindingKey {
        self.slot.binding_key()
    }
}

/// Typed property declaration for `T`.
pub struct Property<T> {
    info: PropertyInfo,
    _type: PhantomData<fn(&mut T)>,
}

impl<T: Any> Property<T> {
    /// A marked property of type `D` whose backing storage is written by `set`.
    pub fn new<D, S>(name: &'static str, set: S) -> Self
    where
        D: ?Sized + Send + Sync + 'static,
        S: Fn(&mut T, Arc<D>) + Send + Sync + 'static,
    {
        Self {
            info: PropertyInfo {
                slot: Field::<T>::new(name, set).into_info(),
                has_storage: true,
            },
            _type: PhantomData,
        }
    }

    /// A marked property of type `D` without backing storage.
    ///
    /// Injecting into it fails with [`DiError::MetadataAccess`].
    pub fn computed<D>(name: &'static str) -> Self
    where
        D: ?Sized + Send + Sync + 'static,
    {
        let unsupported: ErasedSetter = Arc::new(move |_: &mut dyn Any, _: &AnyArc| {
            Err(DiError::MetadataAccess {
                ty: std::any::type_name::<T>(),
                member: name,
            })
        });
        Self {
            info: PropertyInfo {
                slot: SlotInfo {
                    name,
                    ty: TypeKey::of::<D>(),
                    id: None,
                    set: unsupported,
                },
                has_storage: false,
            },
            _type: PhantomData,
        }
    }

    /// Qualifies the property.
    pub fn with_id(mut self, id: &str) -> Self {
        self.info.slot.id = Some(id.to_owned());
        self
    }

    pub(crate) fn into_info(self) -> PropertyInfo {
        self.info
    }
}

// ===== Methods =====

/// Type-erased injection method descriptor.
#[derive(Clone)]
pub struct MethodInfo {
    pub(crate) name: &'static str,
    pub(crate) marker: InjectMarker,
    pub(crate) params: Vec<ParamInfo>,
    pub(crate) invoke: ErasedMethod,
}

impl MethodInfo {
    /// Method name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parameters as declared; ids come from the parameter markers only.
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    /// Parameters with the method's id applied to undecorated ones.
    pub(crate) fn effective_params(&self) -> Vec<ParamInfo> {
        self.params
            .iter()
            .map(|p| ParamInfo {
                ty: p.ty,
                id: p.id.clone().or_else(|| self.marker.id.clone()),
            })
            .collect()
    }
}

impl std::fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("marker", &self.marker)
            .field("params", &self.params)
            .finish()
    }
}

/// Typed injection method declaration for `T`.
///
/// ```rust
/// use ferrous_wire::Method;
/// use std::sync::Arc;
///
/// struct Cache;
/// #[derive(Default)]
/// struct Handler { cache: Option<Arc<Cache>> }
///
/// impl Handler {
///     fn init(&mut self, cache: Arc<Cache>) { self.cache = Some(cache); }
/// }
///
/// let method: Method<Handler> = Method::new("init", Handler::init).with_id("hot");
/// # let _ = method;
/// ```
pub struct Method<T> {
    info: MethodInfo,
    _type: PhantomData<fn(&mut T)>,
}

impl<T: Any> Method<T> {
    /// A marked method invoked once after construction.
    pub fn new<Args, F>(name: &'static str, f: F) -> Self
    where
        F: MethodFn<T, Args>,
    {
        let invoke: ErasedMethod = Arc::new(move |target: &mut dyn Any, args: &mut Arguments| {
            f.invoke(downcast_target::<T>(target)?, args)
        });
        Self {
            info: MethodInfo {
                name,
                marker: InjectMarker::default(),
                params: params_from(F::param_types()),
                invoke,
            },
            _type: PhantomData,
        }
    }

    /// Sets the method's id, inherited by parameters without their own.
    pub fn with_id(mut self, id: &str) -> Self {
        self.info.marker.id = Some(id.to_owned());
        self
    }

    /// Qualifies parameter `index`.
    ///
    /// An `index` outside the signature trips a debug assertion and is
    /// otherwise ignored.
    pub fn param_id(mut self, index: usize, id: &str) -> Self {
        set_param_id(&mut self.info.params, index, id);
        self
    }

    pub(crate) fn into_info(self) -> MethodInfo {
        self.info
    }
}
