//! Type-erased argument passing between the engine and descriptor closures.

use std::any::Any;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::TypeKey;

/// Type-erased shared instance. Always holds an `Arc<T>` for the requested `T`.
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// Type-erased, freshly constructed value that is still exclusively owned.
pub(crate) type AnyBox = Box<dyn Any + Send + Sync>;

/// Wraps a shared instance for storage.
#[inline]
pub(crate) fn erase<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> AnyArc {
    Arc::new(value)
}

/// Recovers the typed `Arc<T>` stored by [`erase`].
#[inline]
pub(crate) fn downcast_instance<T: ?Sized + Send + Sync + 'static>(any: &AnyArc) -> DiResult<Arc<T>> {
    any.downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or(DiError::TypeMismatch(std::any::type_name::<T>()))
}

/// Resolved dependencies handed to a constructor or injection method.
///
/// Values arrive in parameter order; each [`take`](Self::take) consumes the
/// next one.
pub struct Arguments {
    values: std::vec::IntoIter<AnyArc>,
}

impl Arguments {
    pub(crate) fn new(values: Vec<AnyArc>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    /// Takes the next resolved argument as `Arc<T>`.
    pub fn take<T: ?Sized + Send + Sync + 'static>(&mut self) -> DiResult<Arc<T>> {
        let any = self
            .values
            .next()
            .ok_or(DiError::InvalidArgument("argument list exhausted"))?;
        downcast_instance::<T>(&any)
    }

    /// Number of arguments not yet taken.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

/// A constructor signature: `Fn(Arc<A>, Arc<B>, ...) -> T`.
///
/// Implemented for functions and closures of up to eight `Arc` parameters.
/// The parameter type list is read from the signature, so a descriptor can
/// never disagree with the call it makes. `Args` is a marker tuple of the
/// parameter types and only serves to tell the impls apart.
pub trait ConstructorFn<T, Args>: Send + Sync + 'static {
    /// Parameter types in declaration order.
    fn param_types() -> Vec<TypeKey>;

    /// Invokes the constructor with resolved arguments.
    fn construct(&self, args: &mut Arguments) -> DiResult<T>;
}

/// An injection method signature: `Fn(&mut T, Arc<A>, Arc<B>, ...)`.
pub trait MethodFn<T, Args>: Send + Sync + 'static {
    /// Parameter types in declaration order, excluding the receiver.
    fn param_types() -> Vec<TypeKey>;

    /// Invokes the method on `target` with resolved arguments.
    fn invoke(&self, target: &mut T, args: &mut Arguments) -> DiResult<()>;
}

macro_rules! impl_signatures {
    ($($arg:ident),*) => {
        impl<T, F, $($arg,)*> ConstructorFn<T, ($(Arc<$arg>,)*)> for F
        where
            F: Fn($(Arc<$arg>),*) -> T + Send + Sync + 'static,
            $($arg: ?Sized + Send + Sync + 'static,)*
        {
            fn param_types() -> Vec<TypeKey> {
                vec![$(TypeKey::of::<$arg>()),*]
            }

            #[allow(non_snake_case, unused_variables)]
            fn construct(&self, args: &mut Arguments) -> DiResult<T> {
                $(let $arg = args.take::<$arg>()?;)*
                Ok((self)($($arg),*))
            }
        }

        impl<T, F, $($arg,)*> MethodFn<T, ($(Arc<$arg>,)*)> for F
        where
            F: Fn(&mut T, $(Arc<$arg>),*) + Send + Sync + 'static,
            $($arg: ?Sized + Send + Sync + 'static,)*
        {
            fn param_types() -> Vec<TypeKey> {
                vec![$(TypeKey::of::<$arg>()),*]
            }

            #[allow(non_snake_case, unused_variables)]
            fn invoke(&self, target: &mut T, args: &mut Arguments) -> DiResult<()> {
                $(let $arg = args.take::<$arg>()?;)*
                (self)(target, $($arg),*);
                Ok(())
            }
        }
    };
}

impl_signatures!();
impl_signatures!(A1);
impl_signatures!(A1, A2);
impl_signatures!(A1, A2, A3);
impl_signatures!(A1, A2, A3, A4);
impl_signatures!(A1, A2, A3, A4, A5);
impl_signatures!(A1, A2, A3, A4, A5, A6);
impl_signatures!(A1, A2, A3, A4, A5, A6, A7);
impl_signatures!(A1, A2, A3, A4, A5, A6, A7, A8);
