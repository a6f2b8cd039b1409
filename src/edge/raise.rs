use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use crate::capability::{RaiseCapability, Raised};

/// The edge Raise capability for failures of type `E`.
///
/// Raising wraps the failure as is; interception recognizes exactly the
/// failures of type `E`.
pub struct TypedRaise<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E> TypedRaise<E> {
    /// Creates the capability.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E> Default for TypedRaise<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for TypedRaise<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for TypedRaise<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "TypedRaise<{}>", std::any::type_name::<E>())
    }
}

impl<E: Any + Send + Sync> RaiseCapability<E> for TypedRaise<E> {
    fn raise(&self, error: E) -> Raised {
        Raised::new(error)
    }

    fn intercept(&self, raised: Raised) -> Result<E, Raised> {
        raised.downcast()
    }
}
