//! The Raise capability: raise typed failures and handle them further up.
//!
//! Raising produces a [`Raised`] value that travels outward through ordinary
//! `Result` propagation. A handler recognizes "its" failures by asking the
//! capability to [`intercept`](RaiseCapability::intercept) the value; failures
//! of other types pass through untouched.
//!
//! # Examples
//!
//! ```
//! use shapelift::capability::{RaiseCapability, RaiseExt, Raised};
//! use shapelift::edge::TypedRaise;
//!
//! let raise = TypedRaise::<String>::new();
//!
//! let recovered: Result<u32, Raised> = raise.handle(
//!     || raise.fail("boom".to_string()),
//!     |message| Ok(u32::try_from(message.len()).unwrap_or(u32::MAX)),
//! );
//! assert_eq!(recovered.unwrap(), 4);
//! ```

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::optics::Prism;
use crate::shape::{Shaped, TypeKey};
use crate::synthesis::SynthesizedPrism;

/// A raised failure in flight.
///
/// Wraps the value handed to [`RaiseCapability::raise`] by the innermost
/// capability that produced it. Once a failure escapes every handler it can
/// be reported through its [`Display`](fmt::Display) impl or recovered with
/// [`Raised::downcast`].
pub struct Raised {
    error: Box<dyn Any + Send + Sync>,
    type_key: TypeKey,
}

impl Raised {
    /// Wraps a failure value.
    #[must_use]
    pub fn new<E: Any + Send + Sync>(error: E) -> Self {
        Self {
            error: Box::new(error),
            type_key: TypeKey::of::<E>(),
        }
    }

    /// The type of the wrapped failure.
    #[must_use]
    pub const fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Whether the wrapped failure is an `E`.
    #[must_use]
    pub fn is<E: Any>(&self) -> bool {
        self.error.is::<E>()
    }

    /// Borrows the wrapped failure as an `E`.
    #[must_use]
    pub fn downcast_ref<E: Any>(&self) -> Option<&E> {
        self.error.downcast_ref()
    }

    /// Takes the wrapped failure out as an `E`.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged if the failure is not an `E`.
    pub fn downcast<E: Any>(self) -> Result<E, Self> {
        let type_key = self.type_key;
        self.error
            .downcast::<E>()
            .map(|error| *error)
            .map_err(|error| Self { error, type_key })
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Raised")
            .field(&self.type_key)
            .finish()
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "unhandled {} raised", self.type_key)
    }
}

impl Error for Raised {}

/// Raising and recognizing failures of type `E`.
pub trait RaiseCapability<E>: Send + Sync {
    /// Turns `error` into an in-flight failure.
    fn raise(&self, error: E) -> Raised;

    /// Recovers the `E` this capability would have raised for `raised`.
    ///
    /// # Errors
    ///
    /// Returns `raised` unchanged when it does not carry an `E`.
    fn intercept(&self, raised: Raised) -> Result<E, Raised>;
}

/// Convenience operations available on every [`RaiseCapability`].
pub trait RaiseExt<E>: RaiseCapability<E> {
    /// Raises `error` as the failure of a computation producing `A`.
    ///
    /// # Errors
    ///
    /// Always.
    fn fail<A>(&self, error: E) -> Result<A, Raised> {
        Err(self.raise(error))
    }

    /// Raises the error built by `error` unless `condition` holds.
    ///
    /// # Errors
    ///
    /// When `condition` is false.
    fn ensure<F>(&self, condition: bool, error: F) -> Result<(), Raised>
    where
        F: FnOnce() -> E,
    {
        if condition {
            Ok(())
        } else {
            self.fail(error())
        }
    }

    /// Runs `action`; if it fails with an `E`, runs `handler` on that error.
    ///
    /// # Errors
    ///
    /// Failures that are not an `E` pass through, as do failures of `handler`.
    fn handle<A, F, H>(&self, action: F, handler: H) -> Result<A, Raised>
    where
        F: FnOnce() -> Result<A, Raised>,
        H: FnOnce(E) -> Result<A, Raised>,
    {
        match action() {
            Ok(value) => Ok(value),
            Err(raised) => handler(self.intercept(raised)?),
        }
    }

    /// Runs `action` and reifies an `E` failure as a value.
    ///
    /// # Errors
    ///
    /// Failures that are not an `E` pass through.
    fn attempt<A, F>(&self, action: F) -> Result<Result<A, E>, Raised>
    where
        F: FnOnce() -> Result<A, Raised>,
    {
        match action() {
            Ok(value) => Ok(Ok(value)),
            Err(raised) => self.intercept(raised).map(Err),
        }
    }
}

impl<E, C: RaiseCapability<E> + ?Sized> RaiseExt<E> for C {}

/// A Raise capability over `E` obtained by injecting into a Raise capability
/// over `O` through a prism.
///
/// Interception first asks the inner capability for an `O`, then matches it
/// against the prism. A carrier failure of some other alternative is raised
/// again through the inner capability, so it keeps propagating as the same
/// failure.
pub struct PrismRaise<O, E> {
    prism: SynthesizedPrism<O, E>,
    inner: Arc<dyn RaiseCapability<O>>,
}

impl<O, E> PrismRaise<O, E> {
    /// Injects through `prism` into `inner`.
    #[must_use]
    pub fn new(prism: SynthesizedPrism<O, E>, inner: Arc<dyn RaiseCapability<O>>) -> Self {
        Self { prism, inner }
    }
}

impl<O: Shaped, E: Shaped> RaiseCapability<E> for PrismRaise<O, E> {
    fn raise(&self, error: E) -> Raised {
        self.inner.raise(self.prism.review(error))
    }

    fn intercept(&self, raised: Raised) -> Result<E, Raised> {
        let outer = self.inner.intercept(raised)?;
        self.prism
            .try_extract(outer)
            .map_err(|outer| self.inner.raise(outer))
    }
}
