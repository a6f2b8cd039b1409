//! The State capability: read and write a piece of state.
//!
//! # Laws
//!
//! ## Get Set Law
//!
//! Setting the state to what was just read is a no-op:
//!
//! ```text
//! state.set(state.get())  ==  (nothing changes)
//! ```
//!
//! ## Set Get Law
//!
//! After setting a state, get returns that state:
//!
//! ```text
//! state.set(s); state.get() == s
//! ```
//!
//! ## Modify Composition Law
//!
//! ```text
//! state.modify(f); state.modify(g)  ==  state.modify(|s| g(f(s)))
//! ```
//!
//! (the right-hand side additionally runs as one atomic step).

use std::sync::Arc;

use crate::optics::Lens;
use crate::shape::Shaped;
use crate::synthesis::SynthesizedLens;

/// Read/write access to a state of type `S`.
///
/// `modify` is atomic with respect to other `modify` and `set` calls on
/// the same underlying resource. Its function may be invoked more than once
/// per call when writers contend, so it must be free of side effects.
pub trait StateCapability<S>: Send + Sync {
    /// Returns a snapshot of the current state.
    fn get(&self) -> S;

    /// Replaces the state.
    fn set(&self, value: S);

    /// Atomically replaces the state with `modifier(current)`.
    fn modify(&self, modifier: &dyn Fn(S) -> S);
}

/// Convenience operations available on every [`StateCapability`].
pub trait StateExt<S>: StateCapability<S> {
    /// Projects a value out of the current state.
    fn inspect<B, F>(&self, projection: F) -> B
    where
        F: FnOnce(&S) -> B,
    {
        projection(&self.get())
    }
}

impl<S, C: StateCapability<S> + ?Sized> StateExt<S> for C {}

/// A State capability over `A` obtained by focusing a State capability over
/// `O` through a lens.
///
/// Writes go through the inner capability's `modify`, so the lens adds no
/// atomicity of its own: the innermost edge instance decides it.
pub struct LensState<O, A> {
    lens: SynthesizedLens<O, A>,
    inner: Arc<dyn StateCapability<O>>,
}

impl<O, A> LensState<O, A> {
    /// Focuses `inner` through `lens`.
    #[must_use]
    pub fn new(lens: SynthesizedLens<O, A>, inner: Arc<dyn StateCapability<O>>) -> Self {
        Self { lens, inner }
    }
}

impl<O: Shaped, A: Shaped> StateCapability<A> for LensState<O, A> {
    fn get(&self) -> A {
        self.lens.get(&self.inner.get()).clone()
    }

    fn set(&self, value: A) {
        self.inner
            .modify(&|outer| self.lens.set(outer, value.clone()));
    }

    fn modify(&self, modifier: &dyn Fn(A) -> A) {
        self.inner
            .modify(&|outer| self.lens.modify(outer, modifier));
    }
}
