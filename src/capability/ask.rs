//! The Ask capability: read a context value, or run a block under a locally
//! modified one.
//!
//! # Laws
//!
//! ## Local Ask Law
//!
//! ```text
//! ask.local(f, |scoped| scoped.ask())  ==  f(ask.ask())
//! ```
//!
//! ## Local Composition Law
//!
//! ```text
//! ask.local(f, |a| a.local(g, |b| b.ask()))  ==  g(f(ask.ask()))
//! ```
//!
//! ## Local Containment Law
//!
//! A local modification is invisible to the capability it was derived from,
//! both during and after the block.

use std::sync::Arc;

use crate::optics::Lens;
use crate::shape::Shaped;
use crate::synthesis::SynthesizedLens;

/// A shareable context modifier, as passed to [`AskCapability::scoped`].
pub type Modifier<R> = Arc<dyn Fn(R) -> R + Send + Sync>;

/// Read access to a context of type `R`.
pub trait AskCapability<R>: Send + Sync {
    /// Returns the current context.
    fn ask(&self) -> R;

    /// Returns a capability that sees `modifier(context)` wherever `self`
    /// sees `context`. `self` is unaffected.
    fn scoped(&self, modifier: Modifier<R>) -> Arc<dyn AskCapability<R>>;
}

/// Convenience operations available on every [`AskCapability`].
pub trait AskExt<R: 'static>: AskCapability<R> {
    /// Projects a value out of the current context.
    fn reader<B, F>(&self, projection: F) -> B
    where
        F: FnOnce(R) -> B,
    {
        projection(self.ask())
    }

    /// Runs `block` against a capability that sees `modifier(context)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shapelift::capability::{AskCapability, AskExt};
    /// use shapelift::edge::ValueAsk;
    ///
    /// let depth = ValueAsk::new(0_u32);
    /// let nested = depth.local(|d| d + 1, |inner| inner.local(|d| d * 10, |inner| inner.ask()));
    /// assert_eq!(nested, 10);
    /// assert_eq!(depth.ask(), 0);
    /// ```
    fn local<T, F, B>(&self, modifier: F, block: B) -> T
    where
        F: Fn(R) -> R + Send + Sync + 'static,
        B: FnOnce(&dyn AskCapability<R>) -> T,
    {
        let scoped = self.scoped(Arc::new(modifier));
        block(scoped.as_ref())
    }
}

impl<R: 'static, C: AskCapability<R> + ?Sized> AskExt<R> for C {}

/// An Ask capability over `A` obtained by focusing an Ask capability over `O`
/// through a lens.
///
/// A local modification of `A` becomes a local modification of `O` that
/// rewrites only the focused field.
pub struct LensAsk<O, A> {
    lens: SynthesizedLens<O, A>,
    inner: Arc<dyn AskCapability<O>>,
}

impl<O, A> LensAsk<O, A> {
    /// Focuses `inner` through `lens`.
    #[must_use]
    pub fn new(lens: SynthesizedLens<O, A>, inner: Arc<dyn AskCapability<O>>) -> Self {
        Self { lens, inner }
    }
}

impl<O: Shaped, A: Shaped> AskCapability<A> for LensAsk<O, A> {
    fn ask(&self) -> A {
        self.lens.get(&self.inner.ask()).clone()
    }

    fn scoped(&self, modifier: Modifier<A>) -> Arc<dyn AskCapability<A>> {
        let lens = self.lens.clone();
        let outer: Modifier<O> = Arc::new(move |context: O| lens.modify(context, &*modifier));
        Arc::new(Self {
            lens: self.lens.clone(),
            inner: self.inner.scoped(outer),
        })
    }
}
