use std::sync::Arc;

use super::cell::Ref;
use crate::capability::{AskCapability, Modifier};

/// The edge Ask capability over a constant context.
#[derive(Clone, Debug)]
pub struct ValueAsk<R> {
    value: R,
}

impl<R> ValueAsk<R> {
    /// Creates a capability that always answers `value`.
    pub const fn new(value: R) -> Self {
        Self { value }
    }
}

impl<R: Clone + Send + Sync + 'static> AskCapability<R> for ValueAsk<R> {
    fn ask(&self) -> R {
        self.value.clone()
    }

    fn scoped(&self, modifier: Modifier<R>) -> Arc<dyn AskCapability<R>> {
        Arc::new(Self::new(modifier(self.value.clone())))
    }
}

/// The edge Ask capability over a [`Ref`]: every `ask` reads the cell anew.
pub struct CellAsk<R> {
    cell: Arc<Ref<R>>,
}

impl<R> CellAsk<R> {
    /// Creates a capability that reads `cell`.
    pub const fn new(cell: Arc<Ref<R>>) -> Self {
        Self { cell }
    }
}

impl<R> Clone for CellAsk<R> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.cell))
    }
}

impl<R: Clone + Send + Sync + 'static> AskCapability<R> for CellAsk<R> {
    fn ask(&self) -> R {
        self.cell.get()
    }

    fn scoped(&self, modifier: Modifier<R>) -> Arc<dyn AskCapability<R>> {
        Arc::new(ScopedAsk::new(Arc::new(self.clone()), modifier))
    }
}

/// A view of another Ask capability through a modifier, applied on every
/// `ask`.
///
/// Scoping a `ScopedAsk` again composes the modifiers, earlier first, over
/// the same base.
pub struct ScopedAsk<R> {
    base: Arc<dyn AskCapability<R>>,
    modifier: Modifier<R>,
}

impl<R> ScopedAsk<R> {
    /// Views `base` through `modifier`.
    pub fn new(base: Arc<dyn AskCapability<R>>, modifier: Modifier<R>) -> Self {
        Self { base, modifier }
    }
}

impl<R: 'static> AskCapability<R> for ScopedAsk<R> {
    fn ask(&self) -> R {
        (self.modifier)(self.base.ask())
    }

    fn scoped(&self, modifier: Modifier<R>) -> Arc<dyn AskCapability<R>> {
        let first = Arc::clone(&self.modifier);
        Arc::new(Self::new(
            Arc::clone(&self.base),
            Arc::new(move |context| modifier(first(context))),
        ))
    }
}
