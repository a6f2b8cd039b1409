use std::sync::Arc;

use tracing::trace;

use super::cell::Ref;
use crate::capability::StateCapability;

/// The edge State capability over a [`Ref`].
///
/// `modify` is an optimistic retry loop: read a snapshot, apply the function,
/// and compare-and-set; on contention start over from a fresh read. The
/// function therefore runs at least once and possibly more often.
pub struct CellState<T> {
    cell: Arc<Ref<T>>,
}

impl<T> CellState<T> {
    /// Creates a state backed by a fresh cell holding `initial`.
    pub fn new(initial: T) -> Self {
        Self::from_ref(Arc::new(Ref::new(initial)))
    }

    /// Creates a state backed by an existing cell.
    pub const fn from_ref(cell: Arc<Ref<T>>) -> Self {
        Self { cell }
    }

    /// The backing cell.
    pub const fn cell(&self) -> &Arc<Ref<T>> {
        &self.cell
    }
}

impl<T> Clone for CellState<T> {
    fn clone(&self) -> Self {
        Self::from_ref(Arc::clone(&self.cell))
    }
}

impl<T: Clone + Send + Sync> StateCapability<T> for CellState<T> {
    fn get(&self) -> T {
        self.cell.get()
    }

    fn set(&self, value: T) {
        self.cell.set(value);
    }

    fn modify(&self, modifier: &dyn Fn(T) -> T) {
        let mut attempt = 1_u32;
        loop {
            let current = self.cell.read();
            let next = modifier(T::clone(&current));
            if self.cell.compare_and_set(&current, next) {
                return;
            }
            trace!(attempt, "state modify contended, retrying");
            attempt = attempt.saturating_add(1);
        }
    }
}

/// Runs `block` against a fresh cell-backed state and returns the block's
/// result together with the final state.
///
/// # Examples
///
/// ```
/// use shapelift::capability::StateCapability;
/// use shapelift::edge::scoped_state;
///
/// let (label, total) = scoped_state(0_u32, |state| {
///     for n in 1..=4 {
///         state.modify(&|total| total + n);
///     }
///     "summed"
/// });
/// assert_eq!((label, total), ("summed", 10));
/// ```
pub fn scoped_state<S, T, F>(initial: S, block: F) -> (T, S)
where
    S: Clone + Send + Sync + 'static,
    F: FnOnce(Arc<dyn StateCapability<S>>) -> T,
{
    let state = CellState::new(initial);
    let result = block(Arc::new(state.clone()));
    (result, state.get())
}
