use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

/// A shared mutable cell holding immutable snapshots.
///
/// Readers receive the current snapshot as an `Arc<T>`; writers swap in a
/// new snapshot. [`Ref::compare_and_set`] swaps only if the cell still holds
/// the exact snapshot the caller read, which is what optimistic updates are
/// built from. Reads and swaps are lock-free.
///
/// # Examples
///
/// ```
/// use shapelift::edge::Ref;
///
/// let cell = Ref::new(1);
/// let seen = cell.read();
/// assert!(cell.compare_and_set(&seen, 2));
/// assert!(!cell.compare_and_set(&seen, 3));
/// assert_eq!(cell.get(), 2);
/// ```
pub struct Ref<T> {
    slot: ArcSwap<T>,
}

impl<T> Ref<T> {
    /// Creates a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            slot: ArcSwap::from_pointee(value),
        }
    }

    /// The current snapshot.
    pub fn read(&self) -> Arc<T> {
        self.slot.load_full()
    }

    /// Replaces the snapshot with `next` if the cell still holds `expected`.
    ///
    /// Snapshots are compared by identity, not by value: a snapshot that was
    /// replaced by an equal value no longer matches.
    pub fn compare_and_set(&self, expected: &Arc<T>, next: T) -> bool {
        let previous = self.slot.compare_and_swap(expected, Arc::new(next));
        Arc::ptr_eq(&*previous, expected)
    }

    /// Replaces the snapshot unconditionally.
    pub fn set(&self, value: T) {
        self.slot.store(Arc::new(value));
    }
}

impl<T: Clone> Ref<T> {
    /// A copy of the current value.
    pub fn get(&self) -> T {
        T::clone(&self.read())
    }
}

impl<T: Default> Default for Ref<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Ref<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Ref").field(&self.read()).finish()
    }
}
