//! Lens optics: total get/set access to one component of a product.
//!
//! # Laws
//!
//! Every Lens must satisfy three laws:
//!
//! 1. **GetPut Law**: Getting and setting back yields the original.
//!    ```text
//!    lens.set(source, lens.get(&source).clone()) == source
//!    ```
//!
//! 2. **PutGet Law**: Setting then getting yields the set value.
//!    ```text
//!    lens.get(&lens.set(source, value)) == &value
//!    ```
//!
//! 3. **PutPut Law**: Two consecutive sets is equivalent to the last set.
//!    ```text
//!    lens.set(lens.set(source, v1), v2) == lens.set(source, v2)
//!    ```
//!
//! # Examples
//!
//! ```
//! use shapelift::optics::Lens;
//! use shapelift::shape::Shaped;
//! use shapelift::synthesis::{SynthesisConfig, synthesize_lens};
//!
//! #[derive(Clone, PartialEq, Debug, Shaped)]
//! struct Point { x: i32, label: String }
//!
//! let label = synthesize_lens::<Point, String>(&SynthesisConfig::default()).unwrap();
//!
//! let point = Point { x: 10, label: "origin".to_string() };
//! assert_eq!(label.get(&point), "origin");
//!
//! let renamed = label.set(point, "home".to_string());
//! assert_eq!(renamed.label, "home");
//! assert_eq!(renamed.x, 10);
//! ```

use std::marker::PhantomData;

/// A Lens focuses on a single component within a larger structure.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `A`: The target type (the focused component)
///
/// # Laws
///
/// 1. **GetPut Law**: `lens.set(source, lens.get(&source).clone()) == source`
/// 2. **PutGet Law**: `lens.get(&lens.set(source, value)) == &value`
/// 3. **PutPut Law**: `lens.set(lens.set(source, v1), v2) == lens.set(source, v2)`
pub trait Lens<S, A> {
    /// Gets a reference to the focused component.
    fn get<'a>(&self, source: &'a S) -> &'a A;

    /// Sets the focused component to a new value, returning a new source.
    ///
    /// # Arguments
    ///
    /// * `source` - The source structure (consumed)
    /// * `value` - The new value for the focused component
    fn set(&self, source: S, value: A) -> S;

    /// Modifies the focused component by applying a function.
    ///
    /// This is equivalent to getting the current value, applying the function,
    /// and setting the result.
    ///
    /// # Example
    ///
    /// ```
    /// use shapelift::optics::Lens;
    /// use shapelift::shape::Shaped;
    /// use shapelift::synthesis::{SynthesisConfig, synthesize_lens};
    ///
    /// #[derive(Clone, PartialEq, Debug, Shaped)]
    /// struct Counter { hits: u64 }
    ///
    /// let hits = synthesize_lens::<Counter, u64>(&SynthesisConfig::default()).unwrap();
    /// let bumped = hits.modify(Counter { hits: 1 }, |count| count + 1);
    /// assert_eq!(bumped.hits, 2);
    /// ```
    fn modify<F>(&self, source: S, function: F) -> S
    where
        F: FnOnce(A) -> A,
        A: Clone,
    {
        let current = self.get(&source).clone();
        self.set(source, function(current))
    }

    /// Modifies the focused component by applying a function to a reference.
    ///
    /// Useful when the new value can be computed without cloning the old one.
    fn modify_ref<F>(&self, source: S, function: F) -> S
    where
        F: FnOnce(&A) -> A,
    {
        let new_value = function(self.get(&source));
        self.set(source, new_value)
    }

    /// Composes this lens with another lens to focus on a nested component.
    ///
    /// # Example
    ///
    /// ```
    /// use shapelift::optics::Lens;
    /// use shapelift::shape::Shaped;
    /// use shapelift::synthesis::{SynthesisConfig, synthesize_lens};
    ///
    /// #[derive(Clone, PartialEq, Debug, Shaped)]
    /// struct Address { street: String }
    ///
    /// #[derive(Clone, PartialEq, Debug, Shaped)]
    /// struct Person { age: u32, address: Address }
    ///
    /// let config = SynthesisConfig::default();
    /// let address = synthesize_lens::<Person, Address>(&config).unwrap();
    /// let street = synthesize_lens::<Address, String>(&config).unwrap();
    /// let person_street = address.compose(street);
    ///
    /// let person = Person { age: 30, address: Address { street: "Main St".to_string() } };
    /// assert_eq!(person_street.get(&person), "Main St");
    /// ```
    fn compose<B, L>(self, other: L) -> ComposedLens<Self, L, A>
    where
        Self: Sized,
        L: Lens<A, B>,
    {
        ComposedLens::new(self, other)
    }
}

/// A lens composed of two lenses.
///
/// # Type Parameters
///
/// - `L1`: The type of the outer lens
/// - `L2`: The type of the inner lens
/// - `A`: The intermediate type (target of L1, source of L2)
pub struct ComposedLens<L1, L2, A> {
    first: L1,
    second: L2,
    _marker: PhantomData<fn() -> A>,
}

impl<L1, L2, A> ComposedLens<L1, L2, A> {
    /// Creates a new composed lens from an outer and an inner lens.
    #[must_use]
    pub const fn new(first: L1, second: L2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, A, B, L1, L2> Lens<S, B> for ComposedLens<L1, L2, A>
where
    L1: Lens<S, A>,
    L2: Lens<A, B>,
    A: Clone + 'static,
{
    fn get<'a>(&self, source: &'a S) -> &'a B {
        let intermediate = self.first.get(source);
        self.second.get(intermediate)
    }

    fn set(&self, source: S, value: B) -> S {
        let intermediate = self.first.get(&source).clone();
        let new_intermediate = self.second.set(intermediate, value);
        self.first.set(source, new_intermediate)
    }
}

impl<L1: Clone, L2: Clone, A> Clone for ComposedLens<L1, L2, A> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
            _marker: PhantomData,
        }
    }
}

impl<L1: std::fmt::Debug, L2: std::fmt::Debug, A> std::fmt::Debug for ComposedLens<L1, L2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedLens")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}
