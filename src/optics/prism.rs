//! Prism optics: partial match, total build for one alternative of a sum.
//!
//! Unlike a Lens which always succeeds, a Prism may fail to extract a value
//! if the source holds a different alternative. Building is always total.
//!
//! # Laws
//!
//! Every Prism must satisfy two laws:
//!
//! 1. **PreviewReview Law**: Reviewing then previewing yields the original value.
//!    ```text
//!    prism.preview(&prism.review(value)) == Some(&value)
//!    ```
//!
//! 2. **ReviewPreview Law**: If preview succeeds, reviewing the result yields the original.
//!    ```text
//!    if prism.preview(source).is_some() then
//!        prism.review(prism.preview(source).unwrap().clone()) == source
//!    ```
//!
//! # Examples
//!
//! ```
//! use shapelift::optics::Prism;
//! use shapelift::shape::Shaped;
//! use shapelift::synthesis::{SynthesisConfig, synthesize_prism};
//!
//! #[derive(Clone, PartialEq, Debug, Shaped)]
//! enum Reading {
//!     Celsius(f64),
//!     Label(String),
//! }
//!
//! let celsius = synthesize_prism::<Reading, f64>(&SynthesisConfig::default()).unwrap();
//!
//! assert_eq!(celsius.preview(&Reading::Celsius(21.5)), Some(&21.5));
//! assert_eq!(celsius.preview(&Reading::Label("n/a".to_string())), None);
//! assert_eq!(celsius.review(3.0), Reading::Celsius(3.0));
//! ```

use std::marker::PhantomData;

/// A Prism focuses on a single alternative of a sum type.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole sum)
/// - `A`: The target type (the payload of the alternative)
///
/// # Laws
///
/// 1. **PreviewReview Law**: `prism.preview(&prism.review(value)) == Some(&value)`
/// 2. **ReviewPreview Law**: If preview succeeds, `prism.review(prism.preview(&source).unwrap().clone()) == source`
pub trait Prism<S, A> {
    /// Attempts to borrow the payload from the source.
    ///
    /// Returns `Some` if the source holds the focused alternative, `None` otherwise.
    fn preview<'a>(&self, source: &'a S) -> Option<&'a A>;

    /// Constructs the source from a payload. Always succeeds.
    fn review(&self, value: A) -> S;

    /// Extracts the payload from the source, taking ownership.
    fn preview_owned(&self, source: S) -> Option<A>;

    /// Modifies the payload if the source holds the focused alternative.
    ///
    /// Returns `None` if the alternative doesn't match.
    fn modify_option<F>(&self, source: S, function: F) -> Option<S>
    where
        F: FnOnce(A) -> A,
    {
        self.preview_owned(source)
            .map(|value| self.review(function(value)))
    }

    /// Modifies the payload if the source holds the focused alternative, or
    /// returns the source unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use shapelift::optics::Prism;
    /// use shapelift::shape::Shaped;
    /// use shapelift::synthesis::{SynthesisConfig, synthesize_prism};
    ///
    /// #[derive(Clone, PartialEq, Debug, Shaped)]
    /// enum Size {
    ///     Bytes(u64),
    ///     Unknown(String),
    /// }
    ///
    /// let bytes = synthesize_prism::<Size, u64>(&SynthesisConfig::default()).unwrap();
    ///
    /// assert_eq!(bytes.modify_or_identity(Size::Bytes(512), |b| b * 2), Size::Bytes(1024));
    ///
    /// let unknown = Size::Unknown("?".to_string());
    /// assert_eq!(bytes.modify_or_identity(unknown.clone(), |b| b * 2), unknown);
    /// ```
    fn modify_or_identity<F>(&self, source: S, function: F) -> S
    where
        F: FnOnce(A) -> A,
        S: Clone,
    {
        self.modify_option(source.clone(), function)
            .unwrap_or(source)
    }

    /// Composes this prism with another prism to focus on a nested alternative.
    fn compose<B, P>(self, other: P) -> ComposedPrism<Self, P, A>
    where
        Self: Sized,
        P: Prism<A, B>,
    {
        ComposedPrism::new(self, other)
    }
}

/// A prism composed of two prisms.
///
/// # Type Parameters
///
/// - `P1`: The type of the outer prism
/// - `P2`: The type of the inner prism
/// - `A`: The intermediate type (target of P1, source of P2)
pub struct ComposedPrism<P1, P2, A> {
    first: P1,
    second: P2,
    _marker: PhantomData<fn() -> A>,
}

impl<P1, P2, A> ComposedPrism<P1, P2, A> {
    /// Creates a new composed prism from an outer and an inner prism.
    #[must_use]
    pub const fn new(first: P1, second: P2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, A, B, P1, P2> Prism<S, B> for ComposedPrism<P1, P2, A>
where
    P1: Prism<S, A>,
    P2: Prism<A, B>,
    A: Clone + 'static,
{
    fn preview<'a>(&self, source: &'a S) -> Option<&'a B> {
        self.first
            .preview(source)
            .and_then(|intermediate| self.second.preview(intermediate))
    }

    fn review(&self, value: B) -> S {
        let intermediate = self.second.review(value);
        self.first.review(intermediate)
    }

    fn preview_owned(&self, source: S) -> Option<B> {
        self.first
            .preview_owned(source)
            .and_then(|intermediate| self.second.preview_owned(intermediate))
    }
}

impl<P1: Clone, P2: Clone, A> Clone for ComposedPrism<P1, P2, A> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
            _marker: PhantomData,
        }
    }
}

impl<P1: std::fmt::Debug, P2: std::fmt::Debug, A> std::fmt::Debug for ComposedPrism<P1, P2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedPrism")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}
