//! Prism synthesis over union shapes.
//!
//! Mirrors [`LensSynthesizer`](super::LensSynthesizer) over variants instead
//! of fields. Only variants carrying a single payload take part; a variant
//! whose payload is itself a union is searched one level deeper.
//!
//! # Examples
//!
//! ```
//! use shapelift::optics::Prism;
//! use shapelift::shape::Shaped;
//! use shapelift::synthesis::{PrismSynthesizer, SynthesisConfig};
//!
//! #[derive(Clone, PartialEq, Debug, Shaped)]
//! struct Timeout { millis: u64 }
//!
//! #[derive(Clone, PartialEq, Debug, Shaped)]
//! enum NetworkError { Timeout(Timeout), Refused(String) }
//!
//! #[derive(Clone, PartialEq, Debug, Shaped)]
//! enum AppError { Network(NetworkError), Config(String) }
//!
//! let synthesizer = PrismSynthesizer::new(SynthesisConfig::default());
//! let timeout = synthesizer.synthesize::<AppError, Timeout>().unwrap();
//! assert_eq!(timeout.path().names().to_string(), "Network.Timeout");
//!
//! let error = timeout.review(Timeout { millis: 250 });
//! assert_eq!(error, AppError::Network(NetworkError::Timeout(Timeout { millis: 250 })));
//! assert_eq!(timeout.preview(&AppError::Config("bad".to_string())), None);
//! ```

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use super::config::SynthesisConfig;
use super::error::{OpticError, OpticPath};
use super::search::{Edge, Path, SearchFailure, breadth_first, path_names};
use super::{Synthesize, inconsistent_descriptor};
use crate::optics::Prism;
use crate::shape::{ShapeKind, Shaped, TypeKey, UnionShape, VariantShape};

impl Edge for VariantShape {
    fn name(&self) -> &'static str {
        Self::name(self)
    }

    fn type_key(&self) -> TypeKey {
        Self::type_key(self)
    }

    fn descend(&self) -> Option<Vec<Self>> {
        self.shape()
            .into_union()
            .map(|union| union.variants().to_vec())
    }
}

/// The variant path behind a synthesized prism.
#[derive(Clone)]
pub struct PrismPath {
    outer: TypeKey,
    target: TypeKey,
    steps: Path<VariantShape>,
}

impl PrismPath {
    /// The union type the path starts at.
    #[must_use]
    pub const fn outer(&self) -> TypeKey {
        self.outer
    }

    /// The payload type the path ends at.
    #[must_use]
    pub const fn target(&self) -> TypeKey {
        self.target
    }

    /// Variants walked, outermost first.
    #[must_use]
    pub fn steps(&self) -> &[VariantShape] {
        &self.steps
    }

    /// Variant names walked, outermost first.
    #[must_use]
    pub fn names(&self) -> OpticPath {
        path_names(&self.steps)
    }
}

impl fmt::Debug for PrismPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PrismPath")
            .field("outer", &self.outer)
            .field("target", &self.target)
            .field("steps", &self.names().to_string())
            .finish()
    }
}

/// Finds lawful variant paths inside union shapes.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrismSynthesizer {
    config: SynthesisConfig,
}

impl PrismSynthesizer {
    /// Creates a synthesizer with the given search bounds.
    #[must_use]
    pub const fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    /// Finds the unique shallowest variant path from `union` to `target`.
    ///
    /// # Errors
    ///
    /// - [`OpticError::Ambiguous`] if the shallowest level holding a `target`
    ///   variant holds more than one
    /// - [`OpticError::NotFound`] if no variant carrying `target` is reachable
    pub fn find_path(&self, union: &UnionShape, target: TypeKey) -> Result<PrismPath, OpticError> {
        let outer = union.type_key();
        trace!(%outer, %target, "synthesizing prism");
        breadth_first(
            outer,
            union.variants().to_vec(),
            target,
            self.config.max_depth(),
        )
        .map(|steps| PrismPath {
            outer,
            target,
            steps,
        })
        .map_err(|failure| match failure {
            SearchFailure::Ambiguous { depth, paths } => OpticError::Ambiguous {
                outer,
                target,
                depth,
                paths,
            },
            SearchFailure::NotFound { depth } => OpticError::NotFound {
                outer,
                target,
                depth,
            },
        })
    }

    /// Synthesizes a prism from `S` to `A`.
    ///
    /// # Errors
    ///
    /// [`OpticError::ShapeMismatch`] if `S` is not a union, otherwise as
    /// [`PrismSynthesizer::find_path`].
    pub fn synthesize<S: Shaped, A: Shaped>(&self) -> Result<SynthesizedPrism<S, A>, OpticError> {
        let shape = S::shape();
        let found = shape.kind();
        let union = shape.into_union().ok_or(OpticError::ShapeMismatch {
            outer: TypeKey::of::<S>(),
            expected: ShapeKind::Union,
            found,
        })?;
        self.find_path(&union, TypeKey::of::<A>())
            .map(SynthesizedPrism::from_path)
    }
}

/// A prism built from a synthesized variant path.
///
/// # Panics
///
/// `preview`, `review` and `try_extract` panic if a shape descriptor on the
/// path reports a payload type that its matcher or constructor does not
/// actually produce.
pub struct SynthesizedPrism<S, A> {
    path: PrismPath,
    _marker: PhantomData<fn(S) -> A>,
}

impl<S, A> SynthesizedPrism<S, A> {
    const fn from_path(path: PrismPath) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// The variant path this prism walks.
    #[must_use]
    pub const fn path(&self) -> &PrismPath {
        &self.path
    }
}

impl<S: Shaped, A: Shaped> SynthesizedPrism<S, A> {
    /// Moves the payload out of `source`, or hands `source` back unchanged
    /// when it holds a different alternative.
    ///
    /// # Errors
    ///
    /// Returns the original value when the path does not match it.
    ///
    /// # Examples
    ///
    /// ```
    /// use shapelift::shape::Shaped;
    /// use shapelift::synthesis::{SynthesisConfig, synthesize_prism};
    ///
    /// #[derive(Clone, PartialEq, Debug, Shaped)]
    /// enum Input { Text(String), Number(i64) }
    ///
    /// let number = synthesize_prism::<Input, i64>(&SynthesisConfig::default()).unwrap();
    /// assert_eq!(number.try_extract(Input::Number(4)), Ok(4));
    /// assert_eq!(
    ///     number.try_extract(Input::Text("four".to_string())),
    ///     Err(Input::Text("four".to_string()))
    /// );
    /// ```
    pub fn try_extract(&self, source: S) -> Result<A, S> {
        let steps = self.path.steps();
        let mut cursor: Box<dyn Any> = Box::new(source);
        for (index, step) in steps.iter().enumerate() {
            match step.extract(cursor) {
                Ok(payload) => cursor = payload,
                Err(unmatched) => {
                    // Every enclosing step matched, so building them back in
                    // reverse restores the original value.
                    let restored = steps[..index]
                        .iter()
                        .rev()
                        .fold(unmatched, |payload, outer| outer.build(payload));
                    return Err(unbox::<S>(restored, step.name()));
                }
            }
        }
        Ok(unbox::<A>(cursor, self.last_step_name()))
    }

    fn last_step_name(&self) -> &'static str {
        self.path.steps().last().map_or("<root>", |step| step.name())
    }
}

fn unbox<T: Any>(value: Box<dyn Any>, step: &'static str) -> T {
    match value.downcast::<T>() {
        Ok(value) => *value,
        Err(_) => inconsistent_descriptor(step),
    }
}

impl<S: Shaped, A: Shaped> Prism<S, A> for SynthesizedPrism<S, A> {
    fn preview<'a>(&self, source: &'a S) -> Option<&'a A> {
        let mut cursor: &'a dyn Any = source;
        for step in self.path.steps() {
            cursor = step.preview(cursor)?;
        }
        Some(
            cursor
                .downcast_ref::<A>()
                .unwrap_or_else(|| inconsistent_descriptor(self.last_step_name())),
        )
    }

    fn review(&self, value: A) -> S {
        let built = self
            .path
            .steps()
            .iter()
            .rev()
            .fold(Box::new(value) as Box<dyn Any>, |payload, step| {
                step.build(payload)
            });
        let root = self.path.steps().first().map_or("<root>", |step| step.name());
        unbox::<S>(built, root)
    }

    fn preview_owned(&self, source: S) -> Option<A> {
        self.try_extract(source).ok()
    }
}

impl<S: Shaped, A: Shaped> Synthesize<S, A> for SynthesizedPrism<S, A> {
    fn synthesize(config: &SynthesisConfig) -> Result<Self, OpticError> {
        PrismSynthesizer::new(*config).synthesize()
    }

    fn route(&self) -> OpticPath {
        self.path.names()
    }
}

impl<S, A> Clone for SynthesizedPrism<S, A> {
    fn clone(&self) -> Self {
        Self::from_path(self.path.clone())
    }
}

impl<S, A> fmt::Debug for SynthesizedPrism<S, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SynthesizedPrism")
            .field("path", &self.path)
            .finish()
    }
}
