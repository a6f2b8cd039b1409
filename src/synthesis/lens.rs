//! Lens synthesis over record shapes.
//!
//! The synthesizer walks a record's fields breadth-first looking for the one
//! field whose declared type is the requested target. Shallower matches
//! always win; two matches on the same level are an error.
//!
//! # Examples
//!
//! ```
//! use shapelift::optics::Lens;
//! use shapelift::shape::Shaped;
//! use shapelift::synthesis::{LensSynthesizer, SynthesisConfig};
//!
//! #[derive(Clone, PartialEq, Debug, Shaped)]
//! struct Credentials { token: String }
//!
//! #[derive(Clone, PartialEq, Debug, Shaped)]
//! struct Session { id: u64, credentials: Credentials }
//!
//! let synthesizer = LensSynthesizer::new(SynthesisConfig::default());
//! let token = synthesizer.synthesize::<Session, String>().unwrap();
//! assert_eq!(token.path().names().to_string(), "credentials.token");
//!
//! let session = Session { id: 7, credentials: Credentials { token: "abc".to_string() } };
//! let rotated = token.set(session, "xyz".to_string());
//! assert_eq!(rotated.credentials.token, "xyz");
//! assert_eq!(rotated.id, 7);
//! ```

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use super::config::SynthesisConfig;
use super::error::{OpticError, OpticPath};
use super::search::{Edge, Path, SearchFailure, breadth_first, path_names};
use super::{Synthesize, inconsistent_descriptor};
use crate::optics::Lens;
use crate::shape::{FieldShape, RecordShape, ShapeKind, Shaped, TypeKey};

impl Edge for FieldShape {
    fn name(&self) -> &'static str {
        Self::name(self)
    }

    fn type_key(&self) -> TypeKey {
        Self::type_key(self)
    }

    fn descend(&self) -> Option<Vec<Self>> {
        self.shape()
            .into_record()
            .map(|record| record.fields().to_vec())
    }
}

/// The field path behind a synthesized lens.
#[derive(Clone)]
pub struct LensPath {
    outer: TypeKey,
    target: TypeKey,
    steps: Path<FieldShape>,
}

impl LensPath {
    /// The record type the path starts at.
    #[must_use]
    pub const fn outer(&self) -> TypeKey {
        self.outer
    }

    /// The type the path ends at.
    #[must_use]
    pub const fn target(&self) -> TypeKey {
        self.target
    }

    /// Fields walked, outermost first.
    #[must_use]
    pub fn steps(&self) -> &[FieldShape] {
        &self.steps
    }

    /// Field names walked, outermost first.
    #[must_use]
    pub fn names(&self) -> OpticPath {
        path_names(&self.steps)
    }
}

impl fmt::Debug for LensPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LensPath")
            .field("outer", &self.outer)
            .field("target", &self.target)
            .field("steps", &self.names().to_string())
            .finish()
    }
}

/// Finds lawful field paths inside record shapes.
#[derive(Clone, Copy, Debug, Default)]
pub struct LensSynthesizer {
    config: SynthesisConfig,
}

impl LensSynthesizer {
    /// Creates a synthesizer with the given search bounds.
    #[must_use]
    pub const fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    /// Finds the unique shallowest field path from `record` to `target`.
    ///
    /// # Errors
    ///
    /// - [`OpticError::Ambiguous`] if the shallowest level holding a `target`
    ///   field holds more than one
    /// - [`OpticError::NotFound`] if no field of type `target` is reachable
    pub fn find_path(&self, record: &RecordShape, target: TypeKey) -> Result<LensPath, OpticError> {
        let outer = record.type_key();
        trace!(%outer, %target, "synthesizing lens");
        breadth_first(
            outer,
            record.fields().to_vec(),
            target,
            self.config.max_depth(),
        )
        .map(|steps| LensPath {
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

    /// Synthesizes a lens from `S` to `A`.
    ///
    /// # Errors
    ///
    /// [`OpticError::ShapeMismatch`] if `S` is not a record, otherwise as
    /// [`LensSynthesizer::find_path`].
    pub fn synthesize<S: Shaped, A: Shaped>(&self) -> Result<SynthesizedLens<S, A>, OpticError> {
        let shape = S::shape();
        let found = shape.kind();
        let record = shape.into_record().ok_or(OpticError::ShapeMismatch {
            outer: TypeKey::of::<S>(),
            expected: ShapeKind::Record,
            found,
        })?;
        self.find_path(&record, TypeKey::of::<A>())
            .map(SynthesizedLens::from_path)
    }
}

/// A lens built from a synthesized field path.
///
/// Reading walks the path through shared borrows; writing walks it through
/// mutable borrows and replaces the focused field in place, so every other
/// field of every record on the path is left untouched.
///
/// # Panics
///
/// `get` and `set` panic if a shape descriptor on the path reports a field
/// type that its accessor does not actually return.
pub struct SynthesizedLens<S, A> {
    path: LensPath,
    _marker: PhantomData<fn(S) -> A>,
}

impl<S, A> SynthesizedLens<S, A> {
    const fn from_path(path: LensPath) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// The field path this lens walks.
    #[must_use]
    pub const fn path(&self) -> &LensPath {
        &self.path
    }
}

impl<S: Shaped, A: Shaped> SynthesizedLens<S, A> {
    /// Mutably borrows the focused field.
    pub fn focus_mut<'a>(&self, source: &'a mut S) -> &'a mut A {
        let mut cursor: &'a mut dyn Any = source;
        for step in self.path.steps() {
            let current = cursor;
            cursor = step
                .get_mut(current)
                .unwrap_or_else(|| inconsistent_descriptor(step.name()));
        }
        cursor
            .downcast_mut::<A>()
            .unwrap_or_else(|| inconsistent_descriptor(self.last_step_name()))
    }

    fn last_step_name(&self) -> &'static str {
        self.path.steps().last().map_or("<root>", |step| step.name())
    }
}

impl<S: Shaped, A: Shaped> Lens<S, A> for SynthesizedLens<S, A> {
    fn get<'a>(&self, source: &'a S) -> &'a A {
        let mut cursor: &'a dyn Any = source;
        for step in self.path.steps() {
            cursor = step
                .get(cursor)
                .unwrap_or_else(|| inconsistent_descriptor(step.name()));
        }
        cursor
            .downcast_ref::<A>()
            .unwrap_or_else(|| inconsistent_descriptor(self.last_step_name()))
    }

    fn set(&self, mut source: S, value: A) -> S {
        *self.focus_mut(&mut source) = value;
        source
    }
}

impl<S: Shaped, A: Shaped> Synthesize<S, A> for SynthesizedLens<S, A> {
    fn synthesize(config: &SynthesisConfig) -> Result<Self, OpticError> {
        LensSynthesizer::new(*config).synthesize()
    }

    fn route(&self) -> OpticPath {
        self.path.names()
    }
}

impl<S, A> Clone for SynthesizedLens<S, A> {
    fn clone(&self) -> Self {
        Self::from_path(self.path.clone())
    }
}

impl<S, A> fmt::Debug for SynthesizedLens<S, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SynthesizedLens")
            .field("path", &self.path)
            .finish()
    }
}
