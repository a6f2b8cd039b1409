//! Error types for optic synthesis.
//!
//! Every synthesis failure is a setup-time failure: it means the requested
//! composition cannot be built from the declared shapes and has to be fixed
//! where the request is made.

use std::fmt;

use crate::shape::{ShapeKind, TypeKey};

/// The field or variant names leading from the outer type to a candidate.
///
/// # Examples
///
/// ```
/// use shapelift::synthesis::OpticPath;
///
/// let path = OpticPath::new(vec!["user", "name"]);
/// assert_eq!(path.to_string(), "user.name");
/// assert_eq!(path.depth(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpticPath {
    segments: Vec<&'static str>,
}

impl OpticPath {
    /// Creates a path from its segments, outermost first.
    #[must_use]
    pub const fn new(segments: Vec<&'static str>) -> Self {
        Self { segments }
    }

    /// Segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[&'static str] {
        &self.segments
    }

    /// Structural depth of the path's end point. A direct field is depth 0.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}

impl fmt::Display for OpticPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.segments.join("."))
    }
}

/// Represents a failure to synthesize a Lens or Prism.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpticError {
    /// Two or more candidates were found at the shallowest matching depth.
    Ambiguous {
        /// The type searched.
        outer: TypeKey,
        /// The type searched for.
        target: TypeKey,
        /// Depth at which the candidates were found.
        depth: usize,
        /// The conflicting paths in declaration order, at most
        /// [`MAX_REPORTED_PATHS`](super::MAX_REPORTED_PATHS) of them.
        paths: Vec<OpticPath>,
    },
    /// The target is unreachable within the cycle guard and depth bound.
    NotFound {
        /// The type searched.
        outer: TypeKey,
        /// The type searched for.
        target: TypeKey,
        /// Deepest level that was searched.
        depth: usize,
    },
    /// The outer type does not have the shape the optic kind requires.
    ShapeMismatch {
        /// The type searched.
        outer: TypeKey,
        /// The shape the optic kind needs.
        expected: ShapeKind,
        /// The shape the type actually has.
        found: ShapeKind,
    },
}

impl fmt::Display for OpticError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ambiguous {
                outer,
                target,
                depth,
                paths,
            } => {
                let joined = paths
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    formatter,
                    "ambiguous path from {outer} to {target} at depth {depth}: {joined}"
                )
            }
            Self::NotFound {
                outer,
                target,
                depth,
            } => write!(
                formatter,
                "no path from {outer} to {target} within depth {depth}"
            ),
            Self::ShapeMismatch {
                outer,
                expected,
                found,
            } => write!(formatter, "{outer} is {found}, expected {expected}"),
        }
    }
}

impl std::error::Error for OpticError {}
