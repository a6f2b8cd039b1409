//! Error types for capability resolution.

use std::error::Error;
use std::fmt;

use crate::capability::RequestKey;
use crate::synthesis::OpticError;

/// Why a capability request could not be answered.
///
/// # Examples
///
/// ```
/// use shapelift::capability::{CapabilityRequest, State};
/// use shapelift::resolve::{CapabilityRegistry, ResolutionError, Resolver};
///
/// let mut resolver = Resolver::new(CapabilityRegistry::new());
/// let error = resolver.resolve::<State<String>>().err().unwrap();
/// assert_eq!(error, ResolutionError::NoInstance { request: State::<String>::key() });
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionError {
    /// An identity request reached the bottom of the hierarchy and no edge
    /// instance is registered for it.
    NoInstance {
        /// The unanswered identity request.
        request: RequestKey,
    },
    /// The carrier does not admit a unique optic to the payload.
    Synthesis {
        /// The request whose optic failed to synthesize.
        request: RequestKey,
        /// The synthesis failure.
        source: OpticError,
    },
}

impl ResolutionError {
    /// The request that failed.
    #[must_use]
    pub const fn request(&self) -> RequestKey {
        match self {
            Self::NoInstance { request } | Self::Synthesis { request, .. } => *request,
        }
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInstance { request } => {
                write!(formatter, "no instance registered for {request}")
            }
            Self::Synthesis { request, source } => {
                write!(formatter, "cannot lift {request}: {source}")
            }
        }
    }
}

impl Error for ResolutionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoInstance { .. } => None,
            Self::Synthesis { source, .. } => Some(source),
        }
    }
}
