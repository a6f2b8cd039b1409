use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::shape::TypeKey;

/// The four capability kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CapabilityKind {
    /// Read and write a piece of state.
    State,
    /// Read a context value, optionally under a local modification.
    Ask,
    /// Emit output messages.
    Tell,
    /// Raise and handle typed failures.
    Raise,
}

impl CapabilityKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 4] = [Self::State, Self::Ask, Self::Tell, Self::Raise];

    /// The structural view lifting requires for this kind.
    ///
    /// State and context are composite, so a carrier must *contain* the
    /// payload. Output and failure are alternatives, so the payload must be
    /// *one of* the carrier's variants.
    #[must_use]
    pub const fn view(self) -> OpticView {
        match self {
            Self::State | Self::Ask => OpticView::Product,
            Self::Tell | Self::Raise => OpticView::Sum,
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::State => "State",
            Self::Ask => "Ask",
            Self::Tell => "Tell",
            Self::Raise => "Raise",
        };
        formatter.write_str(name)
    }
}

/// Which optic kind bridges a carrier and a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpticView {
    /// The carrier is a record containing the payload; bridged by a Lens.
    Product,
    /// The carrier is a union with the payload as a variant; bridged by a Prism.
    Sum,
}

impl fmt::Display for OpticView {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Product => "lens",
            Self::Sum => "prism",
        };
        formatter.write_str(name)
    }
}

/// The erased identity of a capability request: kind, carrier and payload.
///
/// # Examples
///
/// ```
/// use shapelift::capability::{CapabilityKind, RequestKey};
/// use shapelift::shape::TypeKey;
///
/// let key = RequestKey::new(CapabilityKind::Tell, TypeKey::of::<u8>(), TypeKey::of::<u16>());
/// assert_eq!(key.to_string(), "Tell[u8 => u16]");
/// assert!(!key.is_identity());
/// assert!(key.identity().is_identity());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestKey {
    kind: CapabilityKind,
    carrier: TypeKey,
    payload: TypeKey,
}

impl RequestKey {
    /// Creates a request key.
    #[must_use]
    pub const fn new(kind: CapabilityKind, carrier: TypeKey, payload: TypeKey) -> Self {
        Self {
            kind,
            carrier,
            payload,
        }
    }

    /// The capability kind.
    #[must_use]
    pub const fn kind(&self) -> CapabilityKind {
        self.kind
    }

    /// The type the underlying resource holds.
    #[must_use]
    pub const fn carrier(&self) -> TypeKey {
        self.carrier
    }

    /// The type the requesting code works with.
    #[must_use]
    pub const fn payload(&self) -> TypeKey {
        self.payload
    }

    /// Whether carrier and payload are the same type.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.carrier == self.payload
    }

    /// The request for the same kind over the carrier itself.
    #[must_use]
    pub const fn identity(&self) -> Self {
        Self {
            kind: self.kind,
            carrier: self.carrier,
            payload: self.carrier,
        }
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}[{} => {}]",
            self.kind, self.carrier, self.payload
        )
    }
}
