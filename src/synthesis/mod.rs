//! Setup-time synthesis of lawful optics from shape descriptors.
//!
//! Given an outer type and a target type, the synthesizers search the outer
//! type's [`Shape`](crate::shape::Shape) breadth-first for the unique
//! shallowest occurrence of the target:
//!
//! - [`LensSynthesizer`] searches record fields and yields a
//!   [`SynthesizedLens`]
//! - [`PrismSynthesizer`] searches union variants and yields a
//!   [`SynthesizedPrism`]
//!
//! # Search rules
//!
//! 1. Depth 0 is the outer type's own fields (or variants), scanned in
//!    declaration order.
//! 2. The first depth holding exactly one candidate wins, even if deeper
//!    levels would also be unique.
//! 3. A depth holding several candidates fails with
//!    [`OpticError::Ambiguous`]; the search never picks one.
//! 4. A nested type is expanded once, at the shallowest level it is reached
//!    on, and the search stops at [`SynthesisConfig::max_depth`]; an
//!    unreachable target fails with [`OpticError::NotFound`].
//!
//! The search cost grows with the number of distinct types in a shape, not
//! with the number of paths through it.
//!
//! Synthesis is pure. Its results are `Clone + Send + Sync` and can be cached
//! and shared freely.

mod config;
mod error;
mod lens;
mod prism;
mod search;

pub use config::DEFAULT_MAX_DEPTH;
pub use config::SynthesisConfig;

pub use error::OpticError;
pub use error::OpticPath;

pub use lens::LensPath;
pub use lens::LensSynthesizer;
pub use lens::SynthesizedLens;

pub use prism::PrismPath;
pub use prism::PrismSynthesizer;
pub use prism::SynthesizedPrism;

pub use search::MAX_REPORTED_PATHS;

use crate::shape::Shaped;

/// An optic that can be synthesized from the shapes of `S` and `A`.
///
/// Implemented by [`SynthesizedLens`] and [`SynthesizedPrism`]; the resolver
/// uses it to pick the optic kind a capability request needs.
pub trait Synthesize<S, A>: Sized {
    /// Runs the synthesizer for this optic kind.
    ///
    /// # Errors
    ///
    /// Returns an [`OpticError`] when no unique path exists.
    fn synthesize(config: &SynthesisConfig) -> Result<Self, OpticError>;

    /// The field or variant names this optic walks, outermost first.
    fn route(&self) -> OpticPath;
}

/// Synthesizes a lens from record `S` to field type `A`.
///
/// # Errors
///
/// See [`LensSynthesizer::synthesize`].
pub fn synthesize_lens<S: Shaped, A: Shaped>(
    config: &SynthesisConfig,
) -> Result<SynthesizedLens<S, A>, OpticError> {
    SynthesizedLens::synthesize(config)
}

/// Synthesizes a prism from union `S` to payload type `A`.
///
/// # Errors
///
/// See [`PrismSynthesizer::synthesize`].
pub fn synthesize_prism<S: Shaped, A: Shaped>(
    config: &SynthesisConfig,
) -> Result<SynthesizedPrism<S, A>, OpticError> {
    SynthesizedPrism::synthesize(config)
}

#[cold]
#[track_caller]
fn inconsistent_descriptor(step: &'static str) -> ! {
    panic!("shape descriptor step `{step}` produced a value of a type it did not declare")
}

static_assertions::assert_impl_all!(SynthesizedLens<String, u8>: Clone, Send, Sync);
static_assertions::assert_impl_all!(SynthesizedPrism<String, u8>: Clone, Send, Sync);
