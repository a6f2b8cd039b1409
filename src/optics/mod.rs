//! Lens and Prism optics.
//!
//! These are the two optic kinds the synthesizers produce:
//!
//! - [`Lens`]: focus on one component of a product (get/set access)
//! - [`Prism`]: focus on one alternative of a sum (preview/review access)
//!
//! Both compose with optics of the same kind. Mixing the two is outside
//! what this crate synthesizes.
//!
//! # Lens Laws
//!
//! 1. **GetPut Law**: `lens.set(source, lens.get(&source).clone()) == source`
//! 2. **PutGet Law**: `lens.get(&lens.set(source, value)) == &value`
//! 3. **PutPut Law**: `lens.set(lens.set(source, v1), v2) == lens.set(source, v2)`
//!
//! # Prism Laws
//!
//! 1. **PreviewReview Law**: `prism.preview(&prism.review(value)) == Some(&value)`
//! 2. **ReviewPreview Law**: if `prism.preview(&source) == Some(a)` then
//!    `prism.review(a.clone()) == source`

mod lens;
mod prism;

pub use lens::ComposedLens;
pub use lens::Lens;

pub use prism::ComposedPrism;
pub use prism::Prism;
