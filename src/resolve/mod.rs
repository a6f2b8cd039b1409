//! Hierarchy resolution: answering capability requests by lifting edge
//! instances through synthesized optics.
//!
//! Edge instances (a [`CellState`](crate::edge::CellState) over the whole
//! application state, a [`LogTell`](crate::edge::LogTell) over the whole
//! event type) are registered once in a [`CapabilityRegistry`]. Code that
//! only cares about one part asks the [`Resolver`] for a capability at that
//! part's type and receives an instance that reads and writes through the
//! edge.
//!
//! Resolution happens at setup time. Failures are values
//! ([`ResolutionError`]) and never panics; successful results are cached per
//! request and shared behind `Arc`.

mod error;
mod registry;
mod resolver;

pub use error::ResolutionError;
pub use registry::CapabilityRegistry;
pub use resolver::Resolver;
