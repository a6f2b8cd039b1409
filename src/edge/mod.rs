//! Edge capability instances built directly from resources.
//!
//! Edges terminate resolution: they are what a
//! [`CapabilityRegistry`](crate::resolve::CapabilityRegistry) holds. Every
//! lifted instance eventually reads, writes, tells or raises through one of
//! these.
//!
//! - [`Ref`]: a shared cell of immutable snapshots with compare-and-set
//! - [`CellState`]: State over a [`Ref`], updated by optimistic retry
//! - [`ValueAsk`], [`CellAsk`], [`ScopedAsk`]: Ask over a constant, a cell,
//!   or a modified view of another Ask
//! - [`LogTell`]: Tell that appends to a cell
//! - [`SequencedTell`]: Tell that feeds a callback on a consumer thread in
//!   submission order
//! - [`TypedRaise`]: Raise for one concrete failure type

mod ask;
mod cell;
mod raise;
mod state;
mod tell;

pub use ask::CellAsk;
pub use ask::ScopedAsk;
pub use ask::ValueAsk;
pub use cell::Ref;
pub use raise::TypedRaise;
pub use state::CellState;
pub use state::scoped_state;
pub use tell::LogTell;
pub use tell::SequencedTell;
