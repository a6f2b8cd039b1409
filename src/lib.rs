//! # shapelift
//!
//! Setup-time optic synthesis and capability lifting.
//!
//! ## Overview
//!
//! Code written against a small capability (state of type `User`, output of
//! type `AuditEvent`) can run against a much larger application type without
//! hand-written glue. shapelift inspects the shapes of the types involved,
//! synthesizes the unique lawful optic between them, and lifts the capability
//! through it:
//!
//! - **Shapes**: structural descriptors of records and unions, derived with
//!   `#[derive(Shaped)]`
//! - **Optics**: the `Lens` and `Prism` traits with their laws
//! - **Synthesis**: breadth-first search for the unique shallowest field or
//!   variant path between two types
//! - **Capabilities**: State, Ask, Tell and Raise, as object-safe traits
//! - **Resolution**: answering a capability request by lifting a registered
//!   edge instance through a synthesized optic
//! - **Edges**: ready-made instances over a shared cell, a constant value or
//!   a callback
//!
//! ## Feature Flags
//!
//! - `derive`: `#[derive(Shaped)]` (enabled by default)
//! - `serde`: serde support for configuration and capability kinds
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use shapelift::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq, Shaped)]
//! struct User {
//!     name: String,
//! }
//!
//! #[derive(Clone, Debug, PartialEq, Shaped)]
//! struct Request {
//!     headers: HashMap<String, String>,
//!     user: User,
//! }
//!
//! let cell = Arc::new(CellState::new(Request {
//!     headers: HashMap::new(),
//!     user: User { name: "ada".to_string() },
//! }));
//! let registry = CapabilityRegistry::new().with::<State<Request>>(cell.clone());
//! let mut resolver = Resolver::new(registry);
//!
//! let name = resolver.resolve::<State<Request, String>>().unwrap();
//! name.modify(&|name| name + "!");
//!
//! assert_eq!(cell.get().user.name, "ada!");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

// Derived impls name this crate by its absolute path.
extern crate self as shapelift;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use shapelift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::capability::{
        Ask, AskCapability, AskExt, CapabilityRequest, Raise, RaiseCapability, RaiseExt, Raised,
        State, StateCapability, StateExt, Tell, TellCapability, TellExt,
    };
    pub use crate::edge::{CellAsk, CellState, LogTell, Ref, SequencedTell, TypedRaise, ValueAsk};
    pub use crate::optics::{Lens, Prism};
    pub use crate::resolve::{CapabilityRegistry, ResolutionError, Resolver};
    pub use crate::shape::Shaped;
    pub use crate::synthesis::{OpticError, SynthesisConfig};
}

pub mod capability;
pub mod edge;
pub mod optics;
pub mod resolve;
pub mod shape;
pub mod synthesis;
