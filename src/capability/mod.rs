//! Capability kinds, their object-safe interfaces and their optic-lifted
//! implementations.
//!
//! A capability is a handle through which code performs one kind of effect:
//!
//! | Kind    | Interface               | Lifted through | Lifted instance |
//! |---------|-------------------------|----------------|-----------------|
//! | State   | [`StateCapability`]     | Lens           | [`LensState`]   |
//! | Ask     | [`AskCapability`]       | Lens           | [`LensAsk`]     |
//! | Tell    | [`TellCapability`]      | Prism          | [`PrismTell`]   |
//! | Raise   | [`RaiseCapability`]     | Prism          | [`PrismRaise`]  |
//!
//! The interfaces are object safe; generic conveniences live in the blanket
//! extension traits [`StateExt`], [`AskExt`], [`TellExt`] and [`RaiseExt`].
//!
//! Requests are spelled with the markers [`State`], [`Ask`], [`Tell`] and
//! [`Raise`]: `State<AppState, Config>` asks for a `StateCapability<Config>`
//! backed by state of type `AppState`. See [`crate::resolve`] for how requests
//! are answered.

mod ask;
mod kind;
mod raise;
mod request;
mod state;
mod tell;

pub use kind::CapabilityKind;
pub use kind::OpticView;
pub use kind::RequestKey;

pub use request::Ask;
pub use request::CapabilityRequest;
pub use request::Raise;
pub use request::State;
pub use request::Tell;

pub use state::LensState;
pub use state::StateCapability;
pub use state::StateExt;

pub use ask::AskCapability;
pub use ask::AskExt;
pub use ask::LensAsk;
pub use ask::Modifier;

pub use tell::PrismTell;
pub use tell::TellCapability;
pub use tell::TellExt;

pub use raise::PrismRaise;
pub use raise::RaiseCapability;
pub use raise::RaiseExt;
pub use raise::Raised;
