use std::marker::PhantomData;
use std::sync::Arc;

use super::ask::{AskCapability, LensAsk};
use super::kind::{CapabilityKind, RequestKey};
use super::raise::{PrismRaise, RaiseCapability};
use super::state::{LensState, StateCapability};
use super::tell::{PrismTell, TellCapability};
use crate::shape::{Shaped, TypeKey};
use crate::synthesis::{Synthesize, SynthesizedLens, SynthesizedPrism};

/// A typed request for a capability of one kind, over a carrier type, exposed
/// at a payload type.
///
/// The four request markers [`State`], [`Ask`], [`Tell`] and [`Raise`] are
/// the only implementors; each ties its kind to the optic that bridges
/// carrier and payload and to the lifted instance that optic produces.
pub trait CapabilityRequest: 'static {
    /// The capability kind requested.
    const KIND: CapabilityKind;

    /// The type the underlying resource holds.
    type Carrier: Shaped;

    /// The type the requesting code works with.
    type Payload: Shaped;

    /// The capability object handed out for this request.
    type Instance: ?Sized + Send + Sync + 'static;

    /// The same kind, requested directly over the carrier.
    type Identity: CapabilityRequest<Carrier = Self::Carrier, Payload = Self::Carrier>;

    /// The optic that bridges carrier and payload.
    type Optic: Synthesize<Self::Carrier, Self::Payload> + Send + Sync + 'static;

    /// Builds the payload-level instance from a carrier-level one.
    fn lift(
        optic: Self::Optic,
        inner: Arc<<Self::Identity as CapabilityRequest>::Instance>,
    ) -> Arc<Self::Instance>;

    /// The erased key of this request.
    #[must_use]
    fn key() -> RequestKey {
        RequestKey::new(
            Self::KIND,
            TypeKey::of::<Self::Carrier>(),
            TypeKey::of::<Self::Payload>(),
        )
    }
}

macro_rules! request_marker {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        pub struct $name<C, P = C>(PhantomData<fn() -> (C, P)>);
    };
}

request_marker!(
    /// Requests a [`StateCapability<P>`] backed by state of type `C`.
    State
);
request_marker!(
    /// Requests an [`AskCapability<P>`] backed by a context of type `C`.
    Ask
);
request_marker!(
    /// Requests a [`TellCapability<P>`] backed by an output of type `C`.
    Tell
);
request_marker!(
    /// Requests a [`RaiseCapability<P>`] backed by failures of type `C`.
    Raise
);

impl<C: Shaped, P: Shaped> CapabilityRequest for State<C, P> {
    const KIND: CapabilityKind = CapabilityKind::State;
    type Carrier = C;
    type Payload = P;
    type Instance = dyn StateCapability<P>;
    type Identity = State<C>;
    type Optic = SynthesizedLens<C, P>;

    fn lift(optic: Self::Optic, inner: Arc<dyn StateCapability<C>>) -> Arc<Self::Instance> {
        Arc::new(LensState::new(optic, inner))
    }
}

impl<C: Shaped, P: Shaped> CapabilityRequest for Ask<C, P> {
    const KIND: CapabilityKind = CapabilityKind::Ask;
    type Carrier = C;
    type Payload = P;
    type Instance = dyn AskCapability<P>;
    type Identity = Ask<C>;
    type Optic = SynthesizedLens<C, P>;

    fn lift(optic: Self::Optic, inner: Arc<dyn AskCapability<C>>) -> Arc<Self::Instance> {
        Arc::new(LensAsk::new(optic, inner))
    }
}

impl<C: Shaped, P: Shaped> CapabilityRequest for Tell<C, P> {
    const KIND: CapabilityKind = CapabilityKind::Tell;
    type Carrier = C;
    type Payload = P;
    type Instance = dyn TellCapability<P>;
    type Identity = Tell<C>;
    type Optic = SynthesizedPrism<C, P>;

    fn lift(optic: Self::Optic, inner: Arc<dyn TellCapability<C>>) -> Arc<Self::Instance> {
        Arc::new(PrismTell::new(optic, inner))
    }
}

impl<C: Shaped, P: Shaped> CapabilityRequest for Raise<C, P> {
    const KIND: CapabilityKind = CapabilityKind::Raise;
    type Carrier = C;
    type Payload = P;
    type Instance = dyn RaiseCapability<P>;
    type Identity = Raise<C>;
    type Optic = SynthesizedPrism<C, P>;

    fn lift(optic: Self::Optic, inner: Arc<dyn RaiseCapability<C>>) -> Arc<Self::Instance> {
        Arc::new(PrismRaise::new(optic, inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(State::<String, u8>::key(), CapabilityKind::State)]
    #[case(Ask::<String, u8>::key(), CapabilityKind::Ask)]
    #[case(Tell::<String, u8>::key(), CapabilityKind::Tell)]
    #[case(Raise::<String, u8>::key(), CapabilityKind::Raise)]
    fn test_key_records_kind_and_types(#[case] key: RequestKey, #[case] kind: CapabilityKind) {
        assert_eq!(key.kind(), kind);
        assert_eq!(key.carrier(), TypeKey::of::<String>());
        assert_eq!(key.payload(), TypeKey::of::<u8>());
    }

    #[test]
    fn test_payload_defaults_to_carrier() {
        assert!(State::<String>::key().is_identity());
        assert_eq!(Tell::<String, u8>::key().identity(), Tell::<String>::key());
    }
}
