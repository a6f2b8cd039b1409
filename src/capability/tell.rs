//! The Tell capability: emit output messages.

use std::sync::Arc;

use crate::optics::Prism;
use crate::shape::Shaped;
use crate::synthesis::SynthesizedPrism;

/// Output of messages of type `W`.
///
/// Messages told from one thread reach the sink in the order they were told.
pub trait TellCapability<W>: Send + Sync {
    /// Emits one message.
    fn tell(&self, message: W);
}

/// Convenience operations available on every [`TellCapability`].
pub trait TellExt<W>: TellCapability<W> {
    /// Emits every message of `messages`, in iteration order.
    fn tell_all<I>(&self, messages: I)
    where
        I: IntoIterator<Item = W>,
    {
        for message in messages {
            self.tell(message);
        }
    }
}

impl<W, C: TellCapability<W> + ?Sized> TellExt<W> for C {}

/// A Tell capability over `W` obtained by injecting into a Tell capability
/// over `O` through a prism.
pub struct PrismTell<O, W> {
    prism: SynthesizedPrism<O, W>,
    inner: Arc<dyn TellCapability<O>>,
}

impl<O, W> PrismTell<O, W> {
    /// Injects through `prism` into `inner`.
    #[must_use]
    pub fn new(prism: SynthesizedPrism<O, W>, inner: Arc<dyn TellCapability<O>>) -> Self {
        Self { prism, inner }
    }
}

impl<O: Shaped, W: Shaped> TellCapability<W> for PrismTell<O, W> {
    fn tell(&self, message: W) {
        self.inner.tell(self.prism.review(message));
    }
}
