use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::capability::{CapabilityRequest, RequestKey};

type Erased = Arc<dyn Any + Send + Sync>;

/// The edge instances a [`Resolver`](super::Resolver) starts from.
///
/// Entries are keyed by request, so one registry can hold a State over one
/// carrier next to a Tell over another. Registering the same request twice
/// replaces the earlier instance.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use shapelift::capability::{State, Tell};
/// use shapelift::edge::{CellState, LogTell};
/// use shapelift::resolve::CapabilityRegistry;
///
/// let registry = CapabilityRegistry::new()
///     .with::<State<u32>>(Arc::new(CellState::new(0_u32)))
///     .with::<Tell<String>>(Arc::new(LogTell::<String>::new()));
/// assert_eq!(registry.len(), 2);
/// assert!(registry.lookup::<State<u32>>().is_some());
/// assert!(registry.lookup::<State<u64>>().is_none());
/// ```
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    instances: HashMap<RequestKey, Erased>,
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `instance` as the answer to request `R`.
    pub fn register<R: CapabilityRequest>(&mut self, instance: Arc<R::Instance>) -> &mut Self {
        let erased: Erased = Arc::new(instance);
        self.instances.insert(R::key(), erased);
        self
    }

    /// Builder form of [`CapabilityRegistry::register`].
    #[must_use]
    pub fn with<R: CapabilityRequest>(mut self, instance: Arc<R::Instance>) -> Self {
        self.register::<R>(instance);
        self
    }

    /// The instance registered for `R`, if any.
    #[must_use]
    pub fn lookup<R: CapabilityRequest>(&self) -> Option<Arc<R::Instance>> {
        self.instances
            .get(&R::key())
            .and_then(|erased| erased.downcast_ref::<Arc<R::Instance>>())
            .cloned()
    }

    /// Whether an instance is registered under `key`.
    #[must_use]
    pub fn contains(&self, key: &RequestKey) -> bool {
        self.instances.contains_key(key)
    }

    /// The registered request keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &RequestKey> {
        self.instances.keys()
    }

    /// Number of registered instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.instances.keys()).finish()
    }
}
