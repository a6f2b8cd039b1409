use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::error::ResolutionError;
use super::registry::CapabilityRegistry;
use crate::capability::{CapabilityRequest, RequestKey};
use crate::synthesis::{Synthesize, SynthesisConfig};

/// Answers capability requests from a registry of edge instances, lifting
/// through synthesized optics where carrier and payload differ.
///
/// Resolution of a request `R` proceeds as follows:
///
/// 1. A previously lifted instance for `R` is returned from the cache.
/// 2. An instance registered for `R` is returned as is.
/// 3. An unregistered request whose payload is its carrier fails with
///    [`ResolutionError::NoInstance`].
/// 4. Otherwise the optic `R::Optic` is synthesized from the carrier's shape,
///    the identity request over the carrier is resolved recursively, and the
///    result is lifted through the optic and cached.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use shapelift::capability::{State, StateCapability};
/// use shapelift::edge::CellState;
/// use shapelift::resolve::{CapabilityRegistry, Resolver};
/// use shapelift::shape::Shaped;
///
/// #[derive(Clone, PartialEq, Debug, Shaped)]
/// struct Counter { hits: u64, label: String }
///
/// let cell = Arc::new(CellState::new(Counter { hits: 0, label: "home".to_string() }));
/// let registry = CapabilityRegistry::new().with::<State<Counter>>(cell.clone());
/// let mut resolver = Resolver::new(registry);
///
/// let hits = resolver.resolve::<State<Counter, u64>>().unwrap();
/// hits.modify(&|n| n + 1);
/// assert_eq!(cell.get().hits, 1);
/// ```
pub struct Resolver {
    registry: CapabilityRegistry,
    config: SynthesisConfig,
    cache: HashMap<RequestKey, Arc<dyn Any + Send + Sync>>,
}

impl Resolver {
    /// Creates a resolver over `registry` with default synthesis bounds.
    #[must_use]
    pub fn new(registry: CapabilityRegistry) -> Self {
        Self::with_config(registry, SynthesisConfig::default())
    }

    /// Creates a resolver over `registry` with the given synthesis bounds.
    #[must_use]
    pub fn with_config(registry: CapabilityRegistry, config: SynthesisConfig) -> Self {
        Self {
            registry,
            config,
            cache: HashMap::new(),
        }
    }

    /// The synthesis bounds in use.
    #[must_use]
    pub const fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// The edge instances this resolver starts from.
    #[must_use]
    pub const fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Whether a lifted instance for `key` is cached.
    #[must_use]
    pub fn is_cached(&self, key: &RequestKey) -> bool {
        self.cache.contains_key(key)
    }

    /// Resolves request `R`.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::Synthesis`] when the carrier admits no unique
    ///   optic to the payload
    /// - [`ResolutionError::NoInstance`] when the identity request over the
    ///   carrier has no registered instance
    pub fn resolve<R: CapabilityRequest>(&mut self) -> Result<Arc<R::Instance>, ResolutionError> {
        let request = R::key();

        if let Some(instance) = self
            .cache
            .get(&request)
            .and_then(|erased| erased.downcast_ref::<Arc<R::Instance>>())
        {
            debug!(%request, "capability cache hit");
            return Ok(Arc::clone(instance));
        }

        if let Some(instance) = self.registry.lookup::<R>() {
            debug!(%request, "capability registry hit");
            return Ok(instance);
        }

        if request.is_identity() {
            debug!(%request, "no capability instance registered");
            return Err(ResolutionError::NoInstance { request });
        }

        let optic = R::Optic::synthesize(&self.config)
            .map_err(|source| ResolutionError::Synthesis { request, source })?;
        debug!(
            %request,
            optic = %R::KIND.view(),
            route = %optic.route(),
            "synthesized optic"
        );

        let inner = self.resolve::<R::Identity>()?;
        let lifted = R::lift(optic, inner);
        self.cache.insert(request, Arc::new(Arc::clone(&lifted)));
        debug!(%request, "lifted capability");
        Ok(lifted)
    }
}

static_assertions::assert_impl_all!(Resolver: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{State, StateCapability};
    use crate::edge::CellState;
    use shapelift_derive::Shaped;

    #[derive(Clone, PartialEq, Debug, Shaped)]
    struct Limits {
        burst: u16,
        window: u64,
    }

    fn resolver() -> Resolver {
        let registry = CapabilityRegistry::new().with::<State<Limits>>(Arc::new(CellState::new(
            Limits {
                burst: 10,
                window: 60,
            },
        )));
        Resolver::new(registry)
    }

    #[test]
    fn test_lifted_instances_are_cached() {
        let mut resolver = resolver();
        let key = State::<Limits, u16>::key();
        assert!(!resolver.is_cached(&key));

        let first = resolver.resolve::<State<Limits, u16>>().unwrap();
        assert!(resolver.is_cached(&key));
        let second = resolver.resolve::<State<Limits, u16>>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_registered_instance_is_not_cached() {
        let mut resolver = resolver();
        let state = resolver.resolve::<State<Limits>>().unwrap();
        assert_eq!(state.get().burst, 10);
        assert!(!resolver.is_cached(&State::<Limits>::key()));
    }

    #[test]
    fn test_missing_identity_is_reported() {
        let mut resolver = Resolver::new(CapabilityRegistry::new());
        let error = resolver.resolve::<State<Limits, u64>>().err().unwrap();
        assert_eq!(
            error,
            ResolutionError::NoInstance {
                request: State::<Limits>::key(),
            }
        );
    }

    #[test]
    fn test_synthesis_failure_names_request() {
        let mut resolver = resolver();
        let error = resolver.resolve::<State<Limits, String>>().err().unwrap();
        assert!(matches!(
            error,
            ResolutionError::Synthesis { request, .. } if request == State::<Limits, String>::key()
        ));
    }
}
