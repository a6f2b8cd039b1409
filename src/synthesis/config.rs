//! Settings for optic synthesis.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default depth bound, counted in nested structures below the outer type.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Bounds for the breadth-first structural search.
///
/// # Examples
///
/// ```
/// use shapelift::synthesis::SynthesisConfig;
///
/// let config = SynthesisConfig::default().with_max_depth(3);
/// assert_eq!(config.max_depth(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SynthesisConfig {
    max_depth: usize,
}

impl SynthesisConfig {
    /// Creates a configuration with the default depth bound.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the deepest level searched. Depth 0 is the outer type's own
    /// fields or variants.
    #[must_use]
    pub const fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// The deepest level searched.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_default_depth() {
        assert_eq!(SynthesisConfig::default().max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_deserializes_with_missing_fields() {
        let config: SynthesisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SynthesisConfig::default());

        let config: SynthesisConfig = serde_json::from_str(r#"{"max_depth": 2}"#).unwrap();
        assert_eq!(config.max_depth(), 2);
    }
}
