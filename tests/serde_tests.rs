#![cfg(feature = "serde")]

//! Integration tests for serde support.
//!
//! Synthesis settings and capability kinds can be read from configuration
//! files and written to logs.

use rstest::rstest;
use shapelift::capability::{CapabilityKind, OpticView};
use shapelift::synthesis::{DEFAULT_MAX_DEPTH, SynthesisConfig};

// =============================================================================
// SynthesisConfig
// =============================================================================

#[rstest]
#[case(0)]
#[case(3)]
#[case(DEFAULT_MAX_DEPTH)]
fn test_config_json_roundtrip(#[case] max_depth: usize) {
    let config = SynthesisConfig::default().with_max_depth(max_depth);
    let json = serde_json::to_string(&config).unwrap();
    let restored: SynthesisConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, restored);
}

#[rstest]
fn test_config_json_field_name() {
    let config = SynthesisConfig::default().with_max_depth(5);
    assert_eq!(serde_json::to_string(&config).unwrap(), r#"{"max_depth":5}"#);
}

#[rstest]
fn test_config_missing_fields_take_defaults() {
    let config: SynthesisConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.max_depth(), DEFAULT_MAX_DEPTH);
}

#[rstest]
fn test_config_rejects_negative_depth() {
    let result = serde_json::from_str::<SynthesisConfig>(r#"{"max_depth":-1}"#);
    assert!(result.is_err());
}

// =============================================================================
// Capability kinds
// =============================================================================

#[rstest]
fn test_every_kind_roundtrips() {
    for kind in CapabilityKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        let restored: CapabilityKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, restored);
        assert_eq!(restored.view(), kind.view());
    }
}

#[rstest]
#[case(CapabilityKind::State, "\"State\"")]
#[case(CapabilityKind::Raise, "\"Raise\"")]
fn test_kind_serializes_as_its_name(#[case] kind: CapabilityKind, #[case] expected: &str) {
    assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
}

#[rstest]
#[case(OpticView::Product)]
#[case(OpticView::Sum)]
fn test_view_json_roundtrip(#[case] view: OpticView) {
    let json = serde_json::to_string(&view).unwrap();
    assert_eq!(serde_json::from_str::<OpticView>(&json).unwrap(), view);
}
