//! Property-based tests for the laws of synthesized prisms.
//!
//! Every prism produced by synthesis must satisfy:
//!
//! - **PreviewReview Law**: `prism.preview(&prism.review(value)) == Some(&value)`
//! - **ReviewPreview Law**: if `prism.preview(&source) == Some(value)`, then
//!   `prism.review(value.clone()) == source`
//!
//! and extraction must never lose a value it does not match.

use proptest::prelude::*;
use shapelift::optics::Prism;
use shapelift::shape::Shaped;
use shapelift::synthesis::{SynthesisConfig, SynthesizedPrism, synthesize_prism};

// =============================================================================
// Test Structures
// =============================================================================

#[derive(Clone, PartialEq, Debug, Shaped)]
enum Payment {
    Cash(u64),
    Voucher(String),
    Waived,
}

#[derive(Clone, PartialEq, Debug, Shaped)]
enum Reason {
    Timeout(u32),
    Declined(bool),
}

#[derive(Clone, PartialEq, Debug, Shaped)]
enum Order {
    Paid(Payment),
    Cancelled(Reason),
}

fn prism<S: Shaped, A: Shaped>() -> SynthesizedPrism<S, A> {
    synthesize_prism::<S, A>(&SynthesisConfig::default()).unwrap()
}

fn payment_strategy() -> impl Strategy<Value = Payment> {
    prop_oneof![
        any::<u64>().prop_map(Payment::Cash),
        any::<String>().prop_map(Payment::Voucher),
        Just(Payment::Waived),
    ]
}

fn order_strategy() -> impl Strategy<Value = Order> {
    prop_oneof![
        payment_strategy().prop_map(Order::Paid),
        any::<u32>().prop_map(|millis| Order::Cancelled(Reason::Timeout(millis))),
        any::<bool>().prop_map(|hard| Order::Cancelled(Reason::Declined(hard))),
    ]
}

// =============================================================================
// Depth 0
// =============================================================================

proptest! {
    /// PreviewReview Law for a direct variant
    #[test]
    fn prop_direct_variant_preview_review_law(value in any::<String>()) {
        let voucher = prism::<Payment, String>();
        let built = voucher.review(value.clone());
        prop_assert_eq!(voucher.preview(&built), Some(&value));
    }

    /// ReviewPreview Law for a direct variant
    #[test]
    fn prop_direct_variant_review_preview_law(payment in payment_strategy()) {
        let cash = prism::<Payment, u64>();
        if let Some(amount) = cash.preview(&payment) {
            prop_assert_eq!(cash.review(*amount), payment);
        }
    }
}

// =============================================================================
// Depth 1
// =============================================================================

proptest! {
    /// PreviewReview Law for a nested variant
    #[test]
    fn prop_nested_variant_preview_review_law(value in any::<u32>()) {
        let timeout = prism::<Order, u32>();
        let built = timeout.review(value);
        prop_assert_eq!(built.clone(), Order::Cancelled(Reason::Timeout(value)));
        prop_assert_eq!(timeout.preview(&built), Some(&value));
    }

    /// ReviewPreview Law for a nested variant
    #[test]
    fn prop_nested_variant_review_preview_law(order in order_strategy()) {
        let cash = prism::<Order, u64>();
        if let Some(amount) = cash.preview(&order) {
            prop_assert_eq!(cash.review(*amount), order);
        }
    }

    /// Owned and borrowed previews agree
    #[test]
    fn prop_preview_owned_agrees_with_preview(order in order_strategy()) {
        let declined = prism::<Order, bool>();
        prop_assert_eq!(declined.preview_owned(order.clone()), declined.preview(&order).copied());
    }

    /// A failed extraction hands back the original value
    #[test]
    fn prop_try_extract_never_loses_the_source(order in order_strategy()) {
        let cash = prism::<Order, u64>();
        match cash.try_extract(order.clone()) {
            Ok(amount) => prop_assert_eq!(Order::Paid(Payment::Cash(amount)), order),
            Err(restored) => prop_assert_eq!(restored, order),
        }
    }
}
