//! Tests for optic synthesis: depth preference, ambiguity, cycle safety and
//! search bounds.

use rstest::rstest;
use shapelift::optics::{Lens, Prism};
use shapelift::shape::{ShapeKind, Shaped, TypeKey};
use shapelift::synthesis::{
    LensSynthesizer, MAX_REPORTED_PATHS, OpticError, OpticPath, PrismSynthesizer, Synthesize,
    SynthesisConfig, SynthesizedLens, synthesize_lens, synthesize_prism,
};

// =============================================================================
// Test Structures
// =============================================================================

#[derive(Clone, PartialEq, Debug, Shaped)]
struct Leaf {
    weight: f32,
    tag: char,
}

#[derive(Clone, PartialEq, Debug, Shaped)]
struct Branch {
    leaf: Leaf,
}

/// `tag` appears at depth 0 and again two levels down.
#[derive(Clone, PartialEq, Debug, Shaped)]
struct Shallow {
    tag: char,
    branch: Branch,
}

#[derive(Clone, PartialEq, Debug, Shaped)]
struct Twin {
    left: Leaf,
    right: Leaf,
}

/// A record that refers to itself through a box.
#[derive(Clone, PartialEq, Debug, Shaped)]
struct Node {
    label: String,
    next: Option<Box<Node>>,
    child: Box<Node>,
}

#[derive(Clone, PartialEq, Debug, Shaped)]
enum Expr {
    Literal(i64),
    Negate(Box<Expr>),
}

#[derive(Clone, PartialEq, Debug, Shaped)]
enum Token {
    Number(i64),
    Word(String),
}

#[derive(Clone, PartialEq, Debug, Shaped)]
enum Line {
    Token(Token),
    Blank(bool),
}

#[derive(Clone, PartialEq, Debug, Shaped)]
struct Meters(f64);

#[derive(Clone, PartialEq, Debug, Shaped)]
struct Bottom {
    mark: i16,
}

/// A record holding four fields of the next level down.
macro_rules! wide_level {
    ($name:ident, $next:ty) => {
        #[derive(Clone, PartialEq, Debug, Shaped)]
        struct $name {
            a: $next,
            b: $next,
            c: $next,
            d: $next,
        }
    };
}

wide_level!(Wide15, Bottom);
wide_level!(Wide14, Wide15);
wide_level!(Wide13, Wide14);
wide_level!(Wide12, Wide13);
wide_level!(Wide11, Wide12);
wide_level!(Wide10, Wide11);
wide_level!(Wide9, Wide10);
wide_level!(Wide8, Wide9);
wide_level!(Wide7, Wide8);
wide_level!(Wide6, Wide7);
wide_level!(Wide5, Wide6);
wide_level!(Wide4, Wide5);
wide_level!(Wide3, Wide4);
wide_level!(Wide2, Wide3);
wide_level!(Wide1, Wide2);
wide_level!(Wide0, Wide1);

#[derive(Clone, PartialEq, Debug, Shaped)]
struct Reading {
    distance: Meters,
    sensor: u8,
}

// =============================================================================
// Depth preference
// =============================================================================

#[test]
fn test_shallowest_match_wins() {
    let tag = synthesize_lens::<Shallow, char>(&SynthesisConfig::default()).unwrap();
    assert_eq!(tag.path().names().segments(), &["tag"]);

    let value = Shallow {
        tag: 'a',
        branch: Branch {
            leaf: Leaf {
                weight: 1.0,
                tag: 'b',
            },
        },
    };
    assert_eq!(*tag.get(&value), 'a');
    assert_eq!(tag.set(value, 'z').branch.leaf.tag, 'b');
}

#[test]
fn test_deep_match_found_when_unique() {
    let weight = synthesize_lens::<Shallow, f32>(&SynthesisConfig::default()).unwrap();
    assert_eq!(weight.path().names().to_string(), "branch.leaf.weight");
    assert_eq!(weight.route().depth(), 2);
}

#[test]
fn test_tuple_struct_fields_are_numbered() {
    let distance = synthesize_lens::<Reading, f64>(&SynthesisConfig::default()).unwrap();
    assert_eq!(distance.path().names().to_string(), "distance.0");
    let reading = Reading {
        distance: Meters(2.5),
        sensor: 1,
    };
    assert_eq!(distance.set(reading, 3.0).distance, Meters(3.0));
}

// =============================================================================
// Ambiguity
// =============================================================================

#[test]
fn test_ambiguity_names_both_paths() {
    let error = synthesize_lens::<Twin, char>(&SynthesisConfig::default()).unwrap_err();
    assert_eq!(
        error,
        OpticError::Ambiguous {
            outer: TypeKey::of::<Twin>(),
            target: TypeKey::of::<char>(),
            depth: 1,
            paths: vec![
                OpticPath::new(vec!["left", "tag"]),
                OpticPath::new(vec!["right", "tag"]),
            ],
        }
    );
    let message = error.to_string();
    assert!(message.contains("left.tag"));
    assert!(message.contains("right.tag"));
}

#[test]
fn test_ambiguous_outer_type_as_target() {
    let error = synthesize_lens::<Twin, Leaf>(&SynthesisConfig::default()).unwrap_err();
    assert!(matches!(error, OpticError::Ambiguous { depth: 0, .. }));
}

// =============================================================================
// Cycles and bounds
// =============================================================================

#[rstest]
#[case(SynthesisConfig::default())]
#[case(SynthesisConfig::default().with_max_depth(64))]
fn test_self_referential_record_terminates(#[case] config: SynthesisConfig) {
    let error = synthesize_lens::<Node, u8>(&config).unwrap_err();
    assert!(matches!(error, OpticError::NotFound { .. }));
}

#[test]
fn test_self_referential_record_finds_shallow_target() {
    let label = synthesize_lens::<Node, String>(&SynthesisConfig::default()).unwrap();
    assert_eq!(label.path().names().segments(), &["label"]);
}

#[test]
fn test_self_referential_union_terminates() {
    let literal = synthesize_prism::<Expr, i64>(&SynthesisConfig::default()).unwrap();
    assert_eq!(literal.path().names().segments(), &["Literal"]);
    assert_eq!(literal.preview(&Expr::Literal(3)), Some(&3));

    let error = synthesize_prism::<Expr, u8>(&SynthesisConfig::default()).unwrap_err();
    assert!(matches!(error, OpticError::NotFound { .. }));
}

#[rstest]
#[case(0, false)]
#[case(1, false)]
#[case(2, true)]
fn test_max_depth_bounds_search(#[case] max_depth: usize, #[case] found: bool) {
    let synthesizer = LensSynthesizer::new(SynthesisConfig::default().with_max_depth(max_depth));
    let result = synthesizer.synthesize::<Shallow, f32>();
    assert_eq!(result.is_ok(), found);
}

// =============================================================================
// Wide shapes
// =============================================================================

#[test]
fn test_wide_shape_missing_target_is_searched_per_type() {
    // 4^16 paths lead to the bottom level; each type is expanded once.
    let error = synthesize_lens::<Wide0, u128>(&SynthesisConfig::default()).unwrap_err();
    assert_eq!(
        error,
        OpticError::NotFound {
            outer: TypeKey::of::<Wide0>(),
            target: TypeKey::of::<u128>(),
            depth: 16,
        }
    );
}

#[test]
fn test_wide_shape_counts_every_path_to_the_target() {
    let error = synthesize_lens::<Wide0, i16>(&SynthesisConfig::default()).unwrap_err();
    let OpticError::Ambiguous { depth, paths, .. } = error else {
        panic!("expected ambiguity, got {error:?}");
    };
    assert_eq!(depth, 16);
    assert_eq!(paths.len(), MAX_REPORTED_PATHS);
    assert_eq!(paths[0].to_string(), format!("a{}.mark", ".a".repeat(15)));
    assert_eq!(paths[1].to_string(), format!("b{}.mark", ".a".repeat(15)));
}

#[test]
fn test_wide_shape_unique_target_is_found() {
    let bottom = synthesize_lens::<Wide14, Bottom>(&SynthesisConfig::default());
    assert!(matches!(bottom, Err(OpticError::Ambiguous { depth: 1, .. })));

    let mark = synthesize_lens::<Bottom, i16>(&SynthesisConfig::default()).unwrap();
    assert_eq!(mark.route().to_string(), "mark");
}

// =============================================================================
// Shape mismatches
// =============================================================================

#[test]
fn test_prism_over_record_is_mismatch() {
    let error = PrismSynthesizer::default()
        .synthesize::<Leaf, f32>()
        .unwrap_err();
    assert_eq!(
        error,
        OpticError::ShapeMismatch {
            outer: TypeKey::of::<Leaf>(),
            expected: ShapeKind::Union,
            found: ShapeKind::Record,
        }
    );
}

#[test]
fn test_lens_over_union_is_mismatch() {
    let error = SynthesizedLens::<Expr, i64>::synthesize(&SynthesisConfig::default()).unwrap_err();
    assert!(matches!(
        error,
        OpticError::ShapeMismatch {
            expected: ShapeKind::Record,
            found: ShapeKind::Union,
            ..
        }
    ));
}

#[test]
fn test_synthesis_is_deterministic() {
    let config = SynthesisConfig::default();
    let first = synthesize_lens::<Shallow, f32>(&config).unwrap();
    let second = synthesize_lens::<Shallow, f32>(&config).unwrap();
    assert_eq!(first.route(), second.route());
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn test_composed_lenses_agree_with_direct_synthesis() {
    let config = SynthesisConfig::default();
    let branch = synthesize_lens::<Shallow, Branch>(&config).unwrap();
    let leaf = synthesize_lens::<Branch, Leaf>(&config).unwrap();
    let weight = synthesize_lens::<Leaf, f32>(&config).unwrap();
    let composed = branch.compose(leaf).compose(weight);
    let direct = synthesize_lens::<Shallow, f32>(&config).unwrap();

    let value = Shallow {
        tag: 'a',
        branch: Branch {
            leaf: Leaf {
                weight: 1.5,
                tag: 'b',
            },
        },
    };
    assert_eq!(composed.get(&value), direct.get(&value));
    assert_eq!(composed.set(value.clone(), 4.0), direct.set(value, 4.0));
}

#[rstest]
#[case(Line::Token(Token::Word("hi".to_string())), Some("hi".to_string()))]
#[case(Line::Token(Token::Number(4)), None)]
#[case(Line::Blank(true), None)]
fn test_composed_prisms_agree_with_direct_synthesis(
    #[case] line: Line,
    #[case] expected: Option<String>,
) {
    let config = SynthesisConfig::default();
    let token = synthesize_prism::<Line, Token>(&config).unwrap();
    let word = synthesize_prism::<Token, String>(&config).unwrap();
    let composed = token.compose(word);
    let direct = synthesize_prism::<Line, String>(&config).unwrap();

    assert_eq!(composed.preview(&line), direct.preview(&line));
    assert_eq!(composed.preview_owned(line), expected);
    assert_eq!(
        composed.review("yo".to_string()),
        direct.review("yo".to_string())
    );
}
