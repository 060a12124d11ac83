//! Integration tests for template parsing and validation.

use varia::parser::{Group, MAX_DEPTH, Segment, Template, parse_template};
use varia::{ValidationError, ValidationReport, validate};

fn literal(text: &str) -> Template {
    Template {
        segments: vec![Segment::Literal(text.into())],
    }
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_pure_literal() {
    let t = parse_template("Hello, world!");
    assert_eq!(t.segments, vec![Segment::Literal("Hello, world!".into())]);
}

#[test]
fn test_empty_string() {
    let t = parse_template("");
    assert!(t.segments.is_empty());
}

#[test]
fn test_simple_group() {
    let t = parse_template("{a|b|c}");
    assert_eq!(
        t.segments,
        vec![Segment::Group(Group {
            alternatives: vec![literal("a"), literal("b"), literal("c")],
            span: 0..7,
        })]
    );
}

#[test]
fn test_placeholder_is_single_alternative_group() {
    let t = parse_template("Hi {name}!");
    assert_eq!(t.segments.len(), 3);
    match &t.segments[1] {
        Segment::Group(group) => {
            assert_eq!(group.alternatives, vec![literal("name")]);
            assert_eq!(group.span, 3..9);
        }
        Segment::Literal(_) => panic!("expected group"),
    }
}

#[test]
fn test_nested_group() {
    let t = parse_template("{a|{b|c}}");
    let Segment::Group(outer) = &t.segments[0] else {
        panic!("expected group");
    };
    assert_eq!(outer.alternatives.len(), 2);
    assert!(!outer.is_leaf());
    let Segment::Group(inner) = &outer.alternatives[1].segments[0] else {
        panic!("expected nested group");
    };
    assert!(inner.is_leaf());
    assert_eq!(inner.span, 3..8);
}

#[test]
fn test_empty_alternatives_are_kept() {
    let t = parse_template("{a||b}");
    let Segment::Group(group) = &t.segments[0] else {
        panic!("expected group");
    };
    assert_eq!(group.alternatives.len(), 3);
    assert!(group.alternatives[1].segments.is_empty());
}

#[test]
fn test_pipe_outside_group_is_literal() {
    let t = parse_template("a | b");
    assert_eq!(t.segments, vec![Segment::Literal("a | b".into())]);
}

#[test]
fn test_unclosed_brace_is_literal() {
    let t = parse_template("{a|b");
    assert_eq!(t.segments, vec![Segment::Literal("{a|b".into())]);
}

#[test]
fn test_stray_close_brace_is_literal() {
    let t = parse_template("a} {b}");
    assert_eq!(t.segments.len(), 2);
    assert_eq!(t.segments[0], Segment::Literal("a} ".into()));
}

#[test]
fn test_unclosed_outer_keeps_inner_group() {
    let t = parse_template("{a|{b|c}");
    assert_eq!(t.segments[0], Segment::Literal("{a|".into()));
    assert!(matches!(t.segments[1], Segment::Group(_)));
}

#[test]
fn test_display_reproduces_source() {
    for source in [
        "plain",
        "{a|b} and {c|{d|e}}",
        "{if:x}shown{/if} {x|upper}",
        "broken {a|b",
        "}{",
        "{}",
    ] {
        assert_eq!(parse_template(source).to_string(), source);
    }
}

#[test]
fn test_multibyte_spans() {
    let t = parse_template("é{a|b}");
    let Segment::Group(group) = &t.segments[1] else {
        panic!("expected group");
    };
    assert_eq!(group.span, 2..7);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_validate_accepts_well_formed() {
    assert_eq!(validate("{Hello|Hi} {name}, {if:x}ok{/if}"), Ok(()));
    assert_eq!(validate(""), Ok(()));
}

#[test]
fn test_validate_unclosed_brace() {
    assert_eq!(
        validate("ok\n  {a|b"),
        Err(ValidationError::MismatchedBraces { line: 2, column: 3 })
    );
}

#[test]
fn test_validate_stray_close() {
    assert_eq!(
        validate("a}{"),
        Err(ValidationError::MismatchedBraces { line: 1, column: 2 })
    );
}

#[test]
fn test_validate_empty_alternative() {
    assert_eq!(
        validate("x {a||b}"),
        Err(ValidationError::EmptyAlternative { line: 1, column: 3 })
    );
    assert!(validate("{|a}").is_err());
    assert!(validate("{a|}").is_err());
}

#[test]
fn test_validate_empty_alternative_nested() {
    assert_eq!(
        validate("{a|{b||c}}"),
        Err(ValidationError::EmptyAlternative { line: 1, column: 4 })
    );
}

#[test]
fn test_validate_single_empty_group_is_allowed() {
    assert_eq!(validate("{}"), Ok(()));
}

#[test]
fn test_validation_report() {
    let ok = ValidationReport::from(validate("{a|b}"));
    assert!(ok.valid);
    assert_eq!(ok.error, None);

    let bad = ValidationReport::from(validate("{a|b"));
    assert!(!bad.valid);
    assert_eq!(bad.error.as_deref(), Some("mismatched braces at 1:1"));

    let json = serde_json::to_string(&ok).unwrap();
    assert_eq!(json, r#"{"valid":true}"#);
}

// =============================================================================
// Deep input
// =============================================================================

fn nested(depth: usize) -> String {
    format!("{}x{}", "{".repeat(depth), "}".repeat(depth))
}

#[test]
fn test_many_unmatched_open_braces_are_literal() {
    let input = "{".repeat(100_000);
    let t = parse_template(&input);
    assert_eq!(t, literal(&input));
    assert_eq!(t.to_string(), input);
    assert_eq!(
        validate(&input),
        Err(ValidationError::MismatchedBraces { line: 1, column: 1 })
    );
}

#[test]
fn test_many_unmatched_close_braces_are_literal() {
    let input = "}".repeat(100_000);
    assert_eq!(parse_template(&input), literal(&input));
}

#[test]
fn test_deep_nesting_stops_at_max_depth() {
    let depth = 10_000;
    let input = nested(depth);
    let t = parse_template(&input);
    assert_eq!(t.to_string(), input);

    let mut levels = 0;
    let mut current = &t;
    while let [Segment::Group(group)] = current.segments.as_slice() {
        assert_eq!(group.alternatives.len(), 1);
        current = &group.alternatives[0];
        levels += 1;
    }
    assert_eq!(levels, MAX_DEPTH);

    let overflow = depth - MAX_DEPTH;
    let inner = format!("{}x{}", "{".repeat(overflow), "}".repeat(overflow));
    assert_eq!(*current, literal(&inner));
    assert_eq!(validate(&input), Ok(()));
}

#[test]
fn test_nesting_within_max_depth_is_fully_parsed() {
    let t = parse_template(&nested(MAX_DEPTH));
    let mut current = &t;
    let mut levels = 0;
    while let [Segment::Group(group)] = current.segments.as_slice() {
        current = &group.alternatives[0];
        levels += 1;
    }
    assert_eq!(levels, MAX_DEPTH);
    assert_eq!(*current, literal("x"));
}

#[test]
fn test_pipes_past_max_depth_are_literal() {
    let input = format!("{}a|b{}", "{".repeat(MAX_DEPTH + 1), "}".repeat(MAX_DEPTH + 1));
    let t = parse_template(&input);
    let mut current = &t;
    while let [Segment::Group(group)] = current.segments.as_slice() {
        current = &group.alternatives[0];
    }
    assert_eq!(*current, literal("{a|b}"));
}

#[test]
fn test_unclosed_group_keeps_nested_groups() {
    let t = parse_template("{a|{b|c}");
    assert_eq!(t.to_string(), "{a|{b|c}");
    match t.segments.as_slice() {
        [Segment::Literal(open), Segment::Group(group)] => {
            assert_eq!(open, "{a|");
            assert_eq!(group.alternatives.len(), 2);
        }
        other => panic!("unexpected segments {other:?}"),
    }
}
