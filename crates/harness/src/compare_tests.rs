#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

#[test]
fn exact_appends_one_line_break_to_expectation() {
    Comparison::Exact
        .compare("happy newyear enjoy\n", "happy newyear enjoy")
        .unwrap();
}

#[test]
fn exact_is_idempotent_under_line_ending_normalization() {
    Comparison::Exact.compare("A\r\nB\n", "A\nB").unwrap();
}

#[test]
fn exact_accepts_pre_terminated_expectation() {
    // File-backed expectations often carry their own trailing newline.
    Comparison::Exact.compare("42\n", "42\n").unwrap();
}

#[test]
fn exact_mismatch_reports_both_sides() {
    let err = Comparison::Exact.compare("b\n", "a").unwrap_err();
    assert_eq!(
        err,
        CompareError::Mismatch {
            expected: "a\n".to_string(),
            actual: "b\n".to_string(),
        }
    );
}

#[test]
fn any_of_accepts_each_alternative() {
    let comparison = Comparison::AnyOf(vec!["yes".to_string(), "no".to_string()]);
    comparison.compare("yes\n", "").unwrap();
    comparison.compare("no\r\n", "").unwrap();
    assert!(comparison.compare("maybe\n", "").is_err());
}

#[test]
fn matches_anchors_the_whole_output() {
    Comparison::Matches.compare("abc123\n", r"[a-z]+\d+").unwrap();
    assert!(Comparison::Matches
        .compare("abc123 trailing\n", r"[a-z]+\d+")
        .is_err());
}

#[test]
fn matches_rejects_invalid_patterns_as_pattern_error() {
    let err = Comparison::Matches.compare("x\n", r"(unclosed").unwrap_err();
    assert!(matches!(err, CompareError::Pattern(_)));
}

#[rstest]
#[case(0.001, true)]
#[case(0.000_000_1, false)]
fn approx_distinguishes_pass_from_mismatch(#[case] tolerance: f64, #[case] passes: bool) {
    let comparison = Comparison::Approx { tolerance };
    let result = comparison.compare("3.14159\n", "3.14160");
    if passes {
        result.unwrap();
    } else {
        assert!(matches!(result, Err(CompareError::Mismatch { .. })));
    }
}

#[test]
fn approx_flags_unparseable_output_as_format_error() {
    let err = Comparison::Approx { tolerance: 0.1 }
        .compare("not a number\n", "1.0")
        .unwrap_err();
    assert!(matches!(err, CompareError::Format { .. }));
}

#[test]
fn approx_takes_first_token_of_expectation() {
    Comparison::Approx { tolerance: 0.01 }
        .compare("2.5\n", "2.5 trailing words")
        .unwrap();
}

#[test]
fn empty_accepts_only_no_output() {
    Comparison::Empty.compare("", "").unwrap();
    assert!(Comparison::Empty.compare("\n", "").is_err());
}

#[rstest]
#[case("a\r\nb", "a\nb")]
#[case("a\rb", "a\nb")]
#[case("a\nb", "a\nb")]
#[case("a\r\n\rb", "a\n\nb")]
fn line_ending_normalization(#[case] input: &str, #[case] want: &str) {
    assert_eq!(normalize_line_endings(input), want);
}
