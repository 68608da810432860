use crate::parser::tests::rejected;
use crate::{Dialect, ErrorMode, parse};
use indoc::indoc;

#[test]
fn independent_errors_are_both_reported() {
    insta::assert_snapshot!(
        rejected("(1,, 2) + (3,, 4)", Dialect::xquery_1_0()),
        @r"
    1:4: expected an expression, found ','
    1:14: expected an expression, found ','
    ");
}

#[test]
fn one_diagnostic_per_position() {
    // The broken operand would fail several expectations at the same spot;
    // only the first one surfaces.
    let result = parse("1 + )", Dialect::xquery_1_0(), ErrorMode::Lenient);
    assert_eq!(result.diagnostics.len(), 1);
}

#[test]
fn incomplete_binary_expression_yields_one_diagnostic() {
    insta::assert_snapshot!(
        rejected("for $a in (1,2) return $a mod", Dialect::xquery_1_0()),
        @"1:30: expected an expression, found end of input");
}

#[test]
fn unterminated_comment_yields_one_diagnostic() {
    insta::assert_snapshot!(
        rejected("1 + (: oops", Dialect::xquery_1_0()),
        @"1:5: unterminated comment");
}

#[test]
fn lexical_garbage_does_not_cascade() {
    insta::assert_snapshot!(
        rejected("1 + ^ 2", Dialect::xquery_1_0()),
        @r"
    1:5: illegal character
    1:7: unexpected integer literal after end of query
    ");
}

#[test]
fn garbage_operand_resumes_at_the_next_expression() {
    // The first ':=' is reported, the second is skipped, and parsing
    // picks back up at the '2'.
    insta::assert_snapshot!(
        rejected("1 + := := 2", Dialect::xquery_1_0()),
        @"1:5: expected an expression, found ':='");
}

#[test]
fn recovery_stops_at_enclosing_delimiters() {
    insta::assert_snapshot!(
        rejected("declare function local:f() { := }; 1", Dialect::xquery_1_0()),
        @"1:30: expected an expression, found ':='");
}

#[test]
fn errors_across_prolog_declarations() {
    let input = indoc! {r#"
        declare boundary-space wrong;
        declare construction bogus;
        1
    "#};

    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @r"
    1:24: expected 'preserve' or 'strip', found 'wrong'
    2:22: expected 'preserve' or 'strip', found 'bogus'
    ");
}

#[test]
fn recovery_still_rejects_the_parse() {
    let result = parse("(1,, 2)", Dialect::xquery_1_0(), ErrorMode::Lenient);
    assert!(!result.accepted);
    assert_eq!(result.diagnostics.len(), 1);
}

#[test]
fn diagnostics_are_ordered_by_position() {
    let result = parse("(1,, 2) + (3,, 4)", Dialect::xquery_1_0(), ErrorMode::Lenient);
    let cols: Vec<u32> = result.diagnostics.iter().map(|d| d.column).collect();
    let mut sorted = cols.clone();
    sorted.sort_unstable();
    assert_eq!(cols, sorted);
}

#[test]
fn rendered_diagnostics_point_at_the_source() {
    let result = parse("1 +", Dialect::xquery_1_0(), ErrorMode::Lenient);
    let rendered = result.diagnostics.render("1 +");
    assert!(rendered.contains("expected an expression"));
    assert!(rendered.contains("1 +"));
    assert!(rendered.contains('^'));
}
