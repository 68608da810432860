use crate::{Dialect, ErrorMode, parse};

#[test]
fn strict_mode_stops_at_the_first_error() {
    let result = parse("(1,, 2) + (3,, 4)", Dialect::xquery_1_0(), ErrorMode::Strict);
    assert!(!result.accepted);
    assert_eq!(result.diagnostics.len(), 1);
    let first = result.diagnostics.iter().next().unwrap();
    assert_eq!((first.line, first.column), (1, 4));
}

#[test]
fn strict_and_lenient_agree_on_the_verdict() {
    for source in [
        "1 + 2",
        "1 +",
        "<a></b>",
        "for $x in (1,2) return $x",
        "declare variable $x := 1; $x",
        "(1,, 2)",
    ] {
        let strict = parse(source, Dialect::xquery_1_0(), ErrorMode::Strict);
        let lenient = parse(source, Dialect::xquery_1_0(), ErrorMode::Lenient);
        assert_eq!(
            strict.accepted, lenient.accepted,
            "verdicts diverge for {source:?}"
        );
    }
}

#[test]
fn strict_first_error_matches_lenient_first_error() {
    let source = "declare boundary-space wrong;\ndeclare construction bogus;\n1";
    let strict = parse(source, Dialect::xquery_1_0(), ErrorMode::Strict);
    let lenient = parse(source, Dialect::xquery_1_0(), ErrorMode::Lenient);
    assert_eq!(strict.diagnostics.len(), 1);
    assert!(lenient.diagnostics.len() > 1);
    assert_eq!(
        strict.diagnostics.iter().next(),
        lenient.diagnostics.iter().next()
    );
}

#[test]
fn accepted_parses_have_no_diagnostics() {
    let result = parse("1 + 2", Dialect::xquery_1_0(), ErrorMode::Strict);
    assert!(result.accepted);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.diagnostics.len(), 0);
}
