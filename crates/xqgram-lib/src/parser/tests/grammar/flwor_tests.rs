use crate::Dialect;
use crate::parser::tests::{accepted, rejected};
use indoc::indoc;

#[test]
fn simple_for() {
    accepted(
        "for $x in (1, 2, 3) return $x * 2",
        Dialect::xquery_1_0(),
    );
}

#[test]
fn for_with_type_position_and_multiple_bindings() {
    accepted(
        "for $x as xs:integer at $i in (1, 2), $y in $x return $i + $y",
        Dialect::xquery_1_0(),
    );
}

#[test]
fn let_bindings() {
    accepted(
        "let $x := 1, $y as xs:integer := $x + 1 return $y",
        Dialect::xquery_1_0(),
    );
}

#[test]
fn where_and_order_by() {
    let input = indoc! {r#"
        for $x in $seq
        where $x gt 0
        stable order by $x ascending empty greatest collation "http://example.com/c",
            $x descending
        return $x
    "#};

    accepted(input, Dialect::xquery_1_0());
}

#[test]
fn multiple_where_clauses_need_30() {
    let input = "for $x in (1,2) where $x where $x return $x";

    accepted(input, Dialect::xquery_3_0());
    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @"1:26: multiple 'where' clauses require XQuery 3.0");
}

#[test]
fn where_after_order_by_needs_30() {
    let input = "for $x in $s order by $x where $x return $x";

    accepted(input, Dialect::xquery_3_0());
    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @"1:26: 'where' must precede 'order by' in XQuery 1.0");
}

#[test]
fn group_by_needs_30() {
    let input = "for $x in (1,2) group by $x return $x";

    accepted(input, Dialect::xquery_3_0());
    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @"1:17: 'group by' clauses require XQuery 3.0");
}

#[test]
fn group_by_with_binding_and_collation() {
    let input = indoc! {r#"
        for $x in $docs
        let $k := $x/key
        group by $g as xs:string := $k collation "http://example.com/c", $h
        return $g
    "#};

    accepted(input, Dialect::xquery_3_0());
}

#[test]
fn count_clause_needs_30() {
    let input = "for $x in (1,2) count $c return $c";

    accepted(input, Dialect::xquery_3_0());
    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @"1:17: 'count' clauses require XQuery 3.0");
}

#[test]
fn interleaved_for_let_after_where_in_30() {
    let input = indoc! {r#"
        for $x in (1, 2)
        where $x gt 1
        let $y := $x * 10
        for $z in ($y, $y)
        return $z
    "#};

    accepted(input, Dialect::xquery_3_0());
}

#[test]
fn allowing_empty_needs_30() {
    let input = "for $x allowing empty in () return $x";

    accepted(input, Dialect::xquery_3_0());
    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @"1:8: 'allowing empty' requires XQuery 3.0");
}

#[test]
fn flwor_needs_return() {
    insta::assert_snapshot!(
        rejected("for $x in (1,2) $x", Dialect::xquery_1_0()),
        @"1:17: expected 'return', found '$'");
}

#[test]
fn path_steps_named_like_clauses_still_parse() {
    // `for`, `let` and `return` are element names here, not keywords.
    accepted("/for/let/return", Dialect::xquery_1_0());
    accepted("let", Dialect::xquery_1_0());
}
