use crate::Dialect;
use crate::parser::tests::{accepted, rejected};
use indoc::indoc;

#[test]
fn arithmetic_precedence_chain() {
    accepted(
        "1 + 2 * -3 div 4 - 5 idiv 6 mod 7",
        Dialect::xquery_1_0(),
    );
}

#[test]
fn comparisons_general_value_node() {
    accepted(
        "1 < 2 and 3 >= 4 or 'a' eq 'b' and $a is $b and $a << $b and $a >> $b",
        Dialect::xquery_1_0(),
    );
}

#[test]
fn range_and_set_operators() {
    accepted("1 to 5", Dialect::xquery_1_0());
    accepted(
        "$a | $b union $c intersect $d except $e",
        Dialect::xquery_1_0(),
    );
}

#[test]
fn sequence_type_suffix_operators() {
    accepted("5 instance of xs:integer+", Dialect::xquery_1_0());
    accepted("$x treat as element(foo)", Dialect::xquery_1_0());
    accepted("'1' castable as xs:integer?", Dialect::xquery_1_0());
    accepted("'1' cast as xs:integer", Dialect::xquery_1_0());
}

#[test]
fn if_expression() {
    accepted("if ($x) then 1 else 2", Dialect::xquery_1_0());
}

#[test]
fn quantified_expressions() {
    accepted(
        "some $x in (1,2), $y as xs:integer in (3,4) satisfies $x eq $y",
        Dialect::xquery_1_0(),
    );
    accepted(
        "every $x in () satisfies $x",
        Dialect::xquery_1_0(),
    );
}

#[test]
fn typeswitch_expression() {
    let input = indoc! {r#"
        typeswitch ($x)
            case $a as element() return 1
            case xs:integer return 2
            default $d return 3
    "#};

    accepted(input, Dialect::xquery_1_0());
}

#[test]
fn typeswitch_union_case_types_need_30() {
    let input = "typeswitch ($x) case xs:integer | xs:double return 1 default return 2";

    accepted(input, Dialect::xquery_3_0());
    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @"1:33: union types in 'case' clauses require XQuery 3.0");
}

#[test]
fn switch_needs_30() {
    let input = "switch (1) case 1 case 2 return 'low' default return 'high'";

    accepted(input, Dialect::xquery_3_0());
    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @"1:1: 'switch' expressions require XQuery 3.0");
}

#[test]
fn try_catch_needs_30() {
    let input = "try { 1 div 0 } catch err:FOAR0001 | * { 0 }";

    accepted(input, Dialect::xquery_3_0());
    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @"1:1: 'try/catch' expressions require XQuery 3.0");
}

#[test]
fn string_concat_needs_30() {
    accepted("'a' || 'b' || 'c'", Dialect::xquery_3_0());
    insta::assert_snapshot!(rejected("'a' || 'b'", Dialect::xquery_1_0()), @"1:5: the '||' operator requires XQuery 3.0");
}

#[test]
fn simple_map_needs_30() {
    let input = "(1,2) ! .";

    accepted(input, Dialect::xquery_3_0());
    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @"1:7: the '!' simple map operator requires XQuery 3.0");
}

#[test]
fn extension_expression() {
    accepted("(# ext:hint value #) { 1 }", Dialect::xquery_1_0());
    accepted("(# a:one #) (# b:two #) {}", Dialect::xquery_1_0());
}

#[test]
fn validate_expression() {
    accepted("validate { $doc }", Dialect::xquery_1_0());
    accepted("validate lax { $doc }", Dialect::xquery_1_0());
    accepted("validate strict { $doc }", Dialect::xquery_1_0());
    accepted("validate type my:row { $doc }", Dialect::xquery_3_0());
}

#[test]
fn ordered_and_unordered_blocks() {
    accepted("ordered { 1, 2 }", Dialect::xquery_1_0());
    accepted("unordered { $a/b }", Dialect::xquery_1_0());
}

#[test]
fn incomplete_operand_at_end_of_input() {
    insta::assert_snapshot!(
        rejected("1 +", Dialect::xquery_1_0()),
        @"1:4: expected an expression, found end of input");
}

#[test]
fn empty_input_is_rejected() {
    insta::assert_snapshot!(
        rejected("", Dialect::xquery_1_0()),
        @"1:1: unexpected end of input: expected a query body");
}
