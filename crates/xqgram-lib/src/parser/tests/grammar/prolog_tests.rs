use crate::Dialect;
use crate::parser::tests::{accepted, rejected};
use indoc::indoc;

#[test]
fn full_prolog_main_module() {
    let input = indoc! {r#"
        xquery version "1.0" encoding "UTF-8";
        declare boundary-space preserve;
        declare default collation "http://example.com/collation";
        declare base-uri "http://example.com/";
        declare construction strip;
        declare ordering unordered;
        declare copy-namespaces no-preserve, inherit;
        declare default element namespace "http://example.com/ns";
        declare default function namespace "http://example.com/fns";
        declare namespace foo = "http://example.com/foo";
        import schema namespace xsd = "http://www.w3.org/2001/XMLSchema" at "xs.xsd";
        import module namespace m = "http://example.com/m" at "m.xq", "m2.xq";
        declare variable $x as xs:integer := 42;
        declare variable $ext external;
        declare function local:twice($n as xs:integer) as xs:integer { $n * 2 };
        declare function local:noop() external;
        declare option opt:method "xml";
        local:twice($x)
    "#};

    accepted(input, Dialect::xquery_1_0());
}

#[test]
fn library_module() {
    let input = indoc! {r#"
        module namespace m = "http://example.com/m";
        declare namespace other = "http://example.com/other";
        declare variable $m:limit := 10;
        declare function m:id($x) { $x };
    "#};

    accepted(input, Dialect::xquery_1_0());
}

#[test]
fn import_schema_default_element_namespace() {
    let input = indoc! {r#"
        import schema default element namespace "http://example.com/s";
        1
    "#};

    accepted(input, Dialect::xquery_1_0());
}

#[test]
fn setter_after_variable_is_out_of_order() {
    let input = indoc! {r#"
        declare variable $x := 1;
        declare namespace foo = "http://example.com/foo";
        $x
    "#};

    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @"2:1: namespace, setter and import declarations must precede variable and function declarations");
}

#[test]
fn missing_declaration_separator() {
    let input = indoc! {r#"
        declare namespace foo = "http://x"
        1 + 1
    "#};

    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @r"
    2:1: expected ';' after declaration, found integer literal
    2:6: unexpected end of input: expected a query body
    ");
}

#[test]
fn boundary_space_wants_preserve_or_strip() {
    let input = "declare boundary-space yes; 1";

    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @"1:24: expected 'preserve' or 'strip', found 'yes'");
}

#[test]
fn version_decl_alone() {
    accepted("xquery version \"3.0\"; .", Dialect::xquery_3_0());
}

#[test]
fn encoding_only_version_decl_is_30() {
    accepted("xquery encoding \"UTF-8\"; 1", Dialect::xquery_3_0());

    insta::assert_snapshot!(
        rejected("xquery encoding \"UTF-8\"; 1", Dialect::xquery_1_0()),
        @"1:8: 'xquery encoding' without 'version' requires XQuery 3.0");
}

#[test]
fn updating_function_declaration() {
    let input = indoc! {r#"
        declare updating function local:del($n) { delete node $n };
        1
    "#};

    accepted(input, Dialect::xquery_1_0().with_update(true));
}

#[test]
fn updating_function_must_not_declare_return_type() {
    let input = indoc! {r#"
        declare updating function local:del($n) as xs:integer { delete node $n };
        1
    "#};

    insta::assert_snapshot!(
        rejected(input, Dialect::xquery_1_0().with_update(true)),
        @"1:44: an updating function must not declare a return type");
}

#[test]
fn revalidation_declaration() {
    accepted(
        "declare revalidation skip; 1",
        Dialect::xquery_1_0().with_update(true),
    );
}

#[test]
fn ft_option_declaration() {
    accepted(
        "declare ft-option using stemming using language \"en\"; 1",
        Dialect::xquery_1_0().with_full_text(true),
    );
}

#[test]
fn annotated_declarations() {
    let input = indoc! {r#"
        declare %private function local:f() { 1 };
        declare %ann:meta("a", 2) variable $v := 3;
        local:f() + $v
    "#};

    accepted(input, Dialect::xquery_3_0());
}

#[test]
fn annotations_rejected_in_10() {
    let input = "declare %private function local:f() { 1 }; local:f()";

    insta::assert_snapshot!(rejected(input, Dialect::xquery_1_0()), @"1:1: annotations require XQuery 3.0");
}

#[test]
fn context_item_declaration() {
    accepted(
        "declare context item as xs:integer := 0; .",
        Dialect::xquery_3_0(),
    );
    accepted(
        "declare context item external; .",
        Dialect::xquery_3_0(),
    );
}

#[test]
fn external_variable_default_value_is_30() {
    accepted(
        "declare variable $x external := 1; $x",
        Dialect::xquery_3_0(),
    );

    insta::assert_snapshot!(
        rejected("declare variable $x external := 1; $x", Dialect::xquery_1_0()),
        @"1:30: default values for external variables require XQuery 3.0");
}
