use crate::Dialect;
use crate::parser::tests::{accepted, rejected};

#[test]
fn occurrence_indicators() {
    accepted("$x instance of xs:integer", Dialect::xquery_1_0());
    accepted("$x instance of xs:integer?", Dialect::xquery_1_0());
    accepted("$x instance of xs:integer*", Dialect::xquery_1_0());
    accepted("$x instance of xs:integer+", Dialect::xquery_1_0());
}

#[test]
fn empty_sequence_and_item() {
    accepted("$x instance of empty-sequence()", Dialect::xquery_1_0());
    accepted("$x instance of item()*", Dialect::xquery_1_0());
}

#[test]
fn element_and_attribute_tests() {
    accepted("$x instance of element()", Dialect::xquery_1_0());
    accepted("$x instance of element(foo)", Dialect::xquery_1_0());
    accepted("$x instance of element(*, xs:string)", Dialect::xquery_1_0());
    accepted("$x instance of element(foo, xs:string?)", Dialect::xquery_1_0());
    accepted("$x instance of attribute(*, xs:integer)", Dialect::xquery_1_0());
    accepted("$x instance of schema-element(foo)", Dialect::xquery_1_0());
    accepted("$x instance of schema-attribute(bar)", Dialect::xquery_1_0());
}

#[test]
fn document_node_tests() {
    accepted("$x instance of document-node()", Dialect::xquery_1_0());
    accepted(
        "$x instance of document-node(element(root))",
        Dialect::xquery_1_0(),
    );
    accepted(
        "$x instance of document-node(schema-element(root))",
        Dialect::xquery_1_0(),
    );
}

#[test]
fn processing_instruction_tests() {
    accepted("$x instance of processing-instruction()", Dialect::xquery_1_0());
    accepted("$x instance of processing-instruction(pi)", Dialect::xquery_1_0());
    accepted(
        "$x instance of processing-instruction('pi')",
        Dialect::xquery_1_0(),
    );
}

#[test]
fn namespace_node_test_needs_30() {
    accepted("$x instance of namespace-node()", Dialect::xquery_3_0());

    // In 1.0 the name parses as an atomic type and the call parens are
    // left dangling.
    insta::assert_snapshot!(
        rejected("$x instance of namespace-node()", Dialect::xquery_1_0()),
        @"1:30: unexpected '(' after end of query");
}

#[test]
fn function_tests_need_30() {
    accepted("$f instance of function(*)", Dialect::xquery_3_0());
    accepted(
        "$f instance of function(xs:integer, item()*) as item()*",
        Dialect::xquery_3_0(),
    );
    accepted("$f instance of %local:a function(*)", Dialect::xquery_3_0());

    insta::assert_snapshot!(
        rejected("$f instance of function(*)", Dialect::xquery_1_0()),
        @"1:16: function tests require XQuery 3.0");
}

#[test]
fn parenthesized_item_type_needs_30() {
    accepted("$x instance of (xs:integer)+", Dialect::xquery_3_0());

    insta::assert_snapshot!(
        rejected("$x instance of (xs:integer)", Dialect::xquery_1_0()),
        @"1:16: parenthesized item types require XQuery 3.0");
}

#[test]
fn single_type_with_optionality() {
    accepted("'x' castable as xs:NCName?", Dialect::xquery_1_0());
}
