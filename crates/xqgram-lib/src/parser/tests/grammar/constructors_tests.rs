use crate::Dialect;
use crate::parser::tests::{accepted, rejected};
use indoc::indoc;

#[test]
fn direct_element_with_attributes_and_content() {
    let input = indoc! {r#"
        <book id="b1" lang='{$lang}'>
            <title>XQuery {1 + 1} ways</title>
            <!-- internal --> <?pi data?>
            <![CDATA[<raw>&]]>
            &amp; &#10;
            <empty/>
        </book>
    "#};

    accepted(input, Dialect::xquery_1_0());
}

#[test]
fn doubled_braces_and_quotes_in_content() {
    accepted("<a>{{not an expr}}</a>", Dialect::xquery_1_0());
    accepted(r#"<a b="say ""hi"" {1}"/>"#, Dialect::xquery_1_0());
    accepted("<a b='it''s {1}'/>", Dialect::xquery_1_0());
}

#[test]
fn end_tag_mismatch() {
    insta::assert_snapshot!(
        rejected("<a></b>", Dialect::xquery_1_0()),
        @"1:6: end tag '</b>' does not match start tag '<a>'");
}

#[test]
fn nested_end_tags_must_match_their_own_level() {
    accepted("<a><b></b></a>", Dialect::xquery_1_0());
    insta::assert_snapshot!(
        rejected("<a><b></a></b>", Dialect::xquery_1_0()),
        @r"
    1:9: end tag '</a>' does not match start tag '<b>'
    1:13: end tag '</b>' does not match start tag '<a>'
    ");
}

#[test]
fn unterminated_constructor() {
    insta::assert_snapshot!(
        rejected("<a><b></b>", Dialect::xquery_1_0()),
        @"1:11: unterminated direct constructor");
}

#[test]
fn stray_close_brace_in_content() {
    insta::assert_snapshot!(
        rejected("<a>}</a>", Dialect::xquery_1_0()),
        @"1:4: '}' in element content must be written as '}}'");
}

#[test]
fn raw_less_than_in_content() {
    insta::assert_snapshot!(
        rejected("<a> 1 < 2 </a>", Dialect::xquery_1_0()),
        @"1:7: '<' in element content must be written as '&lt;'");
}

#[test]
fn enclosed_expressions_nest_through_constructors() {
    accepted(
        "<a>{ for $i in 1 to 3 return <b n=\"{$i}\">{$i * 2}</b> }</a>",
        Dialect::xquery_1_0(),
    );
}

#[test]
fn computed_constructors() {
    let input = indoc! {r#"
        document {
            element log {
                attribute level { "info" },
                text { "started" },
                comment { "generated" },
                processing-instruction fmt { "data" },
                element { $name } {}
            }
        }
    "#};

    accepted(input, Dialect::xquery_1_0());
}

#[test]
fn computed_namespace_constructor_needs_30() {
    accepted("namespace p { 'urn:x' }", Dialect::xquery_3_0());

    // Under 1.0 this reads as two path steps that break at the brace.
    insta::assert_snapshot!(
        rejected("namespace p { 'urn:x' }", Dialect::xquery_1_0()),
        @"1:13: unexpected '{' after end of query");
}

#[test]
fn xml_comment_and_pi_as_expressions() {
    accepted("<!-- standalone -->", Dialect::xquery_1_0());
    accepted("<?target data?>", Dialect::xquery_1_0());
}
