use crate::Dialect;
use crate::parser::tests::{accepted, rejected};
use indoc::indoc;

fn ft() -> Dialect {
    Dialect::xquery_1_0().with_full_text(true)
}

#[test]
fn basic_ftcontains() {
    accepted("//book[. ftcontains 'usability']", ft());
}

#[test]
fn boolean_selection_operators() {
    accepted(
        "$t ftcontains 'web' ftand 'site' ftor ftnot 'spam' not in 'spam filter'",
        ft(),
    );
    accepted("$t ftcontains ('a' ftand 'b') ftor 'c'", ft());
}

#[test]
fn anyall_options_and_occurs() {
    accepted("$t ftcontains 'usability test' all words", ft());
    accepted("$t ftcontains 'usability' any word", ft());
    accepted("$t ftcontains 'exact phrase' phrase", ft());
    accepted("$t ftcontains 'term' occurs at least 2 times", ft());
    accepted("$t ftcontains 'term' occurs from 2 to 4 times", ft());
    accepted("$t ftcontains 'term' occurs exactly $n times", ft());
}

#[test]
fn words_from_an_expression() {
    accepted("$t ftcontains { fn:string($q) } all words", ft());
}

#[test]
fn match_options() {
    let input = indoc! {r#"
        $t ftcontains 'usability'
            using case insensitive
            using diacritics sensitive
            using stemming
            using thesaurus at "http://example.com/thes" relationship "broader" from 1 to 3 levels
            using stop words at "http://example.com/sw" union ("a", "the") except ("of")
            using language "en"
            using wildcards
            using option ex:tuning "fast"
    "#};

    accepted(input, ft());
}

#[test]
fn negated_match_options() {
    accepted("$t ftcontains 'x' using no stemming", ft());
    accepted("$t ftcontains 'x' using no wildcards", ft());
    accepted("$t ftcontains 'x' using no thesaurus", ft());
    accepted("$t ftcontains 'x' using no stop words", ft());
    accepted("$t ftcontains 'x' using lowercase", ft());
    accepted("$t ftcontains 'x' using uppercase", ft());
}

#[test]
fn thesaurus_list() {
    accepted(
        "$t ftcontains 'x' using thesaurus (default, at 'http://a' relationship 'narrower', at 'http://b')",
        ft(),
    );
}

#[test]
fn stop_words_default() {
    accepted("$t ftcontains 'x' using stop words default except ('and')", ft());
}

#[test]
fn weight_declaration() {
    accepted("$t ftcontains 'x' weight { 0.5 }", ft());
}

#[test]
fn position_filters() {
    accepted("$t ftcontains 'a' ftand 'b' ordered", ft());
    accepted("$t ftcontains ('a' ftand 'b') window 5 words", ft());
    accepted("$t ftcontains ('a' ftand 'b') distance at most 2 words", ft());
    accepted("$t ftcontains ('a' ftand 'b') same sentence", ft());
    accepted("$t ftcontains ('a' ftand 'b') different paragraph", ft());
    accepted("$t ftcontains 'a' at start", ft());
    accepted("$t ftcontains 'a' at end", ft());
    accepted("$t ftcontains 'a' entire content", ft());
}

#[test]
fn ignore_option() {
    accepted("$t ftcontains 'quote' without content $t//footnote", ft());
}

#[test]
fn score_variables() {
    accepted(
        "for $b score $s in //book[. ftcontains 'x'] return $s",
        ft(),
    );
    accepted(
        "let score $s := $b ftcontains 'x' return $s",
        ft(),
    );
}

#[test]
fn ftcontains_rejected_without_the_extension() {
    insta::assert_snapshot!(
        rejected("$t ftcontains 'x'", Dialect::xquery_1_0()),
        @"1:4: unexpected 'ftcontains' after end of query");
}

#[test]
fn full_text_composes_with_30() {
    accepted(
        "for $b score $s in //book[. ftcontains 'x'] count $c return $s + $c",
        Dialect::xquery_3_0().with_full_text(true),
    );
}

#[test]
fn missing_search_terms() {
    insta::assert_snapshot!(
        rejected("$t ftcontains using stemming", ft()),
        @"1:15: expected search terms, found 'using'");
}
