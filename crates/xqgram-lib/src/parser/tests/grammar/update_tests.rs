use crate::Dialect;
use crate::parser::tests::{accepted, rejected};
use indoc::indoc;

fn upd() -> Dialect {
    Dialect::xquery_1_0().with_update(true)
}

#[test]
fn insert_forms() {
    accepted("insert node <a/> into /doc", upd());
    accepted("insert nodes ($a, $b) into /doc", upd());
    accepted("insert node <a/> as first into /doc", upd());
    accepted("insert node <a/> as last into /doc", upd());
    accepted("insert node <a/> after /doc/x", upd());
    accepted("insert node <a/> before /doc/x", upd());
}

#[test]
fn delete_forms() {
    accepted("delete node /doc/a", upd());
    accepted("delete nodes /doc//comment()", upd());
}

#[test]
fn replace_forms() {
    accepted("replace node /doc/a with <b/>", upd());
    accepted("replace value of node /doc/a with 'new'", upd());
}

#[test]
fn rename_form() {
    accepted("rename node /doc/a as 'b'", upd());
}

#[test]
fn transform_form() {
    let input = indoc! {r#"
        copy $c := $doc, $d := $other
        modify (delete node $c/stale, rename node $d/x as 'y')
        return ($c, $d)
    "#};

    accepted(input, upd());
}

#[test]
fn update_inside_flwor() {
    accepted(
        "for $x in /doc/item return delete node $x",
        upd(),
    );
}

#[test]
fn insert_requires_a_target_keyword() {
    insta::assert_snapshot!(
        rejected("insert node <a/> at /doc", upd()),
        @"1:18: expected 'into', 'after' or 'before', found 'at'");
}

#[test]
fn update_syntax_rejected_without_the_extension() {
    insta::assert_snapshot!(
        rejected("delete node /doc/a", Dialect::xquery_1_0()),
        @"1:8: unexpected 'node' after end of query");
    insta::assert_snapshot!(
        rejected("insert node <a/> into /doc", Dialect::xquery_3_0()),
        @"1:8: unexpected 'node' after end of query");
}

#[test]
fn update_keywords_stay_usable_as_names() {
    // Element tests named like update keywords still parse everywhere.
    accepted("/delete/insert/rename", upd());
    accepted("/delete/insert/rename", Dialect::xquery_1_0());
}
