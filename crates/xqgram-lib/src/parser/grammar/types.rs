//! Sequence types, item types and kind tests.

use crate::parser::core::{PResult, Parser};
use crate::parser::token::TokenKind;

impl Parser<'_, '_> {
    /// `("as" SequenceType)?`, shared by every binding form.
    pub(crate) fn parse_opt_type_decl(&mut self) -> PResult {
        if self.eat_kw("as")? {
            self.parse_sequence_type()?;
        }
        Ok(())
    }

    pub(crate) fn parse_sequence_type(&mut self) -> PResult {
        if self.at_kw("empty-sequence") && self.nth(1) == TokenKind::LParen {
            self.bump()?;
            self.bump()?;
            return self.expect(TokenKind::RParen, "')'");
        }
        self.parse_item_type()?;
        // Occurrence indicator binds greedily, per the grammar.
        if self.at(TokenKind::Question) || self.at(TokenKind::Star) || self.at(TokenKind::Plus) {
            self.bump()?;
        }
        Ok(())
    }

    pub(crate) fn parse_item_type(&mut self) -> PResult {
        if self.at_kind_test() {
            return self.parse_kind_test();
        }
        if self.at_kw("item") && self.nth(1) == TokenKind::LParen {
            self.bump()?;
            self.bump()?;
            return self.expect(TokenKind::RParen, "')'");
        }
        if self.at(TokenKind::Percent)
            || (self.at_kw("function") && self.nth(1) == TokenKind::LParen)
        {
            return self.parse_function_test();
        }
        if self.at(TokenKind::LParen) {
            if !self.v30() {
                self.error("parenthesized item types require XQuery 3.0")?;
            }
            self.bump()?;
            self.parse_item_type()?;
            return self.expect(TokenKind::RParen, "')'");
        }
        if self.at_name() {
            return self.bump();
        }
        let found = self.found();
        self.error(format!("expected a sequence type, found {found}"))
    }

    /// `AtomicType "?"?`, the target of cast and castable.
    pub(crate) fn parse_single_type(&mut self) -> PResult {
        self.expect_name("atomic type name")?;
        self.eat(TokenKind::Question)?;
        Ok(())
    }

    fn parse_function_test(&mut self) -> PResult {
        if !self.v30() {
            self.error("function tests require XQuery 3.0")?;
        }
        self.parse_annotations()?;
        self.expect_kw("function")?;
        self.expect(TokenKind::LParen, "'('")?;
        if self.eat(TokenKind::Star)? {
            return self.expect(TokenKind::RParen, "')'");
        }
        if !self.at(TokenKind::RParen) {
            self.parse_sequence_type()?;
            while self.eat(TokenKind::Comma)? {
                self.parse_sequence_type()?;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        self.expect_kw("as")?;
        self.parse_sequence_type()
    }

    /// Cursor is at a kind-test name verified by [`Parser::at_kind_test`].
    pub(crate) fn parse_kind_test(&mut self) -> PResult {
        let name_tok = self.cur_tok();
        let name = self.text_of(name_tok);
        self.bump()?;
        self.expect(TokenKind::LParen, "'('")?;
        match name {
            "node" | "comment" | "text" | "namespace-node" => {}
            "processing-instruction" => {
                if self.at(TokenKind::NCName) || self.at(TokenKind::StringLiteral) {
                    self.bump()?;
                }
            }
            "document-node" => {
                if self.at(TokenKind::NCName)
                    && (self.cur_text() == "element" || self.cur_text() == "schema-element")
                    && self.nth(1) == TokenKind::LParen
                {
                    self.parse_kind_test()?;
                } else if !self.at(TokenKind::RParen) {
                    let found = self.found();
                    self.error(format!(
                        "expected an element test or ')' in document-node(), found {found}"
                    ))?;
                }
            }
            "element" => {
                if self.at(TokenKind::Star) || self.at_name() {
                    self.bump()?;
                    if self.eat(TokenKind::Comma)? {
                        self.expect_name("type name")?;
                        self.eat(TokenKind::Question)?;
                    }
                }
            }
            "attribute" => {
                if self.at(TokenKind::Star) || self.at_name() {
                    self.bump()?;
                    if self.eat(TokenKind::Comma)? {
                        self.expect_name("type name")?;
                    }
                }
            }
            "schema-element" => self.expect_name("element declaration name")?,
            "schema-attribute" => self.expect_name("attribute declaration name")?,
            _ => debug_assert!(false, "not a kind-test name: {name}"),
        }
        self.expect(TokenKind::RParen, "')'")
    }
}
