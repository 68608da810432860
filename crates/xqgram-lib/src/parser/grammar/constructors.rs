//! Node constructors: direct element constructors (lexed under the content
//! modes) and computed constructors.

use crate::parser::core::{PResult, Parser};
use crate::parser::token::TokenKind;

impl Parser<'_, '_> {
    /// Cursor is at [`TokenKind::TagOpen`]; the lexer has already switched
    /// to start-tag mode, so names, `=`, quotes and `>` arrive as tag
    /// tokens. Nested constructors recurse through the same path.
    pub(crate) fn parse_direct_constructor(&mut self) -> PResult {
        self.bump()?; // <
        let open_tok = self.cur_tok();
        let open_name = open_tok.kind.is_name().then(|| self.text_of(open_tok));
        self.expect_name("element name")?;
        while self.at_name() {
            self.bump()?;
            self.expect(TokenKind::Eq, "'='")?;
            self.parse_attribute_value()?;
        }
        if self.eat(TokenKind::TagSelfClose)? {
            return Ok(());
        }
        if !self.eat(TokenKind::TagClose)? {
            let found = self.found();
            // No reliable resynchronization point inside a broken tag.
            return self.error(format!("expected '>' in start tag, found {found}"));
        }
        loop {
            match self.cur() {
                TokenKind::Text
                | TokenKind::CharRef
                | TokenKind::Cdata
                | TokenKind::XmlComment
                | TokenKind::PiConstructor
                | TokenKind::Error => self.bump()?,
                TokenKind::LBrace => {
                    self.bump()?;
                    self.parse_expr()?;
                    self.expect(TokenKind::RBrace, "'}'")?;
                }
                TokenKind::TagOpen => self.parse_direct_constructor()?,
                TokenKind::CloseTagOpen => break,
                // The lexer reported the unterminated constructor already.
                TokenKind::Eof => return Ok(()),
                _ => {
                    let found = self.found();
                    self.error(format!("unexpected {found} in element content"))?;
                    self.bump()?;
                }
            }
        }
        self.bump()?; // </
        let close_tok = self.cur_tok();
        if close_tok.kind.is_name() {
            let close_name = self.text_of(close_tok);
            if let Some(open_name) = open_name {
                if close_name != open_name {
                    self.error_at(
                        close_tok.span,
                        format!(
                            "end tag '</{close_name}>' does not match start tag '<{open_name}>'"
                        ),
                    )?;
                }
            }
            self.bump()?;
        } else {
            self.expect_name("end tag name")?;
        }
        self.expect(TokenKind::TagClose, "'>'")
    }

    fn parse_attribute_value(&mut self) -> PResult {
        let quote = self.cur();
        if quote != TokenKind::Quot && quote != TokenKind::Apos {
            let found = self.found();
            return self.error(format!("expected attribute value, found {found}"));
        }
        self.bump()?;
        loop {
            match self.cur() {
                kind if kind == quote => {
                    self.bump()?;
                    break;
                }
                TokenKind::Text | TokenKind::CharRef | TokenKind::Error => self.bump()?,
                TokenKind::LBrace => {
                    self.bump()?;
                    self.parse_expr()?;
                    self.expect(TokenKind::RBrace, "'}'")?;
                }
                TokenKind::Eof => break,
                _ => {
                    let found = self.found();
                    self.error(format!("unexpected {found} in attribute value"))?;
                    self.bump()?;
                }
            }
        }
        Ok(())
    }

    /// Caller has committed via the name/brace lookahead, so the leading
    /// keyword is trusted here.
    pub(crate) fn parse_computed_constructor(&mut self) -> PResult {
        if self.at_kw("document") {
            self.bump()?;
            return self.parse_enclosed_expr();
        }
        if self.at_kw("text") || self.at_kw("comment") {
            self.bump()?;
            return self.parse_enclosed_expr();
        }
        if self.at_kw("namespace") {
            self.bump()?;
            if self.at(TokenKind::NCName) {
                self.bump()?;
            } else {
                self.parse_enclosed_expr()?;
            }
            return self.parse_enclosed_expr();
        }
        if self.at_kw("processing-instruction") {
            self.bump()?;
            if self.at(TokenKind::NCName) {
                self.bump()?;
            } else {
                self.parse_enclosed_expr()?;
            }
            return self.parse_opt_enclosed_expr();
        }
        // element | attribute
        self.bump()?;
        if self.at_name() {
            self.bump()?;
        } else {
            self.parse_enclosed_expr()?;
        }
        self.parse_opt_enclosed_expr()
    }

    /// `{ Expr? }`: content of computed element, attribute and
    /// processing-instruction constructors may be empty.
    fn parse_opt_enclosed_expr(&mut self) -> PResult {
        self.expect(TokenKind::LBrace, "'{'")?;
        if !self.at(TokenKind::RBrace) {
            self.parse_expr()?;
        }
        self.expect(TokenKind::RBrace, "'}'")
    }
}
