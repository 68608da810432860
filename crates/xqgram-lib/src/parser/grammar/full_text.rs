//! Full Text selections and match options, the right-hand side of
//! `ftcontains` and the body of `declare ft-option`.

use crate::parser::core::{PResult, Parser};
use crate::parser::token::TokenKind;

impl Parser<'_, '_> {
    /// FTSelection ::= FTOr FTPosFilter*
    pub(crate) fn parse_ft_selection(&mut self) -> PResult {
        self.parse_ft_or()?;
        self.parse_ft_pos_filters()
    }

    fn parse_ft_pos_filters(&mut self) -> PResult {
        loop {
            if self.at_kw("ordered") {
                self.bump()?;
            } else if self.at_kw("window") {
                self.bump()?;
                self.parse_additive_expr()?;
                self.parse_ft_unit()?;
            } else if self.at_kw("distance") {
                self.bump()?;
                self.parse_ft_range()?;
                self.parse_ft_unit()?;
            } else if self.at_kw("same") || self.at_kw("different") {
                self.bump()?;
                if !self.eat_kw("sentence")? && !self.eat_kw("paragraph")? {
                    let found = self.found();
                    self.error(format!("expected 'sentence' or 'paragraph', found {found}"))?;
                }
            } else if self.at_kw("at") && (self.nth_kw(1, "start") || self.nth_kw(1, "end")) {
                self.bump()?;
                self.bump()?;
            } else if self.at_kw2("entire", "content") {
                self.bump()?;
                self.bump()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn parse_ft_unit(&mut self) -> PResult {
        if self.eat_kw("words")? || self.eat_kw("sentences")? || self.eat_kw("paragraphs")? {
            return Ok(());
        }
        let found = self.found();
        self.error(format!(
            "expected 'words', 'sentences' or 'paragraphs', found {found}"
        ))
    }

    fn parse_ft_range(&mut self) -> PResult {
        if self.eat_kw("exactly")? {
            self.parse_additive_expr()
        } else if self.at_kw("at") && (self.nth_kw(1, "least") || self.nth_kw(1, "most")) {
            self.bump()?;
            self.bump()?;
            self.parse_additive_expr()
        } else if self.eat_kw("from")? {
            self.parse_additive_expr()?;
            self.expect_kw("to")?;
            self.parse_additive_expr()
        } else {
            let found = self.found();
            self.error(format!(
                "expected 'exactly', 'at least', 'at most' or 'from', found {found}"
            ))
        }
    }

    fn parse_ft_or(&mut self) -> PResult {
        self.parse_ft_and()?;
        while self.eat_kw("ftor")? {
            self.parse_ft_and()?;
        }
        Ok(())
    }

    fn parse_ft_and(&mut self) -> PResult {
        self.parse_ft_mild_not()?;
        while self.eat_kw("ftand")? {
            self.parse_ft_mild_not()?;
        }
        Ok(())
    }

    fn parse_ft_mild_not(&mut self) -> PResult {
        self.parse_ft_unary_not()?;
        while self.at_kw2("not", "in") {
            self.bump()?;
            self.bump()?;
            self.parse_ft_unary_not()?;
        }
        Ok(())
    }

    fn parse_ft_unary_not(&mut self) -> PResult {
        self.eat_kw("ftnot")?;
        self.parse_ft_primary_with_options()
    }

    fn parse_ft_primary_with_options(&mut self) -> PResult {
        self.parse_ft_primary()?;
        while self.eat_kw("using")? {
            self.parse_ft_match_option()?;
        }
        if self.eat_kw("weight")? {
            self.expect(TokenKind::LBrace, "'{'")?;
            self.parse_range_expr()?;
            self.expect(TokenKind::RBrace, "'}'")?;
        }
        Ok(())
    }

    fn parse_ft_primary(&mut self) -> PResult {
        if self.eat(TokenKind::LParen)? {
            self.parse_ft_selection()?;
            return self.expect(TokenKind::RParen, "')'");
        }
        if self.at(TokenKind::Pragma) {
            while self.eat(TokenKind::Pragma)? {}
            self.expect(TokenKind::LBrace, "'{'")?;
            if !self.at(TokenKind::RBrace) {
                self.parse_ft_selection()?;
            }
            return self.expect(TokenKind::RBrace, "'}'");
        }
        self.parse_ft_words()?;
        if self.eat_kw("occurs")? {
            self.parse_ft_range()?;
            self.expect_kw("times")?;
        }
        Ok(())
    }

    fn parse_ft_words(&mut self) -> PResult {
        match self.cur() {
            TokenKind::StringLiteral
            | TokenKind::IntegerLiteral
            | TokenKind::DecimalLiteral
            | TokenKind::DoubleLiteral => self.bump()?,
            TokenKind::LBrace => {
                self.bump()?;
                self.parse_expr()?;
                self.expect(TokenKind::RBrace, "'}'")?;
            }
            _ => {
                let found = self.found();
                return self.error(format!("expected search terms, found {found}"));
            }
        }
        // FTAnyallOption
        if self.eat_kw("any")? {
            self.eat_kw("word")?;
        } else if self.eat_kw("all")? {
            self.eat_kw("words")?;
        } else {
            self.eat_kw("phrase")?;
        }
        Ok(())
    }

    /// One match option; the leading `using` is consumed by the caller.
    pub(crate) fn parse_ft_match_option(&mut self) -> PResult {
        if self.eat_kw("case")? {
            return self.expect_sensitivity();
        }
        if self.eat_kw("lowercase")? || self.eat_kw("uppercase")? {
            return Ok(());
        }
        if self.eat_kw("diacritics")? {
            return self.expect_sensitivity();
        }
        if self.eat_kw("stemming")? || self.eat_kw("wildcards")? {
            return Ok(());
        }
        if self.eat_kw("no")? {
            if self.eat_kw("stemming")? || self.eat_kw("wildcards")? || self.eat_kw("thesaurus")? {
                return Ok(());
            }
            if self.eat_kw("stop")? {
                return self.expect_kw("words");
            }
            let found = self.found();
            return self.error(format!(
                "expected 'stemming', 'wildcards', 'thesaurus' or 'stop words' \
                 after 'no', found {found}"
            ));
        }
        if self.eat_kw("thesaurus")? {
            return self.parse_ft_thesaurus_option();
        }
        if self.at_kw2("stop", "words") {
            self.bump()?;
            self.bump()?;
            return self.parse_ft_stop_word_option();
        }
        if self.eat_kw("language")? {
            return self.expect(TokenKind::StringLiteral, "language string");
        }
        if self.eat_kw("option")? {
            self.expect_name("option name")?;
            return self.expect(TokenKind::StringLiteral, "option value string");
        }
        let found = self.found();
        self.error(format!("expected a full-text match option, found {found}"))
    }

    fn expect_sensitivity(&mut self) -> PResult {
        if self.eat_kw("insensitive")? || self.eat_kw("sensitive")? {
            return Ok(());
        }
        let found = self.found();
        self.error(format!(
            "expected 'insensitive' or 'sensitive', found {found}"
        ))
    }

    fn parse_ft_thesaurus_option(&mut self) -> PResult {
        if self.eat(TokenKind::LParen)? {
            self.parse_ft_thesaurus_id()?;
            while self.eat(TokenKind::Comma)? {
                self.parse_ft_thesaurus_id()?;
            }
            return self.expect(TokenKind::RParen, "')'");
        }
        self.parse_ft_thesaurus_id()
    }

    fn parse_ft_thesaurus_id(&mut self) -> PResult {
        if self.eat_kw("default")? {
            return Ok(());
        }
        self.expect_kw("at")?;
        self.expect(TokenKind::StringLiteral, "thesaurus URI string")?;
        if self.eat_kw("relationship")? {
            self.expect(TokenKind::StringLiteral, "relationship string")?;
        }
        if self.at_kw("exactly")
            || (self.at_kw("at") && (self.nth_kw(1, "least") || self.nth_kw(1, "most")))
            || self.at_kw("from")
        {
            self.parse_ft_literal_range()?;
            self.expect_kw("levels")?;
        }
        Ok(())
    }

    fn parse_ft_literal_range(&mut self) -> PResult {
        if self.eat_kw("exactly")? {
            return self.expect(TokenKind::IntegerLiteral, "integer literal");
        }
        if self.at_kw("at") {
            self.bump()?;
            self.bump()?; // least | most, matched by the caller
            return self.expect(TokenKind::IntegerLiteral, "integer literal");
        }
        self.expect_kw("from")?;
        self.expect(TokenKind::IntegerLiteral, "integer literal")?;
        self.expect_kw("to")?;
        self.expect(TokenKind::IntegerLiteral, "integer literal")
    }

    fn parse_ft_stop_word_option(&mut self) -> PResult {
        if !self.eat_kw("default")? {
            self.parse_ft_stop_words()?;
        }
        while self.at_kw("union") || self.at_kw("except") {
            self.bump()?;
            self.parse_ft_stop_words()?;
        }
        Ok(())
    }

    fn parse_ft_stop_words(&mut self) -> PResult {
        if self.eat_kw("at")? {
            return self.expect(TokenKind::StringLiteral, "stop word list URI string");
        }
        self.expect(TokenKind::LParen, "'('")?;
        self.expect(TokenKind::StringLiteral, "stop word string")?;
        while self.eat(TokenKind::Comma)? {
            self.expect(TokenKind::StringLiteral, "stop word string")?;
        }
        self.expect(TokenKind::RParen, "')'")
    }
}
