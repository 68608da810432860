//! Module level: version declaration, library/main modules, the prolog.

use crate::parser::core::{PResult, Parser};
use crate::parser::token::{TokenKind, TokenSet, token_sets};

/// Recovery boundary after a broken prolog declaration.
const DECL_END: TokenSet = TokenSet::new(&[TokenKind::Semi]);

impl Parser<'_, '_> {
    pub(crate) fn parse_module(&mut self) -> PResult {
        self.pump()?;
        if self.at_kw("xquery")
            && (self.nth_kw(1, "version") || self.nth_kw(1, "encoding"))
            && self.nth(2) == TokenKind::StringLiteral
        {
            self.parse_version_decl()?;
        }
        if self.at_kw2("module", "namespace") {
            self.parse_library_module()?;
        } else {
            self.parse_main_module()?;
        }
        if !self.at(TokenKind::Eof) {
            self.report_trailing_input()?;
        }
        Ok(())
    }

    /// Leftover tokens after a complete query body. When the tail still
    /// reads as an expression the break is really at whatever follows it:
    /// `copy $t := 1` without the update dialect points at `:=`, not `$t`.
    fn report_trailing_input(&mut self) -> PResult {
        let tail = self.cur_tok();
        while self.at_any(token_sets::EXPR_FIRST) {
            self.parse_expr_single()?;
        }
        let at = if self.at(TokenKind::Eof) { tail } else { self.cur_tok() };
        let found = self.describe_token(at);
        self.error_at(at.span, format!("unexpected {found} after end of query"))?;
        // Lenient mode: nothing downstream can use the leftovers.
        while !self.at(TokenKind::Eof) {
            self.bump()?;
        }
        Ok(())
    }

    fn parse_version_decl(&mut self) -> PResult {
        self.bump()?; // xquery
        if self.eat_kw("version")? {
            self.expect(TokenKind::StringLiteral, "version string")?;
            if self.eat_kw("encoding")? {
                self.expect(TokenKind::StringLiteral, "encoding string")?;
            }
        } else {
            // `xquery encoding "..."` without a version is 3.0-only.
            if !self.v30() {
                self.error("'xquery encoding' without 'version' requires XQuery 3.0")?;
            }
            self.expect_kw("encoding")?;
            self.expect(TokenKind::StringLiteral, "encoding string")?;
        }
        self.end_decl()
    }

    fn parse_library_module(&mut self) -> PResult {
        self.bump()?; // module
        self.bump()?; // namespace
        self.expect(TokenKind::NCName, "namespace prefix")?;
        self.expect(TokenKind::Eq, "'='")?;
        self.expect(TokenKind::StringLiteral, "namespace URI")?;
        self.end_decl()?;
        self.parse_prolog()?;
        if !self.at(TokenKind::Eof) {
            let found = self.found();
            self.error(format!(
                "expected a declaration in library module, found {found}"
            ))?;
        }
        Ok(())
    }

    fn parse_main_module(&mut self) -> PResult {
        self.parse_prolog()?;
        if self.at(TokenKind::Eof) {
            return self.error("unexpected end of input: expected a query body");
        }
        self.parse_expr()
    }

    /// Prolog ::= (setters, namespace declarations, imports)* then
    /// (variable, function, option, context-item declarations)*. The two
    /// phases are ordered; a phase-one declaration after phase two begins
    /// is a syntax error here rather than downstream confusion.
    fn parse_prolog(&mut self) -> PResult {
        loop {
            if self.at_kw("import") && (self.nth_kw(1, "schema") || self.nth_kw(1, "module")) {
                self.parse_import()?;
                self.end_decl()?;
                continue;
            }
            if self.at_kw("declare") && self.at_phase_one_decl(1) {
                self.parse_phase_one_decl()?;
                self.end_decl()?;
                continue;
            }
            break;
        }
        loop {
            if !self.at_kw("declare") {
                break;
            }
            if self.at_phase_one_decl(1)
                || (self.at_kw("import") && (self.nth_kw(1, "schema") || self.nth_kw(1, "module")))
            {
                self.error(
                    "namespace, setter and import declarations must precede \
                     variable and function declarations",
                )?;
                self.parse_phase_one_decl()?;
                self.end_decl()?;
                continue;
            }
            if self.nth_kw(1, "variable") {
                self.bump()?;
                self.bump()?;
                self.parse_var_decl()?;
            } else if self.nth_kw(1, "function") {
                self.bump()?;
                self.bump()?;
                self.parse_function_decl(false)?;
            } else if self.dialect.update
                && self.nth_kw(1, "updating")
                && self.nth_kw(2, "function")
            {
                self.bump()?;
                self.bump()?;
                self.bump()?;
                self.parse_function_decl(true)?;
            } else if self.nth(1) == TokenKind::Percent {
                if !self.v30() {
                    self.error("annotations require XQuery 3.0")?;
                }
                self.bump()?; // declare
                self.parse_annotations()?;
                if self.eat_kw("variable")? {
                    self.parse_var_decl()?;
                } else if self.eat_kw("function")? {
                    self.parse_function_decl(false)?;
                } else {
                    let found = self.found();
                    self.error(format!(
                        "expected 'variable' or 'function' after annotations, found {found}"
                    ))?;
                    self.recover(DECL_END)?;
                }
            } else if self.nth_kw(1, "option") && self.nth(2).is_name() {
                self.bump()?;
                self.bump()?;
                self.expect_name("option name")?;
                self.expect(TokenKind::StringLiteral, "option value string")?;
            } else if self.nth_kw(1, "context") && self.nth_kw(2, "item") {
                if !self.v30() {
                    self.error("'declare context item' requires XQuery 3.0")?;
                }
                self.bump()?;
                self.bump()?;
                self.bump()?;
                self.parse_context_item_decl()?;
            } else {
                break;
            }
            self.end_decl()?;
        }
        Ok(())
    }

    fn at_phase_one_decl(&mut self, k: usize) -> bool {
        self.nth_kw(k, "namespace")
            || self.nth_kw(k, "boundary-space")
            || self.nth_kw(k, "default")
            || self.nth_kw(k, "base-uri")
            || self.nth_kw(k, "construction")
            || self.nth_kw(k, "ordering")
            || self.nth_kw(k, "copy-namespaces")
            || (self.dialect.update && self.nth_kw(k, "revalidation"))
            || (self.dialect.full_text && self.nth_kw(k, "ft-option"))
    }

    /// Caller has matched `declare` + a phase-one keyword, or `import`.
    fn parse_phase_one_decl(&mut self) -> PResult {
        if self.at_kw("import") {
            return self.parse_import();
        }
        self.bump()?; // declare
        if self.eat_kw("namespace")? {
            self.expect(TokenKind::NCName, "namespace prefix")?;
            self.expect(TokenKind::Eq, "'='")?;
            self.expect(TokenKind::StringLiteral, "namespace URI")?;
        } else if self.eat_kw("boundary-space")? {
            self.expect_one_of_kw(&["preserve", "strip"])?;
        } else if self.eat_kw("default")? {
            self.parse_default_decl()?;
        } else if self.eat_kw("base-uri")? {
            self.expect(TokenKind::StringLiteral, "base URI string")?;
        } else if self.eat_kw("construction")? {
            self.expect_one_of_kw(&["preserve", "strip"])?;
        } else if self.eat_kw("ordering")? {
            self.expect_one_of_kw(&["ordered", "unordered"])?;
        } else if self.eat_kw("copy-namespaces")? {
            self.expect_one_of_kw(&["preserve", "no-preserve"])?;
            self.expect(TokenKind::Comma, "','")?;
            self.expect_one_of_kw(&["inherit", "no-inherit"])?;
        } else if self.dialect.update && self.eat_kw("revalidation")? {
            self.expect_one_of_kw(&["strict", "lax", "skip"])?;
        } else if self.dialect.full_text && self.eat_kw("ft-option")? {
            self.expect_kw("using")?;
            self.parse_ft_match_option()?;
            while self.eat_kw("using")? {
                self.parse_ft_match_option()?;
            }
        } else {
            let found = self.found();
            self.error(format!("expected a declaration keyword, found {found}"))?;
            self.recover(DECL_END)?;
        }
        Ok(())
    }

    fn parse_default_decl(&mut self) -> PResult {
        if self.eat_kw("collation")? {
            self.expect(TokenKind::StringLiteral, "collation URI string")?;
        } else if self.eat_kw("element")? || self.eat_kw("function")? {
            self.expect_kw("namespace")?;
            self.expect(TokenKind::StringLiteral, "namespace URI")?;
        } else if self.eat_kw("order")? {
            self.expect_kw("empty")?;
            self.expect_one_of_kw(&["greatest", "least"])?;
        } else {
            let found = self.found();
            self.error(format!(
                "expected 'collation', 'element', 'function' or 'order' after \
                 'declare default', found {found}"
            ))?;
            self.recover(DECL_END)?;
        }
        Ok(())
    }

    fn parse_import(&mut self) -> PResult {
        self.bump()?; // import
        if self.eat_kw("schema")? {
            if self.eat_kw("namespace")? {
                self.expect(TokenKind::NCName, "namespace prefix")?;
                self.expect(TokenKind::Eq, "'='")?;
            } else if self.eat_kw("default")? {
                self.expect_kw("element")?;
                self.expect_kw("namespace")?;
            }
        } else {
            self.expect_kw("module")?;
            if self.eat_kw("namespace")? {
                self.expect(TokenKind::NCName, "namespace prefix")?;
                self.expect(TokenKind::Eq, "'='")?;
            }
        }
        self.expect(TokenKind::StringLiteral, "namespace URI")?;
        if self.eat_kw("at")? {
            self.expect(TokenKind::StringLiteral, "location URI string")?;
            while self.eat(TokenKind::Comma)? {
                self.expect(TokenKind::StringLiteral, "location URI string")?;
            }
        }
        Ok(())
    }

    /// After `declare [annotations] variable`; the `$` may or may not be
    /// checked by the caller.
    fn parse_var_decl(&mut self) -> PResult {
        self.expect(TokenKind::Dollar, "'$'")?;
        self.expect_name("variable name")?;
        self.parse_opt_type_decl()?;
        if self.eat(TokenKind::ColonEq)? {
            self.parse_expr_single()?;
        } else if self.eat_kw("external")? {
            // 3.0 allows a default value for external variables.
            if self.at(TokenKind::ColonEq) {
                if !self.v30() {
                    self.error("default values for external variables require XQuery 3.0")?;
                }
                self.bump()?;
                self.parse_expr_single()?;
            }
        } else {
            let found = self.found();
            self.error(format!("expected ':=' or 'external', found {found}"))?;
            self.recover(DECL_END)?;
        }
        Ok(())
    }

    /// After `declare [updating|annotations] function`.
    fn parse_function_decl(&mut self, updating: bool) -> PResult {
        self.expect_name("function name")?;
        self.expect(TokenKind::LParen, "'('")?;
        if !self.at(TokenKind::RParen) {
            self.parse_param()?;
            while self.eat(TokenKind::Comma)? {
                self.parse_param()?;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        if self.eat_kw("as")? {
            if updating {
                // XQUST0028: updating functions have no return type.
                self.error("an updating function must not declare a return type")?;
            }
            self.parse_sequence_type()?;
        }
        if self.eat_kw("external")? {
            return Ok(());
        }
        self.expect(TokenKind::LBrace, "'{'")?;
        self.parse_expr()?;
        self.expect(TokenKind::RBrace, "'}'")
    }

    fn parse_param(&mut self) -> PResult {
        self.expect(TokenKind::Dollar, "'$'")?;
        self.expect_name("parameter name")?;
        self.parse_opt_type_decl()
    }

    fn parse_context_item_decl(&mut self) -> PResult {
        if self.eat_kw("as")? {
            self.parse_item_type()?;
        }
        if self.eat(TokenKind::ColonEq)? {
            self.parse_expr_single()?;
        } else if self.eat_kw("external")? {
            if self.eat(TokenKind::ColonEq)? {
                self.parse_expr_single()?;
            }
        } else {
            let found = self.found();
            self.error(format!("expected ':=' or 'external', found {found}"))?;
            self.recover(DECL_END)?;
        }
        Ok(())
    }

    pub(crate) fn parse_annotations(&mut self) -> PResult {
        while self.eat(TokenKind::Percent)? {
            self.expect_name("annotation name")?;
            if self.eat(TokenKind::LParen)? {
                self.parse_annotation_value()?;
                while self.eat(TokenKind::Comma)? {
                    self.parse_annotation_value()?;
                }
                self.expect(TokenKind::RParen, "')'")?;
            }
        }
        Ok(())
    }

    fn parse_annotation_value(&mut self) -> PResult {
        match self.cur() {
            TokenKind::StringLiteral
            | TokenKind::IntegerLiteral
            | TokenKind::DecimalLiteral
            | TokenKind::DoubleLiteral => self.bump(),
            _ => {
                let found = self.found();
                self.error(format!("expected annotation literal, found {found}"))
            }
        }
    }

    /// Separator after a prolog declaration. Missing `;` reports once and
    /// skips to the next plausible boundary so the prolog loop can go on.
    fn end_decl(&mut self) -> PResult {
        if self.eat(TokenKind::Semi)? {
            return Ok(());
        }
        let found = self.found();
        self.error(format!("expected ';' after declaration, found {found}"))?;
        self.recover(DECL_END)?;
        self.eat(TokenKind::Semi)?;
        Ok(())
    }

    fn expect_one_of_kw(&mut self, options: &[&str]) -> PResult {
        for kw in options {
            if self.eat_kw(kw)? {
                return Ok(());
            }
        }
        let expected = options
            .iter()
            .map(|kw| format!("'{kw}'"))
            .collect::<Vec<_>>()
            .join(" or ");
        let found = self.found();
        self.error(format!("expected {expected}, found {found}"))
    }
}
