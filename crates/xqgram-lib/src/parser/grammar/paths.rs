//! Path expressions, axis steps, node tests, postfix and primary
//! expressions, function calls and 3.0 function items.

use crate::parser::core::{PResult, Parser};
use crate::parser::token::{TokenKind, token_sets};

const FORWARD_AXES: &[&str] = &[
    "child",
    "descendant",
    "attribute",
    "self",
    "descendant-or-self",
    "following-sibling",
    "following",
];

const REVERSE_AXES: &[&str] = &[
    "parent",
    "ancestor",
    "preceding-sibling",
    "preceding",
    "ancestor-or-self",
];

/// Function calls may not use these unprefixed names; each one opens a
/// different construct when followed by `(`.
const RESERVED_FUNCTION_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "document-node",
    "element",
    "empty-sequence",
    "if",
    "item",
    "node",
    "processing-instruction",
    "schema-attribute",
    "schema-element",
    "text",
    "typeswitch",
];

impl Parser<'_, '_> {
    pub(crate) fn parse_path_expr(&mut self) -> PResult {
        if self.eat(TokenKind::SlashSlash)? {
            return self.parse_relative_path();
        }
        if self.eat(TokenKind::Slash)? {
            // A lone "/" selects the root; a following step token continues
            // the path.
            if self.at_step_start() {
                return self.parse_relative_path();
            }
            return Ok(());
        }
        self.parse_relative_path()
    }

    fn at_step_start(&mut self) -> bool {
        token_sets::STEP_FIRST.contains(self.cur())
    }

    fn parse_relative_path(&mut self) -> PResult {
        self.parse_step_expr()?;
        while self.at(TokenKind::Slash) || self.at(TokenKind::SlashSlash) {
            self.bump()?;
            self.parse_step_expr()?;
        }
        Ok(())
    }

    /// A step is either a filter expression (primary + predicates) or an
    /// axis step. Names need a second look: kind-test names followed by `(`
    /// stay axis steps, everything else callable becomes a primary.
    fn parse_step_expr(&mut self) -> PResult {
        if self.at_postfix_primary_start() {
            return self.parse_postfix_expr();
        }
        if self.at_step_start() {
            return self.parse_axis_step();
        }
        let found = self.found();
        self.error(format!("expected an expression, found {found}"))?;
        self.recover_into_expr()
    }

    /// Lenient resynchronization after a missing operand: drop tokens no
    /// expression can start with until a delimiter, resuming early if an
    /// expression start turns up first.
    fn recover_into_expr(&mut self) -> PResult {
        if self.at_any(token_sets::RECOVERY) {
            return Ok(());
        }
        self.bump()?;
        self.recover(token_sets::RECOVERY.union(token_sets::EXPR_FIRST))?;
        if self.at_any(token_sets::EXPR_FIRST) {
            return self.parse_expr_single();
        }
        Ok(())
    }

    fn at_postfix_primary_start(&mut self) -> bool {
        match self.cur() {
            TokenKind::IntegerLiteral
            | TokenKind::DecimalLiteral
            | TokenKind::DoubleLiteral
            | TokenKind::StringLiteral
            | TokenKind::Dollar
            | TokenKind::LParen
            | TokenKind::Dot
            | TokenKind::TagOpen
            | TokenKind::XmlComment
            | TokenKind::PiConstructor
            | TokenKind::Percent
            | TokenKind::Error => true,
            TokenKind::NCName | TokenKind::QName => {
                if self.at_kind_test() {
                    return false;
                }
                if self.at_computed_constructor() {
                    return true;
                }
                if (self.at_kw("ordered") || self.at_kw("unordered"))
                    && self.nth(1) == TokenKind::LBrace
                {
                    return true;
                }
                self.nth(1) == TokenKind::LParen || self.nth(1) == TokenKind::Hash
            }
            _ => false,
        }
    }

    pub(crate) fn at_kind_test(&mut self) -> bool {
        if !self.at(TokenKind::NCName) || self.nth(1) != TokenKind::LParen {
            return false;
        }
        match self.cur_text() {
            "document-node" | "element" | "attribute" | "schema-element" | "schema-attribute"
            | "processing-instruction" | "comment" | "text" | "node" => true,
            "namespace-node" => self.v30(),
            _ => false,
        }
    }

    fn at_computed_constructor(&mut self) -> bool {
        if !self.at(TokenKind::NCName) {
            return false;
        }
        match self.cur_text() {
            "document" | "text" | "comment" => self.nth(1) == TokenKind::LBrace,
            "element" | "attribute" => {
                self.nth(1) == TokenKind::LBrace
                    || (self.nth(1).is_name() && self.nth(2) == TokenKind::LBrace)
            }
            "processing-instruction" => {
                self.nth(1) == TokenKind::LBrace
                    || (self.nth(1) == TokenKind::NCName && self.nth(2) == TokenKind::LBrace)
            }
            "namespace" if self.v30() => {
                self.nth(1) == TokenKind::LBrace
                    || (self.nth(1) == TokenKind::NCName && self.nth(2) == TokenKind::LBrace)
            }
            _ => false,
        }
    }

    // ---- axis steps ----------------------------------------------------

    fn parse_axis_step(&mut self) -> PResult {
        if self.eat(TokenKind::DotDot)? {
            return self.parse_predicates();
        }
        if self.at(TokenKind::NCName) && self.nth(1) == TokenKind::ColonColon {
            let name = self.cur_text();
            if !FORWARD_AXES.contains(&name) && !REVERSE_AXES.contains(&name) {
                self.error(format!("unknown axis '{name}'"))?;
            }
            self.bump()?;
            self.bump()?;
        } else {
            self.eat(TokenKind::At)?;
        }
        self.parse_node_test()?;
        self.parse_predicates()
    }

    fn parse_node_test(&mut self) -> PResult {
        match self.cur() {
            TokenKind::Star | TokenKind::PrefixWildcard | TokenKind::SuffixWildcard => self.bump(),
            TokenKind::NCName if self.at_kind_test() => self.parse_kind_test(),
            TokenKind::NCName | TokenKind::QName => self.bump(),
            _ => {
                let found = self.found();
                self.error(format!("expected a node test, found {found}"))
            }
        }
    }

    fn parse_predicates(&mut self) -> PResult {
        while self.eat(TokenKind::LBracket)? {
            self.parse_expr()?;
            self.expect(TokenKind::RBracket, "']'")?;
        }
        Ok(())
    }

    // ---- filter expressions --------------------------------------------

    fn parse_postfix_expr(&mut self) -> PResult {
        self.parse_primary_expr()?;
        loop {
            if self.eat(TokenKind::LBracket)? {
                self.parse_expr()?;
                self.expect(TokenKind::RBracket, "']'")?;
            } else if self.v30() && self.at(TokenKind::LParen) {
                // 3.0 dynamic function call on the preceding item.
                self.parse_arg_list()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn parse_primary_expr(&mut self) -> PResult {
        match self.cur() {
            TokenKind::IntegerLiteral
            | TokenKind::DecimalLiteral
            | TokenKind::DoubleLiteral
            | TokenKind::StringLiteral
            | TokenKind::Dot => self.bump(),
            TokenKind::Dollar => {
                self.bump()?;
                self.expect_name("variable name")
            }
            TokenKind::LParen => {
                self.bump()?;
                if !self.at(TokenKind::RParen) {
                    self.parse_expr()?;
                }
                self.expect(TokenKind::RParen, "')'")
            }
            TokenKind::TagOpen => self.parse_direct_constructor(),
            // Comments and processing instructions arrive pre-assembled.
            TokenKind::XmlComment | TokenKind::PiConstructor => self.bump(),
            // The lexer already reported this region; swallow it silently.
            TokenKind::Error => self.bump(),
            TokenKind::Percent => {
                if !self.v30() {
                    self.error("inline functions require XQuery 3.0")?;
                }
                self.parse_annotations()?;
                self.expect_kw("function")?;
                self.parse_inline_function_tail()
            }
            TokenKind::NCName | TokenKind::QName => self.parse_name_led_primary(),
            _ => {
                let found = self.found();
                self.error(format!("expected an expression, found {found}"))
            }
        }
    }

    fn parse_name_led_primary(&mut self) -> PResult {
        if (self.at_kw("ordered") || self.at_kw("unordered")) && self.nth(1) == TokenKind::LBrace {
            self.bump()?;
            return self.parse_enclosed_expr();
        }
        if self.at_computed_constructor() {
            return self.parse_computed_constructor();
        }
        if self.at_kw("function") && self.nth(1) == TokenKind::LParen && self.v30() {
            self.bump()?;
            return self.parse_inline_function_tail();
        }
        if self.nth(1) == TokenKind::Hash {
            // Named function reference: fn:abs#1
            if !self.v30() {
                self.error("named function references require XQuery 3.0")?;
            }
            self.bump()?;
            self.bump()?;
            return self.expect(TokenKind::IntegerLiteral, "function arity");
        }
        if self.nth(1) == TokenKind::LParen {
            if self.at(TokenKind::NCName) && RESERVED_FUNCTION_NAMES.contains(&self.cur_text()) {
                let name = self.cur_text();
                self.error(format!(
                    "'{name}' is a reserved function name and cannot be called here"
                ))?;
            }
            self.bump()?;
            return self.parse_arg_list();
        }
        // Unreachable through parse_step_expr; kept for direct callers.
        self.bump()
    }

    fn parse_arg_list(&mut self) -> PResult {
        self.expect(TokenKind::LParen, "'('")?;
        if !self.at(TokenKind::RParen) {
            self.parse_argument()?;
            while self.eat(TokenKind::Comma)? {
                self.parse_argument()?;
            }
        }
        self.expect(TokenKind::RParen, "')'")
    }

    fn parse_argument(&mut self) -> PResult {
        if self.at(TokenKind::Question) {
            if !self.v30() {
                self.error("argument placeholders require XQuery 3.0")?;
            }
            return self.bump();
        }
        self.parse_expr_single()
    }

    /// After the `function` keyword of an inline function.
    fn parse_inline_function_tail(&mut self) -> PResult {
        self.expect(TokenKind::LParen, "'('")?;
        if self.at(TokenKind::Dollar) {
            self.parse_inline_param()?;
            while self.eat(TokenKind::Comma)? {
                self.parse_inline_param()?;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        if self.eat_kw("as")? {
            self.parse_sequence_type()?;
        }
        self.parse_enclosed_expr()
    }

    fn parse_inline_param(&mut self) -> PResult {
        self.expect(TokenKind::Dollar, "'$'")?;
        self.expect_name("parameter name")?;
        self.parse_opt_type_decl()
    }

    pub(crate) fn parse_enclosed_expr(&mut self) -> PResult {
        self.expect(TokenKind::LBrace, "'{'")?;
        self.parse_expr()?;
        self.expect(TokenKind::RBrace, "'}'")
    }
}
