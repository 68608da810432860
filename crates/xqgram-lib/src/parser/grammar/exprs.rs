//! Expressions: the comma operator, ExprSingle dispatch, FLWOR and friends,
//! and the operator-precedence chain down to path expressions.

use crate::parser::core::{PResult, Parser};
use crate::parser::token::TokenKind;

impl Parser<'_, '_> {
    /// Expr ::= ExprSingle ("," ExprSingle)*
    pub(crate) fn parse_expr(&mut self) -> PResult {
        self.parse_expr_single()?;
        while self.eat(TokenKind::Comma)? {
            self.parse_expr_single()?;
        }
        Ok(())
    }

    /// Keyword-led expressions are committed by lookahead past the keyword,
    /// so a path step that merely happens to be named `for` or `if` still
    /// parses as a step.
    pub(crate) fn parse_expr_single(&mut self) -> PResult {
        if self.at_flwor_start() {
            return self.parse_flwor();
        }
        if (self.at_kw("some") || self.at_kw("every")) && self.nth(1) == TokenKind::Dollar {
            return self.parse_quantified();
        }
        if self.at_kw("typeswitch") && self.nth(1) == TokenKind::LParen {
            return self.parse_typeswitch();
        }
        if self.at_kw("switch") && self.nth(1) == TokenKind::LParen {
            if !self.v30() {
                self.error("'switch' expressions require XQuery 3.0")?;
            }
            return self.parse_switch();
        }
        if self.at_kw("if") && self.nth(1) == TokenKind::LParen {
            return self.parse_if();
        }
        if self.at_kw("try") && self.nth(1) == TokenKind::LBrace {
            if !self.v30() {
                self.error("'try/catch' expressions require XQuery 3.0")?;
            }
            return self.parse_try_catch();
        }
        if self.dialect.update {
            if self.at_kw("insert") && (self.nth_kw(1, "node") || self.nth_kw(1, "nodes")) {
                return self.parse_insert();
            }
            if self.at_kw("delete") && (self.nth_kw(1, "node") || self.nth_kw(1, "nodes")) {
                return self.parse_delete();
            }
            if self.at_kw("replace")
                && (self.nth_kw(1, "node") || (self.nth_kw(1, "value") && self.nth_kw(2, "of")))
            {
                return self.parse_replace();
            }
            if self.at_kw2("rename", "node") {
                return self.parse_rename();
            }
            if self.at_kw("copy") && self.nth(1) == TokenKind::Dollar {
                return self.parse_transform();
            }
        }
        self.parse_or_expr()
    }

    fn at_flwor_start(&mut self) -> bool {
        if self.at_kw("for") && self.nth(1) == TokenKind::Dollar {
            return true;
        }
        if self.at_kw("let") {
            if self.nth(1) == TokenKind::Dollar {
                return true;
            }
            if self.dialect.full_text
                && self.nth_kw(1, "score")
                && self.nth(2) == TokenKind::Dollar
            {
                return true;
            }
        }
        false
    }

    // ---- FLWOR ---------------------------------------------------------

    fn parse_flwor(&mut self) -> PResult {
        // Leading for/let clauses.
        loop {
            if self.at_kw("for") && self.nth(1) == TokenKind::Dollar {
                self.parse_for_clause()?;
            } else if self.at_let_clause() {
                self.parse_let_clause()?;
            } else {
                break;
            }
        }
        let mut seen_where = false;
        let mut seen_order = false;
        loop {
            if self.at_kw("where") {
                if seen_where && !self.v30() {
                    self.error("multiple 'where' clauses require XQuery 3.0")?;
                }
                if seen_order && !self.v30() {
                    self.error("'where' must precede 'order by' in XQuery 1.0")?;
                }
                seen_where = true;
                self.bump()?;
                self.parse_expr_single()?;
            } else if self.at_kw2("group", "by") {
                if !self.v30() {
                    self.error("'group by' clauses require XQuery 3.0")?;
                }
                self.parse_group_by()?;
            } else if self.at_kw("count") && self.nth(1) == TokenKind::Dollar {
                if !self.v30() {
                    self.error("'count' clauses require XQuery 3.0")?;
                }
                self.bump()?;
                self.expect(TokenKind::Dollar, "'$'")?;
                self.expect_name("variable name")?;
            } else if self.v30() && self.at_kw("for") && self.nth(1) == TokenKind::Dollar {
                // 3.0 allows for/let interleaved with the tail clauses.
                self.parse_for_clause()?;
            } else if self.v30() && self.at_let_clause() {
                self.parse_let_clause()?;
            } else if self.at_kw2("order", "by")
                || (self.at_kw("stable") && self.nth_kw(1, "order") && self.nth_kw(2, "by"))
            {
                if seen_order {
                    self.error("duplicate 'order by' clause")?;
                }
                seen_order = true;
                self.parse_order_by()?;
            } else {
                break;
            }
        }
        self.expect_kw("return")?;
        self.parse_expr_single()
    }

    fn at_let_clause(&mut self) -> bool {
        self.at_kw("let")
            && (self.nth(1) == TokenKind::Dollar
                || (self.dialect.full_text
                    && self.nth_kw(1, "score")
                    && self.nth(2) == TokenKind::Dollar))
    }

    fn parse_for_clause(&mut self) -> PResult {
        self.bump()?; // for
        self.parse_for_binding()?;
        while self.eat(TokenKind::Comma)? {
            self.parse_for_binding()?;
        }
        Ok(())
    }

    fn parse_for_binding(&mut self) -> PResult {
        self.expect(TokenKind::Dollar, "'$'")?;
        self.expect_name("variable name")?;
        self.parse_opt_type_decl()?;
        if self.at_kw2("allowing", "empty") {
            if !self.v30() {
                self.error("'allowing empty' requires XQuery 3.0")?;
            }
            self.bump()?;
            self.bump()?;
        }
        if self.eat_kw("at")? {
            self.expect(TokenKind::Dollar, "'$'")?;
            self.expect_name("positional variable name")?;
        }
        if self.dialect.full_text && self.eat_kw("score")? {
            self.expect(TokenKind::Dollar, "'$'")?;
            self.expect_name("score variable name")?;
        }
        self.expect_kw("in")?;
        self.parse_expr_single()
    }

    fn parse_let_clause(&mut self) -> PResult {
        self.bump()?; // let
        self.parse_let_binding()?;
        while self.eat(TokenKind::Comma)? {
            self.parse_let_binding()?;
        }
        Ok(())
    }

    fn parse_let_binding(&mut self) -> PResult {
        if self.dialect.full_text && self.at_kw("score") && self.nth(1) == TokenKind::Dollar {
            self.bump()?;
            self.bump()?;
            self.expect_name("score variable name")?;
        } else {
            self.expect(TokenKind::Dollar, "'$'")?;
            self.expect_name("variable name")?;
            self.parse_opt_type_decl()?;
        }
        self.expect(TokenKind::ColonEq, "':='")?;
        self.parse_expr_single()
    }

    fn parse_group_by(&mut self) -> PResult {
        self.bump()?; // group
        self.bump()?; // by
        self.parse_grouping_spec()?;
        while self.eat(TokenKind::Comma)? {
            self.parse_grouping_spec()?;
        }
        Ok(())
    }

    fn parse_grouping_spec(&mut self) -> PResult {
        self.expect(TokenKind::Dollar, "'$'")?;
        self.expect_name("grouping variable name")?;
        if self.at_kw("as") || self.at(TokenKind::ColonEq) {
            self.parse_opt_type_decl()?;
            self.expect(TokenKind::ColonEq, "':='")?;
            self.parse_expr_single()?;
        }
        if self.eat_kw("collation")? {
            self.expect(TokenKind::StringLiteral, "collation URI string")?;
        }
        Ok(())
    }

    fn parse_order_by(&mut self) -> PResult {
        self.eat_kw("stable")?;
        self.bump()?; // order
        self.bump()?; // by
        self.parse_order_spec()?;
        while self.eat(TokenKind::Comma)? {
            self.parse_order_spec()?;
        }
        Ok(())
    }

    fn parse_order_spec(&mut self) -> PResult {
        self.parse_expr_single()?;
        if !self.eat_kw("ascending")? {
            self.eat_kw("descending")?;
        }
        if self.eat_kw("empty")? {
            self.expect_one_of_greatest_least()?;
        }
        if self.eat_kw("collation")? {
            self.expect(TokenKind::StringLiteral, "collation URI string")?;
        }
        Ok(())
    }

    fn expect_one_of_greatest_least(&mut self) -> PResult {
        if self.eat_kw("greatest")? || self.eat_kw("least")? {
            return Ok(());
        }
        let found = self.found();
        self.error(format!("expected 'greatest' or 'least', found {found}"))
    }

    // ---- other keyword-led expressions ---------------------------------

    fn parse_quantified(&mut self) -> PResult {
        self.bump()?; // some | every
        self.parse_quantified_binding()?;
        while self.eat(TokenKind::Comma)? {
            self.parse_quantified_binding()?;
        }
        self.expect_kw("satisfies")?;
        self.parse_expr_single()
    }

    fn parse_quantified_binding(&mut self) -> PResult {
        self.expect(TokenKind::Dollar, "'$'")?;
        self.expect_name("variable name")?;
        self.parse_opt_type_decl()?;
        self.expect_kw("in")?;
        self.parse_expr_single()
    }

    fn parse_typeswitch(&mut self) -> PResult {
        self.bump()?; // typeswitch
        self.expect(TokenKind::LParen, "'('")?;
        self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        if !self.at_kw("case") {
            let found = self.found();
            self.error(format!("expected 'case' clause, found {found}"))?;
        }
        while self.at_kw("case") {
            self.bump()?;
            if self.at(TokenKind::Dollar) {
                self.bump()?;
                self.expect_name("variable name")?;
                self.expect_kw("as")?;
            }
            self.parse_sequence_type()?;
            // 3.0 union case types: case xs:integer | xs:double return ...
            while self.at(TokenKind::Pipe) {
                if !self.v30() {
                    self.error("union types in 'case' clauses require XQuery 3.0")?;
                }
                self.bump()?;
                self.parse_sequence_type()?;
            }
            self.expect_kw("return")?;
            self.parse_expr_single()?;
        }
        self.expect_kw("default")?;
        if self.at(TokenKind::Dollar) {
            self.bump()?;
            self.expect_name("variable name")?;
        }
        self.expect_kw("return")?;
        self.parse_expr_single()
    }

    fn parse_switch(&mut self) -> PResult {
        self.bump()?; // switch
        self.expect(TokenKind::LParen, "'('")?;
        self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        if !self.at_kw("case") {
            let found = self.found();
            self.error(format!("expected 'case' clause, found {found}"))?;
        }
        while self.at_kw("case") {
            self.bump()?;
            self.parse_expr_single()?;
            while self.eat_kw("case")? {
                self.parse_expr_single()?;
            }
            self.expect_kw("return")?;
            self.parse_expr_single()?;
        }
        self.expect_kw("default")?;
        self.expect_kw("return")?;
        self.parse_expr_single()
    }

    fn parse_if(&mut self) -> PResult {
        self.bump()?; // if
        self.expect(TokenKind::LParen, "'('")?;
        self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect_kw("then")?;
        self.parse_expr_single()?;
        self.expect_kw("else")?;
        self.parse_expr_single()
    }

    fn parse_try_catch(&mut self) -> PResult {
        self.bump()?; // try
        self.expect(TokenKind::LBrace, "'{'")?;
        self.parse_expr()?;
        self.expect(TokenKind::RBrace, "'}'")?;
        self.expect_kw("catch")?;
        self.parse_catch_clause()?;
        while self.eat_kw("catch")? {
            self.parse_catch_clause()?;
        }
        Ok(())
    }

    fn parse_catch_clause(&mut self) -> PResult {
        self.parse_catch_name_test()?;
        while self.eat(TokenKind::Pipe)? {
            self.parse_catch_name_test()?;
        }
        self.expect(TokenKind::LBrace, "'{'")?;
        self.parse_expr()?;
        self.expect(TokenKind::RBrace, "'}'")
    }

    fn parse_catch_name_test(&mut self) -> PResult {
        match self.cur() {
            TokenKind::NCName
            | TokenKind::QName
            | TokenKind::Star
            | TokenKind::PrefixWildcard
            | TokenKind::SuffixWildcard => self.bump(),
            _ => {
                let found = self.found();
                self.error(format!("expected error name test, found {found}"))
            }
        }
    }

    // ---- operator chain ------------------------------------------------

    fn parse_or_expr(&mut self) -> PResult {
        self.parse_and_expr()?;
        while self.eat_kw("or")? {
            self.parse_and_expr()?;
        }
        Ok(())
    }

    fn parse_and_expr(&mut self) -> PResult {
        self.parse_comparison_expr()?;
        while self.eat_kw("and")? {
            self.parse_comparison_expr()?;
        }
        Ok(())
    }

    /// Comparisons don't associate; at most one operator per level.
    fn parse_comparison_expr(&mut self) -> PResult {
        self.parse_ftcontains_level()?;
        if self.eat_comparison_op()? {
            self.parse_ftcontains_level()?;
        }
        Ok(())
    }

    fn eat_comparison_op(&mut self) -> PResult<bool> {
        match self.cur() {
            TokenKind::Eq
            | TokenKind::BangEq
            | TokenKind::Lt
            | TokenKind::Le
            | TokenKind::Gt
            | TokenKind::Ge
            | TokenKind::LtLt
            | TokenKind::GtGt => {
                self.bump()?;
                Ok(true)
            }
            TokenKind::NCName => {
                for kw in ["eq", "ne", "lt", "le", "gt", "ge", "is"] {
                    if self.at_kw(kw) {
                        self.bump()?;
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn parse_ftcontains_level(&mut self) -> PResult {
        self.parse_string_concat()?;
        if self.dialect.full_text && self.eat_kw("ftcontains")? {
            self.parse_ft_selection()?;
            if self.at_kw2("without", "content") {
                self.bump()?;
                self.bump()?;
                self.parse_union_expr()?;
            }
        }
        Ok(())
    }

    fn parse_string_concat(&mut self) -> PResult {
        self.parse_range_expr()?;
        while self.at(TokenKind::PipePipe) {
            if !self.v30() {
                self.error("the '||' operator requires XQuery 3.0")?;
            }
            self.bump()?;
            self.parse_range_expr()?;
        }
        Ok(())
    }

    pub(crate) fn parse_range_expr(&mut self) -> PResult {
        self.parse_additive_expr()?;
        if self.eat_kw("to")? {
            self.parse_additive_expr()?;
        }
        Ok(())
    }

    pub(crate) fn parse_additive_expr(&mut self) -> PResult {
        self.parse_multiplicative_expr()?;
        while self.at(TokenKind::Plus) || self.at(TokenKind::Minus) {
            self.bump()?;
            self.parse_multiplicative_expr()?;
        }
        Ok(())
    }

    fn parse_multiplicative_expr(&mut self) -> PResult {
        self.parse_union_expr()?;
        loop {
            if self.at(TokenKind::Star) {
                self.bump()?;
            } else if self.at_kw("div") || self.at_kw("idiv") || self.at_kw("mod") {
                self.bump()?;
            } else {
                break;
            }
            self.parse_union_expr()?;
        }
        Ok(())
    }

    pub(crate) fn parse_union_expr(&mut self) -> PResult {
        self.parse_intersect_expr()?;
        while self.at(TokenKind::Pipe) || self.at_kw("union") {
            self.bump()?;
            self.parse_intersect_expr()?;
        }
        Ok(())
    }

    fn parse_intersect_expr(&mut self) -> PResult {
        self.parse_instanceof_expr()?;
        while self.at_kw("intersect") || self.at_kw("except") {
            self.bump()?;
            self.parse_instanceof_expr()?;
        }
        Ok(())
    }

    fn parse_instanceof_expr(&mut self) -> PResult {
        self.parse_treat_expr()?;
        if self.at_kw2("instance", "of") {
            self.bump()?;
            self.bump()?;
            self.parse_sequence_type()?;
        }
        Ok(())
    }

    fn parse_treat_expr(&mut self) -> PResult {
        self.parse_castable_expr()?;
        if self.at_kw2("treat", "as") {
            self.bump()?;
            self.bump()?;
            self.parse_sequence_type()?;
        }
        Ok(())
    }

    fn parse_castable_expr(&mut self) -> PResult {
        self.parse_cast_expr()?;
        if self.at_kw2("castable", "as") {
            self.bump()?;
            self.bump()?;
            self.parse_single_type()?;
        }
        Ok(())
    }

    fn parse_cast_expr(&mut self) -> PResult {
        self.parse_unary_expr()?;
        if self.at_kw2("cast", "as") {
            self.bump()?;
            self.bump()?;
            self.parse_single_type()?;
        }
        Ok(())
    }

    fn parse_unary_expr(&mut self) -> PResult {
        while self.at(TokenKind::Minus) || self.at(TokenKind::Plus) {
            self.bump()?;
        }
        self.parse_value_expr()
    }

    fn parse_value_expr(&mut self) -> PResult {
        if self.at_validate_expr() {
            return self.parse_validate_expr();
        }
        if self.at(TokenKind::Pragma) {
            return self.parse_extension_expr();
        }
        self.parse_simple_map_expr()
    }

    fn at_validate_expr(&mut self) -> bool {
        if !self.at_kw("validate") {
            return false;
        }
        self.nth(1) == TokenKind::LBrace
            || ((self.nth_kw(1, "lax") || self.nth_kw(1, "strict"))
                && self.nth(2) == TokenKind::LBrace)
            || (self.v30() && self.nth_kw(1, "type"))
    }

    fn parse_validate_expr(&mut self) -> PResult {
        self.bump()?; // validate
        if self.at_kw("lax") || self.at_kw("strict") {
            self.bump()?;
        } else if self.v30() && self.eat_kw("type")? {
            self.expect_name("type name")?;
        }
        self.expect(TokenKind::LBrace, "'{'")?;
        self.parse_expr()?;
        self.expect(TokenKind::RBrace, "'}'")
    }

    fn parse_extension_expr(&mut self) -> PResult {
        while self.eat(TokenKind::Pragma)? {}
        self.expect(TokenKind::LBrace, "'{'")?;
        if !self.at(TokenKind::RBrace) {
            self.parse_expr()?;
        }
        self.expect(TokenKind::RBrace, "'}'")
    }

    fn parse_simple_map_expr(&mut self) -> PResult {
        self.parse_path_expr()?;
        while self.at(TokenKind::Bang) {
            if !self.v30() {
                self.error("the '!' simple map operator requires XQuery 3.0")?;
            }
            self.bump()?;
            self.parse_path_expr()?;
        }
        Ok(())
    }
}
