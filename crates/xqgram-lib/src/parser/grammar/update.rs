//! Update Facility expressions. Reachable only when the dialect enables
//! updates; the dispatch in `exprs.rs` commits on the two leading keywords.

use crate::parser::core::{PResult, Parser};
use crate::parser::token::TokenKind;

impl Parser<'_, '_> {
    /// `insert node(s) SourceExpr (as (first|last))? (into|after|before) TargetExpr`
    pub(crate) fn parse_insert(&mut self) -> PResult {
        self.bump()?; // insert
        self.bump()?; // node | nodes
        self.parse_expr_single()?;
        if self.eat_kw("as")? {
            if !self.eat_kw("first")? && !self.eat_kw("last")? {
                let found = self.found();
                self.error(format!("expected 'first' or 'last', found {found}"))?;
            }
            self.expect_kw("into")?;
        } else if !self.eat_kw("into")? && !self.eat_kw("after")? && !self.eat_kw("before")? {
            let found = self.found();
            self.error(format!(
                "expected 'into', 'after' or 'before', found {found}"
            ))?;
        }
        self.parse_expr_single()
    }

    pub(crate) fn parse_delete(&mut self) -> PResult {
        self.bump()?; // delete
        self.bump()?; // node | nodes
        self.parse_expr_single()
    }

    /// `replace (value of)? node TargetExpr with SourceExpr`
    pub(crate) fn parse_replace(&mut self) -> PResult {
        self.bump()?; // replace
        if self.eat_kw("value")? {
            self.expect_kw("of")?;
        }
        self.expect_kw("node")?;
        self.parse_expr_single()?;
        self.expect_kw("with")?;
        self.parse_expr_single()
    }

    pub(crate) fn parse_rename(&mut self) -> PResult {
        self.bump()?; // rename
        self.bump()?; // node
        self.parse_expr_single()?;
        self.expect_kw("as")?;
        self.parse_expr_single()
    }

    /// `copy $v := E (, $v := E)* modify E return E`
    pub(crate) fn parse_transform(&mut self) -> PResult {
        self.bump()?; // copy
        self.parse_copy_binding()?;
        while self.eat(TokenKind::Comma)? {
            self.parse_copy_binding()?;
        }
        self.expect_kw("modify")?;
        self.parse_expr_single()?;
        self.expect_kw("return")?;
        self.parse_expr_single()
    }

    fn parse_copy_binding(&mut self) -> PResult {
        self.expect(TokenKind::Dollar, "'$'")?;
        self.expect_name("variable name")?;
        self.expect(TokenKind::ColonEq, "':='")?;
        self.parse_expr_single()
    }
}
