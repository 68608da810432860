//! Buffered token stream between the lexer and the parser.
//!
//! Tokens are pulled from the lexer lazily, only as far ahead as lookahead
//! demands, and are never evicted within one parse: disambiguation
//! predicates may rewind arbitrarily far back inside their lookahead
//! window. End of input is a sentinel [`TokenKind::Eof`] token that repeats
//! under further lookahead instead of erroring.

use text_size::{TextRange, TextSize};

use super::lexer::{LexDiag, Lexer};
use super::token::{Token, TokenKind};

/// Saved cursor position for speculative lookahead.
#[derive(Debug, Clone, Copy)]
pub struct Mark(usize);

pub struct TokenStream<'s> {
    lexer: Lexer<'s>,
    tokens: Vec<Token>,
    cursor: usize,
    exhausted: bool,
    lex_diags: Vec<LexDiag>,
    lex_error_count: usize,
}

impl<'s> TokenStream<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            lexer: Lexer::new(source),
            tokens: Vec::new(),
            cursor: 0,
            exhausted: false,
            lex_diags: Vec::new(),
            lex_error_count: 0,
        }
    }

    fn fill(&mut self, upto: usize) {
        while !self.exhausted && self.tokens.len() <= upto {
            match self.lexer.next_token() {
                Some(token) => self.tokens.push(token),
                None => {
                    self.exhausted = true;
                    let end = self
                        .tokens
                        .last()
                        .map(|t| t.span.end())
                        .unwrap_or_else(|| TextSize::new(0));
                    self.tokens.push(Token::new(TokenKind::Eof, TextRange::empty(end)));
                }
            }
            let diags = self.lexer.take_diags();
            self.lex_error_count += diags.len();
            self.lex_diags.extend(diags);
        }
    }

    /// Token `k` positions ahead of the cursor, without consuming. `nth(0)`
    /// is the current token; past the end the EOF sentinel repeats.
    pub fn nth(&mut self, k: usize) -> Token {
        self.fill(self.cursor + k);
        let i = (self.cursor + k).min(self.tokens.len() - 1);
        self.tokens[i]
    }

    /// Advances the cursor by one; a no-op once at the sentinel.
    pub fn bump(&mut self) {
        if self.nth(0).kind != TokenKind::Eof {
            self.cursor += 1;
        }
    }

    pub fn at_end(&mut self) -> bool {
        self.nth(0).kind == TokenKind::Eof
    }

    pub fn mark(&self) -> Mark {
        Mark(self.cursor)
    }

    pub fn rewind(&mut self, mark: Mark) {
        debug_assert!(mark.0 <= self.tokens.len());
        self.cursor = mark.0;
    }

    /// Cumulative number of lexical errors seen so far.
    pub fn lex_error_count(&self) -> usize {
        self.lex_error_count
    }

    /// Mode-stack depth of the underlying lexer (1 = base mode).
    pub fn lexer_mode_depth(&self) -> usize {
        self.lexer.mode_depth()
    }

    pub(crate) fn take_lex_diags(&mut self) -> Vec<LexDiag> {
        std::mem::take(&mut self.lex_diags)
    }
}
