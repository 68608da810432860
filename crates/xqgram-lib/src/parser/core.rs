//! Parser state and low-level operations.
//!
//! Strict mode aborts on the first diagnostic by propagating [`Halt`] with
//! `?` out of every production; lenient mode reports, resynchronizes and
//! keeps going. Either way a parse with any diagnostic is rejected.

use text_size::{TextRange, TextSize};

use crate::diagnostics::{Diagnostic, DiagnosticSink, Diagnostics};
use crate::line_index::LineIndex;
use crate::{Dialect, ErrorMode, XQueryVersion};

use super::stream::TokenStream;
use super::token::{Token, TokenKind, TokenSet, token_text};

/// Unit error raised when strict mode stops at the first diagnostic.
pub(crate) struct Halt;

pub(crate) type PResult<T = ()> = Result<T, Halt>;

pub(crate) struct Parser<'s, 'k> {
    pub(crate) source: &'s str,
    pub(crate) stream: TokenStream<'s>,
    pub(crate) dialect: Dialect,
    mode: ErrorMode,
    diagnostics: Diagnostics,
    line_index: LineIndex,
    sink: &'k mut dyn DiagnosticSink,
    last_error_pos: Option<TextSize>,
}

impl<'s, 'k> Parser<'s, 'k> {
    pub(crate) fn new(
        source: &'s str,
        dialect: Dialect,
        mode: ErrorMode,
        sink: &'k mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            source,
            stream: TokenStream::new(source),
            dialect,
            mode,
            diagnostics: Diagnostics::new(),
            line_index: LineIndex::new(source),
            sink,
            last_error_pos: None,
        }
    }

    pub(crate) fn finish(mut self) -> Diagnostics {
        let _ = self.pump();
        self.diagnostics
    }

    pub(crate) fn v30(&self) -> bool {
        self.dialect.version == XQueryVersion::V3_0
    }

    // ---- lookahead -----------------------------------------------------

    pub(crate) fn cur_tok(&mut self) -> Token {
        self.stream.nth(0)
    }

    pub(crate) fn cur(&mut self) -> TokenKind {
        self.stream.nth(0).kind
    }

    pub(crate) fn nth(&mut self, k: usize) -> TokenKind {
        self.stream.nth(k).kind
    }

    pub(crate) fn text_of(&self, token: Token) -> &'s str {
        token_text(self.source, &token)
    }

    pub(crate) fn cur_text(&mut self) -> &'s str {
        let token = self.stream.nth(0);
        token_text(self.source, &token)
    }

    pub(crate) fn at(&mut self, kind: TokenKind) -> bool {
        self.cur() == kind
    }

    pub(crate) fn at_any(&mut self, set: TokenSet) -> bool {
        set.contains(self.cur())
    }

    pub(crate) fn at_name(&mut self) -> bool {
        self.cur().is_name()
    }

    /// Contextual keyword test: an unprefixed NCName with exactly this text.
    pub(crate) fn at_kw(&mut self, kw: &str) -> bool {
        self.nth_kw(0, kw)
    }

    pub(crate) fn nth_kw(&mut self, k: usize, kw: &str) -> bool {
        let token = self.stream.nth(k);
        token.kind == TokenKind::NCName && token_text(self.source, &token) == kw
    }

    /// Two contextual keywords in a row, e.g. `instance of`.
    pub(crate) fn at_kw2(&mut self, first: &str, second: &str) -> bool {
        self.at_kw(first) && self.nth_kw(1, second)
    }

    // ---- consumption ---------------------------------------------------

    pub(crate) fn bump(&mut self) -> PResult {
        self.stream.bump();
        self.pump()
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> PResult<bool> {
        if self.at(kind) {
            self.bump()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(crate) fn eat_kw(&mut self, kw: &str) -> PResult<bool> {
        if self.at_kw(kw) {
            self.bump()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// On mismatch: emit a diagnostic but don't consume (the caller's
    /// enclosing production decides how to resynchronize).
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> PResult {
        if self.eat(kind)? {
            return Ok(());
        }
        let found = self.found();
        self.error(format!("expected {what}, found {found}"))
    }

    pub(crate) fn expect_kw(&mut self, kw: &str) -> PResult {
        if self.eat_kw(kw)? {
            return Ok(());
        }
        let found = self.found();
        self.error(format!("expected '{kw}', found {found}"))
    }

    pub(crate) fn expect_name(&mut self, what: &str) -> PResult {
        if self.at_name() {
            return self.bump();
        }
        let found = self.found();
        self.error(format!("expected {what}, found {found}"))
    }

    // ---- diagnostics ---------------------------------------------------

    pub(crate) fn found(&mut self) -> String {
        let token = self.cur_tok();
        self.describe_token(token)
    }

    pub(crate) fn describe_token(&self, token: Token) -> String {
        match token.kind {
            TokenKind::NCName | TokenKind::QName => {
                format!("'{}'", token_text(self.source, &token))
            }
            kind => kind.describe().to_string(),
        }
    }

    /// Reports a diagnostic at the current token.
    pub(crate) fn error(&mut self, message: impl Into<String>) -> PResult {
        let span = self.cur_tok().span;
        self.error_at(span, message)
    }

    pub(crate) fn error_at(&mut self, span: TextRange, message: impl Into<String>) -> PResult {
        // One diagnostic per position keeps lenient mode from flooding.
        if self.last_error_pos == Some(span.start()) {
            return self.halt_if_strict();
        }
        self.last_error_pos = Some(span.start());
        self.emit(message.into(), span)
    }

    fn emit(&mut self, message: String, span: TextRange) -> PResult {
        let (line, column) = self.line_index.line_col(self.source, span.start());
        self.sink.report(&message, line, column);
        self.diagnostics.push(Diagnostic { message, line, column }, span);
        self.halt_if_strict()
    }

    fn halt_if_strict(&self) -> PResult {
        match self.mode {
            ErrorMode::Strict => Err(Halt),
            ErrorMode::Lenient => Ok(()),
        }
    }

    /// Forwards lexical diagnostics queued by the lexer during lookahead.
    pub(crate) fn pump(&mut self) -> PResult {
        let diags = self.stream.take_lex_diags();
        let mut halted = false;
        for diag in diags {
            if self.last_error_pos != Some(diag.span.start()) {
                self.last_error_pos = Some(diag.span.start());
                if self.emit(diag.message.to_string(), diag.span).is_err() {
                    halted = true;
                }
            }
        }
        if halted { Err(Halt) } else { Ok(()) }
    }

    /// Lenient-mode resynchronization: discard tokens up to the next
    /// reliable boundary. Never consumes the boundary itself.
    pub(crate) fn recover(&mut self, set: TokenSet) -> PResult {
        while !self.at(TokenKind::Eof) && !self.at_any(set) {
            self.bump()?;
        }
        Ok(())
    }
}
