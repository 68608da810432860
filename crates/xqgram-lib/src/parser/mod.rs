//! Parser infrastructure for the XQuery syntax recognizer.
//!
//! # Architecture
//!
//! Characters flow through three layers, each pulling from the one below on
//! demand:
//!
//! - [`lexer::Lexer`]: mode-switching tokenizer (expression mode vs.
//!   element/attribute content modes, held as an explicit stack)
//! - [`stream::TokenStream`]: monotone token buffer with unbounded
//!   lookahead and mark/rewind for speculative predicates
//! - recursive-descent parser: one function per grammar production,
//!   spread over `grammar/` by grammar area
//!
//! The parser recognizes; it builds no tree. Ambiguities that make XQuery
//! non-LL(1) (direct constructors vs. `<`, FLWOR vs. path steps named
//! `for`, cast/castable/treat/instance-of suffixes, dialect-gated update
//! and full-text productions) are resolved by fixed-depth lookahead over
//! buffered tokens, never by re-lexing.

mod core;
mod grammar;
pub mod lexer;
pub mod stream;
pub mod token;

#[cfg(test)]
mod tests;

use serde::Serialize;

use crate::diagnostics::{CountingSink, DiagnosticSink, Diagnostics};
use crate::{Dialect, ErrorMode};

pub use stream::{Mark, TokenStream};
pub use token::{Token, TokenKind, token_text};

use self::core::Parser;

/// Outcome of one parse. A parse with any diagnostic is rejected,
/// whichever error mode produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    pub accepted: bool,
    pub diagnostics: Diagnostics,
}

/// Parses one complete XQuery module (library or main) under the given
/// dialect and error mode. Trailing input after a complete module is a
/// syntax error.
pub fn parse(source: &str, dialect: Dialect, mode: ErrorMode) -> ParseResult {
    let mut sink = CountingSink::default();
    parse_with_sink(source, dialect, mode, &mut sink)
}

/// Like [`parse`], with a caller-supplied diagnostic sink that receives
/// every diagnostic as it is produced.
pub fn parse_with_sink(
    source: &str,
    dialect: Dialect,
    mode: ErrorMode,
    sink: &mut dyn DiagnosticSink,
) -> ParseResult {
    let mut parser = Parser::new(source, dialect, mode, sink);
    // Err here is the strict-mode halt; the diagnostic is already recorded.
    let _ = parser.parse_module();
    let diagnostics = parser.finish();
    ParseResult {
        accepted: diagnostics.is_empty(),
        diagnostics,
    }
}
