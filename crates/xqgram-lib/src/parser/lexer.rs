//! Mode-switching lexer for XQuery.
//!
//! XQuery is not lexable with a single token automaton: raw character data
//! inside direct element constructors and attribute values follows entirely
//! different rules from expression text. This module keeps one logos-derived
//! token enum per lexical mode and a hand-written driver that owns the mode
//! stack, selects the active enum and maps its output onto the flat
//! [`TokenKind`] vocabulary.
//!
//! Mode transitions (see the driver, not the enums):
//! - `<` immediately followed by a name start character opens a start tag;
//!   with anything else after it, `<` stays the less-than operator.
//! - `>` at the end of a start tag enters element content; `/>` returns to
//!   the enclosing mode.
//! - `{` in element/attribute content pushes expression mode; the matching
//!   `}` pops back. `{{` and `}}` are character data.
//! - `</name>` pops element content.
//!
//! Comments `(: ... :)` (nesting, discarded), pragmas `(# ... #)`, string
//! literals, XML comments, processing instructions and CDATA sections are
//! each consumed by a logos callback as one region, so they need no stack
//! state.
//!
//! Lexical errors produce a synthetic [`TokenKind::Error`] token plus a
//! queued diagnostic, letting the parser keep going in lenient mode.

use logos::{FilterResult, Lexer as RawLexer, Logos};
use text_size::{TextRange, TextSize};

use super::token::{Token, TokenKind};

/// Classification of lexical failures; rendered via [`LexErrorKind::message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    IllegalChar,
    UnterminatedString,
    UnterminatedComment,
    UnterminatedPragma,
    PragmaMissingName,
    InvalidCharRef,
    UnterminatedXmlComment,
    InvalidPiTarget,
    UnterminatedPi,
    UnterminatedCdata,
}

impl LexErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            LexErrorKind::IllegalChar => "illegal character",
            LexErrorKind::UnterminatedString => "unterminated string literal",
            LexErrorKind::UnterminatedComment => "unterminated comment",
            LexErrorKind::UnterminatedPragma => "unterminated pragma",
            LexErrorKind::PragmaMissingName => "pragma is missing its QName",
            LexErrorKind::InvalidCharRef => "invalid character reference",
            LexErrorKind::UnterminatedXmlComment => "unterminated XML comment",
            LexErrorKind::InvalidPiTarget => "processing instruction is missing its target",
            LexErrorKind::UnterminatedPi => "unterminated processing instruction",
            LexErrorKind::UnterminatedCdata => "unterminated CDATA section",
        }
    }
}

/// A lexical diagnostic queued by the driver, drained by the token stream.
#[derive(Debug, Clone)]
pub struct LexDiag {
    pub message: &'static str,
    pub span: TextRange,
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\u{B7}')
}

/// Length in bytes of an NCName at the start of `s`, or 0.
fn ncname_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if is_name_start(c) => {}
        _ => return 0,
    }
    for (i, c) in chars {
        if !is_name_char(c) {
            return i;
        }
    }
    s.len()
}

/// Length in bytes of a QName (`NCName(:NCName)?`) at the start of `s`, or 0.
fn qname_len(s: &str) -> usize {
    let n = ncname_len(s);
    if n == 0 {
        return 0;
    }
    let rest = &s[n..];
    if let Some(tail) = rest.strip_prefix(':') {
        let m = ncname_len(tail);
        if m > 0 {
            return n + 1 + m;
        }
    }
    n
}

/// Length in bytes of a character reference body (after `&`, through `;`),
/// restricted to XML's five named entities and numeric forms.
fn char_ref_len(s: &str) -> Option<usize> {
    for named in ["lt;", "gt;", "amp;", "quot;", "apos;"] {
        if s.starts_with(named) {
            return Some(named.len());
        }
    }
    let digits = |tail: &str, radix: u32| {
        let n = tail.chars().take_while(|c| c.is_digit(radix)).count();
        if n > 0 && tail[n..].starts_with(';') {
            Some(n + 1)
        } else {
            None
        }
    };
    if let Some(tail) = s.strip_prefix("#x") {
        return digits(tail, 16).map(|n| n + 2);
    }
    if let Some(tail) = s.strip_prefix('#') {
        return digits(tail, 10).map(|n| n + 1);
    }
    None
}

/// Finds `needle` in the callback's remainder, bumps past it and returns Ok;
/// on missing terminator bumps everything and returns the given error.
fn scan_to<'s, T>(lex: &mut RawLexer<'s, T>, needle: &str, err: LexErrorKind) -> Result<(), LexErrorKind>
where
    T: Logos<'s, Source = str>,
{
    let rem = lex.remainder();
    match rem.find(needle) {
        Some(i) => {
            lex.bump(i + needle.len());
            Ok(())
        }
        None => {
            lex.bump(rem.len());
            Err(err)
        }
    }
}

/// `(: ... :)` with arbitrary nesting; skipped, never emitted.
fn lex_comment<'s, T>(lex: &mut RawLexer<'s, T>) -> FilterResult<(), LexErrorKind>
where
    T: Logos<'s, Source = str, Error = LexErrorKind>,
{
    let rem = lex.remainder();
    let bytes = rem.as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'(' && bytes.get(i + 1) == Some(&b':') {
            depth += 1;
            i += 2;
        } else if bytes[i] == b':' && bytes.get(i + 1) == Some(&b')') {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return FilterResult::Skip;
            }
        } else {
            i += 1;
        }
    }
    lex.bump(rem.len());
    FilterResult::Error(LexErrorKind::UnterminatedComment)
}

/// `(# S? QName content #)`: one opaque region, terminated by the first `#)`.
fn lex_pragma<'s, T>(lex: &mut RawLexer<'s, T>) -> Result<(), LexErrorKind>
where
    T: Logos<'s, Source = str>,
{
    let rem = lex.remainder();
    let ws = rem.len() - rem.trim_start_matches([' ', '\t', '\r', '\n']).len();
    let name = qname_len(&rem[ws..]);
    match rem.find("#)") {
        Some(i) => {
            lex.bump(i + 2);
            if name == 0 { Err(LexErrorKind::PragmaMissingName) } else { Ok(()) }
        }
        None => {
            lex.bump(rem.len());
            Err(LexErrorKind::UnterminatedPragma)
        }
    }
}

fn lex_xml_comment<'s, T>(lex: &mut RawLexer<'s, T>) -> Result<(), LexErrorKind>
where
    T: Logos<'s, Source = str>,
{
    scan_to(lex, "-->", LexErrorKind::UnterminatedXmlComment)
}

fn lex_pi<'s, T>(lex: &mut RawLexer<'s, T>) -> Result<(), LexErrorKind>
where
    T: Logos<'s, Source = str>,
{
    let target = ncname_len(lex.remainder());
    scan_to(lex, "?>", LexErrorKind::UnterminatedPi)?;
    if target == 0 {
        return Err(LexErrorKind::InvalidPiTarget);
    }
    Ok(())
}

fn lex_cdata<'s, T>(lex: &mut RawLexer<'s, T>) -> Result<(), LexErrorKind>
where
    T: Logos<'s, Source = str>,
{
    scan_to(lex, "]]>", LexErrorKind::UnterminatedCdata)
}

/// String literal body after the opening quote: doubled-quote escaping, and
/// only XML's five named entities or numeric character references after `&`.
fn lex_string<'s, T>(lex: &mut RawLexer<'s, T>, quote: u8) -> Result<(), LexErrorKind>
where
    T: Logos<'s, Source = str>,
{
    let rem = lex.remainder();
    let bytes = rem.as_bytes();
    let mut bad_ref = false;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            lex.bump(i + 1);
            return if bad_ref { Err(LexErrorKind::InvalidCharRef) } else { Ok(()) };
        }
        if bytes[i] == b'&' {
            match char_ref_len(&rem[i + 1..]) {
                Some(n) => i += 1 + n,
                None => {
                    bad_ref = true;
                    i += 1;
                }
            }
        } else {
            i += 1;
        }
    }
    lex.bump(rem.len());
    Err(LexErrorKind::UnterminatedString)
}

fn lex_string_double<'s, T>(lex: &mut RawLexer<'s, T>) -> Result<(), LexErrorKind>
where
    T: Logos<'s, Source = str>,
{
    lex_string(lex, b'"')
}

fn lex_string_single<'s, T>(lex: &mut RawLexer<'s, T>) -> Result<(), LexErrorKind>
where
    T: Logos<'s, Source = str>,
{
    lex_string(lex, b'\'')
}

/// Expression (default) mode terminals.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n]+")]
enum ExprToken {
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("$")]
    Dollar,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("@")]
    At,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,
    #[token("=")]
    Eq,
    #[token("!=")]
    BangEq,
    #[token("!")]
    Bang,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("/")]
    Slash,
    #[token("//")]
    SlashSlash,
    #[token(":=")]
    ColonEq,
    #[token("::")]
    ColonColon,
    #[token("?")]
    Question,
    #[token("#")]
    Hash,
    #[token("%")]
    Percent,

    #[token("(:", lex_comment)]
    Comment,
    #[token("(#", lex_pragma)]
    Pragma,
    #[token("<!--", lex_xml_comment)]
    XmlComment,
    #[token("<?", lex_pi)]
    PiConstructor,

    #[token("\"", lex_string_double)]
    #[token("'", lex_string_single)]
    StringLiteral,
    #[regex(r"[0-9]+")]
    IntegerLiteral,
    #[regex(r"([0-9]+\.[0-9]*)|(\.[0-9]+)")]
    DecimalLiteral,
    #[regex(r"(([0-9]+(\.[0-9]*)?)|(\.[0-9]+))[eE][+\-]?[0-9]+")]
    DoubleLiteral,

    #[regex(r"[\p{L}_][\p{L}\p{N}\p{M}_\-.·]*")]
    NCName,
    #[regex(r"[\p{L}_][\p{L}\p{N}\p{M}_\-.·]*:[\p{L}_][\p{L}\p{N}\p{M}_\-.·]*")]
    QName,
    #[regex(r"[\p{L}_][\p{L}\p{N}\p{M}_\-.·]*:\*")]
    PrefixWildcard,
    #[regex(r"\*:[\p{L}_][\p{L}\p{N}\p{M}_\-.·]*")]
    SuffixWildcard,
}

/// Start-tag and end-tag interior: names, `=`, attribute value delimiters.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n]+")]
enum TagToken {
    #[regex(r"[\p{L}_][\p{L}\p{N}\p{M}_\-.·]*")]
    NCName,
    #[regex(r"[\p{L}_][\p{L}\p{N}\p{M}_\-.·]*:[\p{L}_][\p{L}\p{N}\p{M}_\-.·]*")]
    QName,
    #[token("=")]
    Eq,
    #[token(">")]
    Gt,
    #[token("/>")]
    SlashGt,
    #[token("\"")]
    Quot,
    #[token("'")]
    Apos,
}

/// Element content: raw character data until `{`, `}`, `<` or `&`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
enum ContentToken {
    #[regex(r"[^<{}&]+")]
    Text,
    #[token("{{")]
    EscLBrace,
    #[token("}}")]
    EscRBrace,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("</")]
    CloseTag,
    #[token("<!--", lex_xml_comment)]
    XmlComment,
    #[token("<![CDATA[", lex_cdata)]
    Cdata,
    #[token("<?", lex_pi)]
    PiConstructor,
    #[token("<")]
    Lt,
    #[regex(r"&(lt|gt|amp|quot|apos|#[0-9]+|#x[0-9a-fA-F]+);")]
    CharRef,
    #[token("&")]
    Amp,
}

/// Double-quoted attribute content.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
enum AttrDToken {
    #[regex(r#"[^"<{}&]+"#)]
    Text,
    #[token("\"\"")]
    EscQuote,
    #[token("{{")]
    EscLBrace,
    #[token("}}")]
    EscRBrace,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("\"")]
    Quote,
    #[token("<")]
    Lt,
    #[regex(r"&(lt|gt|amp|quot|apos|#[0-9]+|#x[0-9a-fA-F]+);")]
    CharRef,
    #[token("&")]
    Amp,
}

/// Single-quoted attribute content.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
enum AttrSToken {
    #[regex(r"[^'<{}&]+")]
    Text,
    #[token("''")]
    EscQuote,
    #[token("{{")]
    EscLBrace,
    #[token("}}")]
    EscRBrace,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("'")]
    Quote,
    #[token("<")]
    Lt,
    #[regex(r"&(lt|gt|amp|quot|apos|#[0-9]+|#x[0-9a-fA-F]+);")]
    CharRef,
    #[token("&")]
    Amp,
}

/// Lexer modes, held as an explicit stack. `Default` frames carry their own
/// brace depth so the driver knows which `}` leaves an enclosed expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Default { braces: u32 },
    StartTag,
    ElemContent,
    AttrDouble,
    AttrSingle,
    EndTag,
}

/// The driver: produces [`Token`]s on demand, never backtracking over raw
/// characters. One instance per parse.
pub struct Lexer<'s> {
    source: &'s str,
    pos: usize,
    modes: Vec<Mode>,
    diags: Vec<LexDiag>,
    eof_reported: bool,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            pos: 0,
            modes: vec![Mode::Default { braces: 0 }],
            diags: Vec::new(),
            eof_reported: false,
        }
    }

    /// Depth of the mode stack; 1 is the base expression mode.
    pub fn mode_depth(&self) -> usize {
        self.modes.len()
    }

    pub(crate) fn take_diags(&mut self) -> Vec<LexDiag> {
        std::mem::take(&mut self.diags)
    }

    /// Next token, or `None` at end of input. A non-empty mode stack at end
    /// of input is the lexical error "unterminated direct constructor".
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            if self.pos >= self.source.len() {
                if !self.eof_reported {
                    self.eof_reported = true;
                    if self.modes.len() > 1 {
                        let end = TextSize::new(self.source.len() as u32);
                        self.diags.push(LexDiag {
                            message: "unterminated direct constructor",
                            span: TextRange::empty(end),
                        });
                    }
                }
                return None;
            }
            let mode = *self.modes.last().expect("mode stack never empty");
            let token = match mode {
                Mode::Default { .. } => self.lex_default(),
                Mode::StartTag => self.lex_tag(false),
                Mode::EndTag => self.lex_tag(true),
                Mode::ElemContent => self.lex_content(),
                Mode::AttrDouble => self.lex_attr_double(),
                Mode::AttrSingle => self.lex_attr_single(),
            };
            // None here means only trailing trivia remained in this mode.
            if let Some(token) = token {
                return Some(token);
            }
        }
    }

    fn error(&mut self, message: &'static str, span: TextRange) -> TokenKind {
        self.diags.push(LexDiag { message, span });
        TokenKind::Error
    }

    fn next_char_starts_name(&self) -> bool {
        self.source[self.pos..]
            .chars()
            .next()
            .is_some_and(is_name_start)
    }

    /// Runs one step of a logos lexer over the remaining input and returns
    /// the raw result plus the absolute span. Advances the driver position.
    fn step<T>(&mut self) -> Option<(Result<T, LexErrorKind>, TextRange)>
    where
        T: Logos<'s, Source = str, Error = LexErrorKind>,
        T::Extras: Default,
    {
        let start = self.pos;
        let mut lex = T::lexer(&self.source[start..]);
        let Some(res) = lex.next() else {
            self.pos = self.source.len();
            return None;
        };
        let span = lex.span();
        self.pos = start + span.end;
        let range = TextRange::new(
            TextSize::new((start + span.start) as u32),
            TextSize::new((start + span.end) as u32),
        );
        Some((res, range))
    }

    fn lex_default(&mut self) -> Option<Token> {
        let (res, span) = self.step::<ExprToken>()?;
        let kind = match res {
            Err(e) => self.error(e.message(), span),
            Ok(ExprToken::Lt) => {
                if self.next_char_starts_name() {
                    self.modes.push(Mode::StartTag);
                    TokenKind::TagOpen
                } else {
                    TokenKind::Lt
                }
            }
            Ok(ExprToken::LBrace) => {
                if let Some(Mode::Default { braces }) = self.modes.last_mut() {
                    *braces += 1;
                }
                TokenKind::LBrace
            }
            Ok(ExprToken::RBrace) => {
                match self.modes.last_mut() {
                    Some(Mode::Default { braces }) if *braces > 0 => *braces -= 1,
                    _ => {
                        // The `}` that closes an enclosed expression inside
                        // element or attribute content. A stray `}` at the
                        // base mode stays put; the parser rejects it.
                        if self.modes.len() > 1 {
                            self.modes.pop();
                        }
                    }
                }
                TokenKind::RBrace
            }
            Ok(tok) => match tok {
                ExprToken::Comma => TokenKind::Comma,
                ExprToken::Semi => TokenKind::Semi,
                ExprToken::LParen => TokenKind::LParen,
                ExprToken::RParen => TokenKind::RParen,
                ExprToken::LBracket => TokenKind::LBracket,
                ExprToken::RBracket => TokenKind::RBracket,
                ExprToken::Dollar => TokenKind::Dollar,
                ExprToken::Dot => TokenKind::Dot,
                ExprToken::DotDot => TokenKind::DotDot,
                ExprToken::At => TokenKind::At,
                ExprToken::Minus => TokenKind::Minus,
                ExprToken::Plus => TokenKind::Plus,
                ExprToken::Star => TokenKind::Star,
                ExprToken::Pipe => TokenKind::Pipe,
                ExprToken::PipePipe => TokenKind::PipePipe,
                ExprToken::Eq => TokenKind::Eq,
                ExprToken::BangEq => TokenKind::BangEq,
                ExprToken::Bang => TokenKind::Bang,
                ExprToken::Le => TokenKind::Le,
                ExprToken::Gt => TokenKind::Gt,
                ExprToken::Ge => TokenKind::Ge,
                ExprToken::LtLt => TokenKind::LtLt,
                ExprToken::GtGt => TokenKind::GtGt,
                ExprToken::Slash => TokenKind::Slash,
                ExprToken::SlashSlash => TokenKind::SlashSlash,
                ExprToken::ColonEq => TokenKind::ColonEq,
                ExprToken::ColonColon => TokenKind::ColonColon,
                ExprToken::Question => TokenKind::Question,
                ExprToken::Hash => TokenKind::Hash,
                ExprToken::Percent => TokenKind::Percent,
                ExprToken::Pragma => TokenKind::Pragma,
                ExprToken::XmlComment => TokenKind::XmlComment,
                ExprToken::PiConstructor => TokenKind::PiConstructor,
                ExprToken::StringLiteral => TokenKind::StringLiteral,
                ExprToken::IntegerLiteral => TokenKind::IntegerLiteral,
                ExprToken::DecimalLiteral => TokenKind::DecimalLiteral,
                ExprToken::DoubleLiteral => TokenKind::DoubleLiteral,
                ExprToken::NCName => TokenKind::NCName,
                ExprToken::QName => TokenKind::QName,
                ExprToken::PrefixWildcard => TokenKind::PrefixWildcard,
                ExprToken::SuffixWildcard => TokenKind::SuffixWildcard,
                ExprToken::Comment => unreachable!("comments are skipped"),
                ExprToken::Lt | ExprToken::LBrace | ExprToken::RBrace => unreachable!(),
            },
        };
        Some(Token::new(kind, span))
    }

    fn lex_tag(&mut self, end_tag: bool) -> Option<Token> {
        let (res, span) = self.step::<TagToken>()?;
        let kind = match res {
            Err(e) => self.error(e.message(), span),
            Ok(TagToken::NCName) => TokenKind::NCName,
            Ok(TagToken::QName) => TokenKind::QName,
            Ok(TagToken::Eq) => TokenKind::Eq,
            Ok(TagToken::Gt) => {
                self.modes.pop();
                if !end_tag {
                    self.modes.push(Mode::ElemContent);
                }
                TokenKind::TagClose
            }
            Ok(TagToken::SlashGt) => {
                self.modes.pop();
                TokenKind::TagSelfClose
            }
            Ok(TagToken::Quot) => {
                self.modes.push(Mode::AttrDouble);
                TokenKind::Quot
            }
            Ok(TagToken::Apos) => {
                self.modes.push(Mode::AttrSingle);
                TokenKind::Apos
            }
        };
        Some(Token::new(kind, span))
    }

    fn lex_content(&mut self) -> Option<Token> {
        let (res, span) = self.step::<ContentToken>()?;
        let kind = match res {
            Err(e) => self.error(e.message(), span),
            Ok(ContentToken::Text | ContentToken::EscLBrace | ContentToken::EscRBrace) => {
                TokenKind::Text
            }
            Ok(ContentToken::LBrace) => {
                self.modes.push(Mode::Default { braces: 0 });
                TokenKind::LBrace
            }
            Ok(ContentToken::RBrace) => {
                self.error("'}' in element content must be written as '}}'", span)
            }
            Ok(ContentToken::CloseTag) => {
                self.modes.pop();
                self.modes.push(Mode::EndTag);
                TokenKind::CloseTagOpen
            }
            Ok(ContentToken::Lt) => {
                if self.next_char_starts_name() {
                    self.modes.push(Mode::StartTag);
                    TokenKind::TagOpen
                } else {
                    self.error("'<' in element content must be written as '&lt;'", span)
                }
            }
            Ok(ContentToken::XmlComment) => TokenKind::XmlComment,
            Ok(ContentToken::Cdata) => TokenKind::Cdata,
            Ok(ContentToken::PiConstructor) => TokenKind::PiConstructor,
            Ok(ContentToken::CharRef) => TokenKind::CharRef,
            Ok(ContentToken::Amp) => self.error(LexErrorKind::InvalidCharRef.message(), span),
        };
        Some(Token::new(kind, span))
    }

    fn lex_attr_double(&mut self) -> Option<Token> {
        let (res, span) = self.step::<AttrDToken>()?;
        let kind = match res {
            Err(e) => self.error(e.message(), span),
            Ok(AttrDToken::Text | AttrDToken::EscQuote | AttrDToken::EscLBrace | AttrDToken::EscRBrace) => {
                TokenKind::Text
            }
            Ok(AttrDToken::LBrace) => {
                self.modes.push(Mode::Default { braces: 0 });
                TokenKind::LBrace
            }
            Ok(AttrDToken::RBrace) => {
                self.error("'}' in an attribute value must be written as '}}'", span)
            }
            Ok(AttrDToken::Quote) => {
                self.modes.pop();
                TokenKind::Quot
            }
            Ok(AttrDToken::Lt) => self.error("'<' is not allowed in an attribute value", span),
            Ok(AttrDToken::CharRef) => TokenKind::CharRef,
            Ok(AttrDToken::Amp) => self.error(LexErrorKind::InvalidCharRef.message(), span),
        };
        Some(Token::new(kind, span))
    }

    fn lex_attr_single(&mut self) -> Option<Token> {
        let (res, span) = self.step::<AttrSToken>()?;
        let kind = match res {
            Err(e) => self.error(e.message(), span),
            Ok(AttrSToken::Text | AttrSToken::EscQuote | AttrSToken::EscLBrace | AttrSToken::EscRBrace) => {
                TokenKind::Text
            }
            Ok(AttrSToken::LBrace) => {
                self.modes.push(Mode::Default { braces: 0 });
                TokenKind::LBrace
            }
            Ok(AttrSToken::RBrace) => {
                self.error("'}' in an attribute value must be written as '}}'", span)
            }
            Ok(AttrSToken::Quote) => {
                self.modes.pop();
                TokenKind::Apos
            }
            Ok(AttrSToken::Lt) => self.error("'<' is not allowed in an attribute value", span),
            Ok(AttrSToken::CharRef) => TokenKind::CharRef,
            Ok(AttrSToken::Amp) => self.error(LexErrorKind::InvalidCharRef.message(), span),
        };
        Some(Token::new(kind, span))
    }
}
