//! Token model shared by the lexer, the token stream and the parser.
//!
//! Tokens are zero-copy: kind + span, with text sliced from the source via
//! [`token_text`] only when a production needs to inspect it (contextual
//! keywords, tag-name matching).

use text_size::TextRange;

/// Terminal categories produced by the lexer.
///
/// All XQuery keywords are contextual, so there are no keyword kinds here:
/// the lexer emits [`TokenKind::NCName`]/[`TokenKind::QName`] and the parser
/// decides by lookahead whether a name functions as a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TokenKind {
    // Punctuation and operators (expression mode).
    Comma,
    Semi,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Dollar,
    Dot,
    DotDot,
    At,
    Minus,
    Plus,
    Star,
    Pipe,
    PipePipe,
    Eq,
    BangEq,
    Lt,
    Le,
    Gt,
    Ge,
    LtLt,
    GtGt,
    Slash,
    SlashSlash,
    ColonEq,
    ColonColon,
    Question,
    Bang,
    Hash,
    Percent,

    // Names.
    NCName,
    QName,
    /// `prefix:*`
    PrefixWildcard,
    /// `*:local`
    SuffixWildcard,

    // Literals.
    IntegerLiteral,
    DecimalLiteral,
    DoubleLiteral,
    StringLiteral,

    // Structured regions lexed as single tokens.
    /// `(# QName ... #)`
    Pragma,
    /// `<!-- ... -->`
    XmlComment,
    /// `<? target ... ?>`
    PiConstructor,
    /// `<![CDATA[ ... ]]>`
    Cdata,

    // Direct-constructor terminals.
    /// `<` opening a start tag.
    TagOpen,
    /// `>` closing a start or end tag.
    TagClose,
    /// `/>`
    TagSelfClose,
    /// `</`
    CloseTagOpen,
    /// `"` delimiting an attribute value.
    Quot,
    /// `'` delimiting an attribute value.
    Apos,
    /// Raw character data in element or attribute content.
    Text,
    /// `&lt;`, `&#10;`, `&#x0A;` and friends.
    CharRef,

    /// Synthetic token covering a lexical error region.
    Error,
    /// End-of-input sentinel; repeats under further lookahead.
    Eof,
}

#[doc(hidden)]
pub const __LAST: TokenKind = TokenKind::Eof;

impl TokenKind {
    /// Short human-readable description used in expected/found diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Comma => "','",
            TokenKind::Semi => "';'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Dollar => "'$'",
            TokenKind::Dot => "'.'",
            TokenKind::DotDot => "'..'",
            TokenKind::At => "'@'",
            TokenKind::Minus => "'-'",
            TokenKind::Plus => "'+'",
            TokenKind::Star => "'*'",
            TokenKind::Pipe => "'|'",
            TokenKind::PipePipe => "'||'",
            TokenKind::Eq => "'='",
            TokenKind::BangEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::LtLt => "'<<'",
            TokenKind::GtGt => "'>>'",
            TokenKind::Slash => "'/'",
            TokenKind::SlashSlash => "'//'",
            TokenKind::ColonEq => "':='",
            TokenKind::ColonColon => "'::'",
            TokenKind::Question => "'?'",
            TokenKind::Bang => "'!'",
            TokenKind::Hash => "'#'",
            TokenKind::Percent => "'%'",
            TokenKind::NCName => "name",
            TokenKind::QName => "name",
            TokenKind::PrefixWildcard | TokenKind::SuffixWildcard => "name wildcard",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::DecimalLiteral => "decimal literal",
            TokenKind::DoubleLiteral => "double literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Pragma => "pragma",
            TokenKind::XmlComment => "XML comment",
            TokenKind::PiConstructor => "processing instruction",
            TokenKind::Cdata => "CDATA section",
            TokenKind::TagOpen => "'<'",
            TokenKind::TagClose => "'>'",
            TokenKind::TagSelfClose => "'/>'",
            TokenKind::CloseTagOpen => "'</'",
            TokenKind::Quot => "'\"'",
            TokenKind::Apos => "\"'\"",
            TokenKind::Text => "character data",
            TokenKind::CharRef => "character reference",
            TokenKind::Error => "invalid input",
            TokenKind::Eof => "end of input",
        }
    }

    /// NCName or prefixed QName.
    pub fn is_name(self) -> bool {
        matches!(self, TokenKind::NCName | TokenKind::QName)
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[std::ops::Range::<usize>::from(token.span)]
}

/// Compact set of token kinds backed by a bitmask.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "TokenKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..64u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind: TokenKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// Resynchronization points for lenient-mode recovery: statement and
    /// delimiter boundaries the parser can reliably continue from.
    pub const RECOVERY: TokenSet = TokenSet::new(&[
        TokenKind::Semi,
        TokenKind::Comma,
        TokenKind::RParen,
        TokenKind::RBracket,
        TokenKind::RBrace,
        TokenKind::Eof,
    ]);

    /// Tokens that can begin a primary expression without keyword context.
    pub const PRIMARY_FIRST: TokenSet = TokenSet::new(&[
        TokenKind::IntegerLiteral,
        TokenKind::DecimalLiteral,
        TokenKind::DoubleLiteral,
        TokenKind::StringLiteral,
        TokenKind::Dollar,
        TokenKind::LParen,
        TokenKind::Dot,
        TokenKind::NCName,
        TokenKind::QName,
        TokenKind::TagOpen,
        TokenKind::XmlComment,
        TokenKind::PiConstructor,
        TokenKind::Pragma,
    ]);

    /// Tokens that can begin a path step.
    pub const STEP_FIRST: TokenSet = PRIMARY_FIRST.union(TokenSet::new(&[
        TokenKind::Star,
        TokenKind::PrefixWildcard,
        TokenKind::SuffixWildcard,
        TokenKind::At,
        TokenKind::DotDot,
    ]));

    /// Tokens that can begin an expression (path steps plus unary signs
    /// and leading slashes).
    pub const EXPR_FIRST: TokenSet = STEP_FIRST.union(TokenSet::new(&[
        TokenKind::Minus,
        TokenKind::Plus,
        TokenKind::Slash,
        TokenKind::SlashSlash,
        TokenKind::Percent,
    ]));
}
