//! Diagnostics: the parse-level error records and the pluggable sink.
//!
//! The core never fails hard on bad input; lexical and syntactic problems
//! become [`Diagnostic`]s collected per parse and mirrored to an injected
//! [`DiagnosticSink`]. The sink replaces the classic subclass-and-override
//! pattern with a capability value passed into the parse call.

use serde::Serialize;
use text_size::TextRange;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

/// One error with its position. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

/// Receiver of diagnostics, installed per parse.
pub trait DiagnosticSink {
    fn report(&mut self, message: &str, line: u32, column: u32);
}

/// Default sink: counts reports and stays silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingSink {
    count: usize,
}

impl CountingSink {
    pub fn count(&self) -> usize {
        self.count
    }
}

impl DiagnosticSink for CountingSink {
    fn report(&mut self, _message: &str, _line: u32, _column: u32) {
        self.count += 1;
    }
}

/// Ordered collection of diagnostics for one parse.
///
/// Byte spans are kept alongside the line/column records so [`render`]
/// can produce annotated snippets; they are not part of the public record.
///
/// [`render`]: Diagnostics::render
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
    #[serde(skip)]
    spans: Vec<TextRange>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic, span: TextRange) {
        self.messages.push(diagnostic);
        self.spans.push(span);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.messages
    }

    /// Renders annotated snippets against the source text, one per
    /// diagnostic, without color.
    pub fn render(&self, source: &str) -> String {
        let renderer = Renderer::plain();
        let mut out = String::new();
        for (i, (diag, span)) in self.messages.iter().zip(&self.spans).enumerate() {
            let range = adjust_range(*span, source.len());
            let snippet = Snippet::source(source).line_start(1).annotation(
                AnnotationKind::Primary
                    .span(range)
                    .label(&diag.message),
            );
            let report: Vec<Group> = vec![Level::ERROR.primary_title(&diag.message).element(snippet)];
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&renderer.render(&report).to_string());
        }
        out
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit).max(start);
    }

    start..end
}
