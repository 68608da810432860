//! Syntax recognizer for XQuery with support for the Update Facility and
//! Full Text extensions.
//!
//! The crate answers one question per call: is this source text a
//! syntactically well-formed XQuery module under a given dialect? It builds
//! no tree and evaluates nothing; the output is an accept/reject verdict
//! plus positioned diagnostics.
//!
//! ```
//! use xqgram_lib::{parse, Dialect, ErrorMode};
//!
//! let result = parse(
//!     "for $x in (1, 2, 3) where $x gt 1 return $x * $x",
//!     Dialect::xquery_1_0(),
//!     ErrorMode::Strict,
//! );
//! assert!(result.accepted);
//!
//! let result = parse("1 +", Dialect::xquery_1_0(), ErrorMode::Strict);
//! assert!(!result.accepted);
//! assert_eq!(result.diagnostics.len(), 1);
//! ```
//!
//! Dialects compose a base language version with the two extensions:
//!
//! ```
//! use xqgram_lib::{parse, Dialect, ErrorMode};
//!
//! let dialect = Dialect::xquery_3_0().with_update(true).with_full_text(true);
//! let result = parse(
//!     r#"//book[. ftcontains "usability"]"#,
//!     dialect,
//!     ErrorMode::Strict,
//! );
//! assert!(result.accepted);
//! ```

pub mod diagnostics;
mod line_index;
pub mod parser;

pub use diagnostics::{CountingSink, Diagnostic, DiagnosticSink, Diagnostics};
pub use parser::{ParseResult, parse, parse_with_sink};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown XQuery version '{0}' (expected '1.0' or '3.0')")]
    UnknownVersion(String),
}

/// Base grammar version. Picking [`V1_0`] rejects every 3.0-only
/// construct with a syntax error rather than silently accepting it.
///
/// [`V1_0`]: XQueryVersion::V1_0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum XQueryVersion {
    #[serde(rename = "1.0")]
    V1_0,
    #[serde(rename = "3.0")]
    V3_0,
}

impl fmt::Display for XQueryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XQueryVersion::V1_0 => f.write_str("1.0"),
            XQueryVersion::V3_0 => f.write_str("3.0"),
        }
    }
}

impl FromStr for XQueryVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "1.0" => Ok(XQueryVersion::V1_0),
            "3.0" => Ok(XQueryVersion::V3_0),
            other => Err(Error::UnknownVersion(other.to_string())),
        }
    }
}

/// The language accepted by one parse: a base version plus the optional
/// Update Facility and Full Text extensions, independently toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dialect {
    pub version: XQueryVersion,
    pub update: bool,
    pub full_text: bool,
}

impl Dialect {
    pub fn xquery_1_0() -> Self {
        Self {
            version: XQueryVersion::V1_0,
            update: false,
            full_text: false,
        }
    }

    pub fn xquery_3_0() -> Self {
        Self {
            version: XQueryVersion::V3_0,
            update: false,
            full_text: false,
        }
    }

    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    pub fn with_full_text(mut self, full_text: bool) -> Self {
        self.full_text = full_text;
        self
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::xquery_1_0()
    }
}

/// What to do after the first diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// Stop at the first diagnostic.
    #[default]
    Strict,
    /// Report, resynchronize at statement-level boundaries and keep going,
    /// so one pass surfaces several independent errors.
    Lenient,
}
