//! Plain-text conformance lists.
//!
//! One query path per line, resolved against the directory of the list
//! file. `#` starts a comment line, blank lines are skipped and a leading
//! `@` marks an entry that is expected to be rejected. An entry passes
//! when the parse verdict matches the expectation.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use xqgram_lib::{Dialect, ErrorMode, parse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteEntry {
    /// The path as written in the list, used for reporting.
    pub name: String,
    pub path: PathBuf,
    pub expect_failure: bool,
}

pub fn parse_list(text: &str, base: &Path) -> Vec<SuiteEntry> {
    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (expect_failure, name) = match line.strip_prefix('@') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, line),
        };
        entries.push(SuiteEntry {
            name: name.to_string(),
            path: base.join(name),
            expect_failure,
        });
    }
    entries
}

pub fn run_list(
    list: &Path,
    dialect: Dialect,
    mode: ErrorMode,
    out: &mut dyn Write,
) -> io::Result<()> {
    let text = match std::fs::read_to_string(list) {
        Ok(text) => text,
        Err(_) => return writeln!(out, "{} : Not Found", list.display()),
    };
    let entries = parse_list(&text, list.parent().unwrap_or(Path::new(".")));

    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    let mut passed = 0;
    for entry in &entries {
        write!(out, "{:<width$} : ", entry.name)?;
        match std::fs::read_to_string(&entry.path) {
            Err(_) => writeln!(out, "Not Found")?,
            Ok(source) => {
                let accepted = parse(&source, dialect, mode).accepted;
                if accepted != entry.expect_failure {
                    passed += 1;
                    writeln!(out, "OK")?;
                } else if entry.expect_failure {
                    writeln!(out, "FAIL (accepted, expected rejection)")?;
                } else {
                    writeln!(out, "FAIL (rejected)")?;
                }
            }
        }
    }
    writeln!(out, "passed {passed}/{}", entries.len())
}
