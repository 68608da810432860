//! File-checking driver.
//!
//! Prints one verdict line per file, with the file names padded to a
//! common width so the verdicts line up. Rejected files get their
//! diagnostics on tab-indented lines below the verdict. Missing files are
//! reported inline; nothing changes the exit code.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use xqgram_lib::{Dialect, ErrorMode, parse};

use crate::suite;

pub struct RunArgs {
    pub files: Vec<PathBuf>,
    pub dialect: Dialect,
    pub mode: ErrorMode,
    pub suite: bool,
}

pub fn run(args: &RunArgs, out: &mut dyn Write) -> io::Result<()> {
    if args.suite {
        for list in &args.files {
            suite::run_list(list, args.dialect, args.mode, out)?;
        }
        return Ok(());
    }

    let names: Vec<String> = args.files.iter().map(|p| p.display().to_string()).collect();
    let width = names.iter().map(String::len).max().unwrap_or(0);
    for (path, name) in args.files.iter().zip(&names) {
        check_file(path, name, width, args.dialect, args.mode, out)?;
    }
    Ok(())
}

fn check_file(
    path: &Path,
    name: &str,
    width: usize,
    dialect: Dialect,
    mode: ErrorMode,
    out: &mut dyn Write,
) -> io::Result<()> {
    write!(out, "{name:<width$} : ")?;
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(_) => return writeln!(out, "Not Found"),
    };

    let result = parse(&source, dialect, mode);
    if result.accepted {
        return writeln!(out, "OK");
    }

    let count = result.diagnostics.len();
    writeln!(out, "{count} error{}", if count == 1 { "" } else { "s" })?;
    for diag in result.diagnostics.iter() {
        writeln!(out, "\t{name}: {diag}")?;
    }
    Ok(())
}
