//! Argument parsing for the `xqgram` binary.
//!
//! One command, no subcommands: every positional argument is a query file
//! (or, under `--suite`, a conformance list). The dialect flags map onto
//! [`Dialect`] one to one.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use xqgram_lib::{Dialect, ErrorMode, XQueryVersion};

use crate::runner::RunArgs;

/// Query files to check (positional).
fn files_arg() -> Arg {
    Arg::new("files")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .action(ArgAction::Append)
        .required(true)
        .help("Query files to check")
}

/// Base language version (--xquery-version).
fn version_arg() -> Arg {
    Arg::new("xquery_version")
        .long("xquery-version")
        .value_name("VERSION")
        .default_value("1.0")
        .value_parser(["1.0", "3.0"])
        .help("XQuery language version")
}

/// Enable the Update Facility (--update).
fn update_arg() -> Arg {
    Arg::new("update")
        .long("update")
        .action(ArgAction::SetTrue)
        .help("Accept XQuery Update Facility syntax")
}

/// Enable Full Text (--full-text).
fn full_text_arg() -> Arg {
    Arg::new("full_text")
        .long("full-text")
        .action(ArgAction::SetTrue)
        .help("Accept XQuery Full Text syntax")
}

/// Keep going after the first error (--lenient).
fn lenient_arg() -> Arg {
    Arg::new("lenient")
        .long("lenient")
        .action(ArgAction::SetTrue)
        .help("Report every diagnostic instead of stopping at the first")
}

/// Conformance-list mode (--suite).
fn suite_arg() -> Arg {
    Arg::new("suite")
        .long("suite")
        .action(ArgAction::SetTrue)
        .help("Treat each FILE as a conformance list of queries to run")
}

pub fn build_cli() -> Command {
    Command::new("xqgram")
        .about("Syntax checker for XQuery 1.0/3.0, XQuery Update and XQuery Full Text")
        .arg_required_else_help(true)
        .arg(files_arg())
        .arg(version_arg())
        .arg(update_arg())
        .arg(full_text_arg())
        .arg(lenient_arg())
        .arg(suite_arg())
}

pub struct Params {
    pub files: Vec<PathBuf>,
    pub version: XQueryVersion,
    pub update: bool,
    pub full_text: bool,
    pub lenient: bool,
    pub suite: bool,
}

impl Params {
    pub fn from_matches(m: &ArgMatches) -> Self {
        // The value parser only lets "1.0" and "3.0" through.
        let version = m
            .get_one::<String>("xquery_version")
            .and_then(|s| s.parse().ok())
            .unwrap_or(XQueryVersion::V1_0);

        Self {
            files: m
                .get_many::<PathBuf>("files")
                .into_iter()
                .flatten()
                .cloned()
                .collect(),
            version,
            update: m.get_flag("update"),
            full_text: m.get_flag("full_text"),
            lenient: m.get_flag("lenient"),
            suite: m.get_flag("suite"),
        }
    }
}

impl From<Params> for RunArgs {
    fn from(p: Params) -> Self {
        Self {
            files: p.files,
            dialect: Dialect {
                version: p.version,
                update: p.update,
                full_text: p.full_text,
            },
            mode: if p.lenient {
                ErrorMode::Lenient
            } else {
                ErrorMode::Strict
            },
            suite: p.suite,
        }
    }
}
