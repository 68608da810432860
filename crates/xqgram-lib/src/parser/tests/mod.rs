mod grammar;
mod recovery;

use crate::{Dialect, ErrorMode, parse};

/// Asserts a strict-mode accept; failures show rendered diagnostics.
pub(crate) fn accepted(source: &str, dialect: Dialect) {
    let result = parse(source, dialect, ErrorMode::Strict);
    assert!(
        result.accepted,
        "expected accept for {source:?}, got:\n{}",
        result.diagnostics.render(source)
    );
}

/// Runs lenient mode and returns all diagnostics, one `line:col: message`
/// per line, for snapshotting.
pub(crate) fn rejected(source: &str, dialect: Dialect) -> String {
    let result = parse(source, dialect, ErrorMode::Lenient);
    assert!(!result.accepted, "expected reject for {source:?}");
    result
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
