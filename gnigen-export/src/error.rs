use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop an export or currency check.
///
/// A stale generated file is not an error; see
/// [`GniExporter::check_current`](crate::GniExporter::check_current).
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to decode the query result")]
    #[diagnostic(
        code(gnigen::decode),
        help("the query must be run with --output=jsonproto")
    )]
    Decode(#[source] serde_json::Error),

    #[error("rule '{rule}' used by '{var}' is not in the query result")]
    #[diagnostic(
        code(gnigen::unknown_rule),
        help("check the rule name, or widen the query expression to include it")
    )]
    UnknownRule { rule: String, var: String },

    #[error("malformed label '{label}': {reason}")]
    #[diagnostic(code(gnigen::malformed_label))]
    MalformedLabel { label: String, reason: &'static str },

    #[error("'{path}' is not under a supported root directory (found '{root}')")]
    #[diagnostic(
        code(gnigen::unsupported_root),
        help("exported sources must live under src/, include/ or modules/")
    )]
    UnsupportedRoot { path: String, root: String },

    #[error("'{path}' is listed more than once in '{var}'")]
    #[diagnostic(
        code(gnigen::duplicate_source),
        help("paths are compared case-insensitively; remove one of the entries from its rule")
    )]
    DuplicateSource { path: String, var: String },

    #[error("'{var}' in '{gni}' is not a GN identifier")]
    #[diagnostic(
        code(gnigen::invalid_variable),
        help("variable names must match [A-Za-z_][A-Za-z0-9_]*")
    )]
    InvalidVariable { var: String, gni: String },

    #[error("build-graph query failed")]
    #[diagnostic(code(gnigen::query))]
    Query(#[source] io::Error),

    #[error("failed to access '{path}'")]
    #[diagnostic(code(gnigen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write the check report")]
    Report(#[source] io::Error),
}
