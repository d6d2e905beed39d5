/// Typed errors for reading and running scripts
use std::io;

use thiserror::Error;

use crate::render::RenderError;

/// Why an argument line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("expected {expected} argument(s), found {found}")]
    Count { expected: usize, found: usize },

    #[error("`{0}` is not a number")]
    NotANumber(String),

    #[error("`{0}` is not a finite number")]
    NotFinite(String),

    #[error("argument line missing at end of input")]
    MissingLine,

    #[error("file name is empty")]
    EmptyPath,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("cannot open script `{path}`: {source}")]
    FileOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read script after line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: bad arguments for `{keyword}` ({reason}): {raw:?}")]
    Parse {
        keyword: String,
        raw: String,
        line: usize,
        reason: ArgumentError,
    },

    #[error("line {line}: unknown command `{keyword}`")]
    UnknownCommand { keyword: String, line: usize },

    #[error("`{keyword}` failed: {source}")]
    Render {
        keyword: &'static str,
        #[source]
        source: RenderError,
    },
}
