//! Errors raised while loading problems.
//!
//! Solving itself never fails: an unsatisfiable formula is reported as
//! `None` or an empty list of solutions.

use crate::sat::literal::ParseLiteralError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the parsers and loaders around the solver.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed DIMACS input.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// Malformed YAML test description.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A literal with no variable name.
    #[error(transparent)]
    InvalidLiteral(#[from] ParseLiteralError),

    /// A file the runners do not know how to load.
    #[error("unsupported input file: {}", .0.display())]
    UnknownExtension(PathBuf),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
