use std::error::Error as _;
use std::fmt::{self, Display, Write as _};
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a run, from reading the file to the decomposition.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("failed to read matrix file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("matrix input is empty")]
    EmptyInput,

    #[error("line {line}: {token:?} is not an integer")]
    InvalidToken {
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: expected {expected} entries, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("matrix is not square: {rows} rows, {cols} columns")]
    NotSquare { rows: usize, cols: usize },

    #[error("matrix is not symmetric")]
    NotSymmetric,

    #[error("{method} did not converge after {iterations} iterations")]
    NoConvergence {
        method: &'static str,
        iterations: usize,
    },

    #[error("LAPACK eigenvalue routine failed")]
    Lapack(#[from] ndarray_linalg::error::LinalgError),

    #[error("row {row} has degree {found}, expected {expected}")]
    NotRegular { row: usize, expected: f64, found: f64 },

    #[error("expansion needs at least two vertices and a positive degree")]
    DegenerateGraph,

    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}

/// The step a [`SolverError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    LinAlg,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Io => write!(f, "IOError"),
            ErrorKind::Parse => write!(f, "ParseError"),
            ErrorKind::LinAlg => write!(f, "LinAlgError"),
        }
    }
}

impl SolverError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SolverError::Read { .. } | SolverError::Output(_) => ErrorKind::Io,
            SolverError::EmptyInput
            | SolverError::InvalidToken { .. }
            | SolverError::RaggedRow { .. } => ErrorKind::Parse,
            SolverError::NotSquare { .. }
            | SolverError::NotSymmetric
            | SolverError::NoConvergence { .. }
            | SolverError::Lapack(_)
            | SolverError::NotRegular { .. }
            | SolverError::DegenerateGraph => ErrorKind::LinAlg,
        }
    }

    /// `Kind: message: cause: ...`, following the whole `source()` chain.
    pub fn describe(&self) -> String {
        let mut text = format!("{}: {}", self.kind(), self);
        let mut source = self.source();
        while let Some(cause) = source {
            let _ = write!(text, ": {}", cause);
            source = cause.source();
        }
        text
    }
}

pub type Result<T> = std::result::Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn describe_appends_os_cause() {
        let e = SolverError::Read {
            path: PathBuf::from("nope"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            e.describe(),
            "IOError: failed to read matrix file: nope: No such file or directory"
        );
    }

    #[test]
    fn describe_appends_parse_cause() {
        let e = SolverError::InvalidToken {
            line: 2,
            token: "a".to_string(),
            source: "a".parse::<i64>().unwrap_err(),
        };
        assert_eq!(
            e.describe(),
            "ParseError: line 2: \"a\" is not an integer: invalid digit found in string"
        );
    }

    #[test]
    fn describe_without_cause_is_the_message() {
        let e = SolverError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(e.describe(), "LinAlgError: matrix is not square: 2 rows, 3 columns");
    }

    #[test]
    fn describe_does_not_repeat_lapack_cause() {
        let inner = ndarray_linalg::error::LinalgError::NotSquare { rows: 2, cols: 3 };
        let cause = inner.to_string();
        let text = SolverError::from(inner).describe();
        assert_eq!(text, format!("LinAlgError: LAPACK eigenvalue routine failed: {}", cause));
        assert_eq!(text.matches(&cause).count(), 1);
    }

    #[test]
    fn kinds_cover_every_variant() {
        assert_eq!(SolverError::EmptyInput.kind(), ErrorKind::Parse);
        assert_eq!(SolverError::DegenerateGraph.kind(), ErrorKind::LinAlg);
        let e = SolverError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(e.kind(), ErrorKind::Io);
    }
}
