use std::fs;
use std::path::Path;

use ndarray::Array2;

use crate::error::{Result, SolverError};

/// Reads the whole matrix file into memory.
pub fn load(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SolverError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses one row per line, entries separated by single spaces.
///
/// Leading and trailing blank lines are ignored. Blank lines between rows
/// and doubled spaces yield empty tokens, which are rejected like any other
/// non-integer. Every row must have as many entries as the first one; the
/// matrix is not required to be square here.
pub fn parse(text: &str) -> Result<Array2<i64>> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .collect();

    let first = lines.iter().position(|(_, l)| !l.is_empty());
    let last = lines.iter().rposition(|(_, l)| !l.is_empty());
    let (first, last) = match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(SolverError::EmptyInput),
    };

    let mut cols = 0;
    let mut entries = Vec::new();
    for (row, &(line, content)) in lines[first..=last].iter().enumerate() {
        let mut found = 0;
        for token in content.split(' ') {
            let value = token.parse::<i64>().map_err(|source| SolverError::InvalidToken {
                line,
                token: token.to_string(),
                source,
            })?;
            entries.push(value);
            found += 1;
        }

        if row == 0 {
            cols = found;
        } else if found != cols {
            return Err(SolverError::RaggedRow {
                line,
                expected: cols,
                found,
            });
        }
    }

    let rows = last - first + 1;
    Ok(Array2::from_shape_fn((rows, cols), |(i, j)| entries[i * cols + j]))
}
