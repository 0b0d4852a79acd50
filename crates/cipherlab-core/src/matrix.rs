//! Character matrices for the transposition ciphers.
//!
//! A string is laid out row-major with a fixed number of columns. When the
//! last row comes up short it is filled with characters taken from the start
//! of the string again (wrapping as often as needed), never with a filler
//! character.

use std::fmt;

use crate::error::{CoreError, Result};
use crate::types::Permutation;

/// A rectangular, row-major grid of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    cells: Vec<char>,
    columns: usize,
}

impl Matrix {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.len() / self.columns
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// A single row.
    pub fn row(&self, index: usize) -> Option<&[char]> {
        self.iter_rows().nth(index)
    }

    /// Iterate over rows, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> + '_ {
        self.cells.chunks(self.columns)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.cells {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Lay `s` out in rows of `columns` characters, wrap-padding the last row.
pub fn string_to_matrix(s: &str, columns: usize) -> Result<Matrix> {
    if columns == 0 {
        return Err(CoreError::InvalidColumns);
    }
    let mut cells: Vec<char> = s.chars().collect();
    let short = cells.len() % columns;
    if short != 0 {
        let fill: Vec<char> = cells.iter().copied().cycle().take(columns - short).collect();
        cells.extend(fill);
    }
    Ok(Matrix { cells, columns })
}

/// Concatenate the rows back into a string.
pub fn matrix_to_string(matrix: &Matrix) -> String {
    matrix.to_string()
}

/// Output row `i` is input row `permutation[i]`.
pub fn permute_rows(matrix: &Matrix, permutation: &Permutation) -> Result<Matrix> {
    let rows: Vec<&[char]> = matrix.iter_rows().collect();
    let reordered = permutation.apply(&rows)?;
    Ok(Matrix {
        cells: reordered.concat(),
        columns: matrix.columns,
    })
}

/// Output column `j` of every row is input column `permutation[j]`.
pub fn permute_columns(matrix: &Matrix, permutation: &Permutation) -> Result<Matrix> {
    permutation.ensure_len(matrix.columns, "matrix row")?;
    let mut cells = Vec::with_capacity(matrix.cells.len());
    for row in matrix.iter_rows() {
        cells.extend(permutation.apply(row)?);
    }
    Ok(Matrix {
        cells,
        columns: matrix.columns,
    })
}
