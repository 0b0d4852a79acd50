//! Double transposition: a column pass and a row pass over a character
//! matrix, in an order chosen by the key.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matrix::{matrix_to_string, permute_columns, permute_rows, string_to_matrix, Matrix};
use crate::types::Permutation;

/// Key for [`double_transposition`].
///
/// With `column_first`, `per1` permutes columns and `per2` rows; otherwise
/// `per1` permutes rows and `per2` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranspositionKey {
    #[serde(alias = "col")]
    pub columns: usize,
    pub column_first: bool,
    pub per1: Permutation,
    pub per2: Permutation,
}

/// One permutation pass.
fn pass(matrix: &Matrix, permutation: &Permutation, columns: bool) -> Result<Matrix> {
    if columns {
        permute_columns(matrix, permutation)
    } else {
        permute_rows(matrix, permutation)
    }
}

/// Encrypt `text` with both passes of `key`.
///
/// Text whose length is not a multiple of `key.columns` is wrap-padded from
/// its own start first, so the ciphertext is longer than the plaintext.
pub fn double_transposition(text: &str, key: &TranspositionKey) -> Result<String> {
    let matrix = string_to_matrix(text, key.columns)?;
    let first = pass(&matrix, &key.per1, key.column_first)?;
    let second = pass(&first, &key.per2, !key.column_first)?;
    Ok(matrix_to_string(&second))
}

/// Undo [`double_transposition`] by running the inverse passes in reverse
/// order.
///
/// Exact for ciphertext produced by `double_transposition` (its length is
/// always a multiple of `key.columns`).
pub fn reverse(text: &str, key: &TranspositionKey) -> Result<String> {
    let matrix = string_to_matrix(text, key.columns)?;
    let first = pass(&matrix, &key.per2.inverse(), !key.column_first)?;
    let second = pass(&first, &key.per1.inverse(), key.column_first)?;
    Ok(matrix_to_string(&second))
}
