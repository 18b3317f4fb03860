//! Dense integer matrix.

use crate::error::{MatrixKind, ValidationError};
use crate::models::MAX_INPUT_VALUE;

/// A dense n×n integer matrix stored in row-major order.
///
/// Used for both travel distance and travel time between locations.
///
/// # Examples
///
/// ```
/// use fleet_dispatch::distance::IntMatrix;
///
/// let rows = vec![vec![0, 5, 8], vec![5, 0, 4], vec![8, 4, 0]];
/// let m = IntMatrix::from_rows(&rows).unwrap();
/// assert_eq!(m.get(0, 2), 8);
/// assert_eq!(m.get(2, 1), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntMatrix {
    data: Vec<i64>,
    size: usize,
}

impl IntMatrix {
    /// Creates a matrix from an explicit grid of rows.
    ///
    /// Returns `None` if the grid is not square.
    pub fn from_rows(rows: &[Vec<i64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.iter().flatten().copied().collect(),
            size,
        })
    }

    /// Validates a grid against the expected side length and builds the matrix.
    ///
    /// Reports the first defect: wrong row count, a row of the wrong length,
    /// a negative entry, or an entry above [`MAX_INPUT_VALUE`].
    pub(crate) fn validated(
        rows: &[Vec<i64>],
        expected: usize,
        matrix: MatrixKind,
    ) -> Result<Self, ValidationError> {
        if rows.len() != expected {
            return Err(ValidationError::MatrixRowCount {
                matrix,
                expected,
                actual: rows.len(),
            });
        }
        for (row, values) in rows.iter().enumerate() {
            if values.len() != expected {
                return Err(ValidationError::MatrixRowLength {
                    matrix,
                    row,
                    expected,
                    actual: values.len(),
                });
            }
            if let Some((column, &value)) = values.iter().enumerate().find(|&(_, &v)| v < 0) {
                return Err(ValidationError::NegativeMatrixEntry {
                    matrix,
                    row,
                    column,
                    value,
                });
            }
            if let Some((column, &value)) =
                values.iter().enumerate().find(|&(_, &v)| v > MAX_INPUT_VALUE)
            {
                return Err(ValidationError::MatrixEntryTooLarge {
                    matrix,
                    row,
                    column,
                    value,
                });
            }
        }
        Self::from_rows(rows).ok_or(ValidationError::MatrixRowCount {
            matrix,
            expected,
            actual: rows.len(),
        })
    }

    /// Returns the entry from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<Vec<i64>> {
        vec![vec![0, 5, 8], vec![5, 0, 4], vec![8, 4, 0]]
    }

    #[test]
    fn test_from_rows() {
        let m = IntMatrix::from_rows(&sample_rows()).expect("square");
        assert_eq!(m.get(0, 1), 5);
        assert_eq!(m.get(2, 1), 4);
    }

    #[test]
    fn test_from_rows_not_square() {
        assert!(IntMatrix::from_rows(&[vec![0, 1], vec![1]]).is_none());
    }

    #[test]
    fn test_validated_row_count() {
        let err = IntMatrix::validated(&sample_rows(), 4, MatrixKind::Time).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MatrixRowCount {
                matrix: MatrixKind::Time,
                expected: 4,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_validated_short_row() {
        let rows = vec![vec![0, 5, 8], vec![5, 0], vec![8, 4, 0]];
        let err = IntMatrix::validated(&rows, 3, MatrixKind::Distance).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MatrixRowLength {
                matrix: MatrixKind::Distance,
                row: 1,
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_validated_entry_above_bound() {
        let rows = vec![vec![0, i64::MAX / 2], vec![MAX_INPUT_VALUE, 0]];
        let err = IntMatrix::validated(&rows, 2, MatrixKind::Distance).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MatrixEntryTooLarge {
                matrix: MatrixKind::Distance,
                row: 0,
                column: 1,
                value: i64::MAX / 2,
            }
        );

        let at_bound = vec![vec![0, MAX_INPUT_VALUE], vec![MAX_INPUT_VALUE, 0]];
        assert!(IntMatrix::validated(&at_bound, 2, MatrixKind::Time).is_ok());
    }

    #[test]
    fn test_validated_negative_entry() {
        let rows = vec![vec![0, 5], vec![-1, 0]];
        let err = IntMatrix::validated(&rows, 2, MatrixKind::Distance).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NegativeMatrixEntry {
                row: 1,
                column: 0,
                value: -1,
                ..
            }
        ));
    }
}
