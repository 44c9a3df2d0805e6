use crate::distance::{row_norms, Metric};
use crate::error::{Art2aError, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;

/// Validated, transformed input data shared read-only by all clustering runs.
///
/// The caller's matrix is never mutated; the transform operates on a derived
/// copy. For [`Metric::Cosine`] each row is unit-normalized, components of
/// the unit vector below the contrast threshold `offset / sqrt(D)` are
/// zeroed, and the row is re-normalized. For [`Metric::Euclidean`] the data
/// stays in raw metric space and only validation and null-row tagging apply.
///
/// Rows that are all-zero (before or after contrast enhancement) are tagged
/// as null; the kernel never assigns them to a cluster and they never
/// influence any weight vector.
#[derive(Debug)]
pub struct PreprocessedData {
    matrix: Array2<f32>,
    null_rows: Vec<bool>,
    n_active: usize,
    /// Maximum row norm, used by the Euclidean vigilance mapping.
    /// 1.0 for the cosine variant, where every non-null row is unit length.
    scale: f32,
    metric: Metric,
}

impl PreprocessedData {
    /// Preprocess a rectangular matrix (rows = items, columns = features).
    ///
    /// # Errors
    ///
    /// - [`Art2aError::EmptyMatrix`] when the matrix has no rows or columns
    /// - [`Art2aError::TooFewRows`] when it has fewer than 2 rows
    /// - [`Art2aError::InvalidParameter`] when `contrast_offset` is negative
    ///   or non-finite
    pub fn new(data: &ArrayView2<f32>, metric: Metric, contrast_offset: f32) -> Result<Self> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(Art2aError::EmptyMatrix);
        }
        if data.nrows() < 2 {
            return Err(Art2aError::TooFewRows { found: data.nrows() });
        }
        if !contrast_offset.is_finite() || contrast_offset < 0.0 {
            return Err(Art2aError::InvalidParameter {
                name: "contrast_offset",
                message: format!("must be finite and non-negative, got {}", contrast_offset),
            });
        }

        let mut matrix = data.to_owned();
        let n_cols = matrix.ncols();

        if metric == Metric::Cosine {
            let theta = contrast_offset / (n_cols as f32).sqrt();
            matrix
                .as_slice_mut()
                .unwrap()
                .par_chunks_mut(n_cols)
                .for_each(|row| contrast_enhance(row, theta));
        }

        let norms = row_norms(&matrix.view());
        let null_rows: Vec<bool> = norms.iter().map(|&n| n == 0.0).collect();
        let n_active = null_rows.iter().filter(|&&null| !null).count();
        let scale = match metric {
            Metric::Cosine => 1.0,
            Metric::Euclidean => norms.iter().cloned().fold(0.0, f32::max),
        };

        Ok(Self {
            matrix,
            null_rows,
            n_active,
            scale,
            metric,
        })
    }

    /// Preprocess a matrix given as a slice of row vectors.
    ///
    /// This is the shape delimited-text readers produce. In addition to the
    /// checks of [`PreprocessedData::new`], empty and ragged rows are
    /// rejected with [`Art2aError::EmptyRow`] / [`Art2aError::RaggedRow`].
    pub fn from_rows(rows: &[Vec<f32>], metric: Metric, contrast_offset: f32) -> Result<Self> {
        if rows.is_empty() {
            return Err(Art2aError::EmptyMatrix);
        }
        let n_cols = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.is_empty() {
                return Err(Art2aError::EmptyRow { row: i });
            }
            if row.len() != n_cols {
                return Err(Art2aError::RaggedRow {
                    row: i,
                    expected: n_cols,
                    found: row.len(),
                });
            }
        }
        let flat: Vec<f32> = rows.concat();
        let matrix = Array2::from_shape_vec((rows.len(), n_cols), flat)
            .expect("rows validated rectangular");
        Self::new(&matrix.view(), metric, contrast_offset)
    }

    /// Number of items (rows)
    pub fn n_rows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of feature dimensions (columns)
    pub fn n_cols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Number of non-null rows
    pub fn n_active(&self) -> usize {
        self.n_active
    }

    /// Whether row `i` is null (all-zero, never clustered)
    pub fn is_null(&self, i: usize) -> bool {
        self.null_rows[i]
    }

    /// One preprocessed row
    pub fn row(&self, i: usize) -> ArrayView1<'_, f32> {
        self.matrix.row(i)
    }

    /// The full preprocessed matrix
    pub fn matrix(&self) -> &Array2<f32> {
        &self.matrix
    }

    /// The winner-determination rule this data was prepared for
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Maximum row norm (diameter-bound anchor for the Euclidean variant)
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

/// Unit-normalize a row, zero components below `theta`, re-normalize.
///
/// Surviving components only grow under the second normalization, so
/// applying the transform twice with the same threshold is a no-op.
fn contrast_enhance(row: &mut [f32], theta: f32) {
    let norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for v in row.iter_mut() {
        *v /= norm;
        if v.abs() < theta {
            *v = 0.0;
        }
    }
    let enhanced_norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
    if enhanced_norm == 0.0 {
        return;
    }
    for v in row.iter_mut() {
        *v /= enhanced_norm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_cosine_rows_are_unit_length() {
        let data = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let prep = PreprocessedData::new(&data.view(), Metric::Cosine, 0.0).unwrap();
        for i in 0..prep.n_rows() {
            let row = prep.row(i);
            assert_relative_eq!(row.dot(&row).sqrt(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_contrast_enhancement_zeroes_small_components() {
        // theta = 1/sqrt(3) ~ 0.577; the first unit component of
        // (0.1, 0.2, 0.3) falls below it and must vanish.
        let data = array![[0.1f32, 0.2, 0.3], [0.9, 0.8, 0.7]];
        let prep = PreprocessedData::new(&data.view(), Metric::Cosine, 1.0).unwrap();
        assert_eq!(prep.row(0)[0], 0.0);
        assert!(prep.row(0)[2] > 0.0);
    }

    #[test]
    fn test_euclidean_is_identity() {
        let data = array![[1.0f32, 2.0], [3.0, 4.0]];
        let prep = PreprocessedData::new(&data.view(), Metric::Euclidean, 1.0).unwrap();
        assert_eq!(prep.matrix(), &data);
        assert_relative_eq!(prep.scale(), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_null_rows_are_tagged() {
        let data = array![[0.0f32, 0.0], [1.0, 1.0], [0.0, 0.0]];
        let prep = PreprocessedData::new(&data.view(), Metric::Cosine, 1.0).unwrap();
        assert!(prep.is_null(0));
        assert!(!prep.is_null(1));
        assert!(prep.is_null(2));
        assert_eq!(prep.n_active(), 1);
    }

    #[test]
    fn test_row_zeroed_by_enhancement_becomes_null() {
        // With offset 2.0 the threshold exceeds every unit component of a
        // balanced row, so the whole row collapses to zero.
        let data = array![[1.0f32, 1.0, 1.0, 1.0], [8.0, 0.1, 0.1, 0.1]];
        let prep = PreprocessedData::new(&data.view(), Metric::Cosine, 2.0).unwrap();
        assert!(prep.is_null(0));
        assert!(!prep.is_null(1));
    }

    #[test]
    fn test_idempotent_within_tolerance() {
        let rows = vec![
            vec![0.1f32, 0.2, 0.3],
            vec![0.9, 0.8, 0.7],
            vec![0.5, 0.5, 0.1],
        ];
        let first = PreprocessedData::from_rows(&rows, Metric::Cosine, 1.0).unwrap();
        let again =
            PreprocessedData::new(&first.matrix().view(), Metric::Cosine, 1.0).unwrap();
        for (a, b) in first.matrix().iter().zip(again.matrix().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_rejects_empty_and_ragged() {
        let empty: Vec<Vec<f32>> = Vec::new();
        assert!(matches!(
            PreprocessedData::from_rows(&empty, Metric::Cosine, 1.0),
            Err(Art2aError::EmptyMatrix)
        ));

        let with_empty_row = vec![vec![1.0f32, 2.0], Vec::new()];
        assert!(matches!(
            PreprocessedData::from_rows(&with_empty_row, Metric::Cosine, 1.0),
            Err(Art2aError::EmptyRow { row: 1 })
        ));

        let ragged = vec![vec![1.0f32, 2.0], vec![1.0, 2.0, 3.0]];
        assert!(matches!(
            PreprocessedData::from_rows(&ragged, Metric::Cosine, 1.0),
            Err(Art2aError::RaggedRow { row: 1, expected: 2, found: 3 })
        ));
    }

    #[test]
    fn test_rejects_single_row() {
        let one = vec![vec![1.0f32, 2.0]];
        assert!(matches!(
            PreprocessedData::from_rows(&one, Metric::Cosine, 1.0),
            Err(Art2aError::TooFewRows { found: 1 })
        ));
    }
}
