use ndarray::{Array1, ArrayView1, ArrayView2};
use rayon::prelude::*;

/// Winner-determination rule used by the clustering kernel.
///
/// Both variants run the same competitive-learning loop; they differ in how
/// the match score between an input and a cluster weight vector is computed
/// and in how the vigilance parameter maps to a resonance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Cosine-angle rule: inputs are unit-normalized and contrast-enhanced,
    /// the winner is the cluster with the highest cosine similarity, and an
    /// input resonates when that similarity reaches the vigilance value.
    Cosine,
    /// Euclidean rule: inputs stay in raw metric space, the winner is the
    /// cluster at minimal Euclidean distance, and an input resonates when
    /// that distance is within `(1 - vigilance)` of the data's diameter
    /// bound.
    Euclidean,
}

/// Dot product of two equally sized vectors
#[inline]
pub fn dot(a: &ArrayView1<f32>, b: &ArrayView1<f32>) -> f32 {
    a.dot(b)
}

/// Euclidean (L2) norm of a vector
#[inline]
pub fn norm(a: &ArrayView1<f32>) -> f32 {
    a.dot(a).sqrt()
}

/// Cosine similarity of two vectors. Returns 0 when either vector is zero.
#[inline]
pub fn cosine_similarity(a: &ArrayView1<f32>, b: &ArrayView1<f32>) -> f32 {
    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    a.dot(b) / (norm_a * norm_b)
}

/// Squared Euclidean distance between two vectors
#[inline]
pub fn squared_euclidean(a: &ArrayView1<f32>, b: &ArrayView1<f32>) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean distance between two vectors
#[inline]
pub fn euclidean(a: &ArrayView1<f32>, b: &ArrayView1<f32>) -> f32 {
    squared_euclidean(a, b).sqrt()
}

/// Angle between two vectors in degrees.
///
/// The cosine is clamped to [-1, 1] before the arc cosine, so vectors that
/// are numerically collinear report exactly 0 or 180 degrees.
#[inline]
pub fn angle_degrees(a: &ArrayView1<f32>, b: &ArrayView1<f32>) -> f32 {
    cosine_similarity(a, b).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Compute the L2 norm of each row of a 2D array.
///
/// Row norms are independent, so they are computed in parallel.
pub fn row_norms(data: &ArrayView2<f32>) -> Array1<f32> {
    let n_rows = data.nrows();
    let mut norms = Array1::zeros(n_rows);

    norms
        .as_slice_mut()
        .unwrap()
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, out)| {
            let row = data.row(i);
            *out = row.dot(&row).sqrt();
        });

    norms
}
