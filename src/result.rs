use crate::algorithm::{RunOutcome, UNASSIGNED};
use crate::distance::{angle_degrees, euclidean, Metric};
use crate::error::{Art2aError, Result};
use crate::preprocess::PreprocessedData;
use ndarray::{Array1, Array2};
use std::sync::{Arc, OnceLock};

/// Immutable snapshot of one clustering run.
///
/// Everything observable is frozen at construction; the geometry queries
/// (representatives, pairwise distances and angles) are computed on first
/// access and memoized in per-cell [`OnceLock`]s, so a result can be shared
/// across threads without locking.
#[derive(Debug)]
pub struct ClusterResult {
    data: Arc<PreprocessedData>,
    vigilance: f32,
    epochs_run: usize,
    converged: bool,
    overflow: bool,
    assignments: Array1<i64>,
    weights: Array2<f32>,
    representative_cache: Vec<OnceLock<Vec<usize>>>,
    distance_cache: Vec<OnceLock<f32>>,
    angle_cache: Vec<OnceLock<f32>>,
}

impl ClusterResult {
    pub(crate) fn new(outcome: RunOutcome, data: Arc<PreprocessedData>, vigilance: f32) -> Self {
        let n_clusters = outcome.weights.nrows();
        Self {
            data,
            vigilance,
            epochs_run: outcome.epochs_run,
            converged: outcome.converged,
            overflow: outcome.overflow,
            assignments: outcome.assignments,
            weights: outcome.weights,
            representative_cache: (0..n_clusters).map(|_| OnceLock::new()).collect(),
            distance_cache: (0..n_clusters * n_clusters).map(|_| OnceLock::new()).collect(),
            angle_cache: (0..n_clusters * n_clusters).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Vigilance value this run was executed with
    pub fn vigilance(&self) -> f32 {
        self.vigilance
    }

    /// Winner-determination rule of the run
    pub fn metric(&self) -> Metric {
        self.data.metric()
    }

    /// Number of epochs the run executed
    pub fn epochs_run(&self) -> usize {
        self.epochs_run
    }

    /// Whether the run converged before hitting the epoch ceiling
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Whether the cluster ceiling was hit by a non-resonating input
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Number of clusters created by the run
    pub fn n_clusters(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of items the run saw
    pub fn n_items(&self) -> usize {
        self.assignments.len()
    }

    /// Number of items left unassigned (null input rows)
    pub fn n_unassigned(&self) -> usize {
        self.assignments.iter().filter(|&&a| a == UNASSIGNED).count()
    }

    /// Per-item cluster assignments, [`UNASSIGNED`] for null rows
    pub fn assignments(&self) -> &Array1<i64> {
        &self.assignments
    }

    /// Snapshot of the cluster weight vectors, one row per cluster
    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    /// The preprocessed data the run clustered
    pub fn data(&self) -> &Arc<PreprocessedData> {
        &self.data
    }

    /// Number of members of cluster `c`
    pub fn cluster_size(&self, c: usize) -> Result<usize> {
        self.check_cluster(c)?;
        Ok(self
            .assignments
            .iter()
            .filter(|&&a| a == c as i64)
            .count())
    }

    /// Item indices assigned to cluster `c`, in ascending order
    pub fn cluster_members(&self, c: usize) -> Result<Vec<usize>> {
        self.check_cluster(c)?;
        Ok(self
            .assignments
            .iter()
            .enumerate()
            .filter(|(_, &a)| a == c as i64)
            .map(|(i, _)| i)
            .collect())
    }

    /// The representative item of cluster `c`.
    ///
    /// The representative is the member whose angle (cosine variant) or
    /// Euclidean distance (Euclidean variant) to the cluster's weight vector
    /// is maximal; among exact ties the lowest item index wins. Computed on
    /// first access and cached for the lifetime of the result.
    ///
    /// # Errors
    ///
    /// [`Art2aError::InvalidCluster`] when `c` is out of range and
    /// [`Art2aError::EmptyCluster`] when the cluster lost all members to
    /// reassignment in later epochs.
    pub fn representative_index(&self, c: usize) -> Result<usize> {
        let ties = self.representative_indices(c)?;
        ties.first()
            .copied()
            .ok_or(Art2aError::EmptyCluster { index: c })
    }

    /// All members of cluster `c` tied for the extremal score against the
    /// cluster weight vector, in ascending index order.
    pub fn representative_indices(&self, c: usize) -> Result<&[usize]> {
        self.check_cluster(c)?;
        Ok(self.representative_cache[c].get_or_init(|| self.find_representatives(c)))
    }

    /// Euclidean distance between the weight vectors of clusters `i` and `j`.
    ///
    /// Symmetric, zero on the diagonal, cached per cluster pair.
    pub fn distance_between(&self, i: usize, j: usize) -> Result<f32> {
        self.check_cluster(i)?;
        self.check_cluster(j)?;
        if i == j {
            return Ok(0.0);
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let cell = lo * self.n_clusters() + hi;
        Ok(*self.distance_cache[cell]
            .get_or_init(|| euclidean(&self.weights.row(lo), &self.weights.row(hi))))
    }

    /// Angle in degrees between the weight vectors of clusters `i` and `j`.
    ///
    /// Symmetric, zero on the diagonal, cached per cluster pair.
    pub fn angle_between(&self, i: usize, j: usize) -> Result<f32> {
        self.check_cluster(i)?;
        self.check_cluster(j)?;
        if i == j {
            return Ok(0.0);
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let cell = lo * self.n_clusters() + hi;
        Ok(*self.angle_cache[cell]
            .get_or_init(|| angle_degrees(&self.weights.row(lo), &self.weights.row(hi))))
    }

    fn check_cluster(&self, c: usize) -> Result<()> {
        if c >= self.n_clusters() {
            return Err(Art2aError::InvalidCluster {
                index: c,
                count: self.n_clusters(),
            });
        }
        Ok(())
    }

    fn find_representatives(&self, c: usize) -> Vec<usize> {
        let weight = self.weights.row(c);
        let mut best = f32::NEG_INFINITY;
        let mut ties = Vec::new();

        for (i, &assignment) in self.assignments.iter().enumerate() {
            if assignment != c as i64 {
                continue;
            }
            let item = self.data.row(i);
            let score = match self.metric() {
                Metric::Cosine => angle_degrees(&item, &weight),
                Metric::Euclidean => euclidean(&item, &weight),
            };
            if score > best {
                best = score;
                ties.clear();
                ties.push(i);
            } else if score == best {
                ties.push(i);
            }
        }

        ties
    }
}
