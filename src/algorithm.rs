use crate::config::Art2aConfig;
use crate::distance::{cosine_similarity, squared_euclidean, Metric};
use crate::error::{Art2aError, Result};
use crate::preprocess::PreprocessedData;
use log::debug;
use ndarray::{s, Array1, Array2, ArrayView1, ArrayViewMut1};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Sentinel assignment for items that never enter a cluster (null rows).
pub const UNASSIGNED: i64 = -1;

/// Raw outcome of one clustering run, before geometry caches are attached.
pub(crate) struct RunOutcome {
    /// Weight vectors of the clusters created during the run, one row each
    pub weights: Array2<f32>,
    /// Per-item cluster index, or [`UNASSIGNED`]
    pub assignments: Array1<i64>,
    pub epochs_run: usize,
    pub converged: bool,
    pub overflow: bool,
}

/// Run the ART-2a competitive-learning loop once for a single vigilance value.
///
/// The run is fully determined by `(data, vigilance, config)`: presentation
/// order is a Fisher-Yates permutation drawn from a ChaCha8 generator seeded
/// with `config.seed` combined with the epoch number, so repeated runs are
/// bit-identical regardless of which thread executes them.
pub(crate) fn cluster_once(
    data: &PreprocessedData,
    vigilance: f32,
    config: &Art2aConfig,
) -> Result<RunOutcome> {
    config.validate()?;
    if !(0.0..=1.0).contains(&vigilance) {
        return Err(Art2aError::InvalidParameter {
            name: "vigilance",
            message: format!("must lie in [0, 1], got {}", vigilance),
        });
    }

    let n_rows = data.n_rows();
    let n_cols = data.n_cols();
    let metric = data.metric();

    let mut assignments = Array1::from_elem(n_rows, UNASSIGNED);

    // Fewer than two live rows cannot form competing clusters; the run is
    // trivially converged with zero or one cluster.
    if data.n_active() < 2 {
        let mut weights = Array2::zeros((0, n_cols));
        if let Some(i) = (0..n_rows).find(|&i| !data.is_null(i)) {
            weights = data.row(i).to_owned().insert_axis(ndarray::Axis(0));
            assignments[i] = 0;
        }
        return Ok(RunOutcome {
            weights,
            assignments,
            epochs_run: 1,
            converged: true,
            overflow: false,
        });
    }

    // Arena of weight vectors: preallocated at the ceiling, `n_clusters`
    // counts the live rows, and overflow is the comparison against capacity.
    let mut weights = Array2::<f32>::zeros((config.max_clusters, n_cols));
    let mut n_clusters = 0usize;
    let mut overflow = false;
    let mut converged = false;
    let mut epochs_run = 0;

    let euclidean_bound_sq = {
        let bound = (1.0 - vigilance) * 2.0 * data.scale();
        bound * bound
    };

    for epoch in 0..config.max_epochs {
        epochs_run = epoch + 1;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(epoch as u64));
        let mut order: Vec<usize> = (0..n_rows).collect();
        order.shuffle(&mut rng);

        let previous = assignments.clone();

        for &i in &order {
            if data.is_null(i) {
                continue;
            }
            let input = data.row(i);

            if n_clusters == 0 {
                weights.row_mut(0).assign(&input);
                assignments[i] = 0;
                n_clusters = 1;
                continue;
            }

            let (winner, score) = best_match(&input, &weights, n_clusters, metric);
            let resonates = match metric {
                Metric::Cosine => score >= vigilance,
                Metric::Euclidean => score <= euclidean_bound_sq,
            };

            if resonates {
                assignments[i] = winner as i64;
                learn(weights.row_mut(winner), &input, config.learning_rate);
            } else if n_clusters < config.max_clusters {
                weights.row_mut(n_clusters).assign(&input);
                assignments[i] = n_clusters as i64;
                n_clusters += 1;
            } else {
                // Ceiling reached and nothing resonates: flag the run and
                // park the item on the best-scoring cluster without learning.
                overflow = true;
                assignments[i] = winner as i64;
            }
        }

        let changed = assignments
            .iter()
            .zip(previous.iter())
            .filter(|(now, before)| now != before)
            .count();
        let fraction = changed as f64 / data.n_active() as f64;
        debug!(
            "epoch {}/{}: {} clusters, {:.4} of assignments changed",
            epochs_run, config.max_epochs, n_clusters, fraction
        );

        if fraction <= config.convergence_threshold {
            converged = true;
            break;
        }
    }

    Ok(RunOutcome {
        weights: weights.slice(s![..n_clusters, ..]).to_owned(),
        assignments,
        epochs_run,
        converged,
        overflow,
    })
}

/// Candidate winner: the cluster with the best match score.
///
/// Cosine variant scores are similarities (higher is better), Euclidean
/// variant scores are squared distances (lower is better). Ties go to the
/// lowest cluster index because only strict improvements replace the
/// incumbent.
fn best_match(
    input: &ArrayView1<f32>,
    weights: &Array2<f32>,
    n_clusters: usize,
    metric: Metric,
) -> (usize, f32) {
    let mut winner = 0;
    let mut best = match_score(input, &weights.row(0), metric);

    for cluster in 1..n_clusters {
        let score = match_score(input, &weights.row(cluster), metric);
        let better = match metric {
            Metric::Cosine => score > best,
            Metric::Euclidean => score < best,
        };
        if better {
            best = score;
            winner = cluster;
        }
    }

    (winner, best)
}

#[inline]
fn match_score(input: &ArrayView1<f32>, weight: &ArrayView1<f32>, metric: Metric) -> f32 {
    match metric {
        Metric::Cosine => cosine_similarity(input, weight),
        Metric::Euclidean => squared_euclidean(input, weight),
    }
}

/// Convex-combination weight update toward the resonating input.
fn learn(mut weight: ArrayViewMut1<f32>, input: &ArrayView1<f32>, learning_rate: f32) {
    weight.zip_mut_with(input, |w, &x| {
        *w = (1.0 - learning_rate) * *w + learning_rate * x;
    });
}
