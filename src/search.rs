use crate::config::Art2aConfig;
use crate::error::{Art2aError, Result};
use crate::preprocess::PreprocessedData;
use crate::sweep::VigilanceSweep;
use log::{debug, info};
use std::sync::Arc;

/// Training/test index partition derived from a representative search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    /// Representative item indices, ascending
    pub training: Vec<usize>,
    /// All remaining item indices, ascending
    pub test: Vec<usize>,
}

/// Searches a vigilance interval for a run whose cluster count is as close
/// as possible to a requested number of representatives.
///
/// The search lays a linear grid of trial vigilance values across the
/// interval, runs the kernel once per grid point (through
/// [`VigilanceSweep`], so trials may execute in parallel) and extracts one
/// representative item per cluster from the best trial. Callers should check
/// the length of the returned set: when no trial hits the target exactly,
/// the closest cluster count wins.
#[derive(Debug)]
pub struct RepresentativeSearch {
    sweep: VigilanceSweep,
    num_threads: usize,
}

impl RepresentativeSearch {
    /// Create a search over shared preprocessed data, running trials
    /// sequentially
    pub fn new(data: Arc<PreprocessedData>, config: Art2aConfig) -> Self {
        Self {
            sweep: VigilanceSweep::new(data, config),
            num_threads: 0,
        }
    }

    /// Fan trial runs out over a worker pool of the given size
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Find a representative index set of (ideally) `target_count` items.
    ///
    /// Up to `trial_steps` kernel runs are performed at vigilance values
    /// evenly spaced across `[vigilance_min, vigilance_max]`. The trial whose
    /// cluster count is nearest `target_count` wins; among equally near
    /// trials the lowest vigilance wins. The winner contributes one
    /// representative per non-empty cluster.
    ///
    /// # Errors
    ///
    /// [`Art2aError::RepresentativeSearch`] when `target_count` is zero or
    /// exceeds the item count; [`Art2aError::InvalidParameter`] when the
    /// vigilance interval or step count is malformed.
    pub fn representatives(
        &self,
        target_count: usize,
        vigilance_min: f32,
        vigilance_max: f32,
        trial_steps: usize,
    ) -> Result<Vec<usize>> {
        let n_items = self.sweep.data().n_rows();
        if target_count < 1 || target_count > n_items {
            return Err(Art2aError::RepresentativeSearch(format!(
                "target count {} not satisfiable for {} items",
                target_count, n_items
            )));
        }
        let grid = vigilance_grid(vigilance_min, vigilance_max, trial_steps)?;

        let results = self.sweep.run(&grid, self.num_threads)?;
        let best = results
            .iter()
            .min_by_key(|r| r.n_clusters().abs_diff(target_count))
            .expect("grid is never empty");

        for result in &results {
            debug!(
                "trial vigilance {:.4}: {} clusters",
                result.vigilance(),
                result.n_clusters()
            );
        }
        info!(
            "best trial: vigilance {:.4} with {} clusters (target {})",
            best.vigilance(),
            best.n_clusters(),
            target_count
        );

        let mut representatives = Vec::with_capacity(best.n_clusters());
        for c in 0..best.n_clusters() {
            if best.cluster_size(c)? > 0 {
                representatives.push(best.representative_index(c)?);
            }
        }
        Ok(representatives)
    }

    /// Split the item indices into a training set of representatives sized by
    /// `training_fraction` and a test set holding everything else.
    ///
    /// The representative target is `round(training_fraction * N)`, clamped
    /// to `[1, N - 1]`. Null rows can never be representatives, so they
    /// always land on the test side.
    pub fn train_test_split(
        &self,
        training_fraction: f64,
        vigilance_min: f32,
        vigilance_max: f32,
        trial_steps: usize,
    ) -> Result<TrainTestSplit> {
        if !training_fraction.is_finite() || training_fraction <= 0.0 || training_fraction >= 1.0 {
            return Err(Art2aError::RepresentativeSearch(format!(
                "training fraction must lie in (0, 1), got {}",
                training_fraction
            )));
        }
        let n_items = self.sweep.data().n_rows();
        let target = ((training_fraction * n_items as f64).round() as usize).clamp(1, n_items - 1);

        let mut training =
            self.representatives(target, vigilance_min, vigilance_max, trial_steps)?;
        training.sort_unstable();

        let mut in_training = vec![false; n_items];
        for &i in &training {
            in_training[i] = true;
        }
        let test = (0..n_items).filter(|&i| !in_training[i]).collect();

        Ok(TrainTestSplit { training, test })
    }
}

/// Evenly spaced trial vigilance values across `[min, max]`; the midpoint
/// when only one step is requested.
fn vigilance_grid(min: f32, max: f32, steps: usize) -> Result<Vec<f32>> {
    if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
        return Err(Art2aError::InvalidParameter {
            name: "vigilance_interval",
            message: format!("[{}, {}] is not a sub-interval of [0, 1]", min, max),
        });
    }
    if steps == 0 {
        return Err(Art2aError::InvalidParameter {
            name: "trial_steps",
            message: "must be at least 1".to_string(),
        });
    }
    if steps == 1 {
        return Ok(vec![(min + max) / 2.0]);
    }
    Ok((0..steps)
        .map(|i| min + (max - min) * i as f32 / (steps - 1) as f32)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Metric;
    use ndarray::array;

    fn search() -> RepresentativeSearch {
        let data = array![
            [0.10f32, 0.20, 0.30],
            [0.12, 0.21, 0.29],
            [0.09, 0.19, 0.31],
            [0.90, 0.80, 0.70],
            [0.92, 0.80, 0.70],
            [0.94, 0.79, 0.69],
        ];
        let prep =
            Arc::new(PreprocessedData::new(&data.view(), Metric::Cosine, 1.0).unwrap());
        RepresentativeSearch::new(prep, Art2aConfig::new(10).with_seed(1))
    }

    #[test]
    fn test_grid_endpoints_and_midpoint() {
        let grid = vigilance_grid(0.2, 0.8, 4).unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0], 0.2);
        assert_eq!(grid[3], 0.8);

        let single = vigilance_grid(0.2, 0.8, 1).unwrap();
        assert_eq!(single, vec![0.5]);
    }

    #[test]
    fn test_grid_rejects_bad_interval() {
        assert!(vigilance_grid(0.8, 0.2, 4).is_err());
        assert!(vigilance_grid(-0.1, 0.5, 4).is_err());
        assert!(vigilance_grid(0.1, 1.5, 4).is_err());
        assert!(vigilance_grid(0.1, 0.9, 0).is_err());
    }

    #[test]
    fn test_finds_one_representative_per_group() {
        let representatives = search().representatives(2, 0.0001, 0.9999, 16).unwrap();
        assert_eq!(representatives.len(), 2);
        assert!(representatives.iter().any(|&i| i < 3));
        assert!(representatives.iter().any(|&i| i >= 3));
    }

    #[test]
    fn test_rejects_unsatisfiable_target() {
        let search = search();
        assert!(matches!(
            search.representatives(0, 0.0, 1.0, 4),
            Err(Art2aError::RepresentativeSearch(_))
        ));
        assert!(matches!(
            search.representatives(7, 0.0, 1.0, 4),
            Err(Art2aError::RepresentativeSearch(_))
        ));
    }

    #[test]
    fn test_split_partitions_all_indices() {
        let split = search().train_test_split(0.34, 0.0001, 0.9999, 16).unwrap();
        assert_eq!(split.training.len() + split.test.len(), 6);
        for i in &split.training {
            assert!(!split.test.contains(i));
        }
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        let search = search();
        for fraction in [0.0, 1.0, -0.5, f64::NAN] {
            assert!(search.train_test_split(fraction, 0.0, 1.0, 4).is_err());
        }
    }
}
