use crate::config::Art2aConfig;
use crate::error::{Art2aError, Result};
use crate::preprocess::PreprocessedData;
use crate::result::ClusterResult;
use crate::task::ClusteringTask;
use log::info;
use rayon::prelude::*;
use std::sync::Arc;

/// Runs the clustering kernel across a list of vigilance values, either on
/// the calling thread or fanned out over a bounded worker pool.
///
/// Results always come back in the order of the input vigilance list, and a
/// parallel sweep is bit-identical to a sequential one: every run depends
/// only on `(data, vigilance, config)`.
#[derive(Debug)]
pub struct VigilanceSweep {
    data: Arc<PreprocessedData>,
    config: Art2aConfig,
}

impl VigilanceSweep {
    /// Create a sweep over shared preprocessed data
    pub fn new(data: Arc<PreprocessedData>, config: Art2aConfig) -> Self {
        Self { data, config }
    }

    /// The data this sweep clusters
    pub fn data(&self) -> &Arc<PreprocessedData> {
        &self.data
    }

    /// Run one clustering task per vigilance value.
    ///
    /// `num_threads == 0` runs sequentially on the calling thread;
    /// `num_threads > 0` submits the tasks to a dedicated worker pool of
    /// exactly that size.
    pub fn run(&self, vigilances: &[f32], num_threads: usize) -> Result<Vec<ClusterResult>> {
        let tasks: Vec<ClusteringTask> = vigilances
            .iter()
            .map(|&v| ClusteringTask::new(Arc::clone(&self.data), v, self.config.clone()))
            .collect();

        info!(
            "sweeping {} vigilance values across {} items ({})",
            tasks.len(),
            self.data.n_rows(),
            if num_threads == 0 {
                "sequential".to_string()
            } else {
                format!("{} worker threads", num_threads)
            }
        );

        if num_threads == 0 {
            return tasks.iter().map(ClusteringTask::run).collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| Art2aError::ThreadPool(e.to_string()))?;
        pool.install(|| tasks.par_iter().map(ClusteringTask::run).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Metric;
    use ndarray::array;

    fn sweep() -> VigilanceSweep {
        let data = array![
            [0.10f32, 0.20, 0.30],
            [0.12, 0.21, 0.29],
            [0.90, 0.80, 0.70],
            [0.92, 0.80, 0.70],
        ];
        let prep =
            Arc::new(PreprocessedData::new(&data.view(), Metric::Cosine, 1.0).unwrap());
        VigilanceSweep::new(prep, Art2aConfig::new(10).with_seed(1))
    }

    #[test]
    fn test_results_keep_input_order() {
        let vigilances = [0.9f32, 0.1, 0.5];
        let results = sweep().run(&vigilances, 0).unwrap();
        assert_eq!(results.len(), 3);
        for (result, &v) in results.iter().zip(vigilances.iter()) {
            assert_eq!(result.vigilance(), v);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let vigilances = [0.2f32, 0.4, 0.6, 0.8];
        let sweep = sweep();
        let sequential = sweep.run(&vigilances, 0).unwrap();
        let parallel = sweep.run(&vigilances, 3).unwrap();

        for (a, b) in sequential.iter().zip(parallel.iter()) {
            assert_eq!(a.n_clusters(), b.n_clusters());
            assert_eq!(a.assignments(), b.assignments());
            assert_eq!(a.weights(), b.weights());
            assert_eq!(a.epochs_run(), b.epochs_run());
        }
    }

    #[test]
    fn test_empty_vigilance_list() {
        let results = sweep().run(&[], 0).unwrap();
        assert!(results.is_empty());
    }
}
