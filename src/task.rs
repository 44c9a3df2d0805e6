use crate::algorithm;
use crate::config::Art2aConfig;
use crate::error::Result;
use crate::preprocess::PreprocessedData;
use crate::result::ClusterResult;
use std::sync::Arc;

/// One unit of clustering work: a vigilance value bound to shared data and a
/// run configuration.
///
/// Tasks are immutable and hold the preprocessed data by `Arc`, so any
/// number of them can run concurrently without copying or locking; the data
/// is never mutated.
#[derive(Debug, Clone)]
pub struct ClusteringTask {
    data: Arc<PreprocessedData>,
    vigilance: f32,
    config: Art2aConfig,
}

impl ClusteringTask {
    /// Bind a vigilance value to shared data and a configuration
    pub fn new(data: Arc<PreprocessedData>, vigilance: f32, config: Art2aConfig) -> Self {
        Self {
            data,
            vigilance,
            config,
        }
    }

    /// The vigilance value this task will run with
    pub fn vigilance(&self) -> f32 {
        self.vigilance
    }

    /// Execute the clustering run and return its result.
    ///
    /// The outcome depends only on `(data, vigilance, config)`, never on the
    /// executing thread.
    pub fn run(&self) -> Result<ClusterResult> {
        let outcome = algorithm::cluster_once(&self.data, self.vigilance, &self.config)?;
        Ok(ClusterResult::new(
            outcome,
            Arc::clone(&self.data),
            self.vigilance,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Metric;
    use ndarray::array;

    #[test]
    fn test_task_runs_and_reports_vigilance() {
        let data = array![
            [0.10f32, 0.20, 0.30],
            [0.12, 0.21, 0.29],
            [0.90, 0.80, 0.70],
            [0.92, 0.80, 0.70],
        ];
        let prep =
            Arc::new(PreprocessedData::new(&data.view(), Metric::Cosine, 1.0).unwrap());
        let task = ClusteringTask::new(prep, 0.5, Art2aConfig::new(10).with_seed(1));

        assert_eq!(task.vigilance(), 0.5);
        let result = task.run().unwrap();
        assert_eq!(result.vigilance(), 0.5);
        assert_eq!(result.n_clusters(), 2);
    }
}
