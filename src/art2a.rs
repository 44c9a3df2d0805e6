use crate::config::Art2aConfig;
use crate::distance::Metric;
use crate::error::Result;
use crate::preprocess::PreprocessedData;
use crate::result::ClusterResult;
use crate::search::{RepresentativeSearch, TrainTestSplit};
use crate::sweep::VigilanceSweep;
use crate::task::ClusteringTask;
use ndarray::ArrayView2;
use std::sync::Arc;

/// ART-2a clustering front end.
///
/// Binds a run configuration to a winner-determination rule and exposes the
/// full pipeline: preprocessing, single runs, vigilance sweeps and
/// representative extraction.
///
/// # Example
///
/// ```
/// use art2a_rs::{Art2a, Metric};
///
/// let rows = vec![
///     vec![0.10f32, 0.20, 0.30],
///     vec![0.12, 0.21, 0.29],
///     vec![0.90, 0.80, 0.70],
///     vec![0.92, 0.80, 0.70],
/// ];
///
/// let model = Art2a::new(Metric::Cosine);
/// let data = model.preprocess_rows(&rows).unwrap();
/// let result = model.cluster(&data, 0.5).unwrap();
///
/// assert_eq!(result.n_clusters(), 2);
/// assert!(result.converged());
/// ```
#[derive(Debug, Clone)]
pub struct Art2a {
    config: Art2aConfig,
    metric: Metric,
}

impl Art2a {
    /// Create a front end with the default configuration
    pub fn new(metric: Metric) -> Self {
        Self {
            config: Art2aConfig::default(),
            metric,
        }
    }

    /// Create a front end with a custom configuration
    pub fn with_config(config: Art2aConfig, metric: Metric) -> Self {
        Self { config, metric }
    }

    /// The run configuration
    pub fn config(&self) -> &Art2aConfig {
        &self.config
    }

    /// The winner-determination rule
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Validate and transform a rectangular matrix for clustering.
    ///
    /// The returned data is wrapped in an [`Arc`] so it can be shared
    /// read-only across any number of runs and worker threads.
    pub fn preprocess(&self, data: &ArrayView2<f32>) -> Result<Arc<PreprocessedData>> {
        Ok(Arc::new(PreprocessedData::new(
            data,
            self.metric,
            self.config.contrast_offset,
        )?))
    }

    /// Validate and transform a matrix given as row vectors.
    ///
    /// Unlike [`Art2a::preprocess`] this path also rejects ragged and empty
    /// rows, which makes it the natural entry point for data read from
    /// delimited text.
    pub fn preprocess_rows(&self, rows: &[Vec<f32>]) -> Result<Arc<PreprocessedData>> {
        Ok(Arc::new(PreprocessedData::from_rows(
            rows,
            self.metric,
            self.config.contrast_offset,
        )?))
    }

    /// Run the clustering kernel once for a single vigilance value
    pub fn cluster(
        &self,
        data: &Arc<PreprocessedData>,
        vigilance: f32,
    ) -> Result<ClusterResult> {
        ClusteringTask::new(Arc::clone(data), vigilance, self.config.clone()).run()
    }

    /// Run the kernel for every vigilance value in `vigilances`.
    ///
    /// `num_threads == 0` runs on the calling thread; `num_threads > 0` uses
    /// a bounded worker pool of that size. Results come back in input order
    /// either way, with identical contents.
    pub fn sweep(
        &self,
        data: &Arc<PreprocessedData>,
        vigilances: &[f32],
        num_threads: usize,
    ) -> Result<Vec<ClusterResult>> {
        VigilanceSweep::new(Arc::clone(data), self.config.clone()).run(vigilances, num_threads)
    }

    /// Search `[vigilance_min, vigilance_max]` for a run with (ideally)
    /// `target_count` clusters and return one representative per cluster.
    pub fn representatives(
        &self,
        data: &Arc<PreprocessedData>,
        target_count: usize,
        vigilance_min: f32,
        vigilance_max: f32,
        trial_steps: usize,
    ) -> Result<Vec<usize>> {
        RepresentativeSearch::new(Arc::clone(data), self.config.clone()).representatives(
            target_count,
            vigilance_min,
            vigilance_max,
            trial_steps,
        )
    }

    /// Partition the item indices into representative training indices and
    /// test indices, with the training set sized by `training_fraction`.
    pub fn train_test_split(
        &self,
        data: &Arc<PreprocessedData>,
        training_fraction: f64,
        vigilance_min: f32,
        vigilance_max: f32,
        trial_steps: usize,
    ) -> Result<TrainTestSplit> {
        RepresentativeSearch::new(Arc::clone(data), self.config.clone()).train_test_split(
            training_fraction,
            vigilance_min,
            vigilance_max,
            trial_steps,
        )
    }
}
