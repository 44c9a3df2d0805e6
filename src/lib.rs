//! # art2a-rs
//!
//! ART-2a adaptive-resonance clustering for fixed-length numeric vectors
//! (e.g. molecular fingerprints), compatible with ndarray.
//!
//! ART-2a is an unsupervised, epoch-based competitive-learning method that
//! discovers an a-priori-unknown number of clusters, controlled by a single
//! sensitivity knob, the *vigilance* parameter: higher vigilance demands a
//! closer match before an input joins a cluster, yielding more, smaller
//! clusters.
//!
//! ## Features
//!
//! - **Two winner-determination rules**: cosine-angle (with unit
//!   normalization and contrast enhancement) and Euclidean distance,
//!   selected via [`Metric`]
//! - **Deterministic runs**: presentation order is a seeded Fisher-Yates
//!   permutation per epoch, so results are reproducible bit for bit
//! - **Parallel vigilance sweeps**: uses a bounded rayon worker pool, with
//!   results in input order and identical to a sequential sweep
//! - **Lazily cached cluster geometry**: representatives and pairwise
//!   cluster distances/angles are computed on first access and memoized
//! - **Representative search**: finds a vigilance value whose cluster count
//!   matches a requested representative count, and derives train/test
//!   splits from it
//!
//! ## Example
//!
//! ```rust
//! use art2a_rs::{Art2a, Metric};
//!
//! let rows = vec![
//!     vec![0.10f32, 0.20, 0.30],
//!     vec![0.12, 0.21, 0.29],
//!     vec![0.90, 0.80, 0.70],
//!     vec![0.92, 0.80, 0.70],
//! ];
//!
//! let model = Art2a::new(Metric::Cosine);
//! let data = model.preprocess_rows(&rows).unwrap();
//! let result = model.cluster(&data, 0.5).unwrap();
//!
//! assert_eq!(result.n_clusters(), 2);
//! for c in 0..result.n_clusters() {
//!     println!(
//!         "cluster {}: {} members, representative {}",
//!         c,
//!         result.cluster_size(c).unwrap(),
//!         result.representative_index(c).unwrap()
//!     );
//! }
//! ```
//!
//! ## Custom Configuration and Sweeps
//!
//! ```rust
//! use art2a_rs::{Art2a, Art2aConfig, Metric};
//!
//! let rows = vec![
//!     vec![0.10f32, 0.20, 0.30],
//!     vec![0.12, 0.21, 0.29],
//!     vec![0.90, 0.80, 0.70],
//!     vec![0.92, 0.80, 0.70],
//! ];
//!
//! let config = Art2aConfig::new(64)
//!     .with_max_epochs(20)
//!     .with_learning_rate(0.01)
//!     .with_seed(7);
//!
//! let model = Art2a::with_config(config, Metric::Cosine);
//! let data = model.preprocess_rows(&rows).unwrap();
//!
//! // Three vigilance values on a pool of two worker threads.
//! let results = model.sweep(&data, &[0.2, 0.5, 0.8], 2).unwrap();
//! assert_eq!(results.len(), 3);
//! ```

mod algorithm;
mod art2a;
mod config;
mod distance;
mod error;
mod preprocess;
mod result;
mod search;
mod sweep;
mod task;

pub use algorithm::UNASSIGNED;
pub use art2a::Art2a;
pub use config::Art2aConfig;
pub use distance::Metric;
pub use error::{Art2aError, Result};
pub use preprocess::PreprocessedData;
pub use result::ClusterResult;
pub use search::{RepresentativeSearch, TrainTestSplit};
pub use sweep::VigilanceSweep;
pub use task::ClusteringTask;
