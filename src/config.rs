use crate::error::{Art2aError, Result};

/// Configuration for one ART-2a clustering run.
///
/// A single configuration can be shared across many vigilance values: the
/// vigilance parameter itself is passed per run, everything else lives here.
#[derive(Debug, Clone)]
pub struct Art2aConfig {
    /// Maximum number of clusters a run may create. Must be at least 2.
    /// When the ceiling is reached, non-resonating inputs set the result's
    /// overflow flag instead of creating further clusters.
    pub max_clusters: usize,

    /// Maximum number of epochs (full passes over the data) per run.
    pub max_epochs: usize,

    /// Convergence threshold on the fraction of assignments that changed
    /// during an epoch. A run converges once the changed fraction is at or
    /// below this value. 0.0 demands identical assignments.
    pub convergence_threshold: f64,

    /// Learning parameter of the weight update
    /// `w_new = (1 - rate) * w_old + rate * input`. Must lie in (0, 1).
    pub learning_rate: f32,

    /// Contrast-enhancement offset. The component threshold applied after
    /// unit normalization is `offset / sqrt(dimension)`; 1.0 reproduces the
    /// classical ART-2a noise threshold. Ignored by the Euclidean variant.
    pub contrast_offset: f32,

    /// Random seed for the per-epoch presentation order
    pub seed: u64,
}

impl Default for Art2aConfig {
    fn default() -> Self {
        Self {
            max_clusters: 256,
            max_epochs: 50,
            convergence_threshold: 0.01,
            learning_rate: 0.01,
            contrast_offset: 1.0,
            seed: 1,
        }
    }
}

impl Art2aConfig {
    /// Create a new configuration with the specified cluster ceiling
    pub fn new(max_clusters: usize) -> Self {
        Self {
            max_clusters,
            ..Default::default()
        }
    }

    /// Set the maximum number of clusters
    pub fn with_max_clusters(mut self, max_clusters: usize) -> Self {
        self.max_clusters = max_clusters;
        self
    }

    /// Set the maximum number of epochs
    pub fn with_max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    /// Set the convergence threshold
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Set the learning parameter
    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the contrast-enhancement offset
    pub fn with_contrast_offset(mut self, contrast_offset: f32) -> Self {
        self.contrast_offset = contrast_offset;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`Art2aError::InvalidParameter`] naming the first field found
    /// outside its valid range.
    pub fn validate(&self) -> Result<()> {
        if self.max_clusters < 2 {
            return Err(Art2aError::InvalidParameter {
                name: "max_clusters",
                message: format!("must be at least 2, got {}", self.max_clusters),
            });
        }
        if self.max_epochs == 0 {
            return Err(Art2aError::InvalidParameter {
                name: "max_epochs",
                message: "must be at least 1".to_string(),
            });
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 || self.learning_rate >= 1.0
        {
            return Err(Art2aError::InvalidParameter {
                name: "learning_rate",
                message: format!("must lie in (0, 1), got {}", self.learning_rate),
            });
        }
        if !self.convergence_threshold.is_finite()
            || !(0.0..1.0).contains(&self.convergence_threshold)
        {
            return Err(Art2aError::InvalidParameter {
                name: "convergence_threshold",
                message: format!("must lie in [0, 1), got {}", self.convergence_threshold),
            });
        }
        if !self.contrast_offset.is_finite() || self.contrast_offset < 0.0 {
            return Err(Art2aError::InvalidParameter {
                name: "contrast_offset",
                message: format!("must be finite and non-negative, got {}", self.contrast_offset),
            });
        }
        Ok(())
    }
}
