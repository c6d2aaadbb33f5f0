//! Pipeline Configuration
//!
//! All knobs of the graph → diagram pipeline in one serializable value.
//! The tools build it from their command-line flags; library users can
//! also load it from JSON or any other serde format.

use serde::{Deserialize, Serialize};

use crate::topology::{ReductionOptions, WeightCombine};

/// Settings for [`run_pipeline`](crate::pipeline::run_pipeline)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Rips expansion up to this dimension (≤ 1 keeps the graph as is)
    pub max_dimension: usize,
    /// Replace edge weights `w` by `max - w` before expansion
    pub invert_weights: bool,
    /// Map edge weights to [0, 1] before expansion (and before inversion)
    pub normalize: bool,
    /// How higher simplices combine the weights of their faces
    pub combine: WeightCombine,
    /// Boundary matrix reduction settings
    pub reduction: ReductionOptions,
    /// Unpaired points are shown at `infinity_factor × max filtration value`
    pub infinity_factor: f64,
    /// Drop zero-persistence points from every diagram
    pub remove_diagonal: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_dimension: 2,
            invert_weights: false,
            normalize: false,
            combine: WeightCombine::Maximum,
            reduction: ReductionOptions::default(),
            infinity_factor: 2.0,
            remove_diagonal: true,
        }
    }
}

impl PipelineConfig {
    /// Finite death value used in place of +∞ for a complex whose largest
    /// filtration value is `max_value`
    pub fn infinity(&self, max_value: f64) -> f64 {
        self.infinity_factor * max_value
    }
}
