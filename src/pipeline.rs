//! Graph → Persistence Diagram Pipeline
//!
//! ```text
//! 1-skeleton ─► normalize? ─► invert? ─► expand ─► assign weights ─► sort
//!                                                                     │
//!                         remove diagonal? ◄── reduce boundary matrix ◄┘
//! ```
//!
//! Complexes of a batch are independent of each other, so [`run_batch`]
//! processes them on the rayon thread pool. Results stay keyed by input
//! index, whatever the completion order.

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::error::TopologyError;
use crate::topology::{
    calculate_persistence_diagrams, invert_weights, normalize_weights, weight_range,
    PersistenceDiagram, RipsExpander, SimplicialComplex,
};

/// Result of one complex of a batch, tagged with its input index
pub type BatchResult = (usize, Result<Vec<PersistenceDiagram>, TopologyError>);

/// Turn a weighted 1-skeleton into a filtration-ordered complex:
/// pre-process weights, expand, propagate weights and sort.
pub fn prepare_filtration(
    complex: &SimplicialComplex,
    config: &PipelineConfig,
) -> Result<SimplicialComplex, TopologyError> {
    let mut skeleton = complex.clone();

    if config.normalize {
        if let Some((lo, hi)) = normalize_weights(&mut skeleton) {
            debug!("Normalized weights to [{lo}, {hi}]");
        }
    }

    if config.invert_weights {
        if let Some((_, max)) = weight_range(&skeleton) {
            invert_weights(&mut skeleton, max);
            debug!("Inverted weights with respect to {max}");
        }
    }

    let expander = RipsExpander::new();
    let expanded = expander.expand(&skeleton, config.max_dimension);
    let mut filtration = expander.assign_weights(&expanded, config.combine)?;
    filtration.sort();

    Ok(filtration)
}

/// Persistence diagrams of an already prepared filtration
pub fn diagrams_of(
    filtration: &SimplicialComplex,
    config: &PipelineConfig,
) -> Result<Vec<PersistenceDiagram>, TopologyError> {
    let mut diagrams = calculate_persistence_diagrams(filtration, config.reduction)?;

    if config.remove_diagonal {
        for diagram in &mut diagrams {
            diagram.remove_diagonal();
        }
    }

    Ok(diagrams)
}

/// Full pipeline for one 1-skeleton
pub fn run_pipeline(
    complex: &SimplicialComplex,
    config: &PipelineConfig,
) -> Result<Vec<PersistenceDiagram>, TopologyError> {
    let filtration = prepare_filtration(complex, config)?;
    info!(
        "Filtration has {} simplices up to dimension {}",
        filtration.len(),
        filtration.dimension().unwrap_or(0)
    );
    diagrams_of(&filtration, config)
}

/// Largest filtration value of a complex, 0 for the empty complex.
///
/// Used to pick the finite stand-in for the death of unpaired points.
pub fn max_filtration_value(complex: &SimplicialComplex) -> f64 {
    weight_range(complex).map_or(0.0, |(_, hi)| hi)
}

/// Run the pipeline on every complex in parallel.
///
/// The output has one entry per input, in input order. A failing complex
/// only affects its own entry.
pub fn run_batch(complexes: &[SimplicialComplex], config: &PipelineConfig) -> Vec<BatchResult> {
    info!("Processing {} complexes", complexes.len());

    let results: Vec<BatchResult> = complexes
        .par_iter()
        .enumerate()
        .map(|(index, complex)| (index, run_pipeline(complex, config)))
        .collect();

    for (index, result) in &results {
        if let Err(e) = result {
            warn!("Complex {index} failed: {e}");
        }
    }

    results
}
