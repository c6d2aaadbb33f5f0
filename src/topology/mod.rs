//! Topology Module: Filtered Simplicial Complexes and Persistent Homology
//!
//! Implements the filtration-and-reduction engine:
//! - Simplices and simplicial complexes with filtration values
//! - Filtration orders (faces before cofaces, deterministic tie-breaking)
//! - Vietoris-Rips expansion of graphs and point clouds
//! - Boundary matrix reduction into persistence diagrams
//! - Betti numbers and derived graph statistics
//!
//! ## Mathematical Background
//!
//! A filtration orders the simplices of a complex K so that every prefix
//! is itself a simplicial complex. Persistent homology tracks the birth and
//! death of topological features (connected components, loops, voids)
//! along this order. Reducing the boundary matrix of K pairs every
//! feature-creating simplex with the simplex that destroys the feature.
//!
//! ## Pipeline
//!
//! ```text
//! graph / point cloud ──► 1-skeleton ──► RipsExpander ──► sort(data_order)
//!                                                              │
//!               PersistenceDiagram per dimension ◄── reduction ◄┘
//! ```

mod simplex;
mod complex;
pub mod filtrations;
mod rips_expander;
mod vietoris_rips;
mod weights;
mod reduction;
mod persistence;
mod betti;
mod shortest_paths;

pub use simplex::{Simplex, Vertex};
pub use complex::SimplicialComplex;
pub use rips_expander::{RipsExpander, WeightCombine};
pub use vietoris_rips::VietorisRips;
pub use weights::{invert_weights, normalize_weights, weight_range};
pub use reduction::{
    calculate_persistence_diagrams,
    compute_pairing,
    BoundaryMatrix,
    PersistencePairing,
    ReductionMode,
    ReductionOptions,
};
pub use persistence::{PersistenceDiagram, Point};
pub use betti::{BettiCurve, BettiNumbers};
pub use shortest_paths::{closeness_centrality, floyd_warshall};
