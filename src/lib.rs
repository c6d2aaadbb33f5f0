//! # TDA-Persistence
//!
//! Persistent Homology of Networks and Point Clouds
//! via Rips Expansion and Boundary Matrix Reduction
//!
//! ## Overview
//!
//! A weighted graph (or the ε-neighbourhood graph of a point cloud) is
//! turned into a filtered simplicial complex by clique expansion. Reducing
//! the boundary matrix of that filtration over Z/2Z pairs every simplex
//! that creates a homological feature with the simplex that destroys it.
//! The pairs form one persistence diagram per dimension.
//!
//! ### Methodology
//!
//! 1. **Filtration**: simplices carry a value; the data order sorts by
//!    value, then dimension, then vertex sequence, so faces come first
//!
//! 2. **Rips Expansion**: every (k+1)-clique of the 1-skeleton becomes a
//!    k-simplex whose value combines the values of its faces
//!
//! 3. **Reduction**: standard column reduction of the boundary matrix, or
//!    of its anti-transpose (the co-boundary), with identical pairs
//!
//! ## Example
//!
//! ```
//! use tda_persistence::{run_pipeline, PipelineConfig, Simplex, SimplicialComplex};
//!
//! let graph = SimplicialComplex::from_simplices([
//!     Simplex::vertex(0, 0.0),
//!     Simplex::vertex(1, 0.0),
//!     Simplex::vertex(2, 0.0),
//!     Simplex::edge(0, 1, 1.0),
//!     Simplex::edge(1, 2, 1.0),
//!     Simplex::edge(0, 2, 2.0),
//! ]);
//!
//! let diagrams = run_pipeline(&graph, &PipelineConfig::default()).unwrap();
//! assert_eq!(diagrams[0].betti(), 1);
//! ```
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Zomorodian, "Fast construction of the Vietoris-Rips complex" (2010)
//! - de Silva, Morozov & Vejdemo-Johansson, "Dualities in persistent
//!   (co)homology" (2011)

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod pipeline;
pub mod topology;

// Re-exports from topology
pub use topology::{
    // Complexes
    Simplex,
    SimplicialComplex,
    Vertex,
    // Construction
    RipsExpander,
    VietorisRips,
    WeightCombine,
    // Reduction
    BoundaryMatrix,
    PersistencePairing,
    ReductionMode,
    ReductionOptions,
    calculate_persistence_diagrams,
    compute_pairing,
    // Diagrams
    BettiCurve,
    BettiNumbers,
    PersistenceDiagram,
    Point,
};

// Re-exports from geometry
pub use geometry::{BruteForce, Distance, Euclidean, NearestNeighbours};

// Re-exports from the pipeline
pub use config::PipelineConfig;
pub use error::{ReadError, TopologyError};
pub use pipeline::{max_filtration_value, run_batch, run_pipeline};
