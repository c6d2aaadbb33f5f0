//! Vietoris-Rips Expansion
//!
//! Grows a 1-skeleton (vertices and weighted edges) into its clique
//! complex: every set of k+1 pairwise adjacent vertices becomes a
//! k-simplex, up to a requested maximum dimension.
//!
//! ## Algorithm
//!
//! Incremental expansion via lower neighbourhoods (Zomorodian, 2010):
//!
//! ```text
//! for each vertex u:
//!     add_cofaces({u}, N⁻(u))
//!
//! add_cofaces(τ, N):
//!     emit τ
//!     if dim τ == k: return
//!     for v in N:
//!         add_cofaces(τ ∪ {v}, N ∩ N⁻(v))
//! ```
//!
//! where N⁻(v) are the neighbours of v with a smaller id. Every clique is
//! generated exactly once, and cliques never span connected components.
//!
//! The number of cliques is combinatorial in k; bounding k is up to the
//! caller.
//!
//! ## Filtration values
//!
//! Generated simplices start at 0. Values are assigned afterwards by one of
//! the `assign_*` passes, which process simplices in order of increasing
//! dimension and combine the values of codimension-1 faces.

use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::complex::SimplicialComplex;
use super::simplex::{Simplex, Vertex};
use crate::error::TopologyError;

/// How face values combine into the value of a coface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightCombine {
    /// Maximum of the face values (standard Rips filtration)
    #[default]
    Maximum,
    /// Sum of the face values, identity 0
    Sum,
}

impl WeightCombine {
    pub fn identity(self) -> f64 {
        match self {
            WeightCombine::Maximum => f64::NEG_INFINITY,
            WeightCombine::Sum => 0.0,
        }
    }

    pub fn combine(self, a: f64, b: f64) -> f64 {
        match self {
            WeightCombine::Maximum => a.max(b),
            WeightCombine::Sum => a + b,
        }
    }
}

/// Clique expansion and filtration-value propagation
#[derive(Debug, Clone, Copy, Default)]
pub struct RipsExpander;

impl RipsExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expand the 1-skeleton of `complex` up to dimension `max_dimension`.
    ///
    /// The result holds the original simplices in their original order,
    /// followed by every generated simplex of dimension ≥ 2. Generated
    /// simplices carry the value 0 and the result is unsorted.
    pub fn expand(&self, complex: &SimplicialComplex, max_dimension: usize) -> SimplicialComplex {
        if max_dimension <= 1 {
            return complex.clone();
        }

        let lower_neighbours = Self::lower_neighbours(complex);
        let mut result = complex.clone();

        for (&u, neighbours) in &lower_neighbours {
            let mut clique = vec![u];
            Self::add_cofaces(
                &lower_neighbours,
                max_dimension,
                &mut clique,
                neighbours,
                &mut result,
            );
        }

        info!(
            "Expanded simplicial complex to k={} with {} simplices ({} generated)",
            max_dimension,
            result.len(),
            result.len() - complex.len()
        );

        result
    }

    /// Lower neighbourhood of every vertex that occurs in the 1-skeleton
    fn lower_neighbours(complex: &SimplicialComplex) -> BTreeMap<Vertex, Vec<Vertex>> {
        let mut lower: BTreeMap<Vertex, Vec<Vertex>> = BTreeMap::new();

        for s in complex.iter().filter(|s| s.dimension() <= 1) {
            for &v in s.vertices() {
                lower.entry(v).or_default();
            }
        }

        for edge in complex.edges() {
            let (u, v) = (edge.vertices()[0], edge.vertices()[1]);
            if let Some(n) = lower.get_mut(&v) {
                n.push(u);
            }
        }

        for n in lower.values_mut() {
            n.sort_unstable();
            n.dedup();
        }

        lower
    }

    fn add_cofaces(
        lower: &BTreeMap<Vertex, Vec<Vertex>>,
        max_dimension: usize,
        clique: &mut Vec<Vertex>,
        candidates: &[Vertex],
        result: &mut SimplicialComplex,
    ) {
        if clique.len() >= 3 {
            result.push(Simplex::from_vertex_set(clique.clone(), 0.0));
        }

        if clique.len() > max_dimension {
            return;
        }

        for &v in candidates {
            let remaining = match lower.get(&v) {
                Some(n) => intersect_sorted(candidates, n),
                None => Vec::new(),
            };

            clique.push(v);
            Self::add_cofaces(lower, max_dimension, clique, &remaining, result);
            clique.pop();
        }
    }

    /// Standard Rips weights: every simplex of dimension ≥ 2 receives the
    /// maximum value of its faces. Vertices and edges keep their values.
    pub fn assign_maximum_weight(
        &self,
        complex: &SimplicialComplex,
    ) -> Result<SimplicialComplex, TopologyError> {
        self.assign_weights(complex, WeightCombine::Maximum)
    }

    /// Propagate edge weights upwards with the given combination policy
    pub fn assign_weights(
        &self,
        complex: &SimplicialComplex,
        combine: WeightCombine,
    ) -> Result<SimplicialComplex, TopologyError> {
        let mut result = complex.clone();
        self.propagate(&mut result, 2, combine.identity(), |a, b| {
            combine.combine(a, b)
        })?;
        Ok(result)
    }

    /// Attach per-vertex values and propagate them upwards.
    ///
    /// Vertex `v` receives `values[v]`; every other simplex receives the
    /// fold of its face values, starting from `identity`. With a sum this
    /// gives, for example, the sum-of-degrees filtration.
    pub fn assign_data<F>(
        &self,
        complex: &SimplicialComplex,
        values: &[f64],
        identity: f64,
        op: F,
    ) -> Result<SimplicialComplex, TopologyError>
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut result = complex.clone();

        for position in 0..result.len() {
            let simplex = &result.as_slice()[position];
            if simplex.dimension() != 0 {
                continue;
            }

            let v = simplex.vertices()[0];
            let value = values
                .get(v)
                .copied()
                .ok_or(TopologyError::VertexOutOfRange {
                    vertex: v,
                    available: values.len(),
                })?;
            result.update_at(position, value);
        }

        self.propagate(&mut result, 1, identity, op)?;
        Ok(result)
    }

    /// [`assign_data`](Self::assign_data) with the maximum as combination
    pub fn assign_maximum_data(
        &self,
        complex: &SimplicialComplex,
        values: &[f64],
    ) -> Result<SimplicialComplex, TopologyError> {
        self.assign_data(complex, values, f64::NEG_INFINITY, f64::max)
    }

    /// Recompute the values of all simplices with dimension ≥ `from`,
    /// lowest dimension first, by folding over their faces.
    fn propagate<F>(
        &self,
        complex: &mut SimplicialComplex,
        from: usize,
        identity: f64,
        op: F,
    ) -> Result<(), TopologyError>
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut positions: Vec<usize> = (0..complex.len())
            .filter(|&i| complex.as_slice()[i].dimension() >= from)
            .collect();
        positions.sort_by_key(|&i| complex.as_slice()[i].dimension());

        for position in positions {
            let simplex = &complex.as_slice()[position];
            let mut value = identity;

            for face in simplex.faces() {
                let data = complex
                    .find(&face)
                    .map(Simplex::data)
                    .ok_or_else(|| TopologyError::MissingFace {
                        simplex: simplex.vertices().to_vec(),
                        face,
                    })?;
                value = op(value, data);
            }

            complex.update_at(position, value);
        }

        debug!("Assigned filtration values to simplices of dimension >= {}", from);
        Ok(())
    }
}

/// Intersection of two ascending vertex lists
fn intersect_sorted(a: &[Vertex], b: &[Vertex]) -> Vec<Vertex> {
    let mut result = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }

    result
}
