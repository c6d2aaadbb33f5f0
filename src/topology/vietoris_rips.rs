//! Vietoris-Rips Complex Construction
//!
//! The Vietoris-Rips complex VR_ε(X) is a simplicial complex where:
//! - 0-simplices are the points in X
//! - A k-simplex [v₀, ..., vₖ] exists iff d(vᵢ, vⱼ) ≤ ε for all i,j
//!
//! This module builds the 1-skeleton of VR_ε(X) with every edge weighted by
//! its length. [`RipsExpander`](super::RipsExpander) then fills in the
//! higher simplices.

use ndarray::Array2;

use super::complex::SimplicialComplex;
use super::simplex::Simplex;
use crate::geometry::NearestNeighbours;

/// Vietoris-Rips 1-skeleton builder
#[derive(Debug, Clone)]
pub struct VietorisRips {
    /// Distance matrix (precomputed)
    distances: Array2<f64>,
    /// Maximum filtration value
    max_epsilon: f64,
}

impl VietorisRips {
    /// Create from a precomputed distance matrix
    pub fn from_distance_matrix(distances: &Array2<f64>, max_epsilon: f64) -> Self {
        Self {
            distances: distances.clone(),
            max_epsilon,
        }
    }

    /// Create from a point cloud, one point per row (Euclidean distances)
    pub fn from_points(points: &Array2<f64>, max_epsilon: f64) -> Self {
        Self {
            distances: Self::compute_distance_matrix(points),
            max_epsilon,
        }
    }

    /// Compute Euclidean distance matrix
    pub fn compute_distance_matrix(points: &Array2<f64>) -> Array2<f64> {
        let n = points.nrows();
        let dim = points.ncols();

        let mut dm = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            for j in i + 1..n {
                let mut dist_sq = 0.0;
                for d in 0..dim {
                    let diff = points[[i, d]] - points[[j, d]];
                    dist_sq += diff * diff;
                }
                let dist = dist_sq.sqrt();
                dm[[i, j]] = dist;
                dm[[j, i]] = dist;
            }
        }

        dm
    }

    /// Number of points
    pub fn n_points(&self) -> usize {
        self.distances.nrows()
    }

    pub fn max_epsilon(&self) -> f64 {
        self.max_epsilon
    }

    /// 1-skeleton: vertices at 0, an edge for every pair within ε
    pub fn skeleton(&self) -> SimplicialComplex {
        let n = self.n_points();
        let mut complex = SimplicialComplex::new();

        for i in 0..n {
            complex.push(Simplex::vertex(i, 0.0));
        }

        for i in 0..n {
            for j in i + 1..n {
                let d = self.distances[[i, j]];
                if d <= self.max_epsilon {
                    complex.push(Simplex::edge(i, j, d));
                }
            }
        }

        complex
    }

    /// 1-skeleton from radius queries against a neighbour index
    pub fn skeleton_from_index<N: NearestNeighbours>(index: &N, epsilon: f64) -> SimplicialComplex {
        let n = index.size();
        let mut complex = SimplicialComplex::new();

        for i in 0..n {
            complex.push(Simplex::vertex(i, 0.0));
        }

        for i in 0..n {
            for (j, d) in index.radius_search(i, epsilon) {
                if i < j {
                    complex.push(Simplex::edge(i, j, d));
                }
            }
        }

        complex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BruteForce;
    use crate::topology::{calculate_persistence_diagrams, ReductionOptions};
    use ndarray::array;

    fn equilateral() -> Array2<f64> {
        array![[0.0, 0.0], [1.0, 0.0], [0.5, 0.866]]
    }

    #[test]
    fn test_components_from_h0() {
        let mut k = VietorisRips::from_points(&equilateral(), 2.0).skeleton();
        k.sort();
        let diagrams = calculate_persistence_diagrams(&k, ReductionOptions::default()).unwrap();

        let alive_at = |eps: f64| diagrams[0].iter().filter(|p| p.death() > eps).count();
        assert_eq!(alive_at(0.8), 3);
        assert_eq!(alive_at(1.2), 1);
    }

    #[test]
    fn test_skeleton_respects_epsilon() {
        let points = array![[0.0, 0.0], [1.0, 0.0], [5.0, 0.0]];
        let k = VietorisRips::from_points(&points, 2.0).skeleton();

        assert_eq!(k.vertices().count(), 3);
        assert_eq!(k.edges().count(), 1);
        assert_eq!(k.find(&[0, 1]).unwrap().data(), 1.0);
    }

    #[test]
    fn test_index_and_matrix_agree() {
        let points = equilateral();
        let from_matrix = VietorisRips::from_points(&points, 1.5).skeleton();
        let from_index = VietorisRips::skeleton_from_index(&BruteForce::new(points), 1.5);

        assert_eq!(from_matrix.len(), from_index.len());
        for s in &from_matrix {
            let t = from_index.find(s.vertices()).unwrap();
            assert!((s.data() - t.data()).abs() < 1e-12);
        }
    }
}
