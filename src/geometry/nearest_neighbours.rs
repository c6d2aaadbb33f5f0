//! Nearest-Neighbour Queries
//!
//! The Rips construction only needs one capability from a spatial index:
//! given a point and a radius (or a count k), return neighbour indices with
//! their distances. [`NearestNeighbours`] captures that capability so any
//! index structure can back it; [`BruteForce`] is the exhaustive reference
//! implementation.

use ndarray::{Array2, ArrayView1};

use super::distances::{Distance, Euclidean};

/// Capability interface of a neighbour index over a fixed point set
pub trait NearestNeighbours {
    /// Number of indexed points
    fn size(&self) -> usize;

    /// All points within `radius` of point `index` (excluding itself),
    /// as (index, metric distance), ascending by distance
    fn radius_search(&self, index: usize, radius: f64) -> Vec<(usize, f64)>;

    /// The `k` nearest points of point `index` (excluding itself),
    /// ascending by distance
    fn nearest(&self, index: usize, k: usize) -> Vec<(usize, f64)>;
}

/// Exhaustive search over the rows of a point matrix
#[derive(Debug, Clone)]
pub struct BruteForce<D = Euclidean> {
    points: Array2<f64>,
    distance: D,
}

impl BruteForce<Euclidean> {
    pub fn new(points: Array2<f64>) -> Self {
        Self::with_distance(points, Euclidean)
    }
}

impl<D: Distance> BruteForce<D> {
    pub fn with_distance(points: Array2<f64>, distance: D) -> Self {
        Self { points, distance }
    }

    pub fn point(&self, index: usize) -> ArrayView1<'_, f64> {
        self.points.row(index)
    }

    /// Internal distances from point `index` to every other point, sorted
    fn candidates(&self, index: usize) -> Vec<(usize, f64)> {
        let query = self.points.row(index).to_vec();

        let mut result: Vec<(usize, f64)> = self
            .points
            .rows()
            .into_iter()
            .enumerate()
            .filter(|&(j, _)| j != index)
            .map(|(j, row)| (j, self.distance.distance(&query, &row.to_vec())))
            .collect();

        result.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        result
    }
}

impl<D: Distance> NearestNeighbours for BruteForce<D> {
    fn size(&self) -> usize {
        self.points.nrows()
    }

    fn radius_search(&self, index: usize, radius: f64) -> Vec<(usize, f64)> {
        let radius = self.distance.to_internal(radius);
        self.candidates(index)
            .into_iter()
            .take_while(|&(_, d)| d <= radius)
            .map(|(j, d)| (j, self.distance.from_internal(d)))
            .collect()
    }

    fn nearest(&self, index: usize, k: usize) -> Vec<(usize, f64)> {
        self.candidates(index)
            .into_iter()
            .take(k)
            .map(|(j, d)| (j, self.distance.from_internal(d)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SquaredEuclidean;
    use ndarray::array;

    fn line() -> Array2<f64> {
        array![[0.0, 0.0], [1.0, 0.0], [3.0, 0.0], [6.0, 0.0]]
    }

    #[test]
    fn test_radius_search() {
        let index = BruteForce::new(line());
        assert_eq!(index.size(), 4);
        assert_eq!(index.radius_search(1, 2.0), vec![(0, 1.0), (2, 2.0)]);
        assert!(index.radius_search(3, 2.0).is_empty());
    }

    #[test]
    fn test_nearest() {
        let index = BruteForce::new(line());
        assert_eq!(index.nearest(0, 2), vec![(1, 1.0), (2, 3.0)]);
        assert_eq!(index.nearest(0, 10).len(), 3);
    }

    #[test]
    fn test_internal_representation_is_converted() {
        let index = BruteForce::with_distance(line(), SquaredEuclidean);
        assert_eq!(index.radius_search(0, 3.0), vec![(1, 1.0), (2, 3.0)]);
    }
}
