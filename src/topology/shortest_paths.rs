//! Shortest Paths and Closeness Centrality
//!
//! All-pairs shortest paths over the 1-skeleton of a complex with the
//! Floyd-Warshall algorithm, and the closeness centrality derived from
//! them:
//!
//!   C(v) = n / Σ_u d(v, u)
//!
//! where the sum runs over all reachable vertices.

use ndarray::Array2;

use super::complex::SimplicialComplex;

/// Distance matrix of the 1-skeleton.
///
/// Vertex ids are expected to be dense. With `unit_weights` every edge
/// has length 1, otherwise its filtration value is used. Unreachable
/// pairs are `f64::INFINITY`.
pub fn floyd_warshall(complex: &SimplicialComplex, unit_weights: bool) -> Array2<f64> {
    let n = complex
        .iter()
        .flat_map(|s| s.vertices().iter().copied())
        .max()
        .map_or(0, |v| v + 1);

    let mut d = Array2::from_elem((n, n), f64::INFINITY);
    for i in 0..n {
        d[[i, i]] = 0.0;
    }

    for edge in complex.edges() {
        let (u, v) = (edge.vertices()[0], edge.vertices()[1]);
        let w = if unit_weights { 1.0 } else { edge.data() };
        if w < d[[u, v]] {
            d[[u, v]] = w;
            d[[v, u]] = w;
        }
    }

    for k in 0..n {
        for i in 0..n {
            let dik = d[[i, k]];
            if dik.is_infinite() {
                continue;
            }
            for j in 0..n {
                let candidate = dik + d[[k, j]];
                if candidate < d[[i, j]] {
                    d[[i, j]] = candidate;
                }
            }
        }
    }

    d
}

/// Closeness centrality of every vertex, based on unit edge lengths
pub fn closeness_centrality(complex: &SimplicialComplex) -> Vec<f64> {
    let d = floyd_warshall(complex, true);
    let n = d.nrows();

    (0..n)
        .map(|i| {
            let sum = kahan_sum(d.row(i).iter().copied().filter(|x| x.is_finite()));
            n as f64 / sum
        })
        .collect()
}

/// Compensated summation
fn kahan_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;

    for x in values {
        let y = x - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Simplex;

    fn path() -> SimplicialComplex {
        SimplicialComplex::from_simplices([
            Simplex::vertex(0, 0.0),
            Simplex::vertex(1, 0.0),
            Simplex::vertex(2, 0.0),
            Simplex::vertex(3, 0.0),
            Simplex::edge(0, 1, 2.0),
            Simplex::edge(1, 2, 3.0),
        ])
    }

    #[test]
    fn test_distances() {
        let d = floyd_warshall(&path(), false);
        assert_eq!(d[[0, 2]], 5.0);
        assert_eq!(d[[2, 0]], 5.0);
        assert!(d[[0, 3]].is_infinite());

        let hops = floyd_warshall(&path(), true);
        assert_eq!(hops[[0, 2]], 2.0);
    }

    #[test]
    fn test_closeness() {
        let c = closeness_centrality(&path());
        // Vertex 1 reaches 0 and 2 in one hop each
        assert!((c[1] - 4.0 / 2.0).abs() < 1e-12);
        assert!((c[0] - 4.0 / 3.0).abs() < 1e-12);
        assert!(c[3].is_infinite());
    }

    #[test]
    fn test_kahan_sum() {
        let values = std::iter::repeat(0.1).take(10);
        assert!((kahan_sum(values) - 1.0).abs() < 1e-15);
    }
}
