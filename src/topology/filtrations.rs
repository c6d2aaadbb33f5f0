//! Filtration Orders
//!
//! Comparators that turn a simplicial complex into a filtration, i.e. a
//! total order in which every face precedes its cofaces.
//!
//! - [`data_order`]: by filtration value, then dimension, then vertex set.
//!   Valid whenever values are monotone along the face relation.
//! - [`dimension_order`]: by dimension, then vertex set. Always valid;
//!   used when values carry no meaning yet.
//!
//! Ties are broken on the vertex sets so that the order (and with it the
//! persistence pairing) is reproducible across runs.

use std::cmp::Ordering;

use super::complex::SimplicialComplex;
use super::simplex::Simplex;

/// Ascending filtration value, faces before cofaces of equal value
pub fn data_order(a: &Simplex, b: &Simplex) -> Ordering {
    a.data()
        .total_cmp(&b.data())
        .then(a.dimension().cmp(&b.dimension()))
        .then_with(|| a.cmp_vertices(b))
}

/// Ascending dimension, lexicographic within a dimension
pub fn dimension_order(a: &Simplex, b: &Simplex) -> Ordering {
    a.dimension()
        .cmp(&b.dimension())
        .then_with(|| a.cmp_vertices(b))
}

/// Degree of every vertex, indexed by vertex id.
///
/// Vertex ids are expected to be dense (`0..n`); the result has one entry
/// per id up to the largest one that occurs.
pub fn degrees(complex: &SimplicialComplex) -> Vec<f64> {
    let n = complex
        .iter()
        .flat_map(|s| s.vertices().iter().copied())
        .max()
        .map_or(0, |v| v + 1);

    let mut degrees = vec![0.0; n];
    for edge in complex.edges() {
        for &v in edge.vertices() {
            degrees[v] += 1.0;
        }
    }

    degrees
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_order_ties() {
        let edge = Simplex::edge(0, 1, 1.0);
        let triangle = Simplex::new([0, 1, 2], 1.0).unwrap();
        let other_edge = Simplex::edge(0, 2, 1.0);

        assert_eq!(data_order(&edge, &triangle), Ordering::Less);
        assert_eq!(data_order(&edge, &other_edge), Ordering::Less);
        assert_eq!(data_order(&edge, &edge.with_data(0.5)), Ordering::Greater);
    }

    #[test]
    fn test_dimension_order_ignores_data() {
        let vertex = Simplex::vertex(5, 10.0);
        let edge = Simplex::edge(0, 1, 0.0);
        assert_eq!(dimension_order(&vertex, &edge), Ordering::Less);
    }

    #[test]
    fn test_degrees() {
        let k = SimplicialComplex::from_simplices([
            Simplex::vertex(0, 0.0),
            Simplex::vertex(1, 0.0),
            Simplex::vertex(2, 0.0),
            Simplex::vertex(3, 0.0),
            Simplex::edge(0, 1, 0.0),
            Simplex::edge(0, 2, 0.0),
            Simplex::edge(0, 3, 0.0),
        ]);
        assert_eq!(degrees(&k), vec![3.0, 1.0, 1.0, 1.0]);
        assert!(degrees(&SimplicialComplex::new()).is_empty());
    }
}
