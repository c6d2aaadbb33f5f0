//! Property-based tests for filtrations, Rips expansion and reduction.
//!
//! Random weighted graphs on up to seven vertices are expanded and
//! reduced; the tests check:
//! - Sorting with the data order yields faces before cofaces
//! - Expansion adds exactly the cliques of the graph
//! - Maximum weights never decrease along the face relation
//! - Pairs are well-formed and every simplex is accounted for
//! - Standard and dualized reduction agree
//! - Essential classes reproduce the Euler characteristic

use proptest::prelude::*;
use tda_persistence::topology::filtrations::degrees;
use tda_persistence::{
    calculate_persistence_diagrams, compute_pairing, ReductionMode, ReductionOptions,
    RipsExpander, Simplex, SimplicialComplex,
};

// =============================================================================
// STRATEGIES
// =============================================================================

/// Vertices at 0 and an optional integer-valued weight per vertex pair
fn weighted_graph() -> impl Strategy<Value = SimplicialComplex> {
    (1usize..8).prop_flat_map(|n| {
        let pairs = n * (n - 1) / 2;
        prop::collection::vec(prop::option::weighted(0.6, 0u8..10), pairs)
            .prop_map(move |weights| build_graph(n, &weights))
    })
}

fn build_graph(n: usize, weights: &[Option<u8>]) -> SimplicialComplex {
    let mut complex = SimplicialComplex::new();
    for v in 0..n {
        complex.push(Simplex::vertex(v, 0.0));
    }

    let mut k = 0;
    for u in 0..n {
        for v in u + 1..n {
            if let Some(w) = weights[k] {
                complex.push(Simplex::edge(u, v, f64::from(w)));
            }
            k += 1;
        }
    }
    complex
}

fn filtration(graph: &SimplicialComplex, max_dimension: usize) -> SimplicialComplex {
    let expander = RipsExpander::new();
    let expanded = expander.expand(graph, max_dimension);
    let mut k = expander.assign_maximum_weight(&expanded).unwrap();
    k.sort();
    k
}

fn is_clique(graph: &SimplicialComplex, vertices: &[usize]) -> bool {
    vertices.iter().enumerate().all(|(i, &u)| {
        vertices[i + 1..]
            .iter()
            .all(|&v| graph.contains_vertices(&[u, v]))
    })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    /// Property: the data order is a filtration of the expanded complex
    #[test]
    fn prop_sorted_expansion_is_filtration(graph in weighted_graph()) {
        let k = filtration(&graph, 3);
        prop_assert!(k.check_filtration().is_ok(), "{:?}", k.check_filtration());
    }

    /// Property: generated simplices are exactly the cliques of the graph
    #[test]
    fn prop_expansion_adds_cliques(graph in weighted_graph()) {
        let k = RipsExpander::new().expand(&graph, 2);
        let n = graph.vertices().count();

        for s in k.iter().filter(|s| s.dimension() >= 2) {
            prop_assert!(is_clique(&graph, s.vertices()));
            prop_assert!(s.dimension() <= 2);
        }

        let mut triangles = 0;
        for a in 0..n {
            for b in a + 1..n {
                for c in b + 1..n {
                    if is_clique(&graph, &[a, b, c]) {
                        triangles += 1;
                        prop_assert!(k.contains_vertices(&[a, b, c]));
                    }
                }
            }
        }
        prop_assert_eq!(k.iter().filter(|s| s.dimension() == 2).count(), triangles);
    }

    /// Property: every simplex has at least the value of each of its faces
    #[test]
    fn prop_maximum_weights_are_monotone(graph in weighted_graph()) {
        let k = filtration(&graph, 3);
        for s in &k {
            for face in s.faces() {
                let f = k.find(&face).unwrap();
                prop_assert!(f.data() <= s.data());
            }
        }
    }

    /// Property: pairs join a simplex with a coface-dimension simplex later
    /// in the order, and pairs plus unpaired cover every simplex once
    #[test]
    fn prop_pairing_is_well_formed(graph in weighted_graph()) {
        let k = filtration(&graph, 3);
        let pairing = compute_pairing(&k, ReductionMode::Standard).unwrap();
        let mut seen = vec![0usize; k.len()];

        for &(creator, destroyer) in pairing.pairs() {
            let c = k.get(creator).unwrap();
            let d = k.get(destroyer).unwrap();
            prop_assert!(creator < destroyer);
            prop_assert_eq!(c.dimension() + 1, d.dimension());
            prop_assert!(c.data() <= d.data());
            seen[creator] += 1;
            seen[destroyer] += 1;
        }
        for &i in pairing.unpaired() {
            seen[i] += 1;
        }

        prop_assert!(seen.iter().all(|&count| count == 1));
    }

    /// Property: reducing the co-boundary gives the same pairs
    #[test]
    fn prop_dualized_equals_standard(graph in weighted_graph()) {
        let k = filtration(&graph, 3);
        let standard = compute_pairing(&k, ReductionMode::Standard).unwrap();
        let dualized = compute_pairing(&k, ReductionMode::Dualized).unwrap();
        prop_assert_eq!(standard, dualized);
    }

    /// Property: alternating sum of essential classes is the Euler characteristic
    #[test]
    fn prop_essential_classes_match_euler_characteristic(graph in weighted_graph()) {
        let k = filtration(&graph, 3);
        let diagrams = calculate_persistence_diagrams(&k, ReductionOptions::default()).unwrap();

        let chi: i64 = k
            .iter()
            .map(|s| if s.dimension() % 2 == 0 { 1 } else { -1 })
            .sum();
        let betti: i64 = diagrams
            .iter()
            .map(|d| {
                let b = d.betti() as i64;
                if d.dimension() % 2 == 0 { b } else { -b }
            })
            .sum();

        prop_assert_eq!(chi, betti);
    }

    /// Property: removing the diagonal twice changes nothing more
    #[test]
    fn prop_remove_diagonal_is_idempotent(graph in weighted_graph()) {
        let k = filtration(&graph, 2);
        let diagrams = calculate_persistence_diagrams(&k, ReductionOptions::default()).unwrap();

        for mut diagram in diagrams {
            diagram.remove_diagonal();
            let once = diagram.clone();
            diagram.remove_diagonal();
            prop_assert_eq!(once, diagram.clone());
            prop_assert!(diagram.iter().all(|p| p.x != p.y));
        }
    }

    /// Property: degrees sum to twice the number of edges
    #[test]
    fn prop_degree_sum(graph in weighted_graph()) {
        let total: f64 = degrees(&graph).iter().sum();
        prop_assert_eq!(total, 2.0 * graph.edges().count() as f64);
    }
}
