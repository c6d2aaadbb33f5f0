//! Betti Numbers: Topological Invariants
//!
//! The k-th Betti number βₖ counts the number of k-dimensional
//! "holes" in a topological space:
//!
//! - β₀: Number of connected components
//! - β₁: Number of 1-dimensional loops/cycles
//! - β₂: Number of 2-dimensional voids/cavities
//!
//! Along a filtration, βₖ at value t is the number of points (b, d) of the
//! k-th persistence diagram with b ≤ t < d.

use super::persistence::PersistenceDiagram;

/// Betti numbers at a specific filtration value
#[derive(Debug, Clone, PartialEq)]
pub struct BettiNumbers {
    /// βₖ indexed by dimension
    pub values: Vec<usize>,
    /// Filtration value
    pub epsilon: f64,
}

impl BettiNumbers {
    /// Count the features alive at `epsilon`
    pub fn at(diagrams: &[PersistenceDiagram], epsilon: f64) -> Self {
        let dimensions = diagrams.iter().map(|d| d.dimension() + 1).max().unwrap_or(0);
        let mut values = vec![0; dimensions];

        for diagram in diagrams {
            values[diagram.dimension()] += diagram
                .iter()
                .filter(|p| p.x <= epsilon && epsilon < p.y)
                .count();
        }

        Self { values, epsilon }
    }

    /// βₖ, zero for dimensions without a diagram
    pub fn get(&self, dimension: usize) -> usize {
        self.values.get(dimension).copied().unwrap_or(0)
    }

    /// Total topological complexity
    pub fn total(&self) -> usize {
        self.values.iter().sum()
    }

    /// Euler characteristic χ = β₀ - β₁ + β₂ - ...
    pub fn euler_characteristic(&self) -> i64 {
        self.values
            .iter()
            .enumerate()
            .map(|(k, &b)| if k % 2 == 0 { b as i64 } else { -(b as i64) })
            .sum()
    }
}

/// Betti curve: sequence of Betti numbers across filtration values
#[derive(Debug, Clone)]
pub struct BettiCurve {
    pub values: Vec<BettiNumbers>,
}

impl BettiCurve {
    /// Evaluate the Betti numbers at every given filtration value
    pub fn compute(diagrams: &[PersistenceDiagram], epsilons: &[f64]) -> Self {
        let values = epsilons
            .iter()
            .map(|&e| BettiNumbers::at(diagrams, e))
            .collect();

        Self { values }
    }

    /// (ε, βₖ) pairs for one dimension
    pub fn curve(&self, dimension: usize) -> Vec<(f64, usize)> {
        self.values
            .iter()
            .map(|b| (b.epsilon, b.get(dimension)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Point;

    fn diagrams() -> Vec<PersistenceDiagram> {
        vec![
            PersistenceDiagram::from_points(
                0,
                [Point::new(0.0, 1.0), Point::new(0.0, 2.0), Point::unpaired(0.0)],
            ),
            PersistenceDiagram::from_points(1, [Point::new(1.0, 1.5)]),
        ]
    }

    #[test]
    fn test_betti_at_values() {
        let b = BettiNumbers::at(&diagrams(), 0.5);
        assert_eq!(b.values, vec![3, 0]);

        let b = BettiNumbers::at(&diagrams(), 1.2);
        assert_eq!(b.values, vec![2, 1]);
        assert_eq!(b.euler_characteristic(), 1);

        let b = BettiNumbers::at(&diagrams(), 10.0);
        assert_eq!(b.total(), 1);
        assert_eq!(b.get(5), 0);
    }

    #[test]
    fn test_curve() {
        let curve = BettiCurve::compute(&diagrams(), &[0.0, 1.0, 2.0]);
        assert_eq!(curve.curve(0), vec![(0.0, 3), (1.0, 2), (2.0, 1)]);
        assert_eq!(curve.curve(1), vec![(0.0, 0), (1.0, 1), (2.0, 0)]);
    }
}
