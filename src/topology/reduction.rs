//! Persistent Homology via Boundary Matrix Reduction
//!
//! Implements the standard algorithm for computing persistence pairs of a
//! filtered simplicial complex over Z/2Z.
//!
//! ## Algorithm Overview
//!
//! 1. Build the boundary matrix: column j holds the positions of the
//!    codimension-1 faces of the simplex at filtration position j
//! 2. Optionally dualize (anti-transpose) the matrix, which reduces the
//!    co-boundary instead
//! 3. Reduce columns left to right: while the lowest one of column j
//!    collides with the lowest one of an earlier column, add that column
//! 4. Extract pairs: a non-zero column j with lowest one i pairs i with j;
//!    simplices in no pair are essential (unpaired creators)
//!
//! Both matrix forms yield the same persistence pairs; dualizing only
//! changes the amount of work, which is usually far smaller for Rips
//! complexes with many high-dimensional simplices.
//!
//! ## Reference
//!
//! Edelsbrunner, Letscher, Zomorodian (2002). "Topological Persistence
//! and Simplification". Discrete & Computational Geometry.
//!
//! de Silva, Morozov, Vejdemo-Johansson (2011). "Dualities in persistent
//! (co)homology". Inverse Problems.

use log::debug;
use serde::{Deserialize, Serialize};

use super::complex::SimplicialComplex;
use super::persistence::PersistenceDiagram;
use crate::error::TopologyError;

/// Which matrix is reduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionMode {
    /// Boundary matrix
    Standard,
    /// Anti-transposed boundary matrix, i.e. the co-boundary
    #[default]
    Dualized,
}

/// Options of the reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReductionOptions {
    pub mode: ReductionMode,
    /// Report essential classes created by simplices of the top dimension
    /// of the complex as well. Those are usually artifacts of truncating a
    /// Rips expansion.
    pub include_all_unpaired_creators: bool,
}

impl Default for ReductionOptions {
    fn default() -> Self {
        Self {
            mode: ReductionMode::Dualized,
            include_all_unpaired_creators: true,
        }
    }
}

/// Sparse column over Z/2Z: strictly ascending row indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Column {
    rows: Vec<usize>,
}

impl Column {
    fn is_zero(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lowest (maximum) non-zero row index
    fn low(&self) -> Option<usize> {
        self.rows.last().copied()
    }

    /// Symmetric difference with another column (addition in Z/2Z)
    fn add_assign(&mut self, other: &Column) {
        let mut merged = Vec::with_capacity(self.rows.len() + other.rows.len());
        let (a, b) = (&self.rows, &other.rows);
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);

        self.rows = merged;
    }
}

/// Boundary matrix of a filtered simplicial complex
#[derive(Debug, Clone)]
pub struct BoundaryMatrix {
    columns: Vec<Column>,
    dualized: bool,
}

impl BoundaryMatrix {
    /// Build the boundary matrix of a filtration-ordered complex.
    ///
    /// Every face has to be present and has to precede its coface;
    /// otherwise an error describing the first violation is returned.
    pub fn from_complex(complex: &SimplicialComplex) -> Result<Self, TopologyError> {
        let mut columns = Vec::with_capacity(complex.len());

        for (j, simplex) in complex.iter().enumerate() {
            let mut rows = Vec::with_capacity(simplex.dimension() + 1);

            for face in simplex.faces() {
                let i = complex
                    .position(&face)
                    .ok_or_else(|| TopologyError::MissingFace {
                        simplex: simplex.vertices().to_vec(),
                        face: face.clone(),
                    })?;

                if i >= j {
                    return Err(TopologyError::FaceOrder {
                        simplex: simplex.vertices().to_vec(),
                        simplex_index: j,
                        face,
                        face_index: i,
                    });
                }
                rows.push(i);
            }

            rows.sort_unstable();
            columns.push(Column { rows });
        }

        Ok(Self {
            columns,
            dualized: false,
        })
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_dualized(&self) -> bool {
        self.dualized
    }

    /// Anti-transpose: entry (i, j) moves to (m-1-j, m-1-i)
    pub fn dualize(&self) -> Self {
        let m = self.columns.len();
        let mut columns = vec![Column::default(); m];

        // Visiting j in descending order keeps every new column ascending
        for j in (0..m).rev() {
            for &i in &self.columns[j].rows {
                columns[m - 1 - i].rows.push(m - 1 - j);
            }
        }

        Self {
            columns,
            dualized: !self.dualized,
        }
    }

    /// Reduce in place and return all (lowest row, column) pairs
    fn reduce(&mut self) -> Vec<(usize, usize)> {
        let m = self.columns.len();
        let mut low_to_column: Vec<Option<usize>> = vec![None; m];
        let mut pairs = Vec::new();
        let mut additions = 0usize;

        for j in 0..m {
            let (reduced, rest) = self.columns.split_at_mut(j);
            let column = &mut rest[0];

            while let Some(low) = column.low() {
                match low_to_column[low] {
                    Some(pivot) => {
                        column.add_assign(&reduced[pivot]);
                        additions += 1;
                    }
                    None => break,
                }
            }

            if let Some(low) = column.low() {
                low_to_column[low] = Some(j);
                pairs.push((low, j));
            }
        }

        debug!(
            "Reduced {} columns with {} column additions (dualized: {})",
            m, additions, self.dualized
        );

        pairs
    }

    /// Number of non-zero entries
    pub fn num_entries(&self) -> usize {
        self.columns.iter().map(|c| c.rows.len()).sum()
    }

    /// Number of zero columns
    pub fn num_zero_columns(&self) -> usize {
        self.columns.iter().filter(|c| c.is_zero()).count()
    }
}

/// Persistence pairs in terms of filtration positions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistencePairing {
    /// (creator, destroyer) pairs, sorted by creator
    pairs: Vec<(usize, usize)>,
    /// Creators without destroyer, ascending
    unpaired: Vec<usize>,
}

impl PersistencePairing {
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn unpaired(&self) -> &[usize] {
        &self.unpaired
    }

    pub fn len(&self) -> usize {
        self.pairs.len() + self.unpaired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.unpaired.is_empty()
    }
}

/// Compute the persistence pairing of a filtration-ordered complex
pub fn compute_pairing(
    complex: &SimplicialComplex,
    mode: ReductionMode,
) -> Result<PersistencePairing, TopologyError> {
    let m = complex.len();
    let boundary = BoundaryMatrix::from_complex(complex)?;

    let mut pairs: Vec<(usize, usize)> = match mode {
        ReductionMode::Standard => {
            let mut matrix = boundary;
            matrix.reduce()
        }
        ReductionMode::Dualized => {
            let mut matrix = boundary.dualize();
            matrix
                .reduce()
                .into_iter()
                .map(|(low, j)| (m - 1 - j, m - 1 - low))
                .collect()
        }
    };
    pairs.sort_unstable();

    let mut paired = vec![false; m];
    for &(creator, destroyer) in &pairs {
        paired[creator] = true;
        paired[destroyer] = true;
    }

    let unpaired = (0..m).filter(|&i| !paired[i]).collect();

    Ok(PersistencePairing { pairs, unpaired })
}

/// Compute one persistence diagram per dimension of a filtration-ordered
/// complex.
///
/// Points are grouped by the dimension of their creator and carry the
/// filtration values of creator and destroyer. Unpaired creators die at
/// `f64::INFINITY`. The empty complex has no diagrams.
pub fn calculate_persistence_diagrams(
    complex: &SimplicialComplex,
    options: ReductionOptions,
) -> Result<Vec<PersistenceDiagram>, TopologyError> {
    let Some(max_dimension) = complex.dimension() else {
        return Ok(Vec::new());
    };

    let pairing = compute_pairing(complex, options.mode)?;
    let simplices = complex.as_slice();

    let mut diagrams: Vec<PersistenceDiagram> =
        (0..=max_dimension).map(PersistenceDiagram::new).collect();

    for &(creator, destroyer) in pairing.pairs() {
        let c = &simplices[creator];
        let d = &simplices[destroyer];
        diagrams[c.dimension()].add(c.data(), d.data());
    }

    for &creator in pairing.unpaired() {
        let c = &simplices[creator];
        if !options.include_all_unpaired_creators && c.dimension() == max_dimension {
            continue;
        }
        diagrams[c.dimension()].add_unpaired(c.data());
    }

    debug!(
        "Found {} pairs and {} unpaired creators in {} simplices",
        pairing.pairs().len(),
        pairing.unpaired().len(),
        complex.len()
    );

    Ok(diagrams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{RipsExpander, Simplex};

    fn graph(n: usize, edges: &[(usize, usize, f64)]) -> SimplicialComplex {
        let mut k = SimplicialComplex::new();
        for v in 0..n {
            k.push(Simplex::vertex(v, 0.0));
        }
        for &(u, v, w) in edges {
            k.push(Simplex::edge(u, v, w));
        }
        k
    }

    fn rips(k: &SimplicialComplex, dimension: usize) -> SimplicialComplex {
        let expander = RipsExpander::new();
        let mut k = expander
            .assign_maximum_weight(&expander.expand(k, dimension))
            .unwrap();
        k.sort();
        k
    }

    fn square() -> SimplicialComplex {
        let s2 = 2.0_f64.sqrt();
        graph(
            4,
            &[
                (0, 1, 1.0),
                (1, 2, 1.0),
                (2, 3, 1.0),
                (0, 3, 1.0),
                (0, 2, s2),
                (1, 3, s2),
            ],
        )
    }

    #[test]
    fn test_column_addition() {
        let mut a = Column { rows: vec![0, 2, 5] };
        a.add_assign(&Column { rows: vec![2, 3, 5] });
        assert_eq!(a.rows, vec![0, 3]);
        assert_eq!(a.low(), Some(3));

        let copy = a.clone();
        a.add_assign(&copy);
        assert!(a.is_zero());
    }

    #[test]
    fn test_dualize_twice_is_identity() {
        let k = rips(&square(), 2);
        let matrix = BoundaryMatrix::from_complex(&k).unwrap();
        let twice = matrix.dualize().dualize();
        assert_eq!(twice.columns, matrix.columns);
        assert!(!twice.is_dualized());
        assert_eq!(matrix.dualize().num_entries(), matrix.num_entries());
    }

    #[test]
    fn test_triangle_scenario() {
        let k = rips(&graph(3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 2.0)]), 2);
        assert_eq!(k.len(), 7);

        let diagrams = calculate_persistence_diagrams(&k, ReductionOptions::default()).unwrap();
        assert_eq!(diagrams.len(), 3);

        let d0 = &diagrams[0];
        assert_eq!(d0.betti(), 1);
        let mut deaths: Vec<f64> = d0.iter().filter(|p| !p.is_unpaired()).map(|p| p.y).collect();
        deaths.sort_by(f64::total_cmp);
        assert_eq!(deaths, vec![1.0, 1.0]);

        let mut d1 = diagrams[1].clone();
        assert_eq!(d1.points(), &[crate::topology::Point::new(2.0, 2.0)]);
        d1.remove_diagonal();
        assert!(d1.is_empty());

        assert!(diagrams[2].is_empty());
    }

    #[test]
    fn test_square_cycle() {
        let s2 = 2.0_f64.sqrt();
        let k = rips(&square(), 2);

        let options = ReductionOptions {
            mode: ReductionMode::Standard,
            include_all_unpaired_creators: true,
        };
        let mut diagrams = calculate_persistence_diagrams(&k, options).unwrap();
        for d in &mut diagrams {
            d.remove_diagonal();
        }

        assert_eq!(diagrams[0].len(), 4);
        assert_eq!(diagrams[1].points(), &[crate::topology::Point::new(1.0, s2)]);
        // The four triangles enclose a 2-sphere that never gets filled
        assert_eq!(diagrams[2].betti(), 1);

        let options = ReductionOptions {
            include_all_unpaired_creators: false,
            ..options
        };
        let diagrams = calculate_persistence_diagrams(&k, options).unwrap();
        assert!(diagrams[2].is_empty());
        assert_eq!(diagrams[0].betti(), 1);
    }

    #[test]
    fn test_dualization_yields_same_pairs() {
        let k = rips(&square(), 3);
        let standard = compute_pairing(&k, ReductionMode::Standard).unwrap();
        let dual = compute_pairing(&k, ReductionMode::Dualized).unwrap();
        assert_eq!(standard, dual);
        assert_eq!(standard.len(), k.len() - standard.pairs().len());
    }

    #[test]
    fn test_empty_complex() {
        let diagrams =
            calculate_persistence_diagrams(&SimplicialComplex::new(), ReductionOptions::default())
                .unwrap();
        assert!(diagrams.is_empty());
    }

    #[test]
    fn test_vertices_only() {
        let k = graph(3, &[]);
        let diagrams = calculate_persistence_diagrams(&k, ReductionOptions::default()).unwrap();
        assert_eq!(diagrams.len(), 1);
        assert_eq!(diagrams[0].betti(), 3);
    }

    #[test]
    fn test_missing_face_is_reported() {
        let k = SimplicialComplex::from_simplices([
            Simplex::vertex(0, 0.0),
            Simplex::edge(0, 1, 1.0),
        ]);
        let err = calculate_persistence_diagrams(&k, ReductionOptions::default()).unwrap_err();
        assert_eq!(
            err,
            TopologyError::MissingFace {
                simplex: vec![0, 1],
                face: vec![1]
            }
        );
    }

    #[test]
    fn test_unsorted_complex_is_reported() {
        let k = SimplicialComplex::from_simplices([
            Simplex::edge(0, 1, 1.0),
            Simplex::vertex(0, 0.0),
            Simplex::vertex(1, 0.0),
        ]);
        let err = compute_pairing(&k, ReductionMode::Standard).unwrap_err();
        assert!(matches!(err, TopologyError::FaceOrder { simplex_index: 0, .. }));
    }
}
