//! Bipartite Adjacency Matrix Reader
//!
//! Every row of the matrix is a node of the first class, every column a
//! node of the second class. Entry (y, x) with value w becomes the edge
//! `{y, height + x}` with weight w:
//!
//! ```text
//! 0 1 2        rows    -> vertices 0, 1
//! 3 4 5        columns -> vertices 2, 3, 4
//! ```
//!
//! Empty lines and lines starting with `#` are skipped; all other rows
//! must have the same width. The result is sorted by data.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use super::parse_value;
use crate::error::ReadError;
use crate::topology::{Simplex, SimplicialComplex};

/// A bipartite graph and the shape of the matrix it was read from
#[derive(Debug, Clone, Default)]
pub struct BipartiteGraph {
    pub complex: SimplicialComplex,
    pub height: usize,
    pub width: usize,
}

/// Reader for dense bipartite adjacency matrices in text form
#[derive(Debug, Clone, Copy, Default)]
pub struct BipartiteAdjacencyMatrixReader {
    use_absolute_values: bool,
    assign_minimum_vertex_weight: bool,
}

impl BipartiteAdjacencyMatrixReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every weight by its absolute value
    pub fn with_absolute_values(mut self, value: bool) -> Self {
        self.use_absolute_values = value;
        self
    }

    /// Give each vertex the minimum weight of its incident edges instead
    /// of the global minimum weight
    pub fn with_minimum_vertex_weight(mut self, value: bool) -> Self {
        self.assign_minimum_vertex_weight = value;
        self
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Result<BipartiteGraph, ReadError> {
        let path = path.as_ref();
        info!("Reading bipartite adjacency matrix from {}", path.display());
        self.read_from(BufReader::new(File::open(path)?))
    }

    pub fn read_from<R: BufRead>(&self, reader: R) -> Result<BipartiteGraph, ReadError> {
        let mut rows: Vec<Vec<f64>> = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let number = i + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut row = line
                .split_whitespace()
                .map(|token| parse_value(token, number))
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(ReadError::ColumnMismatch {
                        line: number,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }

            if self.use_absolute_values {
                row.iter_mut().for_each(|w| *w = w.abs());
            }
            rows.push(row);
        }

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if height == 0 || width == 0 {
            return Ok(BipartiteGraph::default());
        }

        let global_minimum = rows
            .iter()
            .flatten()
            .copied()
            .fold(f64::INFINITY, f64::min);

        let mut minimum = vec![f64::INFINITY; height + width];
        let mut simplices = Vec::with_capacity(height * width + height + width);

        for (y, row) in rows.iter().enumerate() {
            for (x, &w) in row.iter().enumerate() {
                let (u, v) = (y, height + x);
                minimum[u] = minimum[u].min(w);
                minimum[v] = minimum[v].min(w);
                simplices.push(Simplex::edge(u, v, w));
            }
        }

        for (v, &w) in minimum.iter().enumerate() {
            let data = if self.assign_minimum_vertex_weight {
                w
            } else {
                global_minimum
            };
            simplices.push(Simplex::vertex(v, data));
        }

        let mut complex = SimplicialComplex::from_simplices(simplices);
        complex.sort();

        info!("Read {height}x{width} bipartite adjacency matrix");

        Ok(BipartiteGraph {
            complex,
            height,
            width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATRIX: &str = "\
# two rows, three columns
0 1 2

3 -4 5
";

    #[test]
    fn test_shape_and_edges() {
        let graph = BipartiteAdjacencyMatrixReader::new()
            .read_from(MATRIX.as_bytes())
            .unwrap();

        assert_eq!((graph.height, graph.width), (2, 3));
        assert_eq!(graph.complex.vertices().count(), 5);
        assert_eq!(graph.complex.edges().count(), 6);
        assert_eq!(graph.complex.find(&[1, 3]).unwrap().data(), -4.0);
        assert!(graph.complex.check_filtration().is_ok());

        // vertices default to the global minimum
        assert!(graph.complex.vertices().all(|s| s.data() == -4.0));
    }

    #[test]
    fn test_minimum_vertex_weight_and_absolute_values() {
        let graph = BipartiteAdjacencyMatrixReader::new()
            .with_absolute_values(true)
            .with_minimum_vertex_weight(true)
            .read_from(MATRIX.as_bytes())
            .unwrap();

        assert_eq!(graph.complex.find(&[1, 3]).unwrap().data(), 4.0);
        assert_eq!(graph.complex.find(&[0]).unwrap().data(), 0.0);
        assert_eq!(graph.complex.find(&[1]).unwrap().data(), 3.0);
        assert_eq!(graph.complex.find(&[4]).unwrap().data(), 2.0);
    }

    #[test]
    fn test_column_mismatch() {
        let err = BipartiteAdjacencyMatrixReader::new()
            .read_from("1 2\n3\n".as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            ReadError::ColumnMismatch { line: 2, expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_empty_matrix() {
        let graph = BipartiteAdjacencyMatrixReader::new()
            .read_from("# nothing\n".as_bytes())
            .unwrap();
        assert!(graph.complex.is_empty());
    }
}
