//! I/O Module: Reading Networks and Writing Persistence Diagrams
//!
//! Readers turn graph and matrix formats into 1-skeletons (vertices plus
//! weighted edges) and side tables such as node labels:
//!
//! | Format | Reader |
//! |---|---|
//! | Edge lists (`u v [w]`) | [`EdgeListReader`] |
//! | GML | [`GmlReader`] / [`GmlWriter`] |
//! | Pajek (`.net`) | [`PajekReader`] |
//! | Graph collections as sparse adjacency matrices | [`SparseAdjacencyMatrixReader`] |
//! | Bipartite adjacency matrices | [`BipartiteAdjacencyMatrixReader`] |
//!
//! Original vertex identifiers are remapped to dense zero-based ids that
//! follow the sorted order of the originals (see [`VertexMap`]).
//!
//! Persistence diagrams are stored as two whitespace-separated columns per
//! line, preceded by `#` header lines ([`write_diagram`], [`read_diagram`]).

mod bipartite;
mod diagrams;
mod edge_list;
mod gml;
mod pajek;
mod sparse_adjacency;

use std::cmp::Ordering;
use std::collections::HashMap;

pub use bipartite::{BipartiteAdjacencyMatrixReader, BipartiteGraph};
pub use diagrams::{read_diagram, read_diagram_from, write_diagram, write_diagram_to};
pub use edge_list::EdgeListReader;
pub use gml::{GmlReader, GmlWriter};
pub use pajek::PajekReader;
pub use sparse_adjacency::{SparseAdjacencyData, SparseAdjacencyMatrixReader};

use crate::topology::{SimplicialComplex, Vertex};

/// A network read from a file
#[derive(Debug, Clone, Default)]
pub struct Network {
    /// 1-skeleton with vertex and edge weights
    pub complex: SimplicialComplex,
    /// Label of every vertex, indexed by dense vertex id. Falls back to the
    /// original identifier when the format carries no label.
    pub labels: Vec<String>,
}

/// Dense, order-preserving remapping of textual vertex identifiers
#[derive(Debug, Clone, Default)]
pub struct VertexMap {
    ids: Vec<String>,
    lookup: HashMap<String, Vertex>,
}

impl VertexMap {
    /// Build the map from all identifiers; duplicates are merged.
    ///
    /// Identifiers are ordered numerically if every one of them is an
    /// integer, lexicographically otherwise.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let numeric = ids.iter().all(|id| id.parse::<i64>().is_ok());

        ids.sort_by(|a, b| compare_ids(a, b, numeric));
        ids.dedup();

        let lookup = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        Self { ids, lookup }
    }

    pub fn get(&self, id: &str) -> Option<Vertex> {
        self.lookup.get(id).copied()
    }

    /// Original identifiers in dense-id order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn compare_ids(a: &str, b: &str, numeric: bool) -> Ordering {
    if numeric {
        if let (Ok(x), Ok(y)) = (a.parse::<i64>(), b.parse::<i64>()) {
            return x.cmp(&y);
        }
    }
    a.cmp(b)
}

/// Zero-padded index, as wide as the number of digits of `total`
pub fn format_index(index: usize, total: usize) -> String {
    let width = total.max(1).to_string().len();
    format!("{index:0width$}")
}

/// Parse a floating-point token, reporting the line on failure
pub(crate) fn parse_value(token: &str, line: usize) -> Result<f64, crate::error::ReadError> {
    token
        .parse::<f64>()
        .map_err(|_| crate::error::ReadError::parse(line, format!("'{token}' is not a number")))
}
