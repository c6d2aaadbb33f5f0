//! Edge List Reader
//!
//! One edge per line: `source target [weight]`, separated by whitespace.
//! Empty lines and lines starting with `#` or `%` are skipped.
//!
//! A vertex receives the smallest weight among its incident edges, so it
//! enters the filtration no later than any of its edges.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use super::{parse_value, Network, VertexMap};
use crate::error::ReadError;
use crate::topology::{Simplex, SimplicialComplex};

/// Reads `u v [w]` edge lists into a weighted 1-skeleton
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeListReader {
    read_weights: bool,
}

impl EdgeListReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a third column with edge weights. Without it every
    /// simplex gets weight 0 and extra columns are ignored.
    pub fn with_weights(mut self, read_weights: bool) -> Self {
        self.read_weights = read_weights;
        self
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Result<Network, ReadError> {
        let path = path.as_ref();
        info!("Reading edge list from {}", path.display());
        self.read_from(BufReader::new(File::open(path)?))
    }

    pub fn read_from<R: BufRead>(&self, reader: R) -> Result<Network, ReadError> {
        let mut edges = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let number = i + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 2 {
                return Err(ReadError::parse(number, "expected at least two vertex ids"));
            }

            let weight = if self.read_weights {
                let token = tokens.get(2).ok_or(ReadError::MissingWeight { line: number })?;
                parse_value(token, number)?
            } else {
                0.0
            };

            if tokens[0] == tokens[1] {
                debug!("Skipping self-loop on vertex {} (line {})", tokens[0], number);
                continue;
            }

            edges.push((tokens[0].to_string(), tokens[1].to_string(), weight));
        }

        let map = VertexMap::from_ids(edges.iter().flat_map(|(u, v, _)| [u.clone(), v.clone()]));

        let mut vertex_data = vec![f64::INFINITY; map.len()];
        let mut dense = Vec::with_capacity(edges.len());
        for (u, v, w) in &edges {
            let (Some(u), Some(v)) = (map.get(u), map.get(v)) else {
                continue;
            };
            vertex_data[u] = vertex_data[u].min(*w);
            vertex_data[v] = vertex_data[v].min(*w);
            dense.push((u, v, *w));
        }

        let mut complex = SimplicialComplex::new();
        for (v, &data) in vertex_data.iter().enumerate() {
            complex.push(Simplex::vertex(v, data));
        }
        for (u, v, w) in dense {
            complex.push(Simplex::edge(u, v, w));
        }

        info!(
            "Read {} vertices and {} edges",
            map.len(),
            complex.len() - map.len()
        );

        Ok(Network {
            complex,
            labels: map.ids().to_vec(),
        })
    }
}
