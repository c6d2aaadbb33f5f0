//! Pajek `.net` Reader
//!
//! ```text
//! *Vertices 3
//! 1 "alpha"
//! 2 "beta"
//! 3 "gamma"
//! *Edges
//! 1 2 0.5
//! 2 3
//! ```
//!
//! `*Vertices n` declares the ids `1..=n`; the vertex lines that follow
//! only attach labels. `*Edges` and `*Arcs` sections both yield undirected
//! edges. Lines starting with `%` are comments. Vertices and edges
//! without an explicit weight get weight 0.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use super::{parse_value, Network};
use crate::error::ReadError;
use crate::topology::{Simplex, SimplicialComplex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Vertices,
    Edges,
    Other,
}

/// Reader for Pajek networks
#[derive(Debug, Clone, Copy, Default)]
pub struct PajekReader;

impl PajekReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Result<Network, ReadError> {
        let path = path.as_ref();
        info!("Reading Pajek network from {}", path.display());
        self.read_from(BufReader::new(File::open(path)?))
    }

    pub fn read_from<R: BufRead>(&self, reader: R) -> Result<Network, ReadError> {
        let mut section = Section::Preamble;
        let mut labels: Vec<String> = Vec::new();
        let mut edges: Vec<(usize, usize, Option<f64>)> = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let number = i + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('%') {
                continue;
            }

            if let Some(header) = line.strip_prefix('*') {
                let mut parts = header.split_whitespace();
                let keyword = parts.next().unwrap_or_default().to_ascii_lowercase();
                section = match keyword.as_str() {
                    "vertices" => {
                        let count = parts
                            .next()
                            .ok_or_else(|| ReadError::parse(number, "*Vertices without a count"))?;
                        let count: usize = count
                            .parse()
                            .map_err(|_| ReadError::parse(number, format!("invalid vertex count '{count}'")))?;
                        labels = (1..=count).map(|id| id.to_string()).collect();
                        Section::Vertices
                    }
                    "edges" | "arcs" => Section::Edges,
                    _ => {
                        debug!("Skipping unsupported section *{keyword} on line {number}");
                        Section::Other
                    }
                };
                continue;
            }

            match section {
                Section::Vertices => {
                    let (id, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
                    let v = vertex_index(id, labels.len())?;
                    if let Some(label) = parse_label(rest) {
                        labels[v] = label;
                    }
                }
                Section::Edges => {
                    let tokens: Vec<&str> = line.split_whitespace().collect();
                    if tokens.len() < 2 {
                        return Err(ReadError::parse(number, "expected two vertex ids"));
                    }
                    let u = vertex_index(tokens[0], labels.len())?;
                    let v = vertex_index(tokens[1], labels.len())?;
                    let weight = tokens.get(2).map(|t| parse_value(t, number)).transpose()?;
                    edges.push((u, v, weight));
                }
                Section::Preamble => {
                    return Err(ReadError::parse(number, "data before the *Vertices section"));
                }
                Section::Other => {}
            }
        }

        let mut complex = SimplicialComplex::new();
        for v in 0..labels.len() {
            complex.push(Simplex::vertex(v, 0.0));
        }
        for (u, v, weight) in edges {
            if u != v {
                complex.push(Simplex::edge(u, v, weight.unwrap_or(0.0)));
            }
        }

        info!(
            "Read {} vertices and {} edges",
            labels.len(),
            complex.len() - labels.len()
        );

        Ok(Network { complex, labels })
    }
}

/// One-based Pajek id to dense vertex id
fn vertex_index(token: &str, count: usize) -> Result<usize, ReadError> {
    match token.parse::<usize>() {
        Ok(id) if (1..=count).contains(&id) => Ok(id - 1),
        _ => Err(ReadError::UnknownVertex { id: token.to_string() }),
    }
}

/// Quoted or bare label at the start of the remainder of a vertex line
fn parse_label(rest: &str) -> Option<String> {
    let rest = rest.trim_start();
    if let Some(quoted) = rest.strip_prefix('"') {
        return quoted.split('"').next().map(str::to_string);
    }
    rest.split_whitespace().next().map(str::to_string)
}
