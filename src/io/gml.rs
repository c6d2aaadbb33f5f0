//! Graph Modelling Language (GML)
//!
//! The reader is a small state machine over a stack of open levels:
//!
//! ```text
//! Outside ──graph [──► Graph ──node [──► Node ──]──► Graph
//!                            └──edge [──► Edge ──]──► Graph ──]──► Outside
//! ```
//!
//! A level keyword (`graph`, `node`, `edge`) is remembered until the next
//! `[` opens it, which may happen on a later line. Any other key followed
//! by `[` opens a list whose contents are skipped. Lines starting with
//! `comment` are ignored.
//!
//! Recognised attributes:
//! - node: `id`, `label`, `weight` (default 0)
//! - edge: `source`, `target`, `weight` (default: larger endpoint weight)

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info};

use super::{parse_value, Network, VertexMap};
use crate::error::ReadError;
use crate::topology::{Simplex, SimplicialComplex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Graph,
    Node,
    Edge,
    /// List under an unrecognised key, e.g. `graphics [ ... ]`
    Ignored,
}

#[derive(Debug, Default)]
struct Node {
    id: Option<String>,
    label: Option<String>,
    weight: Option<f64>,
}

#[derive(Debug, Default)]
struct Edge {
    source: Option<String>,
    target: Option<String>,
    weight: Option<f64>,
}

/// Reader for undirected GML graphs
#[derive(Debug, Clone, Copy, Default)]
pub struct GmlReader;

impl GmlReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Result<Network, ReadError> {
        let path = path.as_ref();
        info!("Reading GML graph from {}", path.display());
        self.read_from(BufReader::new(File::open(path)?))
    }

    pub fn read_from<R: BufRead>(&self, reader: R) -> Result<Network, ReadError> {
        let mut stack: Vec<Level> = Vec::new();
        let mut pending: Option<Level> = None;

        let mut nodes: Vec<Node> = Vec::new();
        let mut edges: Vec<(Edge, usize)> = Vec::new();
        let mut node = Node::default();
        let mut edge = Edge::default();
        let mut last_line = 0;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let number = i + 1;
            last_line = number;

            let mut tokens = tokenize(&line).into_iter();
            let mut peeked = tokens.next();
            if matches!(peeked.as_deref(), Some("comment")) {
                continue;
            }

            while let Some(token) = peeked.take() {
                match token.as_str() {
                    "graph" | "node" | "edge" if stack.last() != Some(&Level::Ignored) => {
                        if pending.is_some() {
                            return Err(ReadError::IncorrectNesting { line: number });
                        }
                        pending = Some(match token.as_str() {
                            "graph" => Level::Graph,
                            "node" => Level::Node,
                            _ => Level::Edge,
                        });
                    }
                    "[" => {
                        let level = pending
                            .take()
                            .ok_or_else(|| ReadError::parse(number, "'[' without a level keyword"))?;
                        stack.push(level);
                    }
                    "]" => {
                        if pending.is_some() {
                            return Err(ReadError::IncorrectNesting { line: number });
                        }
                        match stack.pop() {
                            None => return Err(ReadError::UnbalancedBracket { line: number }),
                            Some(Level::Node) => nodes.push(std::mem::take(&mut node)),
                            Some(Level::Edge) => edges.push((std::mem::take(&mut edge), number)),
                            Some(_) => {}
                        }
                    }
                    key => {
                        if pending.is_some() {
                            return Err(ReadError::IncorrectNesting { line: number });
                        }
                        let value = tokens
                            .next()
                            .ok_or_else(|| ReadError::parse(number, format!("key '{key}' has no value")))?;

                        if value == "[" {
                            stack.push(Level::Ignored);
                        } else {
                            match stack.last() {
                                Some(Level::Node) => set_node_attribute(&mut node, key, &value, number)?,
                                Some(Level::Edge) => set_edge_attribute(&mut edge, key, &value, number)?,
                                _ => debug!("Ignoring attribute '{key}' on line {number}"),
                            }
                        }
                    }
                }
                peeked = tokens.next();
            }
        }

        if pending.is_some() || !stack.is_empty() {
            return Err(ReadError::parse(last_line, "unexpected end of input inside an open level"));
        }

        build_network(nodes, edges)
    }
}

/// Split a line into tokens, keeping quoted strings together (without quotes)
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            chars.next();
            let mut token = String::new();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                token.push(c);
            }
            tokens.push(token);
        } else if c == '[' || c == ']' {
            chars.next();
            tokens.push(c.to_string());
        } else {
            let mut token = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || c == '[' || c == ']' {
                    break;
                }
                token.push(c);
                chars.next();
            }
            tokens.push(token);
        }
    }

    tokens
}

fn set_node_attribute(node: &mut Node, key: &str, value: &str, line: usize) -> Result<(), ReadError> {
    match key {
        "id" => node.id = Some(value.to_string()),
        "label" => node.label = Some(value.to_string()),
        "weight" => node.weight = Some(parse_value(value, line)?),
        _ => {}
    }
    Ok(())
}

fn set_edge_attribute(edge: &mut Edge, key: &str, value: &str, line: usize) -> Result<(), ReadError> {
    match key {
        "source" => edge.source = Some(value.to_string()),
        "target" => edge.target = Some(value.to_string()),
        "weight" => edge.weight = Some(parse_value(value, line)?),
        _ => {}
    }
    Ok(())
}

fn build_network(nodes: Vec<Node>, edges: Vec<(Edge, usize)>) -> Result<Network, ReadError> {
    let mut declared: HashMap<String, usize> = HashMap::new();
    for (i, node) in nodes.iter().enumerate() {
        let id = node.id.clone().ok_or_else(|| ReadError::parse(0, "node without an id"))?;
        if declared.insert(id.clone(), i).is_some() {
            return Err(ReadError::DuplicateVertex { id });
        }
    }

    let map = VertexMap::from_ids(declared.keys().cloned());
    let mut vertex_data = vec![0.0; map.len()];
    let mut labels = map.ids().to_vec();

    for node in &nodes {
        let Some(v) = node.id.as_deref().and_then(|id| map.get(id)) else {
            continue;
        };
        vertex_data[v] = node.weight.unwrap_or(0.0);
        if let Some(label) = &node.label {
            labels[v] = label.clone();
        }
    }

    let mut complex = SimplicialComplex::new();
    for (v, &data) in vertex_data.iter().enumerate() {
        complex.push(Simplex::vertex(v, data));
    }

    for (edge, line) in edges {
        let source = edge
            .source
            .ok_or_else(|| ReadError::parse(line, "edge without a source"))?;
        let target = edge
            .target
            .ok_or_else(|| ReadError::parse(line, "edge without a target"))?;

        let u = map
            .get(&source)
            .ok_or(ReadError::UnknownVertex { id: source })?;
        let v = map
            .get(&target)
            .ok_or(ReadError::UnknownVertex { id: target })?;

        if u == v {
            debug!("Skipping self-loop on vertex {u}");
            continue;
        }

        let weight = edge.weight.unwrap_or(vertex_data[u].max(vertex_data[v]));
        complex.push(Simplex::edge(u, v, weight));
    }

    info!(
        "Read {} nodes and {} edges",
        map.len(),
        complex.len() - map.len()
    );

    Ok(Network { complex, labels })
}

/// Writes the vertices and edges of a complex as an undirected GML graph
#[derive(Debug, Clone, Default)]
pub struct GmlWriter {
    labels: Option<Vec<String>>,
}

impl GmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a `label` for every vertex whose id is covered by `labels`
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn write(&self, path: impl AsRef<Path>, complex: &SimplicialComplex) -> io::Result<()> {
        let path = path.as_ref();
        info!("Writing GML graph to {}", path.display());

        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out, complex)?;
        out.flush()
    }

    pub fn write_to<W: Write>(&self, out: &mut W, complex: &SimplicialComplex) -> io::Result<()> {
        writeln!(out, "graph [")?;
        writeln!(out, "  directed 0")?;

        for s in complex.vertices() {
            let v = s.vertices()[0];
            writeln!(out, "  node [")?;
            writeln!(out, "    id {v}")?;
            if let Some(label) = self.labels.as_ref().and_then(|l| l.get(v)) {
                writeln!(out, "    label \"{label}\"")?;
            }
            writeln!(out, "    weight {}", s.data())?;
            writeln!(out, "  ]")?;
        }

        for s in complex.edges() {
            writeln!(out, "  edge [")?;
            writeln!(out, "    source {}", s.vertices()[0])?;
            writeln!(out, "    target {}", s.vertices()[1])?;
            writeln!(out, "    weight {}", s.data())?;
            writeln!(out, "  ]")?;
        }

        writeln!(out, "]")?;
        Ok(())
    }
}
