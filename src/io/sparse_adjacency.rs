//! Graph Collections as Sparse Adjacency Matrices
//!
//! A data set of many small graphs is spread over several files sharing a
//! common prefix:
//!
//! | File | Content |
//! |---|---|
//! | `<PREFIX>_A.txt` | one `i, j` node pair per line (global, one-based node ids) |
//! | `<PREFIX>_graph_indicator.txt` | line `i` holds the graph id of node `i` |
//! | `<PREFIX>_graph_labels.txt` | one label per graph, in ascending graph-id order (optional) |
//! | `<PREFIX>_node_labels.txt` | line `i` holds the label of node `i` (optional) |
//!
//! Every graph becomes its own 1-skeleton with local dense vertex ids that
//! follow the global node order. All simplices have weight 0; callers
//! assign a filtration afterwards, e.g. by vertex degree.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::ReadError;
use crate::topology::{Simplex, SimplicialComplex};

const ADJACENCY_SUFFIX: &str = "_A.txt";

/// Everything read from one graph collection
#[derive(Debug, Default)]
pub struct SparseAdjacencyData {
    /// One 1-skeleton per graph, in ascending graph-id order. A graph with
    /// an edge that crosses graphs or names an unknown node holds the
    /// first such error instead.
    pub graphs: Vec<Result<SimplicialComplex, ReadError>>,
    /// Graph labels, empty unless requested and present
    pub graph_labels: Vec<String>,
    /// Node labels per graph, indexed by local vertex id; empty unless
    /// requested and present
    pub node_labels: Vec<Vec<String>>,
}

/// Reader for `<PREFIX>_A.txt` graph collections
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseAdjacencyMatrixReader {
    read_graph_labels: bool,
    read_node_labels: bool,
}

impl SparseAdjacencyMatrixReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graph_labels(mut self, value: bool) -> Self {
        self.read_graph_labels = value;
        self
    }

    pub fn with_node_labels(mut self, value: bool) -> Self {
        self.read_node_labels = value;
        self
    }

    /// Read the collection whose adjacency file is `path`
    pub fn read(&self, path: impl AsRef<Path>) -> Result<SparseAdjacencyData, ReadError> {
        let path = path.as_ref();
        let prefix = prefix(path)?;

        info!("Reading graph collection from {}", path.display());

        let indicator = read_lines(&sibling(&prefix, "_graph_indicator.txt"))?;
        let mut node_graph = Vec::with_capacity(indicator.len());
        for (line, token) in &indicator {
            let id = token
                .parse::<i64>()
                .map_err(|_| ReadError::parse(*line, format!("invalid graph id '{token}'")))?;
            node_graph.push(id);
        }

        // Graph id -> nodes in ascending global order
        let mut members: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for (node, &graph) in node_graph.iter().enumerate() {
            members.entry(graph).or_default().push(node);
        }

        let mut graph_of = vec![0; node_graph.len()];
        let mut local_id = vec![0; node_graph.len()];
        let mut graphs = Vec::with_capacity(members.len());

        for (g, nodes) in members.values().enumerate() {
            let mut complex = SimplicialComplex::new();
            for (local, &node) in nodes.iter().enumerate() {
                graph_of[node] = g;
                local_id[node] = local;
                complex.push(Simplex::vertex(local, 0.0));
            }
            graphs.push(complex);
        }

        // A bad edge only invalidates the graphs it touches
        let mut failures: Vec<Option<ReadError>> = (0..graphs.len()).map(|_| None).collect();
        let count = node_graph.len();

        for (line, text) in read_lines(path)? {
            let (a, b) = text
                .split_once(',')
                .ok_or_else(|| ReadError::parse(line, "expected a pair 'i, j'"))?;

            let (u, v) = match (node_index(a.trim(), count), node_index(b.trim(), count)) {
                (Ok(u), Ok(v)) => (u, v),
                (Ok(known), Err(e)) | (Err(e), Ok(known)) => {
                    reject(&mut failures, graph_of[known], line, e);
                    continue;
                }
                (Err(e), Err(_)) => return Err(e),
            };

            if graph_of[u] != graph_of[v] {
                let message = format!("edge between nodes {} and {} crosses graphs", u + 1, v + 1);
                for g in [graph_of[u], graph_of[v]] {
                    reject(&mut failures, g, line, ReadError::parse(line, message.clone()));
                }
                continue;
            }
            if u != v {
                graphs[graph_of[u]].push(Simplex::edge(local_id[u], local_id[v], 0.0));
            }
        }

        let graphs: Vec<Result<SimplicialComplex, ReadError>> = graphs
            .into_iter()
            .zip(failures)
            .map(|(complex, failure)| match failure {
                Some(e) => Err(e),
                None => Ok(complex),
            })
            .collect();

        let graph_labels = if self.read_graph_labels {
            let file = sibling(&prefix, "_graph_labels.txt");
            if file.exists() {
                read_lines(&file)?.into_iter().map(|(_, label)| label).collect()
            } else {
                Vec::new()
            }
        } else {
            Vec::new()
        };

        let node_labels = if self.read_node_labels {
            let file = sibling(&prefix, "_node_labels.txt");
            if file.exists() {
                let labels: Vec<String> = read_lines(&file)?.into_iter().map(|(_, l)| l).collect();
                members
                    .values()
                    .map(|nodes| {
                        nodes
                            .iter()
                            .map(|&node| labels.get(node).cloned().unwrap_or_default())
                            .collect()
                    })
                    .collect()
            } else {
                Vec::new()
            }
        } else {
            Vec::new()
        };

        info!(
            "Read {} graphs, {} of them malformed",
            graphs.len(),
            graphs.iter().filter(|g| g.is_err()).count()
        );

        Ok(SparseAdjacencyData {
            graphs,
            graph_labels,
            node_labels,
        })
    }
}

/// `<dir>/<PREFIX>` for an adjacency file `<dir>/<PREFIX>_A.txt`
fn prefix(path: &Path) -> Result<PathBuf, ReadError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(ADJACENCY_SUFFIX))
        .ok_or_else(|| {
            ReadError::parse(
                0,
                format!("'{}' does not end in '{ADJACENCY_SUFFIX}'", path.display()),
            )
        })?;

    Ok(path.with_file_name(name))
}

fn sibling(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Trimmed non-empty lines with their one-based line numbers
fn read_lines(path: &Path) -> Result<Vec<(usize, String)>, ReadError> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push((i + 1, line.to_string()));
        }
    }
    Ok(lines)
}

/// Keep the first error recorded against graph `g`
fn reject(failures: &mut [Option<ReadError>], g: usize, line: usize, error: ReadError) {
    if failures[g].is_none() {
        warn!("Graph {g} rejected because of line {line}: {error}");
        failures[g] = Some(error);
    }
}

/// One-based global node id to zero-based index
fn node_index(token: &str, count: usize) -> Result<usize, ReadError> {
    match token.parse::<usize>() {
        Ok(id) if (1..=count).contains(&id) => Ok(id - 1),
        _ => Err(ReadError::UnknownVertex { id: token.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_collection(dir: &Path) -> PathBuf {
        // graph 1: path 1-2-3, graph 2: edge 4-5 (both directions listed)
        fs::write(dir.join("TOY_A.txt"), "1, 2\n2, 1\n2, 3\n3, 2\n4, 5\n5, 4\n").unwrap();
        fs::write(dir.join("TOY_graph_indicator.txt"), "1\n1\n1\n2\n2\n").unwrap();
        fs::write(dir.join("TOY_graph_labels.txt"), "-1\n1\n").unwrap();
        fs::write(dir.join("TOY_node_labels.txt"), "a\nb\nc\nd\ne\n").unwrap();
        dir.join("TOY_A.txt")
    }

    #[test]
    fn test_read_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_collection(dir.path());

        let data = SparseAdjacencyMatrixReader::new()
            .with_graph_labels(true)
            .with_node_labels(true)
            .read(&path)
            .unwrap();

        assert_eq!(data.graphs.len(), 2);
        let first = data.graphs[0].as_ref().unwrap();
        let second = data.graphs[1].as_ref().unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(second.len(), 3);
        assert!(second.contains_vertices(&[0, 1]));

        assert_eq!(data.graph_labels, vec!["-1", "1"]);
        assert_eq!(data.node_labels[1], vec!["d", "e"]);
    }

    #[test]
    fn test_labels_are_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_collection(dir.path());

        let data = SparseAdjacencyMatrixReader::new().read(&path).unwrap();
        assert!(data.graph_labels.is_empty());
        assert!(data.node_labels.is_empty());
    }

    /// Three graphs of two nodes each: {1, 2}, {3, 4} and {5, 6}
    fn write_pairs(dir: &Path, edges: &str) -> PathBuf {
        fs::write(dir.join("PAIRS_A.txt"), edges).unwrap();
        fs::write(dir.join("PAIRS_graph_indicator.txt"), "1\n1\n2\n2\n3\n3\n").unwrap();
        dir.join("PAIRS_A.txt")
    }

    #[test]
    fn test_cross_graph_edge() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pairs(dir.path(), "1, 2\n3, 4\n5, 4\n5, 6\n");

        let data = SparseAdjacencyMatrixReader::new().read(&path).unwrap();

        assert_eq!(data.graphs.len(), 3);
        let first = data.graphs[0].as_ref().unwrap();
        assert!(first.contains_vertices(&[0, 1]));
        assert!(matches!(data.graphs[1], Err(ReadError::Parse { line: 3, .. })));
        assert!(matches!(data.graphs[2], Err(ReadError::Parse { line: 3, .. })));
    }

    #[test]
    fn test_unknown_node_rejects_its_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pairs(dir.path(), "1, 2\n3, 9\n5, 6\n");

        let data = SparseAdjacencyMatrixReader::new().read(&path).unwrap();

        assert!(data.graphs[0].is_ok());
        assert!(matches!(&data.graphs[1], Err(ReadError::UnknownVertex { id }) if id == "9"));
        assert_eq!(data.graphs[2].as_ref().unwrap().edges().count(), 1);
    }

    #[test]
    fn test_edge_without_known_node_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pairs(dir.path(), "1, 2\n8, 9\n");

        let err = SparseAdjacencyMatrixReader::new().read(&path).unwrap_err();
        assert!(matches!(err, ReadError::UnknownVertex { .. }));
    }

    #[test]
    fn test_requires_adjacency_suffix() {
        let err = SparseAdjacencyMatrixReader::new().read("graphs.txt").unwrap_err();
        assert!(matches!(err, ReadError::Parse { .. }));
    }
}
