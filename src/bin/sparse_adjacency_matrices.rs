//! Sparse Adjacency Matrices: Persistent Homology of Graph Collections
//!
//! Loads a collection of graphs stored as sparse adjacency matrices and
//! computes the persistent homology of every graph under a degree-based
//! filtration.
//!
//! ## Protocol
//!
//! 1. Read `<PREFIX>_A.txt` plus indicator and label files
//! 2. Optionally store closeness centrality per graph
//! 3. Expand every graph to dimension D (if D > 0)
//! 4. Filtrate by vertex degree: maximum (default) or sum of degrees
//! 5. Optionally export every filtered graph as GML with node labels
//! 6. Reduce; unpaired points are shown at I × maximum degree
//! 7. Write `<index>_d<dim>.txt` per graph and `Labels.txt`
//!
//! Graphs are processed in parallel. A graph that is malformed in the
//! input or fails later is reported and skipped; output names always
//! follow the input index.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;

use tda_persistence::io::{
    format_index, write_diagram, GmlWriter, SparseAdjacencyData, SparseAdjacencyMatrixReader,
};
use tda_persistence::topology::filtrations::degrees;
use tda_persistence::topology::closeness_centrality;
use tda_persistence::{
    calculate_persistence_diagrams, PersistenceDiagram, ReductionOptions, RipsExpander,
    SimplicialComplex, TopologyError,
};

#[derive(Debug, Parser)]
#[command(about = "Persistent homology of graph collections under a degree filtration")]
struct Args {
    /// Adjacency file of the collection, `<PREFIX>_A.txt`
    file: PathBuf,

    /// Expand simplicial complexes up to this dimension (0 keeps graphs)
    #[arg(short, long, default_value_t = 0)]
    dimension: usize,

    /// Unpaired points are shown at this multiple of the maximum degree
    #[arg(short = 'f', long, default_value_t = 2.0)]
    infinity: f64,

    /// Output directory (defaults to the system temporary directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Store closeness centrality values of every graph
    #[arg(short, long)]
    closeness_centrality: bool,

    /// Store every filtered graph in GML format
    #[arg(short, long)]
    graphs: bool,

    /// Use the sum of degrees instead of their maximum
    #[arg(short, long)]
    sum: bool,
}

/// A graph after the degree filtration has been assigned
struct Filtered {
    complex: SimplicialComplex,
    max_degree: f64,
}

fn filtrate(graph: &SimplicialComplex, dimension: usize, sum: bool) -> Result<Filtered, TopologyError> {
    let expander = RipsExpander::new();
    let complex = if dimension != 0 {
        expander.expand(graph, dimension)
    } else {
        graph.clone()
    };

    let degrees = degrees(&complex);
    let max_degree = degrees.iter().copied().fold(0.0, f64::max);

    let mut complex = if sum {
        expander.assign_data(&complex, &degrees, 0.0, |a, b| a + b)?
    } else {
        expander.assign_maximum_data(&complex, &degrees)?
    };
    complex.sort();

    Ok(Filtered { complex, max_degree })
}

fn write_lines<T: std::fmt::Display>(path: &Path, values: &[T]) -> Result<()> {
    let mut out = BufWriter::new(
        File::create(path).with_context(|| format!("Unable to create '{}'", path.display()))?,
    );
    for value in values {
        writeln!(out, "{value}")?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let output = args.output.clone().unwrap_or_else(std::env::temp_dir);
    fs::create_dir_all(&output)?;

    let SparseAdjacencyData {
        graphs,
        graph_labels,
        node_labels,
    } = SparseAdjacencyMatrixReader::new()
        .with_graph_labels(true)
        .with_node_labels(true)
        .read(&args.file)
        .with_context(|| format!("Unable to read '{}'", args.file.display()))?;

    let n = graphs.len();
    info!("Read {n} simplicial complexes");

    // Closeness centrality --------------------------------------------

    if args.closeness_centrality {
        for (index, graph) in graphs.iter().enumerate() {
            let Ok(graph) = graph else { continue };
            let path = output.join(format!("{}_closeness_centrality.txt", format_index(index, n)));
            info!("Storing closeness centrality values in '{}'", path.display());
            write_lines(&path, &closeness_centrality(graph))?;
        }
    }

    // Degree filtration -----------------------------------------------

    info!("Calculating degree-based filtration");

    let filtered: Vec<(usize, anyhow::Result<Filtered>)> = graphs
        .into_par_iter()
        .enumerate()
        .map(|(index, graph)| {
            let result = graph
                .map_err(anyhow::Error::from)
                .and_then(|g| Ok(filtrate(&g, args.dimension, args.sum)?));
            (index, result)
        })
        .collect();

    let max_degree = filtered
        .iter()
        .filter_map(|(_, f)| f.as_ref().ok())
        .map(|f| f.max_degree)
        .fold(0.0, f64::max);

    info!("Identified maximum degree as D={max_degree}");

    // Graphs ----------------------------------------------------------

    if args.graphs {
        for (index, result) in &filtered {
            let Ok(f) = result else { continue };
            let path = output.join(format!("{}.gml", format_index(*index, n)));

            let mut writer = GmlWriter::new();
            if let Some(labels) = node_labels.get(*index) {
                writer = writer.with_labels(labels.clone());
            }
            writer
                .write(&path, &f.complex)
                .with_context(|| format!("Unable to write '{}'", path.display()))?;
        }
    }

    // Persistent homology ---------------------------------------------

    let infinity = args.infinity * max_degree;

    let diagrams: Vec<(usize, anyhow::Result<Vec<PersistenceDiagram>>)> = filtered
        .into_par_iter()
        .map(|(index, result)| {
            let diagrams = result.and_then(|f| {
                Ok(calculate_persistence_diagrams(&f.complex, ReductionOptions::default())?)
            });
            (index, diagrams)
        })
        .collect();

    let mut failures = 0;
    for (index, result) in diagrams {
        let mut diagrams = match result {
            Ok(diagrams) => diagrams,
            Err(e) => {
                warn!("Skipping graph {index}: {e:#}");
                failures += 1;
                continue;
            }
        };

        for diagram in &mut diagrams {
            diagram.remove_diagonal();

            let path = output.join(format!(
                "{}_d{}.txt",
                format_index(index, n),
                diagram.dimension()
            ));
            write_diagram(&path, &diagram.with_unpaired_death(infinity), &args.file.display().to_string())
                .with_context(|| format!("Unable to write '{}'", path.display()))?;
        }
    }

    // Labels ----------------------------------------------------------

    let path = output.join("Labels.txt");
    info!("Storing labels in '{}'", path.display());
    write_lines(&path, &graph_labels)?;

    if failures > 0 {
        warn!("{failures} of {n} graphs could not be processed");
    }

    Ok(())
}
