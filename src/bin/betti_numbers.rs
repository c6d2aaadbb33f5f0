//! Betti Numbers of a Series of Graphs
//!
//! Reads GML graphs whose file names carry a numeric id (for example
//! `graph_017.gml`), computes the persistent homology of each graph and
//! prints `id<TAB>β₁` sorted by id. β₁ counts the independent cycles that
//! are never filled, i.e. the unpaired points of the dimension-1 diagram.
//!
//! A file that cannot be read, has no edges or carries no id is reported
//! and skipped; the remaining files are still printed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};

use tda_persistence::io::GmlReader;
use tda_persistence::topology::filtrations::dimension_order;
use tda_persistence::{calculate_persistence_diagrams, ReductionOptions};

#[derive(Debug, Parser)]
#[command(about = "First Betti number of every GML graph, keyed by the id in its file name")]
struct Args {
    /// GML files, each with a number somewhere in its name
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

/// First run of digits in the file name
fn data_set_id(path: &Path) -> Option<u64> {
    let name = path.file_name()?.to_str()?;
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: String = name[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// β₁ of one GML graph, keyed by the id in its file name.
///
/// β₁ only depends on the combinatorics of the graph, so the simplices are
/// ordered by dimension and the weights are ignored.
fn betti_of(reader: &GmlReader, file: &Path) -> Result<(u64, usize)> {
    let Some(id) = data_set_id(file) else {
        bail!("Unable to identify ID of '{}'", file.display());
    };

    let mut complex = reader
        .read(file)
        .with_context(|| format!("Unable to read '{}'", file.display()))?
        .complex;
    complex.sort_by(dimension_order);

    let diagrams = calculate_persistence_diagrams(&complex, ReductionOptions::default())?;
    if diagrams.len() != 2 {
        bail!("Graph '{}' must have at least one edge", file.display());
    }

    Ok((id, diagrams[1].betti()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let reader = GmlReader::new();
    let mut id_to_betti: BTreeMap<u64, usize> = BTreeMap::new();

    for file in &args.files {
        info!("Processing '{}'", file.display());

        match betti_of(&reader, file) {
            Ok((id, betti)) => {
                id_to_betti.insert(id, betti);
            }
            Err(e) => warn!("Skipping '{}': {e:#}", file.display()),
        }
    }

    for (id, betti) in id_to_betti {
        println!("{id}\t{betti}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Triangle whose vertices are heavier than its edges
    const HEAVY_VERTICES: &str = "graph [
  node [ id 0 weight 5 ]
  node [ id 1 weight 5 ]
  node [ id 2 weight 5 ]
  edge [ source 0 target 1 weight 1 ]
  edge [ source 1 target 2 weight 1 ]
  edge [ source 0 target 2 weight 1 ]
]
";

    #[test]
    fn test_data_set_id() {
        assert_eq!(data_set_id(Path::new("runs/2/graph_017.gml")), Some(17));
        assert_eq!(data_set_id(Path::new("graph.gml")), None);
    }

    #[test]
    fn test_weights_do_not_affect_betti() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph_3.gml");
        fs::write(&path, HEAVY_VERTICES).unwrap();

        assert_eq!(betti_of(&GmlReader::new(), &path).unwrap(), (3, 1));
    }

    #[test]
    fn test_failures_are_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("graph_1.gml");
        let no_id = dir.path().join("graph.gml");
        let no_edges = dir.path().join("graph_2.gml");
        let missing = dir.path().join("graph_4.gml");
        fs::write(&good, HEAVY_VERTICES).unwrap();
        fs::write(&no_id, HEAVY_VERTICES).unwrap();
        fs::write(&no_edges, "graph [ node [ id 0 ] ]\n").unwrap();

        let reader = GmlReader::new();
        assert!(betti_of(&reader, &no_id).is_err());
        assert!(betti_of(&reader, &no_edges).is_err());
        assert!(betti_of(&reader, &missing).is_err());
        assert_eq!(betti_of(&reader, &good).unwrap(), (1, 1));
    }
}
