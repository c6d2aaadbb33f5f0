//! Persistence Diagram Text Files
//!
//! ```text
//! # Original filename: graphs/karate.gml
//! # d                : 1
//! 0.25	0.5
//! 0.5	inf
//! ```
//!
//! Values are written with the shortest representation that parses back
//! to the same `f64`, so a written diagram reads back unchanged.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use super::parse_value;
use crate::error::ReadError;
use crate::topology::PersistenceDiagram;

/// Write `diagram` to `path`, recording `original` as its source
pub fn write_diagram(
    path: impl AsRef<Path>,
    diagram: &PersistenceDiagram,
    original: &str,
) -> io::Result<()> {
    let path = path.as_ref();
    info!(
        "Storing persistence diagram of dimension {} in {}",
        diagram.dimension(),
        path.display()
    );

    let mut out = BufWriter::new(File::create(path)?);
    write_diagram_to(&mut out, diagram, original)?;
    out.flush()
}

pub fn write_diagram_to<W: Write>(
    out: &mut W,
    diagram: &PersistenceDiagram,
    original: &str,
) -> io::Result<()> {
    writeln!(out, "# Original filename: {original}")?;
    writeln!(out, "# d                : {}", diagram.dimension())?;
    for point in diagram {
        writeln!(out, "{}\t{}", point.x, point.y)?;
    }
    Ok(())
}

pub fn read_diagram(path: impl AsRef<Path>) -> Result<PersistenceDiagram, ReadError> {
    read_diagram_from(BufReader::new(File::open(path.as_ref())?))
}

/// Read a diagram; its dimension comes from the `# d` header line, or is
/// 0 when the header is absent
pub fn read_diagram_from<R: BufRead>(reader: R) -> Result<PersistenceDiagram, ReadError> {
    let mut diagram = PersistenceDiagram::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let number = i + 1;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if let Some(dimension) = parse_dimension(comment) {
                diagram.set_dimension(dimension);
            }
            continue;
        }

        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(x), Some(y)) => diagram.add(parse_value(x, number)?, parse_value(y, number)?),
            _ => return Err(ReadError::parse(number, "expected two values")),
        }
    }

    Ok(diagram)
}

fn parse_dimension(comment: &str) -> Option<usize> {
    let rest = comment.trim_start().strip_prefix('d')?;
    let (key, value) = rest.split_once(':')?;
    if !key.trim().is_empty() {
        return None;
    }
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_format() {
        let mut diagram = PersistenceDiagram::new(1);
        diagram.add(0.25, 0.5);
        diagram.add_unpaired(0.5);

        let mut buffer = Vec::new();
        write_diagram_to(&mut buffer, &diagram, "karate.gml").unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "# Original filename: karate.gml\n# d                : 1\n0.25\t0.5\n0.5\tinf\n"
        );
    }

    #[test]
    fn test_read_accepts_any_whitespace() {
        let input = "# Original filename: x\n# d                : 2\n\n1 2\n3    inf\n";
        let diagram = read_diagram_from(input.as_bytes()).unwrap();

        assert_eq!(diagram.dimension(), 2);
        assert_eq!(diagram.len(), 2);
        assert!(diagram.points()[1].is_unpaired());
    }

    #[test]
    fn test_other_comments_keep_dimension() {
        let input = "# dimension is not a header\n0 1\n";
        let diagram = read_diagram_from(input.as_bytes()).unwrap();
        assert_eq!(diagram.dimension(), 0);
    }

    #[test]
    fn test_malformed_line() {
        let err = read_diagram_from("0.5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ReadError::Parse { line: 1, .. }));
    }
}
