//! Error Types
//!
//! Two families of failures exist:
//!
//! - [`TopologyError`]: a complex violates a precondition of an algorithm
//!   (unknown simplex, missing face, face sorted after its coface).
//! - [`ReadError`]: an input file is unreadable or malformed.
//!
//! Both are fatal for the complex or file at hand. Batch tools isolate them
//! per item and keep going.

use thiserror::Error;

use crate::topology::Vertex;

/// Precondition violations detected on a simplicial complex.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TopologyError {
    /// A simplex was requested without any vertex.
    #[error("A simplex needs at least one vertex")]
    EmptySimplex,

    /// A keyed lookup or update referenced a simplex that is not present.
    #[error("Simplex {vertices:?} is not part of the simplicial complex")]
    UnknownSimplex {
        /// Vertex set of the simplex that was queried
        vertices: Vec<Vertex>,
    },

    /// The complex is not closed under taking faces.
    #[error("Face {face:?} of simplex {simplex:?} is missing from the simplicial complex")]
    MissingFace {
        /// Vertex set of the simplex whose boundary was requested
        simplex: Vec<Vertex>,
        /// Vertex set of the absent face
        face: Vec<Vertex>,
    },

    /// The ordering of the complex is not a filtration.
    #[error(
        "Face {face:?} at position {face_index} does not precede its coface {simplex:?} at position {simplex_index}"
    )]
    FaceOrder {
        /// Vertex set of the coface
        simplex: Vec<Vertex>,
        /// Position of the coface
        simplex_index: usize,
        /// Vertex set of the face
        face: Vec<Vertex>,
        /// Position of the face
        face_index: usize,
    },

    /// A per-vertex value table does not cover every vertex id.
    #[error("Vertex {vertex} has no value; only {available} values were supplied")]
    VertexOutOfRange {
        /// Offending vertex id
        vertex: Vertex,
        /// Number of supplied values
        available: usize,
    },
}

/// Failures while reading graphs, matrices or persistence diagrams.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Underlying I/O failure
    #[error("Unable to read input: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// One-based line number
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// The same vertex identifier was declared twice
    #[error("Encountered duplicate node ID '{id}'")]
    DuplicateVertex {
        /// Textual identifier as found in the file
        id: String,
    },

    /// An edge referenced an identifier that was never declared
    #[error("Querying unknown vertex '{id}' for edge creation")]
    UnknownVertex {
        /// Textual identifier as found in the file
        id: String,
    },

    /// A level keyword appeared while another level was still pending
    #[error("Encountered incorrectly-nested levels on line {line}")]
    IncorrectNesting {
        /// One-based line number
        line: usize,
    },

    /// A closing bracket appeared without a matching opening bracket
    #[error("Unbalanced closing bracket on line {line}")]
    UnbalancedBracket {
        /// One-based line number
        line: usize,
    },

    /// An edge has no weight and weights were required
    #[error("Edge on line {line} has no weight")]
    MissingWeight {
        /// One-based line number
        line: usize,
    },

    /// Matrix rows of differing width
    #[error("Format error: number of columns must not vary (line {line}: expected {expected}, found {found})")]
    ColumnMismatch {
        /// One-based line number
        line: usize,
        /// Width of the first row
        expected: usize,
        /// Width of the offending row
        found: usize,
    },
}

impl ReadError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_simplex() {
        let err = TopologyError::MissingFace {
            simplex: vec![0, 1, 2],
            face: vec![1, 2],
        };
        let message = err.to_string();
        assert!(message.contains("[1, 2]"));
        assert!(message.contains("[0, 1, 2]"));
    }

    #[test]
    fn test_io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ReadError = io.into();
        assert!(matches!(err, ReadError::Io(_)));
    }
}
