//! Simplices
//!
//! A simplex is a finite set of vertex identifiers together with a single
//! scalar filtration value ("data"). The vertex set determines identity;
//! the data value can be replaced without changing which simplex it is.
//!
//! The boundary of a d-simplex [v₀, ..., v_d] consists of the d+1 faces
//! [v₀, ..., v̂ᵢ, ..., v_d], each obtained by omitting one vertex. Over
//! Z/2Z the orientation sign (-1)ⁱ is irrelevant.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::TopologyError;

/// Vertex identifier
pub type Vertex = usize;

/// A simplex: sorted, duplicate-free vertex set plus a filtration value
#[derive(Debug, Clone)]
pub struct Simplex {
    vertices: Vec<Vertex>,
    data: f64,
}

impl Simplex {
    /// Create a simplex from an arbitrary collection of vertices.
    ///
    /// The vertices form a set: they are sorted and repeated identifiers
    /// collapse into one. An empty collection is rejected, so every
    /// simplex has a dimension.
    pub fn new(
        vertices: impl IntoIterator<Item = Vertex>,
        data: f64,
    ) -> Result<Self, TopologyError> {
        let vertices: Vec<Vertex> = vertices.into_iter().collect();
        if vertices.is_empty() {
            return Err(TopologyError::EmptySimplex);
        }
        Ok(Self::from_vertex_set(vertices, data))
    }

    /// Caller guarantees `vertices` is non-empty
    pub(crate) fn from_vertex_set(mut vertices: Vec<Vertex>, data: f64) -> Self {
        vertices.sort_unstable();
        vertices.dedup();
        Self { vertices, data }
    }

    /// 0-simplex
    pub fn vertex(v: Vertex, data: f64) -> Self {
        Self {
            vertices: vec![v],
            data,
        }
    }

    /// 1-simplex
    pub fn edge(u: Vertex, v: Vertex, data: f64) -> Self {
        Self::from_vertex_set(vec![u, v], data)
    }

    /// Sorted vertex set
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of vertices minus one
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Filtration value
    pub fn data(&self) -> f64 {
        self.data
    }

    /// Replace the filtration value
    pub fn set_data(&mut self, data: f64) {
        self.data = data;
    }

    /// Copy of this simplex carrying a different filtration value
    pub fn with_data(&self, data: f64) -> Self {
        Self {
            vertices: self.vertices.clone(),
            data,
        }
    }

    pub fn contains(&self, v: Vertex) -> bool {
        self.vertices.binary_search(&v).is_ok()
    }

    /// Codimension-1 faces, in order of the omitted vertex position.
    ///
    /// Faces are returned as vertex sets; a 0-simplex has no faces.
    pub fn faces(&self) -> impl Iterator<Item = Vec<Vertex>> + '_ {
        let n = if self.vertices.len() > 1 { self.vertices.len() } else { 0 };
        (0..n).map(move |omitted| {
            self.vertices
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != omitted)
                .map(|(_, &v)| v)
                .collect()
        })
    }

    /// Check whether `self` is a proper face of `other`
    pub fn is_face_of(&self, other: &Simplex) -> bool {
        self.vertices.len() < other.vertices.len()
            && self.vertices.iter().all(|&v| other.contains(v))
    }

    /// Lexicographic comparison of the vertex sets
    pub fn cmp_vertices(&self, other: &Simplex) -> Ordering {
        self.vertices.cmp(&other.vertices)
    }
}

impl PartialEq for Simplex {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}

impl Eq for Simplex {}

impl Hash for Simplex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vertices.hash(state);
    }
}

impl fmt::Display for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}} ({})", self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vertices_are_a_sorted_set() {
        let s = Simplex::new([3, 1, 2, 1], 0.5).unwrap();
        assert_eq!(s.vertices(), &[1, 2, 3]);
        assert_eq!(s.dimension(), 2);
    }

    #[test]
    fn test_empty_vertex_set_is_rejected() {
        let err = Simplex::new(Vec::<Vertex>::new(), 1.0).unwrap_err();
        assert_eq!(err, TopologyError::EmptySimplex);
    }

    #[test]
    fn test_identity_ignores_data() {
        let a = Simplex::edge(0, 1, 1.0);
        let b = Simplex::edge(1, 0, 7.0);
        assert_eq!(a, b);

        let set: HashSet<Simplex> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_faces_of_triangle() {
        let s = Simplex::new([0, 1, 2], 0.0).unwrap();
        let faces: Vec<_> = s.faces().collect();
        assert_eq!(faces, vec![vec![1, 2], vec![0, 2], vec![0, 1]]);
    }

    #[test]
    fn test_vertex_has_no_faces() {
        assert_eq!(Simplex::vertex(4, 0.0).faces().count(), 0);
    }

    #[test]
    fn test_face_relation() {
        let edge = Simplex::edge(0, 2, 0.0);
        let triangle = Simplex::new([0, 1, 2], 0.0).unwrap();
        assert!(edge.is_face_of(&triangle));
        assert!(!triangle.is_face_of(&edge));
        assert!(!triangle.is_face_of(&triangle));
    }

    #[test]
    fn test_set_data_replaces_value() {
        let mut s = Simplex::vertex(0, 1.0);
        s.set_data(3.0);
        assert_eq!(s.data(), 3.0);
        assert_eq!(s.with_data(5.0).data(), 5.0);
    }
}
