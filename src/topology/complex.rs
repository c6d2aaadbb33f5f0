//! Simplicial Complex Container
//!
//! An ordered collection of simplices that is unique by vertex set. The
//! order starts out as insertion order and is only changed by explicit
//! calls to [`SimplicialComplex::sort`] or [`SimplicialComplex::sort_by`].
//! After sorting with a filtration comparator every face precedes each of
//! its cofaces.
//!
//! Filtration values are replaced through keyed updates that keep the
//! relative order of all elements intact.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::filtrations;
use super::simplex::{Simplex, Vertex};
use crate::error::TopologyError;

/// Ordered set of simplices with lookup by vertex set
#[derive(Debug, Clone, Default)]
pub struct SimplicialComplex {
    simplices: Vec<Simplex>,
    /// Vertex set -> position in `simplices`
    index: HashMap<Vec<Vertex>, usize>,
}

impl SimplicialComplex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a complex from simplices in the given order.
    ///
    /// Later duplicates of an already present vertex set are ignored.
    pub fn from_simplices(simplices: impl IntoIterator<Item = Simplex>) -> Self {
        let mut complex = Self::new();
        for s in simplices {
            complex.push(s);
        }
        complex
    }

    /// Append a simplex; returns `false` if its vertex set is already present
    pub fn push(&mut self, simplex: Simplex) -> bool {
        if self.index.contains_key(simplex.vertices()) {
            return false;
        }

        self.index
            .insert(simplex.vertices().to_vec(), self.simplices.len());
        self.simplices.push(simplex);
        true
    }

    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// Largest simplex dimension, `None` for the empty complex
    pub fn dimension(&self) -> Option<usize> {
        self.simplices.iter().map(Simplex::dimension).max()
    }

    pub fn contains(&self, simplex: &Simplex) -> bool {
        self.index.contains_key(simplex.vertices())
    }

    pub fn contains_vertices(&self, vertices: &[Vertex]) -> bool {
        self.index.contains_key(vertices)
    }

    /// Current position of the simplex with the given (sorted) vertex set
    pub fn position(&self, vertices: &[Vertex]) -> Option<usize> {
        self.index.get(vertices).copied()
    }

    /// Simplex with the given (sorted) vertex set
    pub fn find(&self, vertices: &[Vertex]) -> Option<&Simplex> {
        self.position(vertices).map(|i| &self.simplices[i])
    }

    pub fn get(&self, position: usize) -> Option<&Simplex> {
        self.simplices.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Simplex> {
        self.simplices.iter()
    }

    pub fn as_slice(&self) -> &[Simplex] {
        &self.simplices
    }

    /// Iterator over the 0-simplices in current order
    pub fn vertices(&self) -> impl Iterator<Item = &Simplex> + '_ {
        self.simplices.iter().filter(|s| s.dimension() == 0)
    }

    /// Iterator over the 1-simplices in current order
    pub fn edges(&self) -> impl Iterator<Item = &Simplex> + '_ {
        self.simplices.iter().filter(|s| s.dimension() == 1)
    }

    /// Replace the filtration value of the simplex equal to `key`.
    ///
    /// Only the value changes; the element keeps its position and all
    /// other elements keep their relative order.
    pub fn update(&mut self, key: &Simplex, data: f64) -> Result<(), TopologyError> {
        let position = self
            .position(key.vertices())
            .ok_or_else(|| TopologyError::UnknownSimplex {
                vertices: key.vertices().to_vec(),
            })?;

        self.simplices[position].set_data(data);
        Ok(())
    }

    /// Replace the filtration value of the simplex at `position`
    pub(crate) fn update_at(&mut self, position: usize, data: f64) {
        self.simplices[position].set_data(data);
    }

    /// Sort with the standard data filtration
    pub fn sort(&mut self) {
        self.sort_by(filtrations::data_order);
    }

    /// Sort with an arbitrary comparator; the sort is stable
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Simplex, &Simplex) -> Ordering,
    {
        self.simplices.sort_by(compare);
        self.rebuild_index();
    }

    /// Check that every face of every simplex is present and precedes it
    pub fn check_filtration(&self) -> Result<(), TopologyError> {
        for (position, simplex) in self.simplices.iter().enumerate() {
            for face in simplex.faces() {
                match self.position(&face) {
                    None => {
                        return Err(TopologyError::MissingFace {
                            simplex: simplex.vertices().to_vec(),
                            face,
                        })
                    }
                    Some(face_index) if face_index >= position => {
                        return Err(TopologyError::FaceOrder {
                            simplex: simplex.vertices().to_vec(),
                            simplex_index: position,
                            face,
                            face_index,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, s) in self.simplices.iter().enumerate() {
            self.index.insert(s.vertices().to_vec(), i);
        }
    }
}

impl FromIterator<Simplex> for SimplicialComplex {
    fn from_iter<I: IntoIterator<Item = Simplex>>(iter: I) -> Self {
        Self::from_simplices(iter)
    }
}

impl<'a> IntoIterator for &'a SimplicialComplex {
    type Item = &'a Simplex;
    type IntoIter = std::slice::Iter<'a, Simplex>;

    fn into_iter(self) -> Self::IntoIter {
        self.simplices.iter()
    }
}

impl IntoIterator for SimplicialComplex {
    type Item = Simplex;
    type IntoIter = std::vec::IntoIter<Simplex>;

    fn into_iter(self) -> Self::IntoIter {
        self.simplices.into_iter()
    }
}
