//! Persistence Diagrams
//!
//! A persistence diagram collects the (birth, death) points of one
//! homological dimension. A point (b, d) represents a topological feature
//! that is born at filtration value b and dies at d.
//!
//! ## Interpretation
//!
//! - Long-lived points (large d - b) represent robust topological structure
//! - Points on the diagonal (b = d) carry no information and are removed
//! - Unpaired points (d = +∞) are essential classes of the complex
//!
//! The finite value displayed for unpaired points is a presentation choice
//! made by the caller, see [`PersistenceDiagram::with_unpaired_death`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point of a persistence diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Birth value
    pub x: f64,
    /// Death value, `f64::INFINITY` if unpaired
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn unpaired(x: f64) -> Self {
        Self { x, y: f64::INFINITY }
    }

    pub fn birth(&self) -> f64 {
        self.x
    }

    pub fn death(&self) -> f64 {
        self.y
    }

    /// Lifetime of the feature
    pub fn persistence(&self) -> f64 {
        self.y - self.x
    }

    /// Is this an essential feature (infinite persistence)?
    pub fn is_unpaired(&self) -> bool {
        self.y.is_infinite()
    }
}

/// Persistence diagram of a single dimension
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersistenceDiagram {
    dimension: usize,
    points: Vec<Point>,
}

impl PersistenceDiagram {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            points: Vec::new(),
        }
    }

    pub fn from_points(dimension: usize, points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            dimension,
            points: points.into_iter().collect(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn set_dimension(&mut self, dimension: usize) {
        self.dimension = dimension;
    }

    pub fn add(&mut self, x: f64, y: f64) {
        self.points.push(Point::new(x, y));
    }

    pub fn add_unpaired(&mut self, x: f64) {
        self.points.push(Point::unpaired(x));
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Remove all points with birth == death
    pub fn remove_diagonal(&mut self) {
        self.points.retain(|p| p.x != p.y);
    }

    /// Remove all unpaired points
    pub fn remove_unpaired(&mut self) {
        self.points.retain(|p| !p.is_unpaired());
    }

    /// Number of unpaired points, i.e. the Betti number of the complex
    pub fn betti(&self) -> usize {
        self.points.iter().filter(|p| p.is_unpaired()).count()
    }

    /// Copy in which every unpaired point dies at `value`
    pub fn with_unpaired_death(&self, value: f64) -> Self {
        Self {
            dimension: self.dimension,
            points: self
                .points
                .iter()
                .map(|p| if p.is_unpaired() { Point::new(p.x, value) } else { *p })
                .collect(),
        }
    }

    /// Total persistence of degree p over all finite points
    pub fn total_persistence(&self, p: f64) -> f64 {
        self.points
            .iter()
            .filter(|pt| !pt.is_unpaired())
            .map(|pt| pt.persistence().abs().powf(p))
            .sum()
    }

    /// p-norm over all finite points
    pub fn p_norm(&self, p: f64) -> f64 {
        self.total_persistence(p).powf(1.0 / p)
    }

    /// Maximum persistence over all finite points
    pub fn infinity_norm(&self) -> f64 {
        self.points
            .iter()
            .filter(|pt| !pt.is_unpaired())
            .map(|pt| pt.persistence().abs())
            .fold(0.0, f64::max)
    }
}

impl<'a> IntoIterator for &'a PersistenceDiagram {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Two columns, one point per line
impl fmt::Display for PersistenceDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}\t{}", p.x, p.y)?;
        }
        Ok(())
    }
}
