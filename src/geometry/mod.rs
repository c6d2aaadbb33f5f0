//! Geometry Module: Point Clouds and Neighbour Queries
//!
//! Supplies what the Rips construction needs from a point cloud:
//! - Distance functors with conversions to and from internal representations
//! - A neighbour-search capability ([`NearestNeighbours`]) and an exhaustive
//!   implementation over an `ndarray` point matrix

mod distances;
mod nearest_neighbours;

pub use distances::{Distance, Euclidean, Manhattan, SquaredEuclidean};
pub use nearest_neighbours::{BruteForce, NearestNeighbours};
