//! Distance Functors
//!
//! A [`Distance`] evaluates the distance between two points in some
//! internal representation (e.g. squared Euclidean, to avoid square
//! roots) and converts between that representation and the metric one
//! callers reason about.

/// Distance between two coordinate vectors
pub trait Distance {
    /// Distance in the internal representation
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;

    /// Metric value -> internal representation
    fn to_internal(&self, value: f64) -> f64 {
        value
    }

    /// Internal representation -> metric value
    fn from_internal(&self, value: f64) -> f64 {
        value
    }
}

/// Euclidean (L2) distance
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Distance for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        SquaredEuclidean.distance(a, b).sqrt()
    }
}

/// Squared Euclidean distance; converts to and from the Euclidean metric
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredEuclidean;

impl Distance for SquaredEuclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
    }

    fn to_internal(&self, value: f64) -> f64 {
        value * value
    }

    fn from_internal(&self, value: f64) -> f64 {
        value.sqrt()
    }
}

/// Manhattan (L1) distance
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Distance for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let a = [0.0, 0.0];
        let b = [3.0, 4.0];
        assert_eq!(Euclidean.distance(&a, &b), 5.0);
        assert_eq!(SquaredEuclidean.distance(&a, &b), 25.0);
        assert_eq!(Manhattan.distance(&a, &b), 7.0);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(SquaredEuclidean.to_internal(3.0), 9.0);
        assert_eq!(SquaredEuclidean.from_internal(9.0), 3.0);
        assert_eq!(Euclidean.to_internal(3.0), 3.0);
    }
}
