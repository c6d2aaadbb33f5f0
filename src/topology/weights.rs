//! Weight Pre-processing
//!
//! Transformations applied to the filtration values of a network before it
//! is expanded. Vertices (dimension 0) are left untouched by both
//! transformations; only edges and higher simplices change.

use log::debug;

use super::complex::SimplicialComplex;

/// Minimum and maximum filtration value over all simplices
pub fn weight_range(complex: &SimplicialComplex) -> Option<(f64, f64)> {
    complex.iter().map(|s| s.data()).fold(None, |range, w| match range {
        None => Some((w, w)),
        Some((lo, hi)) => Some((lo.min(w), hi.max(w))),
    })
}

/// Map the values of all simplices of dimension ≥ 1 to `[0, 1]`.
///
/// The range is taken over all simplices, vertices included. If the range
/// is degenerate (every value equal) the complex is left as it is. Returns
/// the range after the transformation.
pub fn normalize_weights(complex: &mut SimplicialComplex) -> Option<(f64, f64)> {
    let (min, max) = weight_range(complex)?;

    if max == min {
        debug!("Skipping normalization: all weights equal {}", min);
        return Some((min, max));
    }

    let range = max - min;
    for position in 0..complex.len() {
        let simplex = &complex.as_slice()[position];
        if simplex.dimension() == 0 {
            continue;
        }
        let normalized = (simplex.data() - min) / range;
        complex.update_at(position, normalized);
    }

    Some((0.0, 1.0))
}

/// Replace the value `w` of every simplex of dimension ≥ 1 by `max - w`.
///
/// Vertex values are not inverted; callers with weighted vertices have to
/// make sure the result is still monotone along the face relation.
pub fn invert_weights(complex: &mut SimplicialComplex, max: f64) {
    for position in 0..complex.len() {
        let simplex = &complex.as_slice()[position];
        if simplex.dimension() == 0 {
            continue;
        }
        let inverted = max - simplex.data();
        complex.update_at(position, inverted);
    }
}
