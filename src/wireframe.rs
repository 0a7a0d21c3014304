//! Wireframe outline of a rectangular domain.
//!
//! The outline is built from the eight ordered corner points of the volume:
//! a closed floor ring, a closed ceiling ring and four vertical edges joining
//! corner `i` of the floor to corner `i + 4` of the ceiling.

use nalgebra::Point3;
use tracing::debug;

use crate::error::{Error, Result};
use crate::primitive::{Line, Polyline, Primitive};


/// Number of corner points describing a domain volume.
pub const CORNER_COUNT: usize = 8;
/// Number of primitives in a domain wireframe.
pub const WIREFRAME_LEN: usize = 6;

/// Builds the wireframe of a box-like volume from its eight corners.
///
/// Returns `[floor, ceiling, edge_0, edge_1, edge_2, edge_3]`, where the floor
/// and ceiling are closed polylines through `corners[0..4]` and `corners[4..8]`
/// in input order, and `edge_i` runs from `corners[i]` to `corners[i + 4]`.
pub fn build_domain_wireframe(corners: &[Point3<f64>]) -> Result<Vec<Primitive>> {
    if corners.len() != CORNER_COUNT {
        return Err(Error::invalid(format!(
            "expected {} corner points, got {}",
            CORNER_COUNT,
            corners.len()
        )));
    }

    let (floor, ceiling) = corners.split_at(CORNER_COUNT / 2);

    let mut lines: Vec<Primitive> = Vec::with_capacity(WIREFRAME_LEN);
    lines.push(Polyline::closed(floor.to_vec()).into());
    lines.push(Polyline::closed(ceiling.to_vec()).into());
    lines.extend(
        floor
            .iter()
            .zip(ceiling)
            .map(|(bottom, top)| Line::new(*bottom, *top).into()),
    );

    debug!(primitives = lines.len(), "built domain wireframe");

    Ok(lines)
}
