//! Global coordinate resolution.

use crate::shapes::{Ancestor, Point, Shape};

/// Top-left anchor of `shape` in the page frame.
///
/// A cached absolute bounding box is authoritative. Otherwise the local
/// position is translated by every ancestor that has a position; only
/// translation is modelled.
pub fn global_anchor(shape: &Shape, ancestors: &[Ancestor]) -> Point {
    if let Some(bounds) = shape.absolute_bounds {
        return bounds.origin();
    }

    ancestors
        .iter()
        .filter_map(|ancestor| ancestor.offset)
        .fold(shape.local_position(), |acc, offset| {
            acc.offset(offset.x, offset.y)
        })
}
