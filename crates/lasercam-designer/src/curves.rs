//! Cubic Bezier flattening.

use crate::shapes::Point;
use crate::toolpath::ToolpathBuilder;
use lyon::geom::{point, CubicBezierSegment};

/// Number of straight segments used to approximate one cubic curve.
pub const BEZIER_SEGMENTS: usize = 16;

/// Samples the curve at `t = 1/16, 2/16, ..., 1`. The start point is not
/// included; the last sample is `to`.
pub fn flatten_cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Vec<Point> {
    let curve = CubicBezierSegment {
        from: point(from.x, from.y),
        ctrl1: point(ctrl1.x, ctrl1.y),
        ctrl2: point(ctrl2.x, ctrl2.y),
        to: point(to.x, to.y),
    };

    (1..=BEZIER_SEGMENTS)
        .map(|i| {
            let sample = curve.sample(i as f64 / BEZIER_SEGMENTS as f64);
            Point::new(sample.x, sample.y)
        })
        .collect()
}

/// Appends cut moves tracing the curve from the builder's current point.
///
/// When neither control point leaves its endpoint the curve is a straight
/// line and a single cut is emitted.
pub fn trace_cubic(
    builder: &mut ToolpathBuilder,
    from: Point,
    ctrl1: Point,
    ctrl2: Point,
    to: Point,
) {
    if ctrl1 == from && ctrl2 == to {
        builder.cut_to(to);
        return;
    }

    for sample in flatten_cubic(from, ctrl1, ctrl2, to) {
        builder.cut_to(sample);
    }
}
