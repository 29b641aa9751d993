//! # Travel Optimization
//!
//! Orders compiled shapes so the head travels less between them, using a
//! greedy nearest-neighbour walk from the start position. A shape whose end
//! anchor is strictly nearer than its start anchor is traced backwards.
//!
//! Each shape is represented by a [`PathSegment`] whose start and end
//! anchors follow fixed per-kind rules (see [`segment_anchors`]) instead of
//! being derived from the full trace.

use crate::coordinates::global_anchor;
use crate::shapes::{Ancestor, Point, Shape, ShapeKind};
use crate::toolpath::{MotionCommand, Toolpath};

/// Comment prefixed to shapes traced in reverse.
pub const REVERSED_COMMENT: &str = "Reversed for travel optimization";

/// A compiled shape as seen by the optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    /// Position of the shape in the flattened selection.
    pub id: usize,
    pub label: String,
    pub toolpath: Toolpath,
    pub start: Point,
    pub end: Point,
    /// True once the optimizer has flipped the traversal direction.
    pub reversed: bool,
}

impl PathSegment {
    pub fn new(
        id: usize,
        label: impl Into<String>,
        toolpath: Toolpath,
        start: Point,
        end: Point,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            toolpath,
            start,
            end,
            reversed: false,
        }
    }

    /// Builds a segment for `shape` with anchors from [`segment_anchors`].
    pub fn for_shape(
        id: usize,
        label: impl Into<String>,
        shape: &Shape,
        ancestors: &[Ancestor],
        toolpath: Toolpath,
    ) -> Self {
        let (start, end) = segment_anchors(shape, ancestors);
        Self::new(id, label, toolpath, start, end)
    }

    /// True for open traces that run from the start anchor to the end
    /// anchor. A vector network whose first chain does not begin at its
    /// first vertex keeps its direction.
    pub fn is_reversible(&self) -> bool {
        self.start != self.end
            && self.toolpath.first_point() == Some(self.start)
            && self.toolpath.last_point() == Some(self.end)
            && self.toolpath.reversed().is_some()
    }

    /// Flips the traversal direction. Returns false, leaving the segment
    /// untouched, when the toolpath cannot be reversed.
    pub fn reverse(&mut self) -> bool {
        let Some(reversed) = self.toolpath.reversed() else {
            return false;
        };

        let mut commands = Vec::with_capacity(reversed.len() + 1);
        commands.push(MotionCommand::Comment(REVERSED_COMMENT.to_string()));
        commands.extend_from_slice(reversed.commands());

        self.toolpath = Toolpath::from_commands(commands);
        std::mem::swap(&mut self.start, &mut self.end);
        self.reversed = !self.reversed;
        true
    }
}

/// Start and end anchors used for routing.
///
/// - Ellipses: the rightmost point for both.
/// - Lines: the true start and end.
/// - Polygons and stars: the top vertex for both.
/// - Vector networks: the first and last vertex.
/// - Everything else: the bounding-box top-left corner for both.
pub fn segment_anchors(shape: &Shape, ancestors: &[Ancestor]) -> (Point, Point) {
    let anchor = global_anchor(shape, ancestors);
    match &shape.kind {
        ShapeKind::Ellipse => {
            let rightmost = anchor.offset(shape.width, shape.height / 2.0);
            (rightmost, rightmost)
        }
        ShapeKind::Line => (anchor, anchor.offset(shape.width, shape.height)),
        ShapeKind::Polygon { .. } | ShapeKind::Star { .. } => {
            let radius = shape.width.min(shape.height) / 2.0;
            let top = anchor.offset(shape.width / 2.0, shape.height / 2.0 - radius);
            (top, top)
        }
        ShapeKind::Vector {
            network: Some(network),
            ..
        } if !network.is_empty() => match (network.vertices.first(), network.vertices.last()) {
            (Some(first), Some(last)) => (
                anchor.offset(first.x, first.y),
                anchor.offset(last.x, last.y),
            ),
            _ => (anchor, anchor),
        },
        _ => (anchor, anchor),
    }
}

/// Total rapid travel when visiting `segments` in order from `start`.
pub fn travel_distance(start: Point, segments: &[PathSegment]) -> f64 {
    let mut pen = start;
    let mut total = 0.0;
    for segment in segments {
        total += pen.distance_to(&segment.start);
        pen = segment.end;
    }
    total
}

/// Greedy nearest-neighbour router.
#[derive(Debug, Clone, Copy, Default)]
pub struct TravelOptimizer {
    start: Point,
}

impl TravelOptimizer {
    pub fn new(start: Point) -> Self {
        Self { start }
    }

    /// Reorders the segments; every input segment appears exactly once.
    ///
    /// At each step the nearest anchor wins. Exact ties go to the segment
    /// met first, and to its start anchor over its end anchor.
    pub fn optimize(&self, segments: Vec<PathSegment>) -> Vec<PathSegment> {
        let mut remaining: Vec<(PathSegment, bool)> = segments
            .into_iter()
            .map(|segment| {
                let reversible = segment.is_reversible();
                (segment, reversible)
            })
            .collect();
        let mut ordered = Vec::with_capacity(remaining.len());
        let mut pen = self.start;

        while !remaining.is_empty() {
            let mut best_index = 0;
            let mut best_distance = f64::INFINITY;
            let mut best_reverse = false;

            for (index, (segment, reversible)) in remaining.iter().enumerate() {
                let to_start = pen.distance_to(&segment.start);
                if to_start < best_distance {
                    best_index = index;
                    best_distance = to_start;
                    best_reverse = false;
                }
                if *reversible {
                    let to_end = pen.distance_to(&segment.end);
                    if to_end < best_distance {
                        best_index = index;
                        best_distance = to_end;
                        best_reverse = true;
                    }
                }
            }

            let (mut segment, _) = remaining.remove(best_index);
            if best_reverse && segment.reverse() {
                tracing::debug!("Reversing '{}' to shorten travel", segment.label);
            }
            pen = segment.end;
            ordered.push(segment);
        }

        ordered
    }
}
