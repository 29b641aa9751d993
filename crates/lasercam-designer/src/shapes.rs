//! Shape tree for the toolpath compiler.
//!
//! A [`Shape`] carries the attributes every host node has (name, local
//! position, size, optional absolute bounds) and a [`ShapeKind`] with the
//! kind-specific data. Containers own their children exclusively, so the
//! tree cannot contain cycles.

use serde::{Deserialize, Serialize};

/// Represents a 2D point with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Returns this point shifted by `dx`, `dy`.
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// True when either coordinate is non-zero.
    pub fn is_nonzero(&self) -> bool {
        self.x != 0.0 || self.y != 0.0
    }
}

/// Axis-aligned bounding box in the page frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Container flavours. All of them recurse into their children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Frame,
    Group,
    Section,
}

impl ContainerKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ContainerKind::Frame => "FRAME",
            ContainerKind::Group => "GROUP",
            ContainerKind::Section => "SECTION",
        }
    }
}

/// Boolean operation of a combined shape. Only used for labelling,
/// the outline is approximated by the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BooleanOperation {
    Union,
    Subtract,
    Intersect,
    Exclude,
}

impl BooleanOperation {
    pub fn type_name(&self) -> &'static str {
        match self {
            BooleanOperation::Union => "UNION",
            BooleanOperation::Subtract => "SUBTRACT",
            BooleanOperation::Intersect => "INTERSECT",
            BooleanOperation::Exclude => "EXCLUDE",
        }
    }
}

/// A directed edge of a vector network.
///
/// `start` and `end` index into [`VectorNetwork::vertices`]. Tangents are
/// offsets from the respective endpoint; a non-zero tangent on either end
/// marks the segment as a cubic curve.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorSegment {
    pub start: usize,
    pub end: usize,
    pub tangent_start: Option<Point>,
    pub tangent_end: Option<Point>,
}

impl VectorSegment {
    /// Creates a straight segment.
    pub fn line(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            tangent_start: None,
            tangent_end: None,
        }
    }

    /// Creates a curved segment with the given tangent offsets.
    pub fn curve(start: usize, end: usize, tangent_start: Point, tangent_end: Point) -> Self {
        Self {
            start,
            end,
            tangent_start: Some(tangent_start),
            tangent_end: Some(tangent_end),
        }
    }

    pub fn is_curved(&self) -> bool {
        self.tangent_start.is_some_and(|t| t.is_nonzero())
            || self.tangent_end.is_some_and(|t| t.is_nonzero())
    }
}

/// Graph of vertices and segments describing a freeform outline.
/// Vertex coordinates are relative to the owning shape's anchor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorNetwork {
    pub vertices: Vec<Point>,
    pub segments: Vec<VectorSegment>,
}

impl VectorNetwork {
    pub fn new(vertices: Vec<Point>, segments: Vec<VectorSegment>) -> Self {
        Self { vertices, segments }
    }

    /// A network without segments carries no drawable geometry.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Kind-specific shape data.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    /// Regular polygon inscribed in the bounding box.
    Polygon { point_count: u32 },
    /// Star with `point_count` outer points. `inner_radius` is the
    /// inner/outer radius ratio, 0.5 when absent.
    Star {
        point_count: u32,
        inner_radius: Option<f64>,
    },
    /// Straight line; width/height encode the directed length.
    Line,
    /// Freeform path given as a vector network and/or path data strings.
    Vector {
        network: Option<VectorNetwork>,
        paths: Vec<String>,
    },
    BooleanOperation { operation: BooleanOperation },
    Instance,
    Slice,
    Text,
    Container {
        kind: ContainerKind,
        children: Vec<Shape>,
    },
    /// A host node type this compiler does not know.
    Unsupported { type_name: String },
}

/// A node of the shape tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub name: String,
    /// Local position relative to the parent container.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Cached absolute bounding box; authoritative when present.
    pub absolute_bounds: Option<Bounds>,
    pub kind: ShapeKind,
}

impl Shape {
    pub fn new(
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        kind: ShapeKind,
    ) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            absolute_bounds: None,
            kind,
        }
    }

    pub fn rectangle(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(name, x, y, width, height, ShapeKind::Rectangle)
    }

    pub fn ellipse(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(name, x, y, width, height, ShapeKind::Ellipse)
    }

    pub fn polygon(
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        point_count: u32,
    ) -> Self {
        Self::new(name, x, y, width, height, ShapeKind::Polygon { point_count })
    }

    pub fn star(
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        point_count: u32,
        inner_radius: Option<f64>,
    ) -> Self {
        Self::new(
            name,
            x,
            y,
            width,
            height,
            ShapeKind::Star {
                point_count,
                inner_radius,
            },
        )
    }

    pub fn line(name: impl Into<String>, x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self::new(name, x, y, dx, dy, ShapeKind::Line)
    }

    pub fn vector_network(
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        network: VectorNetwork,
    ) -> Self {
        Self::new(
            name,
            x,
            y,
            width,
            height,
            ShapeKind::Vector {
                network: Some(network),
                paths: Vec::new(),
            },
        )
    }

    pub fn vector_paths(
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        paths: Vec<String>,
    ) -> Self {
        Self::new(
            name,
            x,
            y,
            width,
            height,
            ShapeKind::Vector {
                network: None,
                paths,
            },
        )
    }

    pub fn text(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(name, x, y, width, height, ShapeKind::Text)
    }

    pub fn container(
        kind: ContainerKind,
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        children: Vec<Shape>,
    ) -> Self {
        Self::new(name, x, y, width, height, ShapeKind::Container { kind, children })
    }

    pub fn frame(
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        children: Vec<Shape>,
    ) -> Self {
        Self::container(ContainerKind::Frame, name, x, y, width, height, children)
    }

    pub fn group(name: impl Into<String>, x: f64, y: f64, children: Vec<Shape>) -> Self {
        Self::container(ContainerKind::Group, name, x, y, 0.0, 0.0, children)
    }

    /// Sets the cached absolute bounding box.
    pub fn with_absolute_bounds(mut self, bounds: Bounds) -> Self {
        self.absolute_bounds = Some(bounds);
        self
    }

    /// Host type tag, e.g. `RECTANGLE` or `FRAME`.
    pub fn type_name(&self) -> &str {
        match &self.kind {
            ShapeKind::Rectangle => "RECTANGLE",
            ShapeKind::Ellipse => "ELLIPSE",
            ShapeKind::Polygon { .. } => "POLYGON",
            ShapeKind::Star { .. } => "STAR",
            ShapeKind::Line => "LINE",
            ShapeKind::Vector { .. } => "VECTOR",
            ShapeKind::BooleanOperation { .. } => "BOOLEAN_OPERATION",
            ShapeKind::Instance => "INSTANCE",
            ShapeKind::Slice => "SLICE",
            ShapeKind::Text => "TEXT",
            ShapeKind::Container { kind, .. } => kind.type_name(),
            ShapeKind::Unsupported { type_name } => type_name,
        }
    }

    /// Display name, `Unnamed` when empty.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed"
        } else {
            &self.name
        }
    }

    pub fn local_position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Children of a container, empty for every other kind.
    pub fn children(&self) -> &[Shape] {
        match &self.kind {
            ShapeKind::Container { children, .. } => children,
            _ => &[],
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, ShapeKind::Container { .. })
    }

    /// Drawable kinds are emitted as leaves by the node flattener.
    pub fn is_drawable(&self) -> bool {
        matches!(
            self.kind,
            ShapeKind::Rectangle
                | ShapeKind::Ellipse
                | ShapeKind::Polygon { .. }
                | ShapeKind::Star { .. }
                | ShapeKind::Line
                | ShapeKind::Vector { .. }
                | ShapeKind::Text
                | ShapeKind::BooleanOperation { .. }
                | ShapeKind::Instance
                | ShapeKind::Slice
        )
    }
}

/// A container above a shape, as seen by the coordinate resolver.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ancestor {
    pub name: String,
    /// Local position of the container. `None` contributes no offset.
    pub offset: Option<Point>,
}

impl Ancestor {
    pub fn new(name: impl Into<String>, offset: Option<Point>) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }

    /// Ancestor entry for a container shape of the tree.
    pub fn of(shape: &Shape) -> Self {
        Self::new(shape.name.clone(), Some(shape.local_position()))
    }
}
