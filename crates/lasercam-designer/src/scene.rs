//! # Scene Import
//!
//! Reads the selection handed over by the host application as JSON and
//! converts it into [`Shape`] trees.
//!
//! Two document layouts are accepted:
//! - `{ "selection": [ { "ancestors": [...], "node": {...} } ] }`
//! - a bare array of nodes, each treated as a top-level shape
//!
//! Node objects use the host's field names (`absoluteBoundingBox`,
//! `pointCount`, `vectorNetwork`, ...). Unknown `type` tags become
//! [`ShapeKind::Unsupported`] so they degrade to a comment at compile time.

use crate::shapes::{
    Ancestor, BooleanOperation, Bounds, ContainerKind, Point, Shape, ShapeKind, VectorNetwork,
};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading a scene document
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene document must be an object with a 'selection' array or an array of nodes")]
    UnexpectedLayout,
}

/// A selected node together with the containers above it
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedNode {
    pub shape: Shape,
    /// Containers between the node and the page, nearest first.
    pub ancestors: Vec<Ancestor>,
}

impl SelectedNode {
    /// A node selected directly on the page.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            ancestors: Vec::new(),
        }
    }

    pub fn with_ancestors(mut self, ancestors: Vec<Ancestor>) -> Self {
        self.ancestors = ancestors;
        self
    }
}

impl From<Shape> for SelectedNode {
    fn from(shape: Shape) -> Self {
        Self::new(shape)
    }
}

/// An imported selection, in host order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub selection: Vec<SelectedNode>,
}

impl Scene {
    /// Parse a scene document from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let value: Value = serde_json::from_str(json)?;
        let selection = match value {
            Value::Array(_) => {
                let nodes: Vec<RawNode> = serde_json::from_value(value)?;
                nodes
                    .into_iter()
                    .map(|node| SelectedNode::new(node.into_shape()))
                    .collect()
            }
            Value::Object(_) => {
                let doc: RawDocument = serde_json::from_value(value)?;
                doc.selection
                    .into_iter()
                    .map(RawSelected::into_selected)
                    .collect()
            }
            _ => return Err(SceneError::UnexpectedLayout),
        };

        let scene = Self { selection };
        tracing::debug!("Imported scene with {} selected nodes", scene.len());
        Ok(scene)
    }

    /// Read and parse a scene file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    selection: Vec<RawSelected>,
}

#[derive(Debug, Deserialize)]
struct RawSelected {
    #[serde(default)]
    ancestors: Vec<RawAncestor>,
    node: RawNode,
}

impl RawSelected {
    fn into_selected(self) -> SelectedNode {
        let ancestors = self
            .ancestors
            .into_iter()
            .map(RawAncestor::into_ancestor)
            .collect();
        SelectedNode::new(self.node.into_shape()).with_ancestors(ancestors)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAncestor {
    name: String,
    x: Option<f64>,
    y: Option<f64>,
}

impl RawAncestor {
    fn into_ancestor(self) -> Ancestor {
        let offset = match (self.x, self.y) {
            (None, None) => None,
            (x, y) => Some(Point::new(x.unwrap_or(0.0), y.unwrap_or(0.0))),
        };
        Ancestor::new(self.name, offset)
    }
}

/// Path data entries come either as plain strings or as `{ "data": ... }`
/// objects carrying a winding rule.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawVectorPath {
    Data(String),
    Object {
        #[serde(default)]
        data: Option<String>,
    },
}

impl RawVectorPath {
    fn into_data(self) -> Option<String> {
        match self {
            RawVectorPath::Data(data) => Some(data),
            RawVectorPath::Object { data } => data,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawNode {
    #[serde(rename = "type")]
    node_type: String,
    name: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    absolute_bounding_box: Option<Bounds>,
    point_count: Option<u32>,
    inner_radius: Option<f64>,
    vector_network: Option<VectorNetwork>,
    vector_paths: Vec<RawVectorPath>,
    boolean_operation: Option<BooleanOperation>,
    children: Vec<RawNode>,
}

impl RawNode {
    fn into_shape(self) -> Shape {
        let kind = match self.node_type.as_str() {
            "RECTANGLE" => ShapeKind::Rectangle,
            "ELLIPSE" => ShapeKind::Ellipse,
            "POLYGON" => ShapeKind::Polygon {
                point_count: self.point_count.unwrap_or(3),
            },
            "STAR" => ShapeKind::Star {
                point_count: self.point_count.unwrap_or(5),
                inner_radius: self.inner_radius,
            },
            "LINE" => ShapeKind::Line,
            "VECTOR" => ShapeKind::Vector {
                network: self.vector_network,
                paths: self
                    .vector_paths
                    .into_iter()
                    .filter_map(RawVectorPath::into_data)
                    .collect(),
            },
            "BOOLEAN_OPERATION" => ShapeKind::BooleanOperation {
                operation: self.boolean_operation.unwrap_or(BooleanOperation::Union),
            },
            "INSTANCE" => ShapeKind::Instance,
            "SLICE" => ShapeKind::Slice,
            "TEXT" => ShapeKind::Text,
            "FRAME" | "GROUP" | "SECTION" => {
                let kind = match self.node_type.as_str() {
                    "FRAME" => ContainerKind::Frame,
                    "GROUP" => ContainerKind::Group,
                    _ => ContainerKind::Section,
                };
                ShapeKind::Container {
                    kind,
                    children: self.children.into_iter().map(RawNode::into_shape).collect(),
                }
            }
            other => {
                tracing::debug!("Importing unknown node type {}", other);
                ShapeKind::Unsupported {
                    type_name: other.to_string(),
                }
            }
        };

        let shape = Shape::new(self.name, self.x, self.y, self.width, self.height, kind);
        match self.absolute_bounding_box {
            Some(bounds) => shape.with_absolute_bounds(bounds),
            None => shape,
        }
    }
}
