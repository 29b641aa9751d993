//! # Shape Compiler
//!
//! One algorithm per [`ShapeKind`], dispatched by a single exhaustive match.
//! Containers recurse through [`compile_shape`] itself, so there is no
//! generator registry to wire up.
//!
//! Every compiled shape starts with a traceability comment naming its kind.
//! Kinds without real outline support (text, slices, component instances,
//! boolean operations) are approximated by their bounding box.

use std::f64::consts::PI;

use crate::coordinates::global_anchor;
use crate::shapes::{Ancestor, Point, Shape, ShapeKind, VectorNetwork};
use crate::toolpath::{Toolpath, ToolpathBuilder};
use crate::vector_paths::{trace_path_data, trace_vector_network};
use lasercam_core::ShapeError;
use lasercam_settings::LaserSettings;

/// Number of straight segments used for a non-circular ellipse.
pub const ELLIPSE_SEGMENTS: usize = 32;

/// Default inner/outer radius ratio of a star.
pub const DEFAULT_STAR_RATIO: f64 = 0.5;

/// Compiles one shape (and, for containers, its whole subtree).
///
/// `ancestors` lists the containers above `shape`, nearest first.
pub fn compile_shape(
    shape: &Shape,
    ancestors: &[Ancestor],
    settings: &LaserSettings,
) -> Result<Toolpath, ShapeError> {
    check_dimensions(shape)?;

    let anchor = global_anchor(shape, ancestors);
    let mut builder = ToolpathBuilder::new(settings);

    match &shape.kind {
        ShapeKind::Rectangle => {
            builder.comment(shape_comment("RECTANGLE", &shape.name));
            builder.outline(anchor, shape.width, shape.height);
        }
        ShapeKind::Ellipse => {
            builder.comment(shape_comment("ELLIPSE", &shape.name));
            trace_ellipse(&mut builder, anchor, shape.width, shape.height);
        }
        ShapeKind::Polygon { point_count } => {
            builder.comment(shape_comment("POLYGON", &shape.name));
            trace_polygon(&mut builder, anchor, shape.width, shape.height, *point_count);
        }
        ShapeKind::Star {
            point_count,
            inner_radius,
        } => {
            let ratio = star_ratio(*inner_radius)?;
            builder.comment(shape_comment("STAR", &shape.name));
            trace_star(
                &mut builder,
                anchor,
                shape.width,
                shape.height,
                *point_count,
                ratio,
            );
        }
        ShapeKind::Line => {
            builder.comment(shape_comment("LINE", &shape.name));
            builder
                .rapid_to(anchor)
                .cut_to(anchor.offset(shape.width, shape.height));
        }
        ShapeKind::Vector { network, paths } => {
            builder.comment(shape_comment("VECTOR", &shape.name));
            trace_vector(&mut builder, shape, anchor, network.as_ref(), paths)?;
        }
        ShapeKind::BooleanOperation { operation } => {
            builder.comment(format!("BOOLEAN_OPERATION ({})", operation.type_name()));
            builder.outline(anchor, shape.width, shape.height);
        }
        ShapeKind::Instance | ShapeKind::Slice | ShapeKind::Text => {
            builder.comment(format!("{} (bounding box)", shape.type_name()));
            builder.outline(anchor, shape.width, shape.height);
        }
        ShapeKind::Container { kind, children } => {
            let type_name = kind.type_name();
            builder.comment(format!("{} START - \"{}\"", type_name, shape.name));

            if children.is_empty() {
                builder.comment(format!("{} (empty - drawing bounding box)", type_name));
                builder.outline(anchor, shape.width, shape.height);
            } else {
                let mut chain = Vec::with_capacity(ancestors.len() + 1);
                chain.push(Ancestor::of(shape));
                chain.extend_from_slice(ancestors);
                for child in children {
                    match compile_shape(child, &chain, settings) {
                        Ok(toolpath) => {
                            builder.append(toolpath);
                        }
                        Err(err) => {
                            tracing::warn!("Skipping shape '{}': {}", child.display_name(), err);
                            builder.comment(format!(
                                "Skipped shape: {} ({})",
                                child.display_name(),
                                err
                            ));
                        }
                    }
                }
            }

            builder.comment(format!("{} END - \"{}\"", type_name, shape.name));
        }
        ShapeKind::Unsupported { type_name } => {
            builder.comment(format!("Unsupported node type: {}", type_name));
        }
    }

    let toolpath = builder.build();
    tracing::debug!(
        "Compiled {} '{}' into {} commands",
        shape.type_name(),
        shape.display_name(),
        toolpath.len()
    );
    Ok(toolpath)
}

/// `KIND - "name"`, or just `KIND` for unnamed shapes.
fn shape_comment(kind: &str, name: &str) -> String {
    if name.is_empty() {
        kind.to_string()
    } else {
        format!("{} - \"{}\"", kind, name)
    }
}

fn check_dimensions(shape: &Shape) -> Result<(), ShapeError> {
    let mut fields = vec![
        ("x", shape.x),
        ("y", shape.y),
        ("width", shape.width),
        ("height", shape.height),
    ];
    if let Some(bounds) = shape.absolute_bounds {
        fields.push(("absoluteBoundingBox.x", bounds.x));
        fields.push(("absoluteBoundingBox.y", bounds.y));
    }

    match fields.into_iter().find(|(_, value)| !value.is_finite()) {
        Some((field, value)) => Err(ShapeError::InvalidDimension { field, value }),
        None => Ok(()),
    }
}

fn star_ratio(inner_radius: Option<f64>) -> Result<f64, ShapeError> {
    match inner_radius {
        None => Ok(DEFAULT_STAR_RATIO),
        Some(ratio) if ratio > 0.0 && ratio <= 1.0 => Ok(ratio),
        Some(ratio) => Err(ShapeError::InvalidStarRatio { ratio }),
    }
}

/// Circle as one full-revolution counter-clockwise arc, otherwise a
/// 32-segment polyline starting at the rightmost point.
fn trace_ellipse(builder: &mut ToolpathBuilder, anchor: Point, width: f64, height: f64) {
    let radius_x = width / 2.0;
    let radius_y = height / 2.0;
    let center = anchor.offset(radius_x, radius_y);
    let start = center.offset(radius_x, 0.0);

    builder.rapid_to(start);

    if radius_x == radius_y {
        builder.arc_to(start, Point::new(-radius_x, 0.0), false);
        return;
    }

    let step = 2.0 * PI / ELLIPSE_SEGMENTS as f64;
    for i in 1..=ELLIPSE_SEGMENTS {
        let angle = i as f64 * step;
        builder.cut_to(center.offset(radius_x * angle.cos(), radius_y * angle.sin()));
    }
}

/// Regular polygon inscribed in the bounding box, top vertex first,
/// closed back onto the top vertex.
fn trace_polygon(
    builder: &mut ToolpathBuilder,
    anchor: Point,
    width: f64,
    height: f64,
    point_count: u32,
) {
    let sides = point_count.max(3);
    let center = anchor.offset(width / 2.0, height / 2.0);
    let radius = width.min(height) / 2.0;
    let step = 2.0 * PI / sides as f64;

    let vertex = |i: u32| {
        let angle = -PI / 2.0 + i as f64 * step;
        center.offset(radius * angle.cos(), radius * angle.sin())
    };

    builder.rapid_to(vertex(0));
    for i in 1..=sides {
        builder.cut_to(vertex(i));
    }
}

/// Star with alternating outer and inner vertices, top outer point first.
fn trace_star(
    builder: &mut ToolpathBuilder,
    anchor: Point,
    width: f64,
    height: f64,
    point_count: u32,
    ratio: f64,
) {
    let points = if point_count == 0 { 5 } else { point_count };
    let center = anchor.offset(width / 2.0, height / 2.0);
    let outer = width.min(height) / 2.0;
    let inner = outer * ratio;
    let step = PI / points as f64;

    let vertex = |i: u32| {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = -PI / 2.0 + i as f64 * step;
        center.offset(radius * angle.cos(), radius * angle.sin())
    };

    builder.rapid_to(vertex(0));
    for i in 1..=points * 2 {
        builder.cut_to(vertex(i));
    }
}

fn trace_vector(
    builder: &mut ToolpathBuilder,
    shape: &Shape,
    anchor: Point,
    network: Option<&VectorNetwork>,
    paths: &[String],
) -> Result<(), ShapeError> {
    match network {
        Some(network) if !network.is_empty() => {
            builder.comment("Vector Network Processing");
            trace_vector_network(builder, network, anchor)
        }
        _ if !paths.is_empty() => {
            builder.comment("Vector Paths Processing");
            for data in paths {
                trace_path_data(builder, data, anchor);
            }
            Ok(())
        }
        _ => {
            builder.comment("VECTOR (no path data - using bounding box)");
            builder.outline(anchor, shape.width, shape.height);
            Ok(())
        }
    }
}
