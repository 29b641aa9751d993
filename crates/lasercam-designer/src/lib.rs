//! # LaserCam Designer
//!
//! Compiles trees of 2D vector shapes into laser G-code.
//!
//! The pipeline runs leaves first:
//! - [`scene`] imports the host selection as [`Shape`] trees
//! - [`flatten`] splits the selection into independently drawable units
//! - [`generators`] compiles one shape into a [`Toolpath`], using
//!   [`coordinates`], [`vector_paths`] and [`curves`]
//! - [`optimizer`] reorders the units to reduce travel
//! - [`gcode_gen`] renders motion commands as text
//! - [`program`] frames everything into a complete program
//!
//! Compilation is synchronous and deterministic: the same selection and
//! configuration always produce byte-identical output.

pub mod coordinates;
pub mod curves;
pub mod flatten;
pub mod gcode_gen;
pub mod generators;
pub mod optimizer;
pub mod program;
pub mod scene;
pub mod shapes;
pub mod toolpath;
pub mod vector_paths;

pub use coordinates::global_anchor;
pub use flatten::{FlatNode, NodeFlattener, LABEL_SEPARATOR};
pub use gcode_gen::GcodeEmitter;
pub use generators::compile_shape;
pub use optimizer::{segment_anchors, travel_distance, PathSegment, TravelOptimizer};
pub use program::{generate_program, suggest_filename, ProgramAssembler, TravelReport};
pub use scene::{Scene, SceneError, SelectedNode};
pub use shapes::{
    Ancestor, BooleanOperation, Bounds, ContainerKind, Point, Shape, ShapeKind, VectorNetwork,
    VectorSegment,
};
pub use toolpath::{MotionCommand, Toolpath, ToolpathBuilder};
