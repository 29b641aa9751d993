//! # Vector Path Processing
//!
//! Turns freeform outlines into motion commands. Two sources are supported:
//!
//! - **Vector networks**: vertices plus directed segments. Segments are
//!   grouped into connected chains and each chain is traced with one rapid
//!   move followed by cuts (curved segments are flattened).
//! - **Path data**: a subset of the SVG path mini-language (`M`, `L`, `H`,
//!   `V`, `C`, `Z` in absolute and relative form). Other commands are
//!   skipped.
//!
//! All coordinates are relative to the shape's global anchor.

use crate::curves::trace_cubic;
use crate::shapes::{Point, VectorNetwork, VectorSegment};
use crate::toolpath::ToolpathBuilder;
use lasercam_core::ShapeError;

/// Command letters recognised by the tokenizer. Only a subset is traced.
const PATH_COMMAND_LETTERS: &str = "MmLlHhVvCcSsQqTtAaZz";

/// Partitions segments into chains where each segment starts at the
/// previous segment's end vertex.
///
/// The first unused segment seeds a chain; the chain is extended with the
/// lowest-index unused segment starting at its current end until none is
/// left. Chains that could close a cycle through an already consumed
/// segment are not merged.
pub fn group_segments_into_paths(segments: &[VectorSegment]) -> Vec<Vec<usize>> {
    let mut paths = Vec::new();
    let mut used = vec![false; segments.len()];

    for seed in 0..segments.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;
        let mut path = vec![seed];
        let mut current_end = segments[seed].end;

        while let Some(next) =
            (0..segments.len()).find(|&j| !used[j] && segments[j].start == current_end)
        {
            used[next] = true;
            path.push(next);
            current_end = segments[next].end;
        }

        paths.push(path);
    }

    paths
}

/// Rejects networks whose segments point at missing vertices.
pub fn validate_network(network: &VectorNetwork) -> Result<(), ShapeError> {
    let vertex_count = network.vertices.len();
    for (index, segment) in network.segments.iter().enumerate() {
        for vertex in [segment.start, segment.end] {
            if vertex >= vertex_count {
                return Err(ShapeError::MalformedVectorNetwork {
                    segment: index,
                    vertex,
                    vertex_count,
                });
            }
        }
    }
    Ok(())
}

/// Traces every chain of the network, offset by `anchor`.
pub fn trace_vector_network(
    builder: &mut ToolpathBuilder,
    network: &VectorNetwork,
    anchor: Point,
) -> Result<(), ShapeError> {
    validate_network(network)?;

    let vertex = |index: usize| {
        let v = network.vertices[index];
        anchor.offset(v.x, v.y)
    };

    for path in group_segments_into_paths(&network.segments) {
        for (position, &segment_index) in path.iter().enumerate() {
            let segment = &network.segments[segment_index];
            let start = vertex(segment.start);
            let end = vertex(segment.end);

            if position == 0 {
                builder.rapid_to(start);
            }

            if segment.is_curved() {
                let ctrl1 = segment
                    .tangent_start
                    .map_or(start, |t| start.offset(t.x, t.y));
                let ctrl2 = segment.tangent_end.map_or(end, |t| end.offset(t.x, t.y));
                trace_cubic(builder, start, ctrl1, ctrl2, end);
            } else {
                builder.cut_to(end);
            }
        }
    }

    Ok(())
}

/// One command of a path data string with its numeric parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub letter: char,
    pub params: Vec<f64>,
}

impl PathCommand {
    pub fn is_relative(&self) -> bool {
        self.letter.is_ascii_lowercase()
    }
}

/// Splits path data into commands.
///
/// Parameters are separated by whitespace or commas; tokens that are not
/// numbers are dropped. Text before the first command letter is ignored.
pub fn tokenize_path_data(data: &str) -> Vec<PathCommand> {
    let mut commands = Vec::new();
    let mut current: Option<(char, String)> = None;

    for ch in data.chars() {
        if PATH_COMMAND_LETTERS.contains(ch) {
            if let Some((letter, raw)) = current.take() {
                commands.push(PathCommand {
                    letter,
                    params: parse_params(&raw),
                });
            }
            current = Some((ch, String::new()));
        } else if let Some((_, raw)) = current.as_mut() {
            raw.push(ch);
        }
    }

    if let Some((letter, raw)) = current {
        commands.push(PathCommand {
            letter,
            params: parse_params(&raw),
        });
    }

    commands
}

fn parse_params(raw: &str) -> Vec<f64> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|value| !value.is_nan())
        .collect()
}

/// Traces one path data string, offset by `anchor`.
pub fn trace_path_data(builder: &mut ToolpathBuilder, data: &str, anchor: Point) {
    let mut current = Point::default();
    let mut subpath_start = Point::default();

    for command in tokenize_path_data(data) {
        let relative = command.is_relative();
        let params = &command.params;

        // Relative coordinates accumulate from the running point.
        let resolve = |current: Point, x: f64, y: f64| {
            if relative {
                current.offset(x, y)
            } else {
                Point::new(x, y)
            }
        };

        match command.letter.to_ascii_uppercase() {
            'M' => {
                if params.len() >= 2 {
                    current = resolve(current, params[0], params[1]);
                    subpath_start = current;
                    builder.rapid_to(anchor.offset(current.x, current.y));
                }
            }
            'L' => {
                for pair in params.chunks_exact(2) {
                    current = resolve(current, pair[0], pair[1]);
                    builder.cut_to(anchor.offset(current.x, current.y));
                }
            }
            'H' => {
                if let Some(&x) = params.first() {
                    current.x = if relative { current.x + x } else { x };
                    builder.cut_to(anchor.offset(current.x, current.y));
                }
            }
            'V' => {
                if let Some(&y) = params.first() {
                    current.y = if relative { current.y + y } else { y };
                    builder.cut_to(anchor.offset(current.x, current.y));
                }
            }
            'C' => {
                for curve in params.chunks_exact(6) {
                    let ctrl1 = resolve(current, curve[0], curve[1]);
                    let ctrl2 = resolve(current, curve[2], curve[3]);
                    let end = resolve(current, curve[4], curve[5]);
                    trace_cubic(
                        builder,
                        anchor.offset(current.x, current.y),
                        anchor.offset(ctrl1.x, ctrl1.y),
                        anchor.offset(ctrl2.x, ctrl2.y),
                        anchor.offset(end.x, end.y),
                    );
                    current = end;
                }
            }
            'Z' => {
                builder.cut_to(anchor.offset(subpath_start.x, subpath_start.y));
                current = subpath_start;
            }
            other => {
                tracing::debug!("Skipping unsupported path command {}", other);
            }
        }
    }
}
