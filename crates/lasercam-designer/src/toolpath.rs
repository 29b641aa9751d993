//! Motion commands and toolpaths.
//!
//! A [`Toolpath`] is the ordered list of [`MotionCommand`]s produced for one
//! shape. It is assembled by a [`ToolpathBuilder`] bound to the laser
//! settings, and rendered to text separately by
//! [`GcodeEmitter`](crate::gcode_gen::GcodeEmitter).

use crate::shapes::Point;
use lasercam_settings::LaserSettings;

/// A single instruction of the toolpath dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionCommand {
    /// Reposition with the beam off.
    Rapid { to: Point, feed_rate: Option<f64> },
    /// Straight cutting move.
    Cut {
        to: Point,
        intensity: Option<f64>,
        feed_rate: Option<f64>,
    },
    /// Circular cutting move. `center_offset` is relative to the start
    /// point; an endpoint equal to the start is a full revolution.
    Arc {
        to: Point,
        center_offset: Point,
        clockwise: bool,
        intensity: Option<f64>,
        feed_rate: Option<f64>,
    },
    LaserOn { inline: bool },
    LaserOff { inline: bool },
    /// Units, positioning mode and the two feed rates.
    Setup {
        feed_rate: f64,
        rapid_feed_rate: f64,
        intensity: f64,
    },
    EndProgram,
    Comment(String),
}

impl MotionCommand {
    /// Target point of a motion, `None` for non-motion commands.
    pub fn endpoint(&self) -> Option<Point> {
        match self {
            MotionCommand::Rapid { to, .. }
            | MotionCommand::Cut { to, .. }
            | MotionCommand::Arc { to, .. } => Some(*to),
            _ => None,
        }
    }

    pub fn is_motion(&self) -> bool {
        self.endpoint().is_some()
    }
}

/// Ordered command sequence for one shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toolpath {
    commands: Vec<MotionCommand>,
}

impl Toolpath {
    /// Creates a new empty toolpath.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands(commands: Vec<MotionCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[MotionCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// True when the toolpath moves the head at all.
    pub fn has_geometry(&self) -> bool {
        self.commands.iter().any(MotionCommand::is_motion)
    }

    /// Target of the first motion command.
    pub fn first_point(&self) -> Option<Point> {
        self.commands.iter().find_map(MotionCommand::endpoint)
    }

    /// Target of the last motion command.
    pub fn last_point(&self) -> Option<Point> {
        self.commands.iter().rev().find_map(MotionCommand::endpoint)
    }

    /// Gets the total cutting length of the toolpath.
    ///
    /// Arcs are measured by their chord, so a full circle contributes zero.
    pub fn cut_length(&self) -> f64 {
        let mut pen: Option<Point> = None;
        let mut length = 0.0;
        for command in &self.commands {
            match command {
                MotionCommand::Rapid { to, .. } => pen = Some(*to),
                MotionCommand::Cut { to, .. } | MotionCommand::Arc { to, .. } => {
                    if let Some(from) = pen {
                        length += from.distance_to(to);
                    }
                    pen = Some(*to);
                }
                _ => {}
            }
        }
        length
    }

    /// The same geometry traced in the opposite direction.
    ///
    /// Runs (a rapid followed by its cuts) are emitted in reverse order and
    /// each run is walked backwards; arcs are re-centred on the new start
    /// and their direction flipped. Comments before the first rapid stay in
    /// front, comments after the last motion stay at the end and every other
    /// comment travels with the run that follows it.
    ///
    /// Returns `None` when the toolpath cannot be reversed: a cut with no
    /// preceding rapid, or framing commands inside the shape.
    pub fn reversed(&self) -> Option<Toolpath> {
        let mut prelude: Vec<MotionCommand> = Vec::new();
        let mut runs: Vec<(Vec<MotionCommand>, Vec<MotionCommand>)> = Vec::new();
        let mut pending: Vec<MotionCommand> = Vec::new();

        for command in &self.commands {
            match command {
                MotionCommand::Comment(_) => pending.push(command.clone()),
                MotionCommand::Rapid { .. } => {
                    let comments = std::mem::take(&mut pending);
                    if runs.is_empty() {
                        prelude = comments;
                        runs.push((Vec::new(), vec![command.clone()]));
                    } else {
                        runs.push((comments, vec![command.clone()]));
                    }
                }
                MotionCommand::Cut { .. } | MotionCommand::Arc { .. } => {
                    // A comment between a rapid and its cuts splits the run.
                    if !pending.is_empty() {
                        return None;
                    }
                    let (_, run) = runs.last_mut()?;
                    run.push(command.clone());
                }
                _ => return None,
            }
        }

        let mut commands = prelude;
        for (comments, run) in runs.into_iter().rev() {
            commands.extend(comments);
            commands.extend(reverse_run(&run)?);
        }
        commands.extend(pending);
        Some(Toolpath { commands })
    }
}

/// Walks a single run backwards. `run[0]` is the rapid.
fn reverse_run(run: &[MotionCommand]) -> Option<Vec<MotionCommand>> {
    let (first, moves) = run.split_first()?;
    let rapid_feed = match first {
        MotionCommand::Rapid { feed_rate, .. } => *feed_rate,
        _ => return None,
    };

    let mut points = Vec::with_capacity(run.len());
    points.push(first.endpoint()?);
    for command in moves {
        points.push(command.endpoint()?);
    }

    let mut reversed = Vec::with_capacity(run.len());
    reversed.push(MotionCommand::Rapid {
        to: *points.last()?,
        feed_rate: rapid_feed,
    });

    for (index, command) in moves.iter().enumerate().rev() {
        let from = points[index];
        let to = points[index + 1];
        let back = match command {
            MotionCommand::Cut {
                intensity,
                feed_rate,
                ..
            } => MotionCommand::Cut {
                to: from,
                intensity: *intensity,
                feed_rate: *feed_rate,
            },
            MotionCommand::Arc {
                center_offset,
                clockwise,
                intensity,
                feed_rate,
                ..
            } => {
                let center = from.offset(center_offset.x, center_offset.y);
                MotionCommand::Arc {
                    to: from,
                    center_offset: Point::new(center.x - to.x, center.y - to.y),
                    clockwise: !clockwise,
                    intensity: *intensity,
                    feed_rate: *feed_rate,
                }
            }
            _ => return None,
        };
        reversed.push(back);
    }

    Some(reversed)
}

/// Accumulates the commands of one shape using the request's settings.
#[derive(Debug, Clone)]
pub struct ToolpathBuilder {
    settings: LaserSettings,
    commands: Vec<MotionCommand>,
}

impl ToolpathBuilder {
    pub fn new(settings: &LaserSettings) -> Self {
        Self {
            settings: *settings,
            commands: Vec::new(),
        }
    }

    pub fn settings(&self) -> &LaserSettings {
        &self.settings
    }

    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.commands.push(MotionCommand::Comment(text.into()));
        self
    }

    /// Rapid move at the rapid feed rate.
    pub fn rapid_to(&mut self, to: Point) -> &mut Self {
        self.commands.push(MotionCommand::Rapid {
            to,
            feed_rate: Some(self.settings.rapid_feed_rate),
        });
        self
    }

    /// Cutting move at the cutting feed rate and laser power.
    pub fn cut_to(&mut self, to: Point) -> &mut Self {
        self.commands.push(MotionCommand::Cut {
            to,
            intensity: Some(self.settings.laser_power),
            feed_rate: Some(self.settings.feed_rate),
        });
        self
    }

    pub fn arc_to(&mut self, to: Point, center_offset: Point, clockwise: bool) -> &mut Self {
        self.commands.push(MotionCommand::Arc {
            to,
            center_offset,
            clockwise,
            intensity: Some(self.settings.laser_power),
            feed_rate: Some(self.settings.feed_rate),
        });
        self
    }

    /// Closed outline of an axis-aligned box, clockwise from its top-left corner.
    pub fn outline(&mut self, origin: Point, width: f64, height: f64) -> &mut Self {
        self.rapid_to(origin)
            .cut_to(origin.offset(width, 0.0))
            .cut_to(origin.offset(width, height))
            .cut_to(origin.offset(0.0, height))
            .cut_to(origin)
    }

    /// Appends the commands of an already built toolpath.
    pub fn append(&mut self, toolpath: Toolpath) -> &mut Self {
        self.commands.extend(toolpath.commands);
        self
    }

    pub fn build(self) -> Toolpath {
        Toolpath {
            commands: self.commands,
        }
    }
}
