//! # Program Assembly
//!
//! Compiles a selection into the final program text:
//!
//! 1. Validate the selection and settings (fail fast).
//! 2. Flatten the selection into drawable units.
//! 3. Compile every unit. Failures are logged, counted and replaced by a
//!    note; units without geometry become notes too.
//! 4. Optionally route the units with the [`TravelOptimizer`].
//! 5. Frame the blocks with header, setup, laser and end commands.
//!
//! Output is a pure function of the selection and the configuration.

use chrono::{DateTime, Utc};
use lasercam_core::{
    format_length, format_percent, format_rate, Error, Result, ValidationError, FEED_RATE_LABEL,
    UNIT_LABEL,
};
use lasercam_settings::Config;

use crate::flatten::NodeFlattener;
use crate::gcode_gen::GcodeEmitter;
use crate::generators::compile_shape;
use crate::optimizer::{travel_distance, PathSegment, TravelOptimizer};
use crate::scene::SelectedNode;
use crate::shapes::Point;
use crate::toolpath::{MotionCommand, Toolpath};

/// Characters replaced by `_` in suggested file names.
const FILENAME_RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Compiles `selection` with `config` into program text.
pub fn generate_program(selection: &[SelectedNode], config: &Config) -> Result<String> {
    ProgramAssembler::new(config).assemble(selection)
}

/// Travel statistics reported in the program header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelReport {
    pub original: f64,
    pub optimized: f64,
}

impl TravelReport {
    /// Percentage of travel saved, 0 when there was no travel to begin with.
    pub fn saved_percent(&self) -> f64 {
        if self.original > 0.0 {
            (self.original - self.optimized) / self.original * 100.0
        } else {
            0.0
        }
    }
}

/// A compiled unit: a routable block, or a comment-only note.
enum Entry {
    Block(PathSegment),
    Note(Toolpath),
}

/// Frames compiled shapes into a complete program.
#[derive(Debug, Clone)]
pub struct ProgramAssembler {
    config: Config,
    emitter: GcodeEmitter,
}

impl ProgramAssembler {
    pub fn new(config: &Config) -> Self {
        Self {
            config: *config,
            emitter: GcodeEmitter::new(),
        }
    }

    pub fn assemble(&self, selection: &[SelectedNode]) -> Result<String> {
        if selection.is_empty() {
            return Err(ValidationError::EmptySelection.into());
        }
        self.config.validate()?;

        let laser = &self.config.laser;
        let flat = NodeFlattener::new().flatten(selection);

        let mut entries = Vec::with_capacity(flat.len());
        let mut skipped = 0;
        for (id, node) in flat.iter().enumerate() {
            match compile_shape(node.shape, &node.ancestors, laser) {
                Ok(toolpath) if toolpath.has_geometry() => {
                    entries.push(Entry::Block(PathSegment::for_shape(
                        id,
                        node.label.clone(),
                        node.shape,
                        &node.ancestors,
                        toolpath,
                    )));
                }
                Ok(toolpath) => entries.push(Entry::Note(toolpath)),
                Err(err) => {
                    tracing::warn!("Skipping shape '{}': {}", node.label, err);
                    skipped += 1;
                    entries.push(Entry::Note(Toolpath::from_commands(vec![
                        MotionCommand::Comment(format!("Skipped shape: {} ({})", node.label, err)),
                    ])));
                }
            }
        }

        let block_count = entries
            .iter()
            .filter(|entry| matches!(entry, Entry::Block(_)))
            .count();
        if block_count == 0 {
            return Err(Error::EmptyResult { skipped });
        }

        let (entries, travel) = if self.config.output.optimize_travel {
            self.route(entries)
        } else {
            (entries, None)
        };

        let mut gcode = self.header(selection.len(), travel);
        let mut ordinal = 0;
        for entry in &entries {
            match entry {
                Entry::Block(segment) => {
                    ordinal += 1;
                    gcode.push_str(&self.comment(format!(
                        "Begin shape {}/{}: {}",
                        ordinal, block_count, segment.label
                    )));
                    gcode.push_str(&self.emitter.generate(&segment.toolpath));
                    gcode.push_str(&self.comment(format!(
                        "End shape {}/{}: {}",
                        ordinal, block_count, segment.label
                    )));
                }
                Entry::Note(toolpath) => gcode.push_str(&self.emitter.generate(toolpath)),
            }
        }
        gcode.push_str(&self.footer(skipped));

        tracing::info!(
            "Generated program for {} shapes ({} skipped)",
            block_count,
            skipped
        );
        Ok(gcode)
    }

    /// Notes first, then the blocks in optimized order.
    fn route(&self, entries: Vec<Entry>) -> (Vec<Entry>, Option<TravelReport>) {
        let start = {
            let (x, y) = self.config.output.start_position();
            Point::new(x, y)
        };

        let mut notes = Vec::new();
        let mut blocks = Vec::new();
        for entry in entries {
            match entry {
                Entry::Block(segment) => blocks.push(segment),
                note => notes.push(note),
            }
        }

        let original = travel_distance(start, &blocks);
        let blocks = TravelOptimizer::new(start).optimize(blocks);
        let report = TravelReport {
            original,
            optimized: travel_distance(start, &blocks),
        };
        tracing::info!(
            "Travel distance {} -> {} {} ({}% saved)",
            format_length(report.original),
            format_length(report.optimized),
            UNIT_LABEL,
            format_percent(report.saved_percent())
        );

        notes.extend(blocks.into_iter().map(Entry::Block));
        (notes, Some(report))
    }

    fn comment(&self, text: impl Into<String>) -> String {
        self.emitter.render_command(&MotionCommand::Comment(text.into()))
    }

    fn header(&self, selected: usize, travel: Option<TravelReport>) -> String {
        let laser = &self.config.laser;
        let mut gcode = String::new();
        gcode.push_str(&self.comment("Generated by lasercam"));
        gcode.push_str(&self.comment(format!("Selected objects: {}", selected)));
        gcode.push_str(&self.comment(format!(
            "Feed rate: {} {}",
            format_rate(laser.feed_rate),
            FEED_RATE_LABEL
        )));
        gcode.push_str(&self.comment(format!(
            "Rapid feed rate: {} {}",
            format_rate(laser.rapid_feed_rate),
            FEED_RATE_LABEL
        )));
        gcode.push_str(&self.comment(format!(
            "Laser power: {} (S parameter)",
            format_rate(laser.laser_power)
        )));
        gcode.push_str(&self.comment(format!(
            "Travel optimization: {}",
            if travel.is_some() { "enabled" } else { "disabled" }
        )));
        if let Some(report) = travel {
            gcode.push_str(&self.comment(format!(
                "Travel distance (original order): {} {}",
                format_length(report.original),
                UNIT_LABEL
            )));
            gcode.push_str(&self.comment(format!(
                "Travel distance (optimized): {} {}",
                format_length(report.optimized),
                UNIT_LABEL
            )));
            gcode.push_str(&self.comment(format!(
                "Travel saved: {}%",
                format_percent(report.saved_percent())
            )));
        }
        gcode.push_str(&self.comment(""));

        gcode.push_str(&self.emitter.render_command(&MotionCommand::Setup {
            feed_rate: laser.feed_rate,
            rapid_feed_rate: laser.rapid_feed_rate,
            intensity: laser.laser_power,
        }));
        gcode.push_str(&self.emitter.render_command(&MotionCommand::LaserOn {
            inline: self.config.output.inline_laser,
        }));
        gcode
    }

    fn footer(&self, skipped: usize) -> String {
        let mut gcode = String::new();
        if skipped > 0 {
            gcode.push_str(&self.comment(format!("Skipped shapes: {}", skipped)));
        }
        gcode.push_str(&self.comment("End of program"));
        gcode.push_str(&self.emitter.render_command(&MotionCommand::LaserOff {
            inline: self.config.output.inline_laser,
        }));
        gcode.push_str(&self.emitter.render_command(&MotionCommand::EndProgram));
        gcode
    }
}

/// Suggested export file name (without extension) for a selection.
///
/// Uses the first node's name with reserved characters replaced, notes how
/// many other nodes were selected and appends `timestamp`.
pub fn suggest_filename(selection: &[SelectedNode], timestamp: DateTime<Utc>) -> String {
    let Some(first) = selection.first() else {
        return "gcode".to_string();
    };

    let name = if first.shape.name.is_empty() {
        "untitled"
    } else {
        first.shape.name.as_str()
    };
    let mut base: String = name
        .chars()
        .map(|c| if FILENAME_RESERVED.contains(&c) { '_' } else { c })
        .collect();

    if selection.len() > 1 {
        base.push_str(&format!("_and_{}_more", selection.len() - 1));
    }

    format!("{}_{}", base, timestamp.format("%Y-%m-%dT%H-%M-%S"))
}
