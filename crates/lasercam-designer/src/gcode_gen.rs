//! G-code generation from toolpaths.

use crate::toolpath::{MotionCommand, Toolpath};
use lasercam_core::{format_coordinate, format_rate};

/// Renders motion commands in the laser G-code dialect.
///
/// Coordinates use three decimals. Rapid moves always carry `S0` so the
/// beam is never left on while repositioning.
#[derive(Debug, Clone, Copy, Default)]
pub struct GcodeEmitter;

impl GcodeEmitter {
    /// Creates a new G-code emitter.
    pub fn new() -> Self {
        Self
    }

    /// Renders a whole toolpath, one command per line.
    pub fn generate(&self, toolpath: &Toolpath) -> String {
        let mut gcode = String::new();
        for command in toolpath.commands() {
            gcode.push_str(&self.render_command(command));
        }
        gcode
    }

    /// Renders one command including its trailing newline.
    pub fn render_command(&self, command: &MotionCommand) -> String {
        match command {
            MotionCommand::Rapid { to, feed_rate } => format!(
                "G0 X{} Y{}{} S0\n",
                format_coordinate(to.x),
                format_coordinate(to.y),
                feed_param(*feed_rate)
            ),
            MotionCommand::Cut {
                to,
                intensity,
                feed_rate,
            } => format!(
                "G1 X{} Y{}{}{}\n",
                format_coordinate(to.x),
                format_coordinate(to.y),
                feed_param(*feed_rate),
                power_param(*intensity)
            ),
            MotionCommand::Arc {
                to,
                center_offset,
                clockwise,
                intensity,
                feed_rate,
            } => format!(
                "{} X{} Y{} I{} J{}{}{}\n",
                if *clockwise { "G2" } else { "G3" },
                format_coordinate(to.x),
                format_coordinate(to.y),
                format_coordinate(center_offset.x),
                format_coordinate(center_offset.y),
                feed_param(*feed_rate),
                power_param(*intensity)
            ),
            MotionCommand::LaserOn { inline: true } => "M3 I ; Enable laser inline mode\n".into(),
            MotionCommand::LaserOn { inline: false } => "M3 ; Enable laser\n".into(),
            MotionCommand::LaserOff { inline: true } => {
                "M5 I ; Disable laser inline mode\n".into()
            }
            MotionCommand::LaserOff { inline: false } => "M5 ; Disable laser\n".into(),
            MotionCommand::Setup {
                feed_rate,
                rapid_feed_rate,
                ..
            } => {
                let mut gcode = String::new();
                gcode.push_str("G21 ; Set units to millimeters\n");
                gcode.push_str("G90 ; Absolute positioning\n");
                gcode.push_str(&format!(
                    "G0 F{} S0 ; Set rapid feed rate and ensure laser is off\n",
                    format_rate(*rapid_feed_rate)
                ));
                gcode.push_str(&format!(
                    "G1 F{} ; Set cutting feed rate\n",
                    format_rate(*feed_rate)
                ));
                gcode
            }
            MotionCommand::EndProgram => "M30 ; Program end\n".into(),
            MotionCommand::Comment(text) if text.is_empty() => ";\n".into(),
            MotionCommand::Comment(text) => format!("; {}\n", text),
        }
    }
}

fn feed_param(feed_rate: Option<f64>) -> String {
    feed_rate
        .map(|f| format!(" F{}", format_rate(f)))
        .unwrap_or_default()
}

fn power_param(intensity: Option<f64>) -> String {
    intensity
        .map(|s| format!(" S{}", format_rate(s)))
        .unwrap_or_default()
}
