//! Command line interface.
//!
//! Reads a scene document, merges the configuration file with command line
//! overrides and writes the generated program to stdout or a file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use lasercam_designer::{generate_program, suggest_filename, Scene};
use lasercam_settings::{default_config_path, Config};

/// File extension of written programs.
pub const PROGRAM_EXTENSION: &str = "gcode";

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Scene JSON file with the selected shapes
    #[clap(value_parser)]
    pub scene: PathBuf,

    /// Configuration file (.toml or .json); defaults to the user config
    #[clap(long, value_parser)]
    pub config: Option<PathBuf>,

    /// Output file, or a directory to write a file with a generated name into
    #[clap(long, short, value_parser)]
    pub output: Option<PathBuf>,

    /// Cutting feed rate in mm/min
    #[clap(long)]
    pub feed_rate: Option<f64>,

    /// Rapid feed rate in mm/min
    #[clap(long)]
    pub rapid_feed_rate: Option<f64>,

    /// Laser power (S parameter)
    #[clap(long)]
    pub laser_power: Option<f64>,

    /// Keep the selection order instead of optimizing travel
    #[clap(long)]
    pub no_optimize: bool,

    /// Start X position for travel optimization
    #[clap(long, allow_hyphen_values = true)]
    pub start_x: Option<f64>,

    /// Start Y position for travel optimization
    #[clap(long, allow_hyphen_values = true)]
    pub start_y: Option<f64>,

    /// Use plain M3/M5 instead of inline laser mode
    #[clap(long)]
    pub no_inline: bool,

    /// Write the effective configuration to this file
    #[clap(long, value_parser)]
    pub save_config: Option<PathBuf>,
}

impl Cli {
    /// Configuration file to load, if any.
    fn config_source(&self) -> Option<PathBuf> {
        match &self.config {
            Some(path) => Some(path.clone()),
            None => default_config_path().filter(|path| path.exists()),
        }
    }

    /// Loads the configuration and applies command line overrides.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match self.config_source() {
            Some(path) => Config::load_from_file(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(feed_rate) = self.feed_rate {
            config.laser.feed_rate = feed_rate;
        }
        if let Some(rapid_feed_rate) = self.rapid_feed_rate {
            config.laser.rapid_feed_rate = rapid_feed_rate;
        }
        if let Some(laser_power) = self.laser_power {
            config.laser.laser_power = laser_power;
        }
        if let Some(start_x) = self.start_x {
            config.output.start_x = start_x;
        }
        if let Some(start_y) = self.start_y {
            config.output.start_y = start_y;
        }
        if self.no_optimize {
            config.output.optimize_travel = false;
        }
        if self.no_inline {
            config.output.inline_laser = false;
        }
    }
}

/// Where the program text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// Resolves `--output`: directories receive a generated file name.
pub fn destination(output: Option<&Path>, scene: &Scene) -> Destination {
    match output {
        None => Destination::Stdout,
        Some(path) if path.is_dir() => {
            let name = suggest_filename(&scene.selection, Utc::now());
            Destination::File(path.join(format!("{}.{}", name, PROGRAM_EXTENSION)))
        }
        Some(path) => Destination::File(path.to_path_buf()),
    }
}

/// Runs one compile request.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;

    if let Some(path) = &cli.save_config {
        config
            .save_to_file(path)
            .with_context(|| format!("Failed to save config {}", path.display()))?;
        tracing::info!("Saved configuration to {}", path.display());
    }

    let scene = Scene::from_file(&cli.scene)
        .with_context(|| format!("Failed to read scene {}", cli.scene.display()))?;
    let program = generate_program(&scene.selection, &config)?;

    match destination(cli.output.as_deref(), &scene) {
        Destination::Stdout => print!("{}", program),
        Destination::File(path) => {
            std::fs::write(&path, &program)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", program.len(), path.display());
        }
    }

    Ok(())
}
