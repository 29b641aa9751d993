//! # LaserCam
//!
//! Compiles 2D vector shape trees into laser cutter G-code, with greedy
//! travel optimization between shapes.
//!
//! ## Architecture
//!
//! LaserCam is organized as a workspace with multiple crates:
//!
//! 1. **lasercam-core** - Error taxonomy and number formatting
//! 2. **lasercam-settings** - Laser and output settings, config files
//! 3. **lasercam-designer** - Shape model, scene import, compiler, optimizer
//! 4. **lasercam** - Command line front end (this crate)

pub mod cli;

pub use lasercam_designer as designer;

pub use lasercam_core::{Error, Result, ShapeError, ValidationError};
pub use lasercam_designer::{
    generate_program, suggest_filename, Scene, SelectedNode, Shape, ShapeKind,
};
pub use lasercam_settings::{Config, LaserSettings, OutputSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Compact output on stderr, leaving stdout for program text
/// - RUST_LOG environment variable support (INFO when unset)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
