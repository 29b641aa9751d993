//! LaserCam Settings Crate
//!
//! Handles the laser parameters supplied with each compile request and the
//! output preferences (travel optimization, start position, laser mode).

pub mod config;

pub use config::{default_config_path, Config, LaserSettings, OutputSettings};
