//! Command-line argument parsing for the surface demo.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "arsurf", about = "Feathered AR surface renderer")]
pub struct CliArgs {
    /// Feathering distance in surface-local units.
    #[arg(long)]
    pub feathering_distance: Option<f32>,

    /// Material applied to new surface meshes.
    #[arg(long)]
    pub material: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Number of simulated frames to run.
    #[arg(long, default_value_t = 8)]
    pub frames: u32,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(distance) = args.feathering_distance {
            self.surface.feathering_distance = distance;
        }
        if let Some(ref material) = args.material {
            self.surface.default_material = Some(material.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
