//! Configuration for the AR surface renderer.
//!
//! Settings persist to disk as RON files. Supports CLI overrides via clap,
//! hot-reload detection, validation, and forward/backward compatible
//! serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, SurfaceConfig};
pub use error::ConfigError;
