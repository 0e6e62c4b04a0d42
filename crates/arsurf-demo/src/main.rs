//! Demo binary that drives the surface renderer against a simulated AR session.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p arsurf-demo -- --feathering-distance 15 --frames 10`.

mod session;

use arsurf_config::{CliArgs, Config};
use arsurf_surface::SurfaceRenderer;
use clap::Parser;
use tracing::info;

use crate::session::{SimMesh, SimulatedSession};

const SESSION_SEED: u64 = 0x5eed_a11e;

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .expect("Failed to resolve config directory")
            .join("arsurf")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    if let Err(e) = config.validate() {
        eprintln!("{e}, using defaults");
        config = Config::default();
    }

    let log_dir = config_dir.join("logs");
    arsurf_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    info!(
        feathering_distance = config.surface.feathering_distance,
        material = config.surface.default_material.as_deref().unwrap_or("<none>"),
        frames = args.frames,
        "Starting simulated surface session"
    );

    let mut session = SimulatedSession::new(SESSION_SEED);
    let mut renderer: SurfaceRenderer<SimMesh> = SurfaceRenderer::from_config(&config);

    for _ in 0..args.frames {
        let report = renderer.tick(&mut session);
        info!(
            frame = session.frame(),
            created = report.created,
            rebuilt = report.rebuilt,
            cleared = report.cleared,
            released = report.released,
            deferred = report.creation_failures,
            "Surfaces found: {}",
            report.registered
        );
        session.advance();
    }

    for (surface, mesh) in renderer.registry().iter() {
        info!(%surface, triangles = mesh.triangle_count(), "Surface still tracked at exit");
    }

    let summary = renderer.shutdown();
    info!(
        destroyed = summary.destroyed,
        stale = summary.stale,
        "Simulated surface session finished"
    );
}
