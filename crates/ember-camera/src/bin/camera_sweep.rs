// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Drives an interpolated camera through a full transition on a manual clock
//! and logs every sample.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ember_camera::{Camera, CameraConfig, FixedCamera, InterpolatedCamera, ManualClock};
use ember_math::{ExportBuffer, Quat, Vec3};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sweep an Ember camera transition and log each sample")]
struct Args {
    /// JSON camera config; defaults apply to missing fields or a missing file flag
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of intervals the transition is split into
    #[arg(long, default_value_t = 10)]
    steps: u32,
    /// Keep sampling this many intervals past the end of the transition
    #[arg(long, default_value_t = 1)]
    overshoot: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = match &args.config {
        Some(path) => CameraConfig::from_path(path)
            .with_context(|| format!("load camera config {}", path.display()))?,
        None => CameraConfig::default(),
    };

    let projection = config.projection_matrix();
    let origin = FixedCamera::new(Vec3::ZERO, Quat::identity(), projection.clone());
    let destination = FixedCamera::new(
        config.destination_position,
        config.destination_rotation(),
        projection,
    );

    let clock = ManualClock::new();
    let camera = InterpolatedCamera::with_clock(
        origin,
        destination,
        clock.origin(),
        config.transition(),
        &clock,
    );
    camera.on_done(|state| info!(?state, "swap to destination camera"));

    let steps = args.steps.max(1);
    let mut upload = ExportBuffer::with_capacity(16);
    for step in 0..=steps + args.overshoot {
        clock.set_elapsed(config.transition() * step / steps);
        let sample = camera.sample();
        let view_projection = camera
            .view_projection()
            .context("compose view-projection")?;
        let floats = upload.load_matrix(&view_projection).len();
        info!(
            step,
            t = sample.t,
            state = ?sample.state,
            position = ?sample.position.to_array(),
            rotation = ?sample.rotation.to_array(),
            floats,
            "camera sample"
        );
    }

    let destination = camera.into_destination();
    info!(
        position = ?destination.position().to_array(),
        rotation = ?destination.rotation().to_array(),
        "sweep finished"
    );
    Ok(())
}
