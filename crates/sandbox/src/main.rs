//! Headless sandbox driver: steps a physics scene at a fixed rate and snapshots it every frame.

mod config;
mod impulses;
mod snapshot;

use anyhow::{Context, Result};
use config::SandboxConfig;
use engine_core::Time;
use impulses::ScheduledImpulses;
use physics::Scene;
use snapshot::FrameSnapshot;
use std::path::PathBuf;

/// Run the configured number of frames, stepping physics as the clock allows.
fn run(config: &SandboxConfig, scene: &mut Scene) -> Result<()> {
    let mut time = Time::new();
    time.set_fixed_rate(config.physics_rate_hz)?;
    let frame_delta = config.frame_delta()?;
    let mut impulses = ScheduledImpulses::new(config.impulses.clone());

    for _ in 0..config.frames {
        if config.realtime {
            std::thread::sleep(frame_delta);
            time.tick();
        } else {
            time.advance(frame_delta);
        }

        while time.should_fixed_update() {
            scene.update_with(time.fixed_timestep_seconds(), &mut impulses);
        }

        let snapshot = FrameSnapshot::capture(scene);
        log::debug!(
            "Frame {} t={:.3}s steps={} instances={} ({} bytes) alpha={:.2}",
            time.frame_count(),
            time.elapsed_seconds(),
            scene.step_count(),
            snapshot.instance_count(),
            snapshot.byte_len(),
            time.interpolation_alpha()
        );
    }

    if impulses.remaining() > 0 {
        log::warn!("{} scheduled impulses never fired", impulses.remaining());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(config::default_path);
    let config = SandboxConfig::load(&path)?;
    let mut scene = config.build_scene().context("building scene")?;

    log::info!(
        "Starting sandbox: {} bodies, {} Hz physics, {} frames at {} Hz",
        scene.len(),
        config.physics_rate_hz,
        config.frames,
        config.frame_rate_hz
    );

    run(&config, &mut scene)?;

    log::info!("Finished after {} physics steps", scene.step_count());
    for (id, body) in scene.iter() {
        log::info!(
            "  body {:>3} {:?}: position {} velocity {}",
            id.raw(),
            body.shape().shape_type(),
            body.position,
            body.linear_velocity
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn run_steps_match_simulated_duration() {
        let config = SandboxConfig::parse(
            "(physics_rate_hz: 50.0, frame_rate_hz: 25.0, frames: 10,
              bodies: [(velocity: (1.0, 0.0, 0.0), mass: Some(1.0))])",
        )
        .unwrap();
        let mut scene = config.build_scene().unwrap();
        run(&config, &mut scene).unwrap();
        // 10 frames of 40 ms at a 20 ms step.
        assert_eq!(scene.step_count(), 20);
        assert!(scene.bodies()[0].position.abs_diff_eq(Vec3::new(0.4, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn run_applies_scheduled_impulses() {
        let config = SandboxConfig::parse(
            "(physics_rate_hz: 10.0, frame_rate_hz: 10.0, frames: 5,
              bodies: [(mass: Some(2.0))],
              impulses: [(at_step: 0, body: 0, impulse: (0.0, 2.0, 0.0))])",
        )
        .unwrap();
        let mut scene = config.build_scene().unwrap();
        run(&config, &mut scene).unwrap();
        let body = &scene.bodies()[0];
        assert_eq!(body.linear_velocity, Vec3::new(0.0, 1.0, 0.0));
        assert!(body.position.abs_diff_eq(Vec3::new(0.0, 0.5, 0.0), 1e-4));
    }
}
