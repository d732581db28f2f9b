//! Sandbox configuration (timing, initial bodies, scheduled impulses). Loaded from sandbox.ron.

use anyhow::{bail, Context, Result};
use engine_core::step_for_rate;
use glam::{Quat, Vec3};
use physics::{Body, Scene, Shape};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Settings for one headless run. Every field falls back to its default when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Fixed physics rate in Hz.
    pub physics_rate_hz: f64,
    /// Simulated render rate in Hz; each frame feeds `1 / frame_rate_hz` into the clock.
    pub frame_rate_hz: f64,
    /// Number of frames to run.
    pub frames: u64,
    /// Sleep between frames and use the wall clock instead of simulated time.
    pub realtime: bool,
    /// Bodies added to the scene, in order.
    pub bodies: Vec<BodyConfig>,
    /// Random spheres added after `bodies`.
    pub scatter: Option<ScatterConfig>,
    /// Impulses applied before the physics step they name.
    pub impulses: Vec<ImpulseConfig>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            physics_rate_hz: 60.0,
            frame_rate_hz: 60.0,
            frames: 600,
            realtime: false,
            bodies: Vec::new(),
            scatter: None,
            impulses: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub position: [f32; 3],
    /// Quaternion as `(x, y, z, w)`. Renormalized on load.
    pub rotation: [f32; 4],
    pub velocity: [f32; 3],
    /// `None` makes the body static.
    pub mass: Option<f32>,
    pub shape: ShapeConfig,
    /// Mass centroid offset from the body origin, in body space.
    pub center_of_mass: [f32; 3],
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            velocity: [0.0; 3],
            mass: None,
            shape: ShapeConfig::default(),
            center_of_mass: [0.0; 3],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum ShapeConfig {
    Sphere { radius: f32 },
    Box { half_extents: [f32; 3] },
    Capsule { radius: f32, height: f32 },
}

impl Default for ShapeConfig {
    fn default() -> Self {
        ShapeConfig::Sphere { radius: 1.0 }
    }
}

impl ShapeConfig {
    fn to_shape(self) -> Result<Shape, physics::PhysicsError> {
        match self {
            ShapeConfig::Sphere { radius } => Shape::sphere(radius),
            ShapeConfig::Box { half_extents } => Shape::cuboid(Vec3::from_array(half_extents)),
            ShapeConfig::Capsule { radius, height } => Shape::capsule(radius, height),
        }
    }
}

/// Seeded cloud of identical spheres.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub count: usize,
    pub seed: u64,
    /// Positions are drawn from `[-extent, extent]` on each axis.
    pub extent: f32,
    /// Velocity components are drawn from `[-speed, speed]`.
    pub speed: f32,
    pub radius: f32,
    pub mass: f32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            count: 16,
            seed: 0,
            extent: 10.0,
            speed: 1.0,
            radius: 0.5,
            mass: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ImpulseConfig {
    /// 0-based physics step the impulse is applied before.
    pub at_step: u64,
    /// Index into the scene's bodies, in insertion order.
    pub body: usize,
    pub impulse: [f32; 3],
}

impl SandboxConfig {
    /// Load config from `path`. A missing file yields the defaults; an unreadable
    /// or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {:?}", path))?;
        Self::parse(&data).with_context(|| format!("parsing config {:?}", path))
    }

    pub fn parse(data: &str) -> Result<Self> {
        let config: Self = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        step_for_rate(self.physics_rate_hz).context("physics_rate_hz")?;
        self.frame_delta()?;
        if let Some(scatter) = &self.scatter {
            // The sampled range spans twice the half-width.
            for (name, half) in [("extent", scatter.extent), ("speed", scatter.speed)] {
                if !(2.0 * half).is_finite() {
                    bail!(
                        "scatter {} must be finite and below f32::MAX / 2, got {}",
                        name,
                        half
                    );
                }
            }
        }
        Ok(())
    }

    /// Simulated duration of one frame.
    pub fn frame_delta(&self) -> Result<Duration> {
        step_for_rate(self.frame_rate_hz).context("frame_rate_hz")
    }

    /// Build the initial scene. With no bodies and no scatter this is the
    /// single static unit sphere.
    pub fn build_scene(&self) -> Result<Scene> {
        if self.bodies.is_empty() && self.scatter.is_none() {
            return Ok(Scene::single_sphere());
        }

        let mut scene = Scene::new();
        for (i, body) in self.bodies.iter().enumerate() {
            let body = body_from_config(body).with_context(|| format!("body #{}", i))?;
            scene.add_body(body);
        }
        if let Some(scatter) = &self.scatter {
            for body in scatter_bodies(scatter).context("scatter")? {
                scene.add_body(body);
            }
        }

        for impulse in &self.impulses {
            if impulse.body >= scene.len() {
                bail!(
                    "impulse at step {} targets body {} but the scene has {} bodies",
                    impulse.at_step,
                    impulse.body,
                    scene.len()
                );
            }
        }
        Ok(scene)
    }
}

fn body_from_config(config: &BodyConfig) -> Result<Body> {
    let rotation = Quat::from_array(config.rotation);
    if !rotation.is_finite() || rotation.length_squared() == 0.0 {
        bail!("rotation must be a finite, non-zero quaternion, got {:?}", config.rotation);
    }
    let shape = config
        .shape
        .to_shape()?
        .with_center_of_mass(Vec3::from_array(config.center_of_mass))?;
    let mut body = Body::new(shape)
        .with_position(Vec3::from_array(config.position))
        .with_rotation(rotation.normalize())
        .with_velocity(Vec3::from_array(config.velocity));
    if let Some(mass) = config.mass {
        body.set_mass(mass)?;
    }
    Ok(body)
}

fn scatter_bodies(config: &ScatterConfig) -> Result<Vec<Body>> {
    let shape = Arc::new(Shape::sphere(config.radius)?);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let extent = config.extent.abs();
    let speed = config.speed.abs();
    fn axis(rng: &mut StdRng, half: f32) -> f32 {
        rng.gen_range(-half..=half)
    }

    (0..config.count)
        .map(|_| -> Result<Body> {
            let position = Vec3::new(
                axis(&mut rng, extent),
                axis(&mut rng, extent),
                axis(&mut rng, extent),
            );
            let velocity = Vec3::new(
                axis(&mut rng, speed),
                axis(&mut rng, speed),
                axis(&mut rng, speed),
            );
            Ok(Body::new(shape.clone())
                .with_position(position)
                .with_velocity(velocity)
                .with_mass(config.mass)?)
        })
        .collect()
}

/// `sandbox.ron` in the current directory.
pub fn default_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("sandbox.ron")
}
