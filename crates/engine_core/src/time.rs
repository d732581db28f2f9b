//! Time management for a fixed-timestep simulation loop.

use std::time::{Duration, Instant};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimeError {
    #[error("rate {0} Hz does not give a representable non-zero timestep")]
    InvalidRate(f64),
}

/// Period of `hz`, rejecting rates whose step is zero, NaN or too long for `Duration`.
pub fn step_for_rate(hz: f64) -> Result<Duration, TimeError> {
    if hz.is_nan() || hz <= 0.0 {
        return Err(TimeError::InvalidRate(hz));
    }
    match Duration::try_from_secs_f64(1.0 / hz) {
        Ok(step) if !step.is_zero() => Ok(step),
        _ => Err(TimeError::InvalidRate(hz)),
    }
}

/// Accumulates frame time and hands it out in fixed physics steps.
///
/// Frames are fed either from the wall clock ([`Time::tick`]) or with an
/// explicit delta ([`Time::advance`]) for deterministic headless runs.
#[derive(Debug)]
pub struct Time {
    /// Wall-clock instant of the last `tick`.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time across all frames.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Fixed timestep for physics (default 60 Hz).
    fixed_timestep: Duration,
    /// Accumulated time not yet consumed by fixed updates.
    accumulator: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
            accumulator: Duration::ZERO,
        }
    }

    /// Start a new frame using the wall clock.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta);
    }

    /// Start a new frame that lasted exactly `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        self.accumulator += delta;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }

    /// Fraction of a fixed step left in the accumulator, in `[0, 1)`.
    pub fn interpolation_alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / self.fixed_timestep.as_secs_f32()
    }

    /// Set the fixed timestep rate in Hz. The current rate is kept on error.
    pub fn set_fixed_rate(&mut self, hz: f64) -> Result<(), TimeError> {
        self.fixed_timestep = step_for_rate(hz)?;
        Ok(())
    }
}
