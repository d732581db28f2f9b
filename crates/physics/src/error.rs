//! Construction-time validation errors.

use thiserror::Error;

/// Errors raised while building bodies and shapes.
///
/// Simulation operations themselves are infallible; only invalid
/// construction inputs are reported.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PhysicsError {
    #[error("mass must be positive and not NaN, got {0}")]
    InvalidMass(f32),
    #[error("inverse mass must be finite and >= 0, got {0}")]
    InvalidInverseMass(f32),
    #[error("invalid {kind} dimension {value}: must be finite and > 0")]
    InvalidShape { kind: &'static str, value: f32 },
}
