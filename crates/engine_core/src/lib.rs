//! Core math types for the toy physics workspace.
//!
//! This crate provides the foundational types used by the simulation and
//! by whatever drives it:
//! - `Pose` rigid transforms and their composition algebra
//! - Render-facing `Transform` and GPU instance data
//! - Fixed-timestep time management

pub mod pose;
pub mod time;
pub mod transform;

pub use pose::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec3};
