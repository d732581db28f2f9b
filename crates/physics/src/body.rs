//! Rigid-body state, frame conversions and impulses.

use std::sync::Arc;

use engine_core::{Pose, Transform};
use glam::{Quat, Vec3};

use crate::error::PhysicsError;
use crate::shape::Shape;

/// A simulated rigid body.
///
/// `position` is the world-space origin of the body frame and `rotation`
/// its world-space orientation. Mass is stored only as its inverse so that
/// `0.0` can stand for an immovable body.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
    inverse_mass: f32,
    shape: Arc<Shape>,
}

impl Body {
    /// A static body at the origin with identity rotation and no velocity.
    pub fn new(shape: impl Into<Arc<Shape>>) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            inverse_mass: 0.0,
            shape: shape.into(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_velocity(mut self, linear_velocity: Vec3) -> Self {
        self.linear_velocity = linear_velocity;
        self
    }

    /// Set the mass. `f32::INFINITY` makes the body immovable.
    pub fn with_mass(mut self, mass: f32) -> Result<Self, PhysicsError> {
        self.set_mass(mass)?;
        Ok(self)
    }

    pub fn with_inverse_mass(mut self, inverse_mass: f32) -> Result<Self, PhysicsError> {
        self.set_inverse_mass(inverse_mass)?;
        Ok(self)
    }

    pub fn set_mass(&mut self, mass: f32) -> Result<(), PhysicsError> {
        // 1 / inf == 0, which is exactly the immovable encoding. Denormal
        // masses overflow the reciprocal and are rejected with it.
        let inverse_mass = mass.recip();
        if mass.is_nan() || mass <= 0.0 || !inverse_mass.is_finite() {
            return Err(PhysicsError::InvalidMass(mass));
        }
        self.inverse_mass = inverse_mass;
        Ok(())
    }

    pub fn set_inverse_mass(&mut self, inverse_mass: f32) -> Result<(), PhysicsError> {
        if !inverse_mass.is_finite() || inverse_mass < 0.0 {
            return Err(PhysicsError::InvalidInverseMass(inverse_mass));
        }
        self.inverse_mass = inverse_mass;
        Ok(())
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    /// True for infinite-mass bodies, which impulses cannot move.
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    pub fn shape(&self) -> &Arc<Shape> {
        &self.shape
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.position = pose.position;
        self.rotation = pose.rotation;
    }

    /// Renormalize `rotation` to counter accumulated floating-point drift.
    pub fn renormalize(&mut self) {
        self.rotation = self.rotation.normalize();
    }

    pub fn center_of_mass_local_space(&self) -> Vec3 {
        self.shape.center_of_mass()
    }

    pub fn center_of_mass_world_space(&self) -> Vec3 {
        self.position + self.rotation * self.center_of_mass_local_space()
    }

    /// Convert a world-space point into the body's center-of-mass frame.
    pub fn world_to_body_space(&self, world_point: Vec3) -> Vec3 {
        self.rotation.inverse() * (world_point - self.center_of_mass_world_space())
    }

    /// Inverse of [`Body::world_to_body_space`].
    pub fn body_to_world_space(&self, body_point: Vec3) -> Vec3 {
        self.center_of_mass_world_space() + self.rotation * body_point
    }

    /// Apply an instantaneous change in momentum.
    ///
    /// Takes effect immediately; several impulses in one step add up.
    pub fn add_impulse(&mut self, impulse: Vec3) {
        self.linear_velocity += impulse * self.inverse_mass;
    }

    /// Transform a renderer can use to draw this body's shape as a unit mesh.
    pub fn render_transform(&self) -> Transform {
        Transform::from_pose(self.pose(), self.shape.render_scale())
    }
}
