//! Render-facing transform and GPU instance data.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::pose::Pose;

/// A pose plus a non-uniform scale, as consumed by a renderer drawing unit meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a transform from a pose and a scale.
    pub fn from_pose(pose: Pose, scale: Vec3) -> Self {
        Self {
            position: pose.position,
            rotation: pose.rotation,
            scale,
        }
    }

    /// The rigid part of this transform.
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Raw transform data for GPU upload (instance data).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&Transform> for TransformRaw {
    fn from(transform: &Transform) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
        }
    }
}

impl From<Transform> for TransformRaw {
    fn from(transform: Transform) -> Self {
        Self::from(&transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_matrix_places_origin_at_position() {
        let t = Transform::from_pose(
            Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.4)),
            Vec3::splat(2.0),
        );
        let origin = t.to_matrix().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
    }

    #[test]
    fn transform_matrix_scales_before_rotating() {
        let t = Transform::from_pose(
            Pose::new(Vec3::ZERO, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
            Vec3::new(3.0, 1.0, 1.0),
        );
        let p = t.to_matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), 1e-5));
    }

    #[test]
    fn transform_raw_is_column_major_model() {
        let t = Transform::from_pose(Pose::from_position(Vec3::new(4.0, 5.0, 6.0)), Vec3::ONE);
        let raw = TransformRaw::from(t);
        assert_eq!(raw.model[3], [4.0, 5.0, 6.0, 1.0]);
        assert_eq!(bytemuck::bytes_of(&raw).len(), 64);
    }

    #[test]
    fn transform_pose_round_trips() {
        let pose = Pose::new(Vec3::new(-1.0, 0.5, 2.0), Quat::from_rotation_x(1.1));
        assert_eq!(Transform::from_pose(pose, Vec3::ONE).pose(), pose);
    }
}
