//! Rigid poses (position + orientation) and their composition operators.

use glam::{Quat, Vec3};

/// A rigid transform locating a frame relative to another.
///
/// `rotation` is expected to be a unit quaternion. The composition
/// operators never renormalize; call [`Pose::normalized`] when a pose has
/// been composed many times and drift matters.
///
/// Equality is exact and component-wise. Use [`Pose::abs_diff_eq`] when a
/// tolerance is wanted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Zero translation, identity rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose at the given position with identity rotation.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Parent-then-child composition.
    ///
    /// If `self` is a parent frame and `child` is a pose local to it, the
    /// result is the child's pose in the parent's ambient frame.
    pub fn transform_by(&self, child: &Pose) -> Pose {
        Pose {
            position: self.position + self.rotation * child.position,
            rotation: self.rotation * child.rotation,
        }
    }

    /// Offset of `self` from `child`.
    ///
    /// The position difference is NOT rotated into `child`'s frame, so this
    /// is not the inverse of [`Pose::transform_by`] unless `child` has an
    /// identity rotation. Use `child.inverse().transform_by(self)` for a true
    /// frame-relative pose.
    pub fn relative_by(&self, child: &Pose) -> Pose {
        Pose {
            position: self.position - child.position,
            rotation: self.rotation * child.rotation.inverse(),
        }
    }

    /// The rigid inverse: `p.transform_by(&p.inverse())` is the identity.
    pub fn inverse(&self) -> Pose {
        let rotation = self.rotation.inverse();
        Pose {
            position: -(rotation * self.position),
            rotation,
        }
    }

    /// Map a point from this pose's local frame into the ambient frame.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * point
    }

    /// Copy of this pose with its rotation renormalized to unit length.
    pub fn normalized(&self) -> Pose {
        Pose {
            position: self.position,
            rotation: self.rotation.normalize(),
        }
    }

    pub fn is_normalized(&self) -> bool {
        self.rotation.is_normalized()
    }

    /// Component-wise comparison within `max_abs_diff`.
    ///
    /// `q` and `-q` describe the same orientation, so either sign matches.
    pub fn abs_diff_eq(&self, other: &Pose, max_abs_diff: f32) -> bool {
        self.position.abs_diff_eq(other.position, max_abs_diff)
            && (self.rotation.abs_diff_eq(other.rotation, max_abs_diff)
                || self.rotation.abs_diff_eq(-other.rotation, max_abs_diff))
    }
}
