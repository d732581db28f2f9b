//! Geometric descriptors attached to bodies.

use glam::Vec3;

use crate::error::PhysicsError;

/// Variant tag of a [`Geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Sphere,
    Box,
    Capsule,
}

/// Closed set of shape variants, centered on the body origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere { radius: f32 },
    /// Axis-aligned in body space, given by half extents.
    Box { half_extents: Vec3 },
    /// Y-aligned capsule; `height` is the length of the cylindrical section.
    Capsule { radius: f32, height: f32 },
}

/// Body-attached geometry plus its mass centroid.
///
/// Immutable once built; bodies share it through `Arc`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    geometry: Geometry,
    center_of_mass: Vec3,
}

fn check_dimension(kind: &'static str, value: f32) -> Result<f32, PhysicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidShape { kind, value })
    }
}

impl Shape {
    pub(crate) fn from_geometry(geometry: Geometry) -> Self {
        Self {
            geometry,
            center_of_mass: Vec3::ZERO,
        }
    }

    pub fn sphere(radius: f32) -> Result<Self, PhysicsError> {
        let radius = check_dimension("sphere radius", radius)?;
        Ok(Self::from_geometry(Geometry::Sphere { radius }))
    }

    pub fn cuboid(half_extents: Vec3) -> Result<Self, PhysicsError> {
        for value in half_extents.to_array() {
            check_dimension("box half extent", value)?;
        }
        Ok(Self::from_geometry(Geometry::Box { half_extents }))
    }

    pub fn capsule(radius: f32, height: f32) -> Result<Self, PhysicsError> {
        Ok(Self::from_geometry(Geometry::Capsule {
            radius: check_dimension("capsule radius", radius)?,
            height: check_dimension("capsule height", height)?,
        }))
    }

    /// Move the mass centroid away from the body origin (body space).
    pub fn with_center_of_mass(mut self, offset: Vec3) -> Result<Self, PhysicsError> {
        if let Some(value) = offset.to_array().into_iter().find(|v| !v.is_finite()) {
            return Err(PhysicsError::InvalidShape {
                kind: "center of mass",
                value,
            });
        }
        self.center_of_mass = offset;
        Ok(self)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn shape_type(&self) -> ShapeType {
        match self.geometry {
            Geometry::Sphere { .. } => ShapeType::Sphere,
            Geometry::Box { .. } => ShapeType::Box,
            Geometry::Capsule { .. } => ShapeType::Capsule,
        }
    }

    /// Offset of the mass centroid from the body origin, in body space.
    /// Zero unless set with [`Shape::with_center_of_mass`].
    pub fn center_of_mass(&self) -> Vec3 {
        self.center_of_mass
    }

    /// Scale to apply to the matching unit mesh (radius 1 sphere, half-size 1
    /// cube, radius 1 capsule with a height 1 cylinder) when drawing.
    pub fn render_scale(&self) -> Vec3 {
        match self.geometry {
            Geometry::Sphere { radius } => Vec3::splat(radius),
            Geometry::Box { half_extents } => half_extents,
            Geometry::Capsule { radius, height } => Vec3::new(radius, height, radius),
        }
    }
}
