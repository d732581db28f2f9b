//! Per-frame render snapshot: what a renderer would upload after a step.

use engine_core::TransformRaw;
use physics::{Scene, ShapeType};

/// Instance data grouped by the unit mesh it would be drawn with.
#[derive(Debug, Default)]
pub struct FrameSnapshot {
    pub spheres: Vec<TransformRaw>,
    pub boxes: Vec<TransformRaw>,
    pub capsules: Vec<TransformRaw>,
}

impl FrameSnapshot {
    /// Collect instances in body insertion order.
    pub fn capture(scene: &Scene) -> Self {
        let mut snapshot = Self::default();
        for body in scene.bodies() {
            let raw = TransformRaw::from(body.render_transform());
            match body.shape().shape_type() {
                ShapeType::Sphere => snapshot.spheres.push(raw),
                ShapeType::Box => snapshot.boxes.push(raw),
                ShapeType::Capsule => snapshot.capsules.push(raw),
            }
        }
        snapshot
    }

    pub fn instance_count(&self) -> usize {
        self.spheres.len() + self.boxes.len() + self.capsules.len()
    }

    /// Total bytes across all instance buffers.
    pub fn byte_len(&self) -> usize {
        [&self.spheres, &self.boxes, &self.capsules]
            .iter()
            .map(|instances| bytemuck::cast_slice::<TransformRaw, u8>(instances).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use physics::{Body, Shape};

    #[test]
    fn snapshot_groups_by_shape_and_keeps_order() {
        let mut scene = Scene::new();
        scene.add_body(Body::new(Shape::sphere(1.0).unwrap()).with_position(Vec3::X));
        scene.add_body(Body::new(Shape::cuboid(Vec3::ONE).unwrap()));
        scene.add_body(Body::new(Shape::sphere(2.0).unwrap()).with_position(Vec3::Z));

        let snapshot = FrameSnapshot::capture(&scene);
        assert_eq!(snapshot.spheres.len(), 2);
        assert_eq!(snapshot.boxes.len(), 1);
        assert!(snapshot.capsules.is_empty());
        assert_eq!(snapshot.spheres[0].model[3], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(snapshot.spheres[1].model[3], [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(snapshot.instance_count(), 3);
        assert_eq!(snapshot.byte_len(), 3 * 64);
    }

    #[test]
    fn snapshot_reflects_latest_step() {
        let body = Body::new(Shape::sphere(1.0).unwrap()).with_velocity(Vec3::Y);
        let mut scene = Scene::with_bodies([body]);
        scene.update(2.0);
        let snapshot = FrameSnapshot::capture(&scene);
        assert_eq!(snapshot.spheres[0].model[3], [0.0, 2.0, 0.0, 1.0]);
    }
}
