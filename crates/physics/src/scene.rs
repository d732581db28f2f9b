//! Body ownership and fixed-step integration.

use std::sync::Arc;

use crate::body::Body;
use crate::shape::{Geometry, Shape};

/// Stable identifier for a body owned by a [`Scene`].
///
/// Ids are never reused within one scene, so a removed body's id stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

impl BodyId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Work run over every body right before integration.
///
/// This is where forces, contact impulses and constraint solving would
/// feed velocity changes into a step. The scene only integrates.
pub trait ImpulsePhase {
    fn apply(&mut self, bodies: &mut [Body], dt: f32);
}

impl<F> ImpulsePhase for F
where
    F: FnMut(&mut [Body], f32),
{
    fn apply(&mut self, bodies: &mut [Body], dt: f32) {
        self(bodies, dt)
    }
}

/// Owns an ordered set of bodies and advances them through time.
///
/// Insertion order is the only order: it is the iteration order of
/// [`Scene::update`] and of [`Scene::bodies`], and removal keeps the
/// relative order of the remaining bodies.
#[derive(Debug, Default)]
pub struct Scene {
    bodies: Vec<Body>,
    // Parallel to `bodies`.
    ids: Vec<BodyId>,
    next_id: u64,
    step_count: u64,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene seeded with `bodies`, in iteration order.
    pub fn with_bodies(bodies: impl IntoIterator<Item = Body>) -> Self {
        let mut scene = Self::new();
        for body in bodies {
            scene.add_body(body);
        }
        scene
    }

    /// One static unit sphere at the origin.
    pub fn single_sphere() -> Self {
        let sphere = Shape::from_geometry(Geometry::Sphere { radius: 1.0 });
        Self::with_bodies([Body::new(Arc::new(sphere))])
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        log::debug!(
            "Adding body {:?} ({:?}) at {}",
            id,
            body.shape().shape_type(),
            body.position
        );
        self.bodies.push(body);
        self.ids.push(id);
        id
    }

    /// Remove a body, keeping the order of the rest. Returns `None` for an
    /// id this scene does not own.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let index = self.index_of(id)?;
        self.ids.remove(index);
        log::debug!("Removing body {:?}", id);
        Some(self.bodies.remove(index))
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let index = self.index_of(id)?;
        Some(&mut self.bodies[index])
    }

    /// All bodies in insertion order, as of the last completed step.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Ids in the same order as [`Scene::bodies`].
    pub fn ids(&self) -> &[BodyId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.ids.iter().copied().zip(self.bodies.iter())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Release every body. Ids handed out earlier stay invalid.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.ids.clear();
    }

    /// Number of completed calls to `update`/`update_with`.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Advance every body by `dt` seconds: `position += linear_velocity * dt`.
    ///
    /// Velocity is left untouched. `dt` is not validated; negative or huge
    /// values integrate as given.
    pub fn update(&mut self, dt: f32) {
        log::trace!("Step {} dt={} bodies={}", self.step_count, dt, self.bodies.len());
        for body in &mut self.bodies {
            body.position += body.linear_velocity * dt;
        }
        self.step_count += 1;
    }

    /// Run `phase` over the bodies, then integrate as [`Scene::update`] does.
    pub fn update_with(&mut self, dt: f32, phase: &mut impl ImpulsePhase) {
        phase.apply(&mut self.bodies, dt);
        self.update(dt);
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        // Ids are pushed in increasing order and removal preserves order.
        self.ids.binary_search(&id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn moving_sphere(position: Vec3, velocity: Vec3) -> Body {
        Body::new(Shape::sphere(0.5).unwrap())
            .with_position(position)
            .with_velocity(velocity)
    }

    #[test]
    fn scene_update_integrates_cumulatively() {
        let mut scene = Scene::with_bodies([moving_sphere(Vec3::ZERO, Vec3::X)]);
        scene.update(1.0);
        assert_eq!(scene.bodies()[0].position, Vec3::new(1.0, 0.0, 0.0));
        scene.update(0.5);
        assert_eq!(scene.bodies()[0].position, Vec3::new(1.5, 0.0, 0.0));
        assert_eq!(scene.step_count(), 2);
    }

    #[test]
    fn scene_update_leaves_velocity_unchanged() {
        let velocity = Vec3::new(1.0, -2.0, 3.0);
        let mut scene = Scene::with_bodies([moving_sphere(Vec3::ZERO, velocity)]);
        scene.update(0.25);
        assert_eq!(scene.bodies()[0].linear_velocity, velocity);
    }

    #[test]
    fn scene_update_accepts_negative_dt() {
        let mut scene = Scene::with_bodies([moving_sphere(Vec3::ZERO, Vec3::Y)]);
        scene.update(-2.0);
        assert_eq!(scene.bodies()[0].position, Vec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn scene_bodies_keep_insertion_order() {
        let mut scene = Scene::new();
        let xs = [3.0, -1.0, 7.0, 0.0];
        for x in xs {
            scene.add_body(moving_sphere(Vec3::new(x, 0.0, 0.0), Vec3::Z));
        }
        scene.update(1.0);
        scene.update(1.0);
        let got: Vec<f32> = scene.bodies().iter().map(|b| b.position.x).collect();
        assert_eq!(got, xs);
    }

    #[test]
    fn scene_remove_body_preserves_order_and_ids() {
        let mut scene = Scene::new();
        let a = scene.add_body(moving_sphere(Vec3::X, Vec3::ZERO));
        let b = scene.add_body(moving_sphere(Vec3::Y, Vec3::ZERO));
        let c = scene.add_body(moving_sphere(Vec3::Z, Vec3::ZERO));

        let removed = scene.remove_body(b).expect("b is owned by the scene");
        assert_eq!(removed.position, Vec3::Y);
        assert_eq!(scene.ids(), &[a, c]);
        assert_eq!(scene.body(c).map(|body| body.position), Some(Vec3::Z));
        assert!(scene.remove_body(b).is_none());
        assert!(scene.body(b).is_none());

        let d = scene.add_body(moving_sphere(Vec3::ONE, Vec3::ZERO));
        assert!(d > c);
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn scene_body_mut_impulse_feeds_next_update() {
        let mut scene = Scene::new();
        let body = moving_sphere(Vec3::ZERO, Vec3::ZERO).with_mass(2.0).unwrap();
        let id = scene.add_body(body);
        scene.body_mut(id).unwrap().add_impulse(Vec3::new(4.0, 0.0, 0.0));
        scene.update(0.5);
        assert_eq!(scene.body(id).unwrap().position, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn scene_update_with_runs_phase_before_integration() {
        let mut scene = Scene::with_bodies([
            moving_sphere(Vec3::ZERO, Vec3::ZERO).with_inverse_mass(1.0).unwrap(),
            moving_sphere(Vec3::ZERO, Vec3::ZERO),
        ]);
        let mut calls = 0;
        let mut kick = |bodies: &mut [Body], _dt: f32| {
            calls += 1;
            for body in bodies {
                body.add_impulse(Vec3::X);
            }
        };
        scene.update_with(1.0, &mut kick);
        assert_eq!(calls, 1);
        assert_eq!(scene.bodies()[0].position, Vec3::X);
        // Static body is not moved by the impulse.
        assert_eq!(scene.bodies()[1].position, Vec3::ZERO);
    }

    #[test]
    fn scene_single_sphere_matches_seeded_scene() {
        let scene = Scene::single_sphere();
        assert_eq!(scene.len(), 1);
        let body = &scene.bodies()[0];
        assert_eq!(*body.shape().geometry(), Geometry::Sphere { radius: 1.0 });
        assert_eq!(body.center_of_mass_local_space(), Vec3::ZERO);
        assert!(body.is_static());
    }

    #[test]
    fn scene_clear_releases_bodies() {
        let shape = Arc::new(Shape::sphere(1.0).unwrap());
        let mut scene = Scene::with_bodies([Body::new(shape.clone()), Body::new(shape.clone())]);
        assert_eq!(Arc::strong_count(&shape), 3);
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(Arc::strong_count(&shape), 1);
    }

    #[test]
    fn scene_iter_pairs_ids_with_bodies() {
        let mut scene = Scene::new();
        let a = scene.add_body(moving_sphere(Vec3::X, Vec3::ZERO));
        let b = scene.add_body(moving_sphere(Vec3::Y, Vec3::ZERO));
        let pairs: Vec<(BodyId, Vec3)> =
            scene.iter().map(|(id, body)| (id, body.position)).collect();
        assert_eq!(pairs, vec![(a, Vec3::X), (b, Vec3::Y)]);
        assert_eq!(a.raw(), 0);
        assert_eq!(b.raw(), 1);
    }
}
