//! Config-driven impulses fed into the scene's pre-integration phase.

use glam::Vec3;
use physics::{Body, ImpulsePhase};

use crate::config::ImpulseConfig;

/// Applies each configured impulse right before the physics step it names.
#[derive(Debug)]
pub struct ScheduledImpulses {
    /// Sorted by step, latest first, so the next due impulse is at the end.
    pending: Vec<ImpulseConfig>,
    step: u64,
}

impl ScheduledImpulses {
    pub fn new(mut impulses: Vec<ImpulseConfig>) -> Self {
        impulses.sort_by(|a, b| b.at_step.cmp(&a.at_step));
        Self {
            pending: impulses,
            step: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl ImpulsePhase for ScheduledImpulses {
    fn apply(&mut self, bodies: &mut [Body], _dt: f32) {
        while let Some(next) = self.pending.last().copied() {
            if next.at_step > self.step {
                break;
            }
            self.pending.pop();
            match bodies.get_mut(next.body) {
                Some(body) => {
                    let impulse = Vec3::from_array(next.impulse);
                    log::info!("Step {}: impulse {} on body {}", self.step, impulse, next.body);
                    body.add_impulse(impulse);
                }
                None => log::warn!("Impulse targets missing body {}", next.body),
            }
        }
        self.step += 1;
    }
}
