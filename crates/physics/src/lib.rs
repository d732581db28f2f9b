//! Rigid-body state and time stepping.
//!
//! Bodies carry a shared [`Shape`], a world-space pose, a linear velocity
//! and an inverse mass. A [`Scene`] owns bodies in insertion order and
//! advances them with explicit Euler integration. Collision detection and
//! constraint solving are not part of this crate; [`ImpulsePhase`] is the
//! hook where they would plug in.

pub mod body;
pub mod error;
pub mod scene;
pub mod shape;

pub use body::*;
pub use error::*;
pub use scene::*;
pub use shape::*;
