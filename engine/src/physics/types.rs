//! Math type re-exports from glam
//!
//! The locomotion core works in glam's f32 types throughout. Angles stored in
//! controller state are degrees; quaternions are built on demand.

pub use glam::{Quat, Vec2, Vec3};
