//! Physics module
//!
//! Everything the locomotion core needs below the gameplay layer: the
//! critically-damped smoother and the narrow interface to the host's collision
//! engine.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, time in seconds, angles in degrees.
//!
//! # Submodules
//!
//! - [`types`] - Core math types re-exported from glam
//! - [`smoothing`] - Closed-form critically-damped smoothing
//! - [`collision`] - `CollisionWorld` trait, body and collider data
//! - [`static_world`] - Axis-aligned box world implementing `CollisionWorld`

pub mod collision;
pub mod smoothing;
pub mod static_world;
pub mod types;

// Re-export commonly used types at the physics module level
pub use collision::{CapsuleCollider, CharacterBody, CollisionMask, CollisionWorld, MoveResult};
pub use smoothing::{SmoothDamp, smooth};
pub use static_world::{GroundPlane, StaticBox, StaticWorld};
pub use types::{Quat, Vec2, Vec3};
