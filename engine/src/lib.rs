//! Stridecore Engine Library
//!
//! First-person character locomotion core: view orientation, walk/sprint,
//! gravity and jump, and a stand/crouch stance with smoothed camera and
//! collider. Collision detection stays with the host behind the
//! [`physics::CollisionWorld`] trait.
//!
//! # Modules
//!
//! - [`config`] - Tuning profile and controller configuration (JSON)
//! - [`input`] - Per-tick intent snapshot
//! - [`camera`] - Yaw/pitch integration
//! - [`physics`] - Critically-damped smoothing, collision interface, static box world
//! - [`player`] - Sprint, vertical motion, stance and the locomotion controller
//!
//! # Example
//!
//! ```ignore
//! use stridecore_engine::{ControllerConfig, IntentSnapshot, LocomotionController};
//! use stridecore_engine::physics::{StaticWorld, Vec3};
//!
//! let config = ControllerConfig::load("config/controller.json")?;
//! let mut world = StaticWorld::with_ground(0.0);
//! let mut controller = LocomotionController::new(config, Vec3::ZERO);
//!
//! // Each tick
//! let intent = IntentSnapshot::moving(0.0, 1.0);
//! let pose = controller.update(&mut world, &intent, 1.0 / 60.0);
//! ```

pub mod camera;
pub mod config;
pub mod input;
pub mod physics;
pub mod player;

// Re-export the types a host needs for a basic integration
pub use camera::OrientationController;
pub use config::{ConfigError, ControllerConfig, MovementProfile, StanceShape};
pub use input::{IntentActions, IntentSnapshot};
pub use physics::{CollisionWorld, StaticWorld};
pub use player::{LocomotionController, Pose, Stance};
