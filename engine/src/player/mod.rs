//! Player Module
//!
//! Provides first-person character locomotion.
//!
//! # Components
//!
//! - [`LocomotionController`] - Per-tick composition of everything below into
//!   one collision-resolved move and a [`Pose`]
//! - [`StanceController`] - Stand/crouch toggle with clearance test and smoothed
//!   camera/collider shape
//! - [`VerticalMotion`] - Gravity accumulation, grounded clamp, decaying jump
//!   impulse
//! - [`SprintToggle`] - Sprint flag that only survives with forward input

pub mod crouch;
pub mod movement_controller;
pub mod sprint;
pub mod vertical;

pub use crouch::{Stance, StanceController, StanceTransition, stance_blocked, stance_check_segment};
pub use movement_controller::{JumpResult, LocomotionController, LocomotionState, Pose};
pub use sprint::{SPRINT_FORWARD_THRESHOLD, SpeedPair, SprintToggle};
pub use vertical::{GROUNDED_VERTICAL_SPEED, JumpOutcome, VerticalMotion};
