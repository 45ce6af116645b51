//! Player Stance System
//!
//! Two-state stance machine (Stand, Crouch) with collision-gated transitions
//! and continuous shape smoothing.
//!
//! # Transitions
//!
//! A crouch-toggle flips the logical stance instantly, but only after a
//! capsule overlap test confirms the *target* collider height fits where the
//! character stands. A blocked request is silently ignored. Jumping while
//! crouched stands the character up without any test.
//!
//! # Shape Smoothing
//!
//! Every tick, whether or not a transition happened, camera height, collider
//! height and collider center approach the active stance's [`StanceShape`]
//! through three critically-damped smoothers sharing one time constant. The
//! logical state flips instantly; the geometry never jumps.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stridecore_engine::player::{StanceController, Stance};
//!
//! let mut stance = StanceController::new();
//!
//! // Each tick:
//! let target = config.shape(stance.stance());
//! stance.smooth_shape(target, &mut camera_height, &mut body.collider, smoothing, dt);
//! if intent.actions.crouch {
//!     stance.toggle(&world, &body, &config);
//! }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{ControllerConfig, StanceShape};
use crate::physics::collision::{CapsuleCollider, CharacterBody, CollisionMask, CollisionWorld};
use crate::physics::smoothing::SmoothDamp;

/// Player stance states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    /// Upright, full collider
    #[default]
    Stand,
    /// Lowered camera and shorter collider
    Crouch,
}

impl Stance {
    /// The stance a toggle moves to.
    pub fn toggled(self) -> Stance {
        match self {
            Stance::Stand => Stance::Crouch,
            Stance::Crouch => Stance::Stand,
        }
    }
}

/// Result of a stance transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StanceTransition {
    /// The stance changed to the contained value
    Committed(Stance),
    /// The target shape overlaps world geometry; nothing changed
    Blocked,
    /// Already in the requested stance
    Unchanged,
}

/// Endpoints of the stance-check capsule segment.
///
/// The segment runs from `feet.y + radius + margin` to
/// `feet.y - radius - margin + target_height` at the feet's x/z.
pub fn stance_check_segment(
    feet: Vec3,
    radius: f32,
    margin: f32,
    target_height: f32,
) -> (Vec3, Vec3) {
    let start = Vec3::new(feet.x, feet.y + radius + margin, feet.z);
    let end = Vec3::new(feet.x, feet.y - radius - margin + target_height, feet.z);
    (start, end)
}

/// Returns true if a collider of `target_height` would overlap geometry at the body's feet.
pub fn stance_blocked<W: CollisionWorld + ?Sized>(
    world: &W,
    body: &CharacterBody,
    target_height: f32,
    margin: f32,
    mask: CollisionMask,
) -> bool {
    let radius = body.collider.radius;
    let (start, end) = stance_check_segment(body.feet_position(), radius, margin, target_height);
    world.capsule_overlap(start, end, radius, mask)
}

/// Stance state plus the smoothing velocities of the stance geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StanceController {
    /// Current logical stance
    stance: Stance,
    camera_height_velocity: f32,
    collider_height_velocity: f32,
    collider_center_velocity: Vec3,
}

impl Default for StanceController {
    fn default() -> Self {
        Self::with_stance(Stance::Stand)
    }
}

impl StanceController {
    /// Create a stance controller standing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stance controller with a specific starting stance.
    pub fn with_stance(stance: Stance) -> Self {
        Self {
            stance,
            camera_height_velocity: 0.0,
            collider_height_velocity: 0.0,
            collider_center_velocity: Vec3::ZERO,
        }
    }

    /// Get the current stance.
    #[inline]
    pub fn stance(&self) -> Stance {
        self.stance
    }

    /// Returns true while crouched.
    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.stance == Stance::Crouch
    }

    /// Smoothing velocities (camera height, collider height, collider center).
    pub fn smoothing_velocities(&self) -> (f32, f32, Vec3) {
        (
            self.camera_height_velocity,
            self.collider_height_velocity,
            self.collider_center_velocity,
        )
    }

    /// Move camera height and collider shape one tick toward `target`.
    pub fn smooth_shape(
        &mut self,
        target: &StanceShape,
        camera_height: &mut f32,
        collider: &mut CapsuleCollider,
        smoothing: f32,
        dt: f32,
    ) {
        *camera_height = camera_height.smooth_damp(
            target.camera_height,
            &mut self.camera_height_velocity,
            smoothing,
            dt,
        );
        collider.height = collider.height.smooth_damp(
            target.collider_height,
            &mut self.collider_height_velocity,
            smoothing,
            dt,
        );
        collider.center = collider.center.smooth_damp(
            target.collider_center,
            &mut self.collider_center_velocity,
            smoothing,
            dt,
        );
    }

    /// Handle a crouch-toggle trigger.
    ///
    /// Tests the target stance's collider height at the body's feet and
    /// commits only if the space is clear.
    pub fn toggle<W: CollisionWorld + ?Sized>(
        &mut self,
        world: &W,
        body: &CharacterBody,
        config: &ControllerConfig,
    ) -> StanceTransition {
        self.try_set_stance(self.stance.toggled(), world, body, config)
    }

    /// Try to enter `stance`, checking for obstacles.
    pub fn try_set_stance<W: CollisionWorld + ?Sized>(
        &mut self,
        stance: Stance,
        world: &W,
        body: &CharacterBody,
        config: &ControllerConfig,
    ) -> StanceTransition {
        if stance == self.stance {
            return StanceTransition::Unchanged;
        }

        let target_height = config.shape(stance).collider_height;
        if stance_blocked(
            world,
            body,
            target_height,
            config.stance_check_error_margin,
            config.player_mask,
        ) {
            log::debug!("Stance change {:?} -> {:?} blocked", self.stance, stance);
            return StanceTransition::Blocked;
        }

        log::debug!("Stance change {:?} -> {:?}", self.stance, stance);
        self.stance = stance;
        StanceTransition::Committed(stance)
    }

    /// Stand up without a clearance test (jump while crouched).
    ///
    /// Returns true if the stance changed.
    pub fn cancel_crouch(&mut self) -> bool {
        if self.stance != Stance::Crouch {
            return false;
        }
        log::debug!("Crouch cancelled by jump");
        self.stance = Stance::Stand;
        true
    }

    /// Set the stance directly, bypassing the clearance test.
    pub fn set_stance(&mut self, stance: Stance) {
        self.stance = stance;
    }
}
