//! Vertical Motion
//!
//! Two independent contributions to the frame's movement:
//!
//! - a scalar vertical speed driven by gravity, added to the displacement as-is
//!   each tick (it is already a per-tick amount)
//! - a jump impulse vector that decays toward zero through the
//!   critically-damped smoother and is scaled by `dt`
//!
//! # Gravity
//!
//! While the vertical speed is above `gravity_min` it drops by
//! `gravity_amount * dt`. When grounded, anything below
//! [`GROUNDED_VERTICAL_SPEED`] is reset to it, which keeps a small constant
//! pull toward the floor instead of accumulating fall speed.

use glam::Vec3;

use crate::physics::smoothing::SmoothDamp;

/// Vertical speed held while grounded ("stick to ground" bias)
pub const GROUNDED_VERTICAL_SPEED: f32 = -0.1;

/// Result of a jump request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Impulse applied
    Jumped,
    /// Not grounded; nothing changed
    Airborne,
}

/// Gravity and jump integration state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMotion {
    /// Gravity-driven vertical speed (negative = falling)
    vertical_speed: f32,
    /// Decaying jump impulse
    jump_force: Vec3,
    /// Smoothing velocity of the jump impulse decay
    jump_force_velocity: Vec3,
}

impl Default for VerticalMotion {
    fn default() -> Self {
        Self {
            vertical_speed: 0.0,
            jump_force: Vec3::ZERO,
            jump_force_velocity: Vec3::ZERO,
        }
    }
}

impl VerticalMotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gravity-driven vertical speed.
    #[inline]
    pub fn vertical_speed(&self) -> f32 {
        self.vertical_speed
    }

    /// Set the vertical speed directly (knockback, scripted launches).
    pub fn set_vertical_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.vertical_speed = speed;
        }
    }

    /// Current jump impulse.
    #[inline]
    pub fn jump_force(&self) -> Vec3 {
        self.jump_force
    }

    /// Apply one tick of gravity followed by the grounded clamp.
    pub fn apply_gravity(
        &mut self,
        gravity_amount: f32,
        gravity_min: f32,
        dt: f32,
        grounded: bool,
    ) {
        if dt > 0.0 && self.vertical_speed > gravity_min {
            self.vertical_speed -= gravity_amount * dt;
        }

        if self.vertical_speed < GROUNDED_VERTICAL_SPEED && grounded {
            self.vertical_speed = GROUNDED_VERTICAL_SPEED;
        }
    }

    /// Start a jump if grounded: impulse = up * `jump_height`, vertical speed
    /// reset to zero so gravity restarts cleanly.
    pub fn try_jump(&mut self, jump_height: f32, grounded: bool) -> JumpOutcome {
        if !grounded {
            return JumpOutcome::Airborne;
        }

        self.jump_force = Vec3::Y * jump_height;
        self.jump_force_velocity = Vec3::ZERO;
        self.vertical_speed = 0.0;
        JumpOutcome::Jumped
    }

    /// Decay the jump impulse toward zero.
    pub fn decay_jump(&mut self, falloff: f32, dt: f32) {
        self.jump_force = self.jump_force.smooth_damp(
            Vec3::ZERO,
            &mut self.jump_force_velocity,
            falloff,
            dt,
        );
    }

    /// This tick's vertical/arc contribution to the displacement.
    pub fn displacement(&self, dt: f32) -> Vec3 {
        Vec3::new(0.0, self.vertical_speed, 0.0) + self.jump_force * dt.max(0.0)
    }

    /// Drop all vertical motion (respawn).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
