//! Sprint Toggle
//!
//! Sprint is a toggle that only survives while the player keeps pushing
//! forward. Dropping forward input to [`SPRINT_FORWARD_THRESHOLD`] or below
//! cancels it on that same tick.

use crate::config::MovementProfile;

/// Forward axis value at or below which sprinting is cancelled
pub const SPRINT_FORWARD_THRESHOLD: f32 = 0.2;

/// Horizontal speed pair selected for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedPair {
    /// Speed along the forward axis (used for both signs of forward input)
    pub forward: f32,
    /// Speed along the strafe axis
    pub strafe: f32,
}

/// Tracks the sprint flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SprintToggle {
    sprinting: bool,
}

impl SprintToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the running speeds are active.
    #[inline]
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    /// Handle a sprint-toggle trigger.
    ///
    /// Flips the flag when forward input is above the threshold, otherwise
    /// forces it off.
    pub fn toggle(&mut self, forward_input: f32) {
        if forward_input <= SPRINT_FORWARD_THRESHOLD {
            self.sprinting = false;
            return;
        }
        self.sprinting = !self.sprinting;
        log::debug!("Sprint toggled: {}", self.sprinting);
    }

    /// Per-tick check; sprint cannot persist without forward input.
    pub fn update(&mut self, forward_input: f32) {
        // NaN input also cancels
        if !(forward_input > SPRINT_FORWARD_THRESHOLD) {
            self.sprinting = false;
        }
    }

    /// Active (forward, strafe) speeds from the profile.
    ///
    /// `walking_backward_speed` is not consulted: forward speed applies to
    /// both signs of the forward axis.
    pub fn speeds(&self, profile: &MovementProfile) -> SpeedPair {
        if self.sprinting {
            SpeedPair {
                forward: profile.running_forward_speed,
                strafe: profile.running_strafe_speed,
            }
        } else {
            SpeedPair {
                forward: profile.walking_forward_speed,
                strafe: profile.walking_strafe_speed,
            }
        }
    }
}
