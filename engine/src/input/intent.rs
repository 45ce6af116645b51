//! Intent Snapshot
//!
//! Normalized, per-tick description of what the player wants to do. The input
//! layer (key bindings, gamepad, scripted bots) assembles one snapshot per tick
//! and hands it to the locomotion controller; the core never sees raw devices
//! or callbacks.

use glam::Vec2;

/// Edge-triggered action flags.
///
/// Each flag is true only on the tick the action fired, not while a key is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentActions {
    /// Jump was pressed this tick
    pub jump: bool,
    /// Crouch toggle was pressed this tick
    pub crouch: bool,
    /// Sprint toggle was pressed this tick
    pub sprint: bool,
}

/// Input intent for a single simulation tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntentSnapshot {
    /// Movement axes: x = strafe (right positive), y = forward (forward positive).
    /// Each component lies in [-1, 1].
    pub movement: Vec2,
    /// Raw view delta for this tick (x = yaw input, y = pitch input)
    pub view: Vec2,
    pub actions: IntentActions,
}

impl IntentSnapshot {
    /// Create a snapshot from movement and view input with no actions.
    ///
    /// Movement components are clamped to [-1, 1]; non-finite values become zero.
    pub fn new(movement: Vec2, view: Vec2) -> Self {
        Self {
            movement: sanitize_axis(movement),
            view: if view.is_finite() { view } else { Vec2::ZERO },
            actions: IntentActions::default(),
        }
    }

    /// Snapshot with only movement input.
    pub fn moving(strafe: f32, forward: f32) -> Self {
        Self::new(Vec2::new(strafe, forward), Vec2::ZERO)
    }

    /// Snapshot with only view input.
    pub fn looking(dx: f32, dy: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(dx, dy))
    }

    /// Mark the jump action as fired this tick.
    pub fn with_jump(mut self) -> Self {
        self.actions.jump = true;
        self
    }

    /// Mark the crouch toggle as fired this tick.
    pub fn with_crouch(mut self) -> Self {
        self.actions.crouch = true;
        self
    }

    /// Mark the sprint toggle as fired this tick.
    pub fn with_sprint(mut self) -> Self {
        self.actions.sprint = true;
        self
    }

    /// Strafe axis (x).
    #[inline]
    pub fn strafe(&self) -> f32 {
        self.movement.x
    }

    /// Forward axis (y).
    #[inline]
    pub fn forward(&self) -> f32 {
        self.movement.y
    }

    /// Returns true if any action flag is set.
    pub fn has_action(&self) -> bool {
        self.actions.jump || self.actions.crouch || self.actions.sprint
    }
}

fn sanitize_axis(axis: Vec2) -> Vec2 {
    let clean = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
    Vec2::new(clean(axis.x), clean(axis.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let intent = IntentSnapshot::default();
        assert_eq!(intent.movement, Vec2::ZERO);
        assert_eq!(intent.view, Vec2::ZERO);
        assert!(!intent.has_action());
    }

    #[test]
    fn test_movement_clamped() {
        let intent = IntentSnapshot::moving(3.0, -7.0);
        assert_eq!(intent.strafe(), 1.0);
        assert_eq!(intent.forward(), -1.0);
    }

    #[test]
    fn test_non_finite_input_zeroed() {
        let intent = IntentSnapshot::new(Vec2::new(f32::NAN, 0.5), Vec2::new(f32::INFINITY, 1.0));
        assert_eq!(intent.movement, Vec2::new(0.0, 0.5));
        assert_eq!(intent.view, Vec2::ZERO);
    }

    #[test]
    fn test_action_builders() {
        let intent = IntentSnapshot::moving(0.0, 1.0).with_jump().with_sprint();
        assert!(intent.actions.jump);
        assert!(intent.actions.sprint);
        assert!(!intent.actions.crouch);
        assert!(intent.has_action());

        let intent = IntentSnapshot::looking(1.0, 2.0).with_crouch();
        assert_eq!(intent.view, Vec2::new(1.0, 2.0));
        assert!(intent.actions.crouch);
    }
}
