//! First-Person Orientation Controller
//!
//! Integrates per-tick view input into two angles:
//!
//! - yaw, applied to the character body (rotation about +Y)
//! - pitch, applied to the camera holder only (rotation about +X), clamped
//!
//! Key features:
//! - Sensitivity per axis in degrees per second per unit of input
//! - Optional inversion per axis
//! - Pitch clamped after every update (default -70..80 degrees)
//! - NO smoothing - raw per-tick integration for zero input latency
//!
//! # Conventions
//!
//! Angles are degrees. Body-local forward is +Z. Positive pitch tilts the view
//! down, so pushing the view stick up (positive `dy`) lowers pitch unless the
//! Y axis is inverted.

use glam::{Quat, Vec2, Vec3};

use crate::config::{MovementProfile, VIEW_CLAMP_Y_MAX, VIEW_CLAMP_Y_MIN};

/// First-person yaw/pitch integrator.
///
/// ## Usage
/// ```rust,ignore
/// let mut orientation = OrientationController::new(-70.0, 80.0);
///
/// // Once per tick
/// orientation.apply_view_input(&profile, intent.view, dt);
///
/// body_rotation = orientation.body_rotation();
/// camera_local_rotation = orientation.camera_rotation();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OrientationController {
    /// Body yaw in degrees, kept in [0, 360)
    yaw: f32,
    /// Camera pitch in degrees, clamped to `pitch_limits`
    pitch: f32,
    /// Pitch limits (min, max) in degrees
    pitch_limits: (f32, f32),
}

impl Default for OrientationController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            pitch_limits: (VIEW_CLAMP_Y_MIN, VIEW_CLAMP_Y_MAX),
        }
    }
}

impl OrientationController {
    /// Create a controller facing +Z with the given pitch limits.
    ///
    /// Limits given in the wrong order are swapped.
    pub fn new(pitch_min: f32, pitch_max: f32) -> Self {
        Self {
            pitch_limits: (pitch_min.min(pitch_max), pitch_min.max(pitch_max)),
            ..Default::default()
        }
    }

    /// Get the body yaw in degrees
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Set the body yaw (degrees, wrapped into [0, 360))
    #[inline]
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = wrap_degrees(yaw);
    }

    /// Get the camera pitch in degrees
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the camera pitch (degrees, clamped to the limits)
    #[inline]
    pub fn set_pitch(&mut self, pitch: f32) {
        if pitch.is_finite() {
            self.pitch = pitch.clamp(self.pitch_limits.0, self.pitch_limits.1);
        }
    }

    /// Pitch limits (min, max) in degrees
    #[inline]
    pub fn pitch_limits(&self) -> (f32, f32) {
        self.pitch_limits
    }

    /// Integrate one tick of view input.
    ///
    /// ```text
    /// yaw   += sens_x * (inverted_x ? -dx : dx) * dt
    /// pitch += sens_y * (inverted_y ?  dy : -dy) * dt, then clamp
    /// ```
    pub fn apply_view_input(&mut self, profile: &MovementProfile, view: Vec2, dt: f32) {
        if !(dt > 0.0) || !view.is_finite() {
            return;
        }

        let dx = if profile.view_x_inverted { -view.x } else { view.x };
        self.yaw = wrap_degrees(self.yaw + profile.view_x_sensitivity * dx * dt);

        let dy = if profile.view_y_inverted { view.y } else { -view.y };
        self.pitch += profile.view_y_sensitivity * dy * dt;
        self.pitch = self.pitch.clamp(self.pitch_limits.0, self.pitch_limits.1);
    }

    /// Body rotation (yaw only).
    #[inline]
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Camera holder rotation relative to the body (pitch only).
    #[inline]
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Transform a body-local direction into world space.
    #[inline]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.body_rotation() * local
    }

    /// World-space view direction including pitch.
    pub fn view_forward(&self) -> Vec3 {
        (self.body_rotation() * self.camera_rotation() * Vec3::Z).normalize()
    }

    /// Horizontal forward direction of the body.
    pub fn body_forward(&self) -> Vec3 {
        self.to_world(Vec3::Z)
    }

    /// Horizontal right direction of the body.
    pub fn body_right(&self) -> Vec3 {
        self.to_world(Vec3::X)
    }

    /// Face the given yaw with a level camera.
    pub fn reset(&mut self, yaw: f32) {
        self.set_yaw(yaw);
        self.pitch = 0.0_f32.clamp(self.pitch_limits.0, self.pitch_limits.1);
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn profile() -> MovementProfile {
        MovementProfile {
            view_x_sensitivity: 10.0,
            view_y_sensitivity: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_orientation() {
        let orientation = OrientationController::default();
        assert_eq!(orientation.yaw(), 0.0);
        assert_eq!(orientation.pitch(), 0.0);
        assert_eq!(orientation.pitch_limits(), (-70.0, 80.0));
    }

    #[test]
    fn test_yaw_integration() {
        let mut orientation = OrientationController::default();
        orientation.apply_view_input(&profile(), Vec2::new(3.0, 0.0), 0.5);
        assert!(approx_eq(orientation.yaw(), 15.0));
    }

    #[test]
    fn test_yaw_inverted() {
        let mut orientation = OrientationController::default();
        let profile = MovementProfile {
            view_x_inverted: true,
            ..profile()
        };
        orientation.apply_view_input(&profile, Vec2::new(1.0, 0.0), 1.0);
        assert!(approx_eq(orientation.yaw(), 350.0));
    }

    #[test]
    fn test_positive_dy_looks_up() {
        let mut orientation = OrientationController::default();
        orientation.apply_view_input(&profile(), Vec2::new(0.0, 2.0), 1.0);
        assert!(approx_eq(orientation.pitch(), -20.0));
    }

    #[test]
    fn test_pitch_inverted() {
        let mut orientation = OrientationController::default();
        let profile = MovementProfile {
            view_y_inverted: true,
            ..profile()
        };
        orientation.apply_view_input(&profile, Vec2::new(0.0, 2.0), 1.0);
        assert!(approx_eq(orientation.pitch(), 20.0));
    }

    #[test]
    fn test_pitch_clamped() {
        let mut orientation = OrientationController::default();
        orientation.apply_view_input(&profile(), Vec2::new(0.0, -1000.0), 1.0);
        assert_eq!(orientation.pitch(), 80.0);

        orientation.apply_view_input(&profile(), Vec2::new(0.0, 1000.0), 1.0);
        assert_eq!(orientation.pitch(), -70.0);
    }

    #[test]
    fn test_swapped_limits() {
        let orientation = OrientationController::new(45.0, -45.0);
        assert_eq!(orientation.pitch_limits(), (-45.0, 45.0));
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut orientation = OrientationController::default();
        orientation.apply_view_input(&profile(), Vec2::new(5.0, 5.0), 0.0);
        assert_eq!(orientation.yaw(), 0.0);
        assert_eq!(orientation.pitch(), 0.0);
    }

    #[test]
    fn test_body_forward_follows_yaw() {
        let mut orientation = OrientationController::default();
        assert!(orientation.body_forward().distance(Vec3::Z) < EPSILON);

        orientation.set_yaw(90.0);
        assert!(orientation.body_forward().distance(Vec3::X) < EPSILON);
        assert!(orientation.body_right().distance(-Vec3::Z) < EPSILON);
    }

    #[test]
    fn test_positive_pitch_looks_down() {
        let mut orientation = OrientationController::default();
        orientation.set_pitch(45.0);
        let forward = orientation.view_forward();
        assert!(forward.y < -0.5);
        assert!(forward.z > 0.5);
    }

    #[test]
    fn test_set_yaw_wraps() {
        let mut orientation = OrientationController::default();
        orientation.set_yaw(-90.0);
        assert!(approx_eq(orientation.yaw(), 270.0));
        orientation.set_yaw(725.0);
        assert!(approx_eq(orientation.yaw(), 5.0));
    }
}
