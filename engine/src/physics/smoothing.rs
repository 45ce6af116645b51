//! Critically-Damped Smoothing
//!
//! Closed-form critically-damped second-order approach toward a target value.
//! Callers tune a single time constant ("seconds to approach target") instead
//! of spring stiffness and damping.
//!
//! # Model
//!
//! With `omega = 2 / time_constant` and `c = current - target`, the exact
//! solution after `dt` seconds is:
//!
//! ```text
//! x(dt) = target + (c + (v + omega * c) * dt) * e^(-omega * dt)
//! v(dt) = (v - omega * (v + omega * c) * dt) * e^(-omega * dt)
//! ```
//!
//! Because the step is exact rather than integrated, chaining many small steps
//! gives the same result as one large step, which keeps the response
//! frame-rate independent.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stridecore_engine::physics::smoothing::SmoothDamp;
//!
//! let mut velocity = 0.0;
//! let height = current_height.smooth_damp(target_height, &mut velocity, 0.1, dt);
//! ```

use glam::{Vec2, Vec3};

/// Upper bound on `omega * dt`.
pub const MAX_DECAY_EXPONENT: f32 = 60.0;

/// Values that can be smoothed toward a target with a critically-damped response.
///
/// Vector implementations smooth each component independently.
pub trait SmoothDamp: Copy {
    /// Advance `self` toward `target` by `dt` seconds.
    ///
    /// `velocity` is the caller-owned rate of change and is updated in place.
    /// A non-positive (or NaN) `time_constant` or `dt` snaps straight to
    /// `target` and zeroes the velocity.
    fn smooth_damp(self, target: Self, velocity: &mut Self, time_constant: f32, dt: f32) -> Self;
}

impl SmoothDamp for f32 {
    fn smooth_damp(self, target: f32, velocity: &mut f32, time_constant: f32, dt: f32) -> f32 {
        smooth_damp_scalar(self, target, velocity, time_constant, dt)
    }
}

impl SmoothDamp for Vec2 {
    fn smooth_damp(self, target: Vec2, velocity: &mut Vec2, time_constant: f32, dt: f32) -> Vec2 {
        Vec2::new(
            smooth_damp_scalar(self.x, target.x, &mut velocity.x, time_constant, dt),
            smooth_damp_scalar(self.y, target.y, &mut velocity.y, time_constant, dt),
        )
    }
}

impl SmoothDamp for Vec3 {
    fn smooth_damp(self, target: Vec3, velocity: &mut Vec3, time_constant: f32, dt: f32) -> Vec3 {
        Vec3::new(
            smooth_damp_scalar(self.x, target.x, &mut velocity.x, time_constant, dt),
            smooth_damp_scalar(self.y, target.y, &mut velocity.y, time_constant, dt),
            smooth_damp_scalar(self.z, target.z, &mut velocity.z, time_constant, dt),
        )
    }
}

/// Free-function form returning `(new_value, new_velocity)`.
///
/// Convenient when the velocity is not stored in a mutable slot.
pub fn smooth<T: SmoothDamp>(
    current: T,
    target: T,
    time_constant: f32,
    velocity: T,
    dt: f32,
) -> (T, T) {
    let mut velocity = velocity;
    let value = current.smooth_damp(target, &mut velocity, time_constant, dt);
    (value, velocity)
}

fn smooth_damp_scalar(
    current: f32,
    target: f32,
    velocity: &mut f32,
    time_constant: f32,
    dt: f32,
) -> f32 {
    // `!(x > 0.0)` also catches NaN
    if !(time_constant > 0.0) || !(dt > 0.0) {
        *velocity = 0.0;
        return target;
    }

    let omega = 2.0 / time_constant;
    let exponent = (omega * dt).min(MAX_DECAY_EXPONENT);
    // Effective elapsed time after the exponent clamp
    let t = exponent / omega;
    let decay = (-exponent).exp();

    let change = current - target;
    let drive = *velocity + omega * change;

    let mut output = target + (change + drive * t) * decay;
    let mut next_velocity = (*velocity - omega * drive * t) * decay;

    // Never cross the target; a crossing lands on it and stops.
    if change * (output - target) < 0.0 {
        output = target;
        next_velocity = 0.0;
    }

    if !output.is_finite() || !next_velocity.is_finite() {
        output = target;
        next_velocity = 0.0;
    }

    *velocity = next_velocity;
    output
}
