//! Collision collaborator interface
//!
//! The locomotion core does not resolve collisions itself. It calls exactly two
//! primitives on whatever world the host provides:
//!
//! - [`CollisionWorld::move_with_collision`] - displace the body, resolve
//!   penetration, report whether it ended up grounded
//! - [`CollisionWorld::capsule_overlap`] - test a capsule volume against world
//!   geometry filtered by a [`CollisionMask`]
//!
//! This module also holds the body/collider data exchanged through those calls
//! and a few AABB helpers used by [`crate::physics::static_world`].
//!
//! # Example
//!
//! ```ignore
//! use stridecore_engine::physics::collision::{CollisionWorld, CharacterBody, CollisionMask};
//! use glam::Vec3;
//!
//! let mut body = CharacterBody::default();
//! let result = world.move_with_collision(&mut body, Vec3::new(0.0, -0.1, 0.05));
//! if result.grounded {
//!     // can jump next tick
//! }
//!
//! let blocked = world.capsule_overlap(
//!     Vec3::new(0.0, 0.55, 0.0),
//!     Vec3::new(0.0, 1.45, 0.0),
//!     0.5,
//!     CollisionMask::ALL,
//! );
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Minimum penetration depth (meters) treated as an actual overlap.
///
/// Bodies resting exactly on a surface must not count as intersecting it.
pub const CONTACT_EPSILON: f32 = 1.0e-4;

/// Iterations of the ternary search in [`segment_aabb_distance_sq`].
const SEGMENT_SEARCH_ITERATIONS: u32 = 48;

/// Layer bitmask used to filter overlap queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionMask(pub u32);

impl CollisionMask {
    /// Matches nothing.
    pub const NONE: CollisionMask = CollisionMask(0);
    /// Matches every layer.
    pub const ALL: CollisionMask = CollisionMask(u32::MAX);
    /// Layer 0, the default layer for world geometry.
    pub const DEFAULT: CollisionMask = CollisionMask(1);

    /// Mask containing only the given layer (0..32).
    pub fn layer(index: u32) -> Self {
        CollisionMask(1u32.checked_shl(index).unwrap_or(0))
    }

    /// Returns true if the two masks share at least one layer.
    #[inline]
    pub fn intersects(self, other: CollisionMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Union of both masks.
    #[inline]
    pub fn with(self, other: CollisionMask) -> Self {
        CollisionMask(self.0 | other.0)
    }
}

impl Default for CollisionMask {
    fn default() -> Self {
        CollisionMask::DEFAULT
    }
}

/// Vertical capsule collider attached to a character body.
///
/// `height` includes both hemispherical caps, `center` is relative to the
/// body position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleCollider {
    pub radius: f32,
    pub height: f32,
    pub center: Vec3,
}

impl Default for CapsuleCollider {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 2.0,
            center: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl CapsuleCollider {
    /// Half length of the inner segment (between the cap centers).
    pub fn half_segment(&self) -> f32 {
        (self.height * 0.5 - self.radius).max(0.0)
    }

    /// Half extents of the collider's bounding box.
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(
            self.radius,
            (self.height * 0.5).max(self.radius),
            self.radius,
        )
    }
}

/// The displaced part of a character: position, feet marker and collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterBody {
    /// Body origin in world space
    pub position: Vec3,
    /// Feet point relative to `position`, used by stance checks
    pub feet_offset: Vec3,
    /// Current collider shape (smoothed by the stance controller)
    pub collider: CapsuleCollider,
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            feet_offset: Vec3::ZERO,
            collider: CapsuleCollider::default(),
        }
    }
}

impl CharacterBody {
    /// Create a body at `position` with the given collider.
    pub fn new(position: Vec3, collider: CapsuleCollider) -> Self {
        Self {
            position,
            feet_offset: Vec3::ZERO,
            collider,
        }
    }

    /// World-space feet point.
    #[inline]
    pub fn feet_position(&self) -> Vec3 {
        self.position + self.feet_offset
    }

    /// World-space collider center.
    #[inline]
    pub fn collider_center(&self) -> Vec3 {
        self.position + self.collider.center
    }

    /// World-space endpoints (bottom, top) of the collider's inner segment.
    pub fn capsule_segment(&self) -> (Vec3, Vec3) {
        let center = self.collider_center();
        let half = Vec3::new(0.0, self.collider.half_segment(), 0.0);
        (center - half, center + half)
    }

    /// World-space bounding box (min, max) of the collider.
    pub fn aabb(&self) -> (Vec3, Vec3) {
        let center = self.collider_center();
        let half = self.collider.half_extents();
        (center - half, center + half)
    }
}

/// Outcome of a collision-aware move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveResult {
    /// Whether the body rests on walkable geometry after the move
    pub grounded: bool,
    /// Displacement actually applied after penetration resolution
    pub applied: Vec3,
}

/// The two primitives the locomotion core needs from a physics engine.
///
/// Implementations own all geometry. The core never caches results across
/// ticks except the grounded flag.
pub trait CollisionWorld {
    /// Move `body` by `displacement`, resolving penetration against the world.
    fn move_with_collision(&mut self, body: &mut CharacterBody, displacement: Vec3) -> MoveResult;

    /// Returns true if a capsule swept along `start..end` with `radius`
    /// intersects any geometry on a layer in `mask`.
    fn capsule_overlap(&self, start: Vec3, end: Vec3, radius: f32, mask: CollisionMask) -> bool;
}

/// Returns true if two AABBs interpenetrate by more than [`CONTACT_EPSILON`] on every axis.
pub fn aabb_overlap(min_a: Vec3, max_a: Vec3, min_b: Vec3, max_b: Vec3) -> bool {
    max_a.x - min_b.x > CONTACT_EPSILON
        && max_b.x - min_a.x > CONTACT_EPSILON
        && max_a.y - min_b.y > CONTACT_EPSILON
        && max_b.y - min_a.y > CONTACT_EPSILON
        && max_a.z - min_b.z > CONTACT_EPSILON
        && max_b.z - min_a.z > CONTACT_EPSILON
}

/// Squared distance from a point to an AABB (zero inside).
pub fn point_aabb_distance_sq(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> f32 {
    let closest = point.clamp(aabb_min, aabb_max);
    point.distance_squared(closest)
}

/// Squared distance from the segment `a..b` to an AABB.
///
/// Distance to a convex set is convex along a line, so a ternary search over
/// the segment parameter finds the minimum.
pub fn segment_aabb_distance_sq(a: Vec3, b: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> f32 {
    let at = |t: f32| point_aabb_distance_sq(a.lerp(b, t), aabb_min, aabb_max);

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..SEGMENT_SEARCH_ITERATIONS {
        let m1 = lo + (hi - lo) / 3.0;
        let m2 = hi - (hi - lo) / 3.0;
        if at(m1) <= at(m2) {
            hi = m2;
        } else {
            lo = m1;
        }
    }

    at((lo + hi) * 0.5).min(at(0.0)).min(at(1.0))
}
