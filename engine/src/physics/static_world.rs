//! Static box world
//!
//! A small [`CollisionWorld`] made of axis-aligned boxes and an optional
//! infinite ground plane. It backs the headless simulator and integration
//! tests; games plug in their real physics engine instead.
//!
//! # Move Resolution
//!
//! Displacement is applied one axis at a time (X, Z, then Y). After each axis
//! the body's bounding box is pushed back out of any box it entered along that
//! axis. Boxes the body already overlapped before the step (a collider that
//! grew into a ceiling) are left alone until it moves clear of them. A downward
//! move that gets pushed back up reports the body as grounded. Moves are not
//! swept, so a single displacement longer than the thinnest box can tunnel
//! through it.

use glam::Vec3;

use super::collision::{
    CharacterBody, CollisionMask, CollisionWorld, MoveResult, aabb_overlap,
    segment_aabb_distance_sq,
};

/// A solid axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBox {
    pub min: Vec3,
    pub max: Vec3,
    /// Layers this box belongs to
    pub layers: CollisionMask,
}

impl StaticBox {
    /// Creates a box on the default layer. Corners may be given in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            layers: CollisionMask::DEFAULT,
        }
    }

    /// Creates a box from its center and half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self::new(center - half, center + half)
    }

    /// Returns the same box assigned to `layers`.
    pub fn on_layers(mut self, layers: CollisionMask) -> Self {
        self.layers = layers;
        self
    }
}

/// Infinite horizontal plane; everything below `height` is solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub height: f32,
    pub layers: CollisionMask,
}

/// Collision world of static boxes.
#[derive(Debug, Clone)]
pub struct StaticWorld {
    boxes: Vec<StaticBox>,
    ground: Option<GroundPlane>,
    /// Layers the character collides with while moving
    pub movement_mask: CollisionMask,
}

impl Default for StaticWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticWorld {
    /// Creates an empty world with no ground.
    pub fn new() -> Self {
        Self {
            boxes: Vec::new(),
            ground: None,
            movement_mask: CollisionMask::ALL,
        }
    }

    /// Creates a world with a ground plane at `height` on the default layer.
    pub fn with_ground(height: f32) -> Self {
        let mut world = Self::new();
        world.set_ground(Some(GroundPlane {
            height,
            layers: CollisionMask::DEFAULT,
        }));
        world
    }

    /// Replaces (or removes) the ground plane.
    pub fn set_ground(&mut self, ground: Option<GroundPlane>) {
        self.ground = ground;
    }

    /// Returns the ground plane, if any.
    pub fn ground(&self) -> Option<&GroundPlane> {
        self.ground.as_ref()
    }

    /// Adds a box and returns its index.
    pub fn add_box(&mut self, solid: StaticBox) -> usize {
        self.boxes.push(solid);
        self.boxes.len() - 1
    }

    /// Removes the box at `index`, if present.
    pub fn remove_box(&mut self, index: usize) -> Option<StaticBox> {
        if index < self.boxes.len() {
            Some(self.boxes.remove(index))
        } else {
            None
        }
    }

    /// All boxes in insertion order.
    pub fn boxes(&self) -> &[StaticBox] {
        &self.boxes
    }

    /// Number of boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true if the world holds no boxes.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Remove all boxes (the ground plane is kept).
    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    /// Apply `delta` along one axis and push the body back out of anything it entered.
    ///
    /// Returns true if the move was blocked.
    fn resolve_axis(&self, body: &mut CharacterBody, axis: usize, delta: f32) -> bool {
        if delta == 0.0 {
            return false;
        }

        let (start_min, start_max) = body.aabb();
        body.position[axis] += delta;
        let mut blocked = false;

        for solid in &self.boxes {
            if !solid.layers.intersects(self.movement_mask) {
                continue;
            }
            // Already inside before this step: not entered along this axis
            if aabb_overlap(start_min, start_max, solid.min, solid.max) {
                continue;
            }
            let (min, max) = body.aabb();
            if !aabb_overlap(min, max, solid.min, solid.max) {
                continue;
            }
            if delta > 0.0 {
                body.position[axis] -= max[axis] - solid.min[axis];
            } else {
                body.position[axis] += solid.max[axis] - min[axis];
            }
            blocked = true;
        }

        if axis == 1 {
            if let Some(ground) = self.ground.filter(|g| g.layers.intersects(self.movement_mask)) {
                let (min, _) = body.aabb();
                if min.y < ground.height {
                    body.position.y += ground.height - min.y;
                    blocked = true;
                }
            }
        }

        blocked
    }
}

impl CollisionWorld for StaticWorld {
    fn move_with_collision(&mut self, body: &mut CharacterBody, displacement: Vec3) -> MoveResult {
        let start = body.position;

        self.resolve_axis(body, 0, displacement.x);
        self.resolve_axis(body, 2, displacement.z);
        let blocked_y = self.resolve_axis(body, 1, displacement.y);

        MoveResult {
            grounded: blocked_y && displacement.y < 0.0,
            applied: body.position - start,
        }
    }

    fn capsule_overlap(&self, start: Vec3, end: Vec3, radius: f32, mask: CollisionMask) -> bool {
        let radius = radius.max(0.0);

        if let Some(ground) = self.ground.filter(|g| g.layers.intersects(mask)) {
            if start.y.min(end.y) - radius < ground.height {
                return true;
            }
        }

        let radius_sq = radius * radius;
        self.boxes.iter().any(|solid| {
            solid.layers.intersects(mask)
                && segment_aabb_distance_sq(start, end, solid.min, solid.max) < radius_sq
        })
    }
}
