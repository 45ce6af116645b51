//! Player Locomotion Controller
//!
//! Composes the per-tick state machines into a single update that produces
//! one collision-resolved move and a consistent pose.
//!
//! # Tick Order
//!
//! 1. Orientation - integrate view input into yaw and pitch
//! 2. Actions - sprint toggle, jump (or crouch cancel)
//! 3. Movement - speed pair from the sprint toggle, gravity step, one call to
//!    [`CollisionWorld::move_with_collision`]
//! 4. Jump decay - the impulse eases toward zero
//! 5. Stance - smooth camera/collider toward the active shape, then attempt a
//!    transition if crouch was triggered
//!
//! Stance runs last so the clearance test and the collider resize see the
//! position this tick's move produced.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stridecore_engine::player::LocomotionController;
//! use stridecore_engine::input::IntentSnapshot;
//!
//! let mut controller = LocomotionController::new(config, spawn_point);
//!
//! // Each tick:
//! let pose = controller.update(&mut world, &intent, delta_time);
//! camera.set_transform(pose.camera_position(), pose.view_rotation());
//! ```

use glam::{Quat, Vec3};
use serde::Serialize;

use crate::camera::OrientationController;
use crate::config::ControllerConfig;
use crate::input::IntentSnapshot;
use crate::physics::collision::{CapsuleCollider, CharacterBody, CollisionWorld, MoveResult};

use super::crouch::{Stance, StanceController};
use super::sprint::SprintToggle;
use super::vertical::{JumpOutcome, VerticalMotion};

/// What a jump request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpResult {
    /// Impulse applied
    Jumped,
    /// Character was crouched; stood up instead of jumping
    CrouchCancelled,
    /// Not grounded; nothing changed
    Airborne,
}

/// Read-only pose handed to rendering after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    /// Body origin in world space
    pub position: Vec3,
    /// Body yaw in degrees
    pub yaw: f32,
    /// Camera pitch in degrees
    pub pitch: f32,
    /// Yaw-only body rotation
    pub body_rotation: Quat,
    /// Pitch-only camera rotation relative to the body
    pub camera_rotation: Quat,
    /// Camera holder height above the body origin
    pub camera_height: f32,
    /// Current (smoothed) collider shape
    pub collider: CapsuleCollider,
    pub stance: Stance,
    pub grounded: bool,
    pub sprinting: bool,
}

impl Pose {
    /// World-space camera position.
    pub fn camera_position(&self) -> Vec3 {
        self.position + self.body_rotation * Vec3::new(0.0, self.camera_height, 0.0)
    }

    /// World-space camera rotation (body yaw then camera pitch).
    pub fn view_rotation(&self) -> Quat {
        self.body_rotation * self.camera_rotation
    }
}

/// Mutable per-character locomotion state.
///
/// Owned by exactly one [`LocomotionController`] and only changed by its tick.
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionState {
    orientation: OrientationController,
    stance: StanceController,
    vertical: VerticalMotion,
    sprint: SprintToggle,
    /// Smoothed camera holder height
    camera_height: f32,
    /// Grounded flag from the last move
    grounded: bool,
}

impl LocomotionState {
    fn spawn(config: &ControllerConfig) -> Self {
        Self {
            orientation: OrientationController::new(
                config.view_clamp_y_min,
                config.view_clamp_y_max,
            ),
            stance: StanceController::new(),
            vertical: VerticalMotion::new(),
            sprint: SprintToggle::new(),
            camera_height: config.stand.camera_height,
            grounded: false,
        }
    }

    pub fn orientation(&self) -> &OrientationController {
        &self.orientation
    }

    pub fn stance_controller(&self) -> &StanceController {
        &self.stance
    }

    pub fn vertical(&self) -> &VerticalMotion {
        &self.vertical
    }

    /// Body yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.orientation.yaw()
    }

    /// Camera pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.orientation.pitch()
    }

    pub fn stance(&self) -> Stance {
        self.stance.stance()
    }

    pub fn vertical_speed(&self) -> f32 {
        self.vertical.vertical_speed()
    }

    pub fn jump_force(&self) -> Vec3 {
        self.vertical.jump_force()
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprint.is_sprinting()
    }

    pub fn camera_height(&self) -> f32 {
        self.camera_height
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }
}

/// First-person locomotion controller for one character.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: ControllerConfig,
    state: LocomotionState,
    body: CharacterBody,
    last_move: MoveResult,
}

impl LocomotionController {
    /// Spawn a standing character with its origin at `position`.
    pub fn new(config: ControllerConfig, position: Vec3) -> Self {
        let body = CharacterBody::new(position, config.stand.collider(config.collider_radius));
        Self::with_body(config, body)
    }

    /// Spawn with a prepared body (custom feet offset or starting collider).
    pub fn with_body(config: ControllerConfig, body: CharacterBody) -> Self {
        Self {
            state: LocomotionState::spawn(&config),
            config,
            body,
            last_move: MoveResult::default(),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn body(&self) -> &CharacterBody {
        &self.body
    }

    /// Result of the most recent move.
    pub fn last_move(&self) -> MoveResult {
        self.last_move
    }

    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    /// Override the grounded flag (hosts that spawn on known ground).
    pub fn set_grounded(&mut self, grounded: bool) {
        self.state.grounded = grounded;
    }

    /// Run one simulation tick.
    ///
    /// A non-positive or non-finite `dt` still processes orientation and action
    /// triggers but advances no time: no move, no decay, no smoothing.
    pub fn update<W: CollisionWorld + ?Sized>(
        &mut self,
        world: &mut W,
        intent: &IntentSnapshot,
        dt: f32,
    ) -> Pose {
        let config = self.config;
        let advancing = dt.is_finite() && dt > 0.0;

        self.state
            .orientation
            .apply_view_input(&config.profile, intent.view, dt);

        if intent.actions.sprint {
            self.state.sprint.toggle(intent.forward());
        }
        if intent.actions.jump {
            self.request_jump();
        }

        if advancing {
            self.move_body(world, intent, dt);
            self.state
                .vertical
                .decay_jump(config.profile.jumping_falloff, dt);

            let target = config.shape(self.state.stance.stance());
            self.state.stance.smooth_shape(
                target,
                &mut self.state.camera_height,
                &mut self.body.collider,
                config.stance_smoothing,
                dt,
            );
        }

        if intent.actions.crouch {
            self.state.stance.toggle(&*world, &self.body, &config);
        }

        self.pose()
    }

    /// Handle a jump trigger outside of [`update`](Self::update).
    ///
    /// Needs the grounded flag from the last move; airborne requests change
    /// nothing in either stance. Grounded crouched characters stand up instead
    /// of jumping (no clearance test).
    pub fn request_jump(&mut self) -> JumpResult {
        if !self.state.grounded {
            return JumpResult::Airborne;
        }
        if self.state.stance.cancel_crouch() {
            return JumpResult::CrouchCancelled;
        }

        match self.state.vertical.try_jump(self.config.profile.jumping_height, true) {
            JumpOutcome::Jumped => JumpResult::Jumped,
            JumpOutcome::Airborne => JumpResult::Airborne,
        }
    }

    /// Build this tick's displacement and hand it to the collision world.
    fn move_body<W: CollisionWorld + ?Sized>(
        &mut self,
        world: &mut W,
        intent: &IntentSnapshot,
        dt: f32,
    ) {
        let config = &self.config;

        self.state.sprint.update(intent.forward());
        let speeds = self.state.sprint.speeds(&config.profile);

        let local = Vec3::new(
            speeds.strafe * intent.strafe(),
            0.0,
            speeds.forward * intent.forward(),
        ) * dt;
        let mut displacement = self.state.orientation.to_world(local);

        self.state.vertical.apply_gravity(
            config.gravity_amount,
            config.gravity_min,
            dt,
            self.state.grounded,
        );
        displacement += self.state.vertical.displacement(dt);

        let result = world.move_with_collision(&mut self.body, displacement);
        self.state.grounded = result.grounded;
        self.last_move = result;
    }

    /// Current pose.
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.body.position,
            yaw: self.state.orientation.yaw(),
            pitch: self.state.orientation.pitch(),
            body_rotation: self.state.orientation.body_rotation(),
            camera_rotation: self.state.orientation.camera_rotation(),
            camera_height: self.state.camera_height,
            collider: self.body.collider,
            stance: self.state.stance.stance(),
            grounded: self.state.grounded,
            sprinting: self.state.sprint.is_sprinting(),
        }
    }

    /// Move the body without collision and face `yaw`, keeping stance.
    pub fn teleport(&mut self, position: Vec3, yaw: f32) {
        self.body.position = position;
        self.state.orientation.reset(yaw);
        self.state.vertical.reset();
        self.state.grounded = false;
    }

    /// Back to spawn state at `position`: standing, shape snapped, no motion.
    pub fn reset(&mut self, position: Vec3) {
        self.state = LocomotionState::spawn(&self.config);
        self.body.position = position;
        self.body.collider = self.config.stand.collider(self.config.collider_radius);
        self.last_move = MoveResult::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StanceShape;
    use crate::physics::collision::CollisionMask;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Applies every move verbatim and reports a fixed grounded flag.
    struct OpenWorld {
        grounded: bool,
        overlap: bool,
        moves: Vec<Vec3>,
    }

    impl OpenWorld {
        fn grounded() -> Self {
            Self {
                grounded: true,
                overlap: false,
                moves: Vec::new(),
            }
        }
    }

    impl CollisionWorld for OpenWorld {
        fn move_with_collision(
            &mut self,
            body: &mut CharacterBody,
            displacement: Vec3,
        ) -> MoveResult {
            body.position += displacement;
            self.moves.push(displacement);
            MoveResult {
                grounded: self.grounded,
                applied: displacement,
            }
        }

        fn capsule_overlap(
            &self,
            _start: Vec3,
            _end: Vec3,
            _radius: f32,
            _mask: CollisionMask,
        ) -> bool {
            self.overlap
        }
    }

    fn controller() -> LocomotionController {
        LocomotionController::new(ControllerConfig::default(), Vec3::ZERO)
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_spawn_state() {
        let controller = controller();
        let state = controller.state();

        assert_eq!(state.stance(), Stance::Stand);
        assert_eq!(state.yaw(), 0.0);
        assert_eq!(state.pitch(), 0.0);
        assert_eq!(state.vertical_speed(), 0.0);
        assert_eq!(state.jump_force(), Vec3::ZERO);
        assert!(!state.is_sprinting());
        assert!(!state.is_grounded());
        assert_eq!(state.camera_height(), StanceShape::STAND.camera_height);
        assert_eq!(controller.body().collider.height, StanceShape::STAND.collider_height);
    }

    #[test]
    fn test_one_move_per_tick() {
        let mut controller = controller();
        let mut world = OpenWorld::grounded();

        for _ in 0..5 {
            controller.update(&mut world, &IntentSnapshot::moving(0.0, 1.0), DT);
        }
        assert_eq!(world.moves.len(), 5);
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let mut controller = controller();
        let mut world = OpenWorld::grounded();

        controller.update(&mut world, &IntentSnapshot::moving(1.0, 1.0), 0.0);
        assert!(world.moves.is_empty());
        assert_eq!(controller.body().position, Vec3::ZERO);
    }

    #[test]
    fn test_forward_move_follows_yaw() {
        let mut controller = controller();
        let mut world = OpenWorld::grounded();
        controller.state.orientation.set_yaw(90.0);

        controller.update(&mut world, &IntentSnapshot::moving(0.0, 1.0), DT);

        let delta = world.moves[0];
        assert!(approx_eq(delta.x, 4.0 * DT));
        assert!(delta.z.abs() < EPSILON);
    }

    #[test]
    fn test_strafe_uses_strafe_speed() {
        let mut controller = controller();
        let mut world = OpenWorld::grounded();

        controller.update(&mut world, &IntentSnapshot::moving(1.0, 0.0), DT);

        assert!(approx_eq(world.moves[0].x, 3.0 * DT));
    }

    #[test]
    fn test_backward_uses_forward_speed() {
        let mut controller = controller();
        let mut world = OpenWorld::grounded();

        controller.update(&mut world, &IntentSnapshot::moving(0.0, -1.0), DT);

        assert!(approx_eq(world.moves[0].z, -4.0 * DT));
    }

    #[test]
    fn test_sprint_toggle_switches_speed() {
        let mut controller = controller();
        let mut world = OpenWorld::grounded();

        controller.update(&mut world, &IntentSnapshot::moving(0.0, 1.0).with_sprint(), DT);

        assert!(controller.state().is_sprinting());
        assert!(approx_eq(world.moves[0].z, 8.0 * DT));
    }

    #[test]
    fn test_jump_needs_grounded_flag() {
        let mut controller = controller();
        assert_eq!(controller.request_jump(), JumpResult::Airborne);

        controller.set_grounded(true);
        assert_eq!(controller.request_jump(), JumpResult::Jumped);
        assert_eq!(controller.state().vertical_speed(), 0.0);
        assert_eq!(controller.state().jump_force(), Vec3::Y * 6.0);
    }

    #[test]
    fn test_jump_moves_body_up() {
        let mut controller = controller();
        let mut world = OpenWorld::grounded();
        controller.update(&mut world, &IntentSnapshot::default(), DT);

        controller.update(&mut world, &IntentSnapshot::default().with_jump(), DT);

        // 6 * dt of impulse minus one gravity step
        let expected = 6.0 * DT - 0.5 * DT;
        assert!(approx_eq(world.moves[1].y, expected));
        assert!(controller.state().jump_force().y < 6.0);
    }

    #[test]
    fn test_crouch_then_jump_stands_up() {
        let mut controller = controller();
        let mut world = OpenWorld::grounded();
        controller.update(&mut world, &IntentSnapshot::default().with_crouch(), DT);
        assert_eq!(controller.state().stance(), Stance::Crouch);

        let speed_before = controller.state().vertical_speed();
        assert_eq!(controller.request_jump(), JumpResult::CrouchCancelled);
        assert_eq!(controller.state().stance(), Stance::Stand);
        assert_eq!(controller.state().vertical_speed(), speed_before);
        assert_eq!(controller.state().jump_force(), Vec3::ZERO);
    }

    #[test]
    fn test_airborne_jump_keeps_crouch() {
        let mut controller = controller();
        let mut world = OpenWorld {
            grounded: false,
            ..OpenWorld::grounded()
        };
        controller.update(&mut world, &IntentSnapshot::default().with_crouch(), DT);
        assert_eq!(controller.state().stance(), Stance::Crouch);
        assert!(!controller.is_grounded());

        let pose = controller.update(&mut world, &IntentSnapshot::default().with_jump(), DT);

        assert_eq!(pose.stance, Stance::Crouch);
        assert_eq!(controller.state().jump_force(), Vec3::ZERO);
        assert_eq!(controller.request_jump(), JumpResult::Airborne);
    }

    #[test]
    fn test_zero_dt_crouch_commits_without_snapping() {
        let mut controller = controller();
        let mut world = OpenWorld::grounded();

        let pose = controller.update(&mut world, &IntentSnapshot::default().with_crouch(), 0.0);

        // Stance commits, shape waits for the next tick that advances time
        assert_eq!(pose.stance, Stance::Crouch);
        assert_eq!(pose.collider.height, StanceShape::STAND.collider_height);
        assert_eq!(pose.camera_height, StanceShape::STAND.camera_height);
        assert!(world.moves.is_empty());

        let pose = controller.update(&mut world, &IntentSnapshot::default(), DT);
        assert!(pose.collider.height < StanceShape::STAND.collider_height);
        assert_eq!(world.moves.len(), 1);
    }

    #[test]
    fn test_crouch_shrinks_collider_over_time() {
        let mut controller = controller();
        let mut world = OpenWorld::grounded();
        controller.update(&mut world, &IntentSnapshot::default().with_crouch(), DT);

        // Transition commits after this tick's smoothing; shape still standing
        assert_eq!(controller.body().collider.height, StanceShape::STAND.collider_height);

        let pose = controller.update(&mut world, &IntentSnapshot::default(), DT);
        assert!(pose.collider.height < StanceShape::STAND.collider_height);
        assert!(pose.camera_height < StanceShape::STAND.camera_height);

        for _ in 0..240 {
            controller.update(&mut world, &IntentSnapshot::default(), DT);
        }
        let pose = controller.pose();
        assert!(approx_eq(pose.collider.height, StanceShape::CROUCH.collider_height));
        assert!(approx_eq(pose.camera_height, StanceShape::CROUCH.camera_height));
    }

    #[test]
    fn test_blocked_crouch_keeps_stance() {
        let mut controller = controller();
        let mut world = OpenWorld {
            overlap: true,
            ..OpenWorld::grounded()
        };

        for _ in 0..4 {
            controller.update(&mut world, &IntentSnapshot::default().with_crouch(), DT);
        }
        assert_eq!(controller.state().stance(), Stance::Stand);
    }

    #[test]
    fn test_pose_camera_position() {
        let controller =
            LocomotionController::new(ControllerConfig::default(), Vec3::new(1.0, 2.0, 3.0));
        let pose = controller.pose();
        assert!(pose.camera_position().distance(Vec3::new(1.0, 3.7, 3.0)) < EPSILON);
        assert_eq!(pose.view_rotation(), Quat::IDENTITY);
    }

    #[test]
    fn test_reset_restores_spawn() {
        let mut controller = controller();
        let mut world = OpenWorld::grounded();
        let intent = IntentSnapshot::new(glam::Vec2::new(0.0, 1.0), glam::Vec2::new(5.0, 5.0));
        controller.update(&mut world, &intent.with_crouch(), DT);

        controller.reset(Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(controller.body().position, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(controller.state().stance(), Stance::Stand);
        assert_eq!(controller.state().yaw(), 0.0);
        assert!(!controller.is_grounded());
    }

    #[test]
    fn test_teleport_keeps_stance() {
        let mut controller = controller();
        let mut world = OpenWorld::grounded();
        controller.update(&mut world, &IntentSnapshot::default().with_crouch(), DT);

        controller.teleport(Vec3::new(5.0, 0.0, 5.0), 180.0);

        assert_eq!(controller.state().stance(), Stance::Crouch);
        assert_eq!(controller.state().yaw(), 180.0);
        assert_eq!(controller.body().position, Vec3::new(5.0, 0.0, 5.0));
    }

    #[test]
    fn test_controller_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<LocomotionController>();
    }
}
