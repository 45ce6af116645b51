//! Controller Configuration
//!
//! Immutable tuning data supplied when a character is spawned:
//!
//! - [`MovementProfile`] - view sensitivity, walk/run speeds, jump
//! - [`StanceShape`] - camera height and collider shape for one stance
//! - [`ControllerConfig`] - everything above plus gravity, pitch limits and
//!   stance-check settings
//!
//! Configs can be written by hand or loaded from JSON:
//!
//! ```rust,ignore
//! use stridecore_engine::config::ControllerConfig;
//!
//! let config = ControllerConfig::load("config/controller.json")?;
//! ```
//!
//! Missing JSON fields fall back to [`ControllerConfig::default`].

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::collision::{CapsuleCollider, CollisionMask};
use crate::player::Stance;

/// Default lower pitch limit in degrees (looking down)
pub const VIEW_CLAMP_Y_MIN: f32 = -70.0;

/// Default upper pitch limit in degrees (looking up)
pub const VIEW_CLAMP_Y_MAX: f32 = 80.0;

/// Default padding added around the stance-check capsule
pub const STANCE_CHECK_ERROR_MARGIN: f32 = 0.05;

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur while loading or validating a controller config.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON serialization/deserialization error.
    Json(serde_json::Error),
    /// A field holds a value the controller cannot work with.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

// ============================================================================
// MOVEMENT PROFILE
// ============================================================================

/// View and movement tuning for one character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementProfile {
    /// Yaw speed in degrees per second per unit of view input
    pub view_x_sensitivity: f32,
    /// Pitch speed in degrees per second per unit of view input
    pub view_y_sensitivity: f32,
    pub view_x_inverted: bool,
    pub view_y_inverted: bool,

    pub walking_forward_speed: f32,
    /// Kept for data compatibility; speed selection does not read it
    pub walking_backward_speed: f32,
    pub walking_strafe_speed: f32,

    pub running_forward_speed: f32,
    pub running_strafe_speed: f32,

    /// Initial magnitude of the upward jump impulse
    pub jumping_height: f32,
    /// Time constant (seconds) of the jump impulse decay
    pub jumping_falloff: f32,
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self {
            view_x_sensitivity: 20.0,
            view_y_sensitivity: 20.0,
            view_x_inverted: false,
            view_y_inverted: false,
            walking_forward_speed: 4.0,
            walking_backward_speed: 2.0,
            walking_strafe_speed: 3.0,
            running_forward_speed: 8.0,
            running_strafe_speed: 6.0,
            jumping_height: 6.0,
            jumping_falloff: 0.2,
        }
    }
}

impl MovementProfile {
    /// Check the profile invariants: non-negative speeds and sensitivities,
    /// positive jump falloff.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("view_x_sensitivity", self.view_x_sensitivity),
            ("view_y_sensitivity", self.view_y_sensitivity),
            ("walking_forward_speed", self.walking_forward_speed),
            ("walking_backward_speed", self.walking_backward_speed),
            ("walking_strafe_speed", self.walking_strafe_speed),
            ("running_forward_speed", self.running_forward_speed),
            ("running_strafe_speed", self.running_strafe_speed),
            ("jumping_height", self.jumping_height),
        ];
        for (field, value) in non_negative {
            require_non_negative(field, value)?;
        }

        if !(self.jumping_falloff > 0.0) || !self.jumping_falloff.is_finite() {
            return Err(ConfigError::Invalid {
                field: "jumping_falloff",
                reason: "must be a positive finite number",
            });
        }
        Ok(())
    }
}

// ============================================================================
// STANCE SHAPE
// ============================================================================

/// Target camera height and collider shape for one stance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StanceShape {
    /// Camera holder height above the body origin
    pub camera_height: f32,
    /// Full collider height including caps
    pub collider_height: f32,
    /// Collider center relative to the body origin
    pub collider_center: Vec3,
}

impl StanceShape {
    /// Standing shape: 2m collider centered at 1m, camera at 1.7m.
    pub const STAND: StanceShape = StanceShape {
        camera_height: 1.7,
        collider_height: 2.0,
        collider_center: Vec3::new(0.0, 1.0, 0.0),
    };

    /// Crouching shape: 1.2m collider centered at 0.6m.
    pub const CROUCH: StanceShape = StanceShape {
        camera_height: 1.0,
        collider_height: 1.2,
        collider_center: Vec3::new(0.0, 0.6, 0.0),
    };

    /// Collider with this shape and the given radius.
    pub fn collider(&self, radius: f32) -> CapsuleCollider {
        CapsuleCollider {
            radius,
            height: self.collider_height,
            center: self.collider_center,
        }
    }
}

// ============================================================================
// CONTROLLER CONFIG
// ============================================================================

/// Full configuration of a locomotion controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub profile: MovementProfile,
    pub stand: StanceShape,
    pub crouch: StanceShape,

    /// Lower pitch bound in degrees
    pub view_clamp_y_min: f32,
    /// Upper pitch bound in degrees
    pub view_clamp_y_max: f32,

    /// Per-second decrease of the vertical speed
    pub gravity_amount: f32,
    /// Vertical speed below which gravity stops accumulating
    pub gravity_min: f32,

    /// Time constant (seconds) for camera height and collider smoothing
    pub stance_smoothing: f32,
    /// Padding added around the stance-check capsule
    pub stance_check_error_margin: f32,
    /// Layers the stance check tests against
    pub player_mask: CollisionMask,
    /// Collider radius (constant across stances)
    pub collider_radius: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            profile: MovementProfile::default(),
            stand: StanceShape::STAND,
            crouch: StanceShape::CROUCH,
            view_clamp_y_min: VIEW_CLAMP_Y_MIN,
            view_clamp_y_max: VIEW_CLAMP_Y_MAX,
            gravity_amount: 0.5,
            gravity_min: -3.0,
            stance_smoothing: 0.12,
            stance_check_error_margin: STANCE_CHECK_ERROR_MARGIN,
            player_mask: CollisionMask::DEFAULT,
            collider_radius: 0.5,
        }
    }
}

impl ControllerConfig {
    /// Parse a config from JSON text and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ControllerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded controller config from {}", path.display());
        Ok(config)
    }

    /// Serialize the config as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the config to a JSON file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Check every invariant the controller relies on.
    ///
    /// Crouch taller than stand is accepted with a warning; the stance check
    /// geometry assumes the opposite but still works.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile.validate()?;

        if !self.view_clamp_y_min.is_finite()
            || !self.view_clamp_y_max.is_finite()
            || self.view_clamp_y_min > self.view_clamp_y_max
        {
            return Err(ConfigError::Invalid {
                field: "view_clamp_y_min",
                reason: "pitch bounds must be finite with min <= max",
            });
        }

        require_non_negative("gravity_amount", self.gravity_amount)?;
        require_non_negative("stance_check_error_margin", self.stance_check_error_margin)?;
        require_non_negative("collider_radius", self.collider_radius)?;
        require_non_negative("stand.collider_height", self.stand.collider_height)?;
        require_non_negative("crouch.collider_height", self.crouch.collider_height)?;

        if !self.gravity_min.is_finite() {
            return Err(ConfigError::Invalid {
                field: "gravity_min",
                reason: "must be finite",
            });
        }

        if self.crouch.collider_height > self.stand.collider_height {
            log::warn!(
                "Crouch collider ({}) is taller than stand collider ({})",
                self.crouch.collider_height,
                self.stand.collider_height
            );
        }
        if !(self.stance_smoothing > 0.0) {
            log::warn!("stance_smoothing <= 0: stance changes will snap instantly");
        }

        Ok(())
    }

    /// Shape for the given stance.
    pub fn shape(&self, stance: Stance) -> &StanceShape {
        match stance {
            Stance::Stand => &self.stand,
            Stance::Crouch => &self.crouch,
        }
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be a non-negative finite number",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ControllerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_pitch_bounds() {
        let config = ControllerConfig::default();
        assert_eq!(config.view_clamp_y_min, -70.0);
        assert_eq!(config.view_clamp_y_max, 80.0);
        assert_eq!(config.stance_check_error_margin, 0.05);
    }

    #[test]
    fn test_negative_speed_rejected() {
        let mut config = ControllerConfig::default();
        config.profile.running_strafe_speed = -1.0;

        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "running_strafe_speed"),
            other => panic!("expected invalid field, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_falloff_rejected() {
        let mut config = ControllerConfig::default();
        config.profile.jumping_falloff = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "jumping_falloff", .. })
        ));
    }

    #[test]
    fn test_inverted_pitch_bounds_rejected() {
        let mut config = ControllerConfig::default();
        config.view_clamp_y_min = 10.0;
        config.view_clamp_y_max = -10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "profile": { "walking_forward_speed": 5.5, "view_y_inverted": true },
            "gravity_amount": 0.8
        }"#;
        let config = ControllerConfig::from_json_str(json).expect("valid config");

        assert_eq!(config.profile.walking_forward_speed, 5.5);
        assert!(config.profile.view_y_inverted);
        assert_eq!(config.profile.running_forward_speed, 8.0);
        assert_eq!(config.gravity_amount, 0.8);
        assert_eq!(config.stand, StanceShape::STAND);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = ControllerConfig::default();
        config.player_mask = CollisionMask::layer(2);
        config.crouch.collider_center = Vec3::new(0.0, 0.5, 0.1);

        let json = config.to_json_string().expect("serializes");
        let parsed = ControllerConfig::from_json_str(&json).expect("parses");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("stridecore-config-{}", std::process::id()));
        let path = dir.join("nested").join("controller.json");
        let mut config = ControllerConfig::default();
        config.profile.running_forward_speed = 9.5;

        config.save(&path).expect("saves");
        let loaded = ControllerConfig::load(&path).expect("loads");
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let result = ControllerConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ControllerConfig::load("/definitely/not/here/controller.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_error_display() {
        let error = ConfigError::Invalid {
            field: "collider_radius",
            reason: "must be a non-negative finite number",
        };
        assert_eq!(
            error.to_string(),
            "invalid config field `collider_radius`: must be a non-negative finite number"
        );
    }

    #[test]
    fn test_stance_shape_collider() {
        let collider = StanceShape::CROUCH.collider(0.4);
        assert_eq!(collider.radius, 0.4);
        assert_eq!(collider.height, 1.2);
        assert_eq!(collider.center, Vec3::new(0.0, 0.6, 0.0));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let json = include_str!("../../config/controller.json");
        let config = ControllerConfig::from_json_str(json).unwrap();
        assert_eq!(config, ControllerConfig::default());
    }
}
