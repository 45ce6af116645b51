//! Camera Module
//!
//! First-person view orientation. Window-system agnostic: it only deals with
//! angles and the rotations derived from them.

pub mod fps_controller;

pub use fps_controller::OrientationController;
