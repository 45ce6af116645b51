//! Input Module
//!
//! Platform-agnostic per-tick intent. Hosts translate their device events
//! (keyboard, gamepad, network packets) into an [`IntentSnapshot`] and hand it
//! to the locomotion controller; nothing here knows about a windowing system.
//!
//! # Example
//!
//! ```rust,ignore
//! use stridecore_engine::input::IntentSnapshot;
//!
//! let mut intent = IntentSnapshot::moving(strafe_axis, forward_axis);
//! intent.view = mouse_delta;
//! if jump_pressed_this_tick {
//!     intent = intent.with_jump();
//! }
//! ```

pub mod intent;

pub use intent::{IntentActions, IntentSnapshot};
