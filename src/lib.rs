//! Gendarme Enquête - a hidden-object game in the browser
//!
//! Core modules:
//! - `catalog`: Static level and emoji data
//! - `sim`: Deterministic game state machine and scene generation
//! - `audio`: Procedural sound cues (Web Audio in the browser)
//! - `timer`: Countdown / deferred-advance scheduling
//! - `ui`: View tree and DOM mounting
//! - `settings`: Gameplay rules and audio configuration

pub mod app;
pub mod audio;
pub mod catalog;
pub mod settings;
pub mod sim;
pub mod timer;
pub mod ui;

pub use app::Game;
pub use settings::{AudioSettings, GameSettings, Rules};

/// Game configuration constants
pub mod consts {
    /// Points awarded per target found
    pub const TARGET_REWARD: u32 = 100;
    /// Seconds removed from the clock when clutter is clicked
    pub const CLUTTER_PENALTY_SECS: u32 = 3;
    /// Delay between the last target found and the next level (lets the found animation play)
    pub const ADVANCE_DELAY_MS: u32 = 500;
    /// Countdown period
    pub const TICK_INTERVAL_MS: u32 = 1000;

    /// Target placement bounds, percent of the scene
    pub const TARGET_X: (f32, f32) = (5.0, 95.0);
    pub const TARGET_Y: (f32, f32) = (10.0, 90.0);
    /// Targets get a small tilt either way
    pub const TARGET_MAX_TILT: f32 = 15.0;
    /// Targets render larger than clutter on purpose (fairness knob)
    pub const TARGET_SCALE: (f32, f32) = (1.2, 1.7);

    /// Clutter placement bounds, percent of the scene
    pub const CLUTTER_X: (f32, f32) = (3.0, 97.0);
    pub const CLUTTER_Y: (f32, f32) = (5.0, 90.0);
    pub const CLUTTER_SCALE: (f32, f32) = (0.8, 1.4);

    /// Found objects pop to the front at this size
    pub const FOUND_SCALE: f32 = 1.5;
    pub const FOUND_Z_INDEX: i32 = 100;
    /// Countdown turns urgent below this many seconds
    pub const URGENT_SECS: u32 = 10;
}

/// Check a scene position (percent) against inclusive bounds
#[cfg(test)]
pub(crate) fn within_bounds(pos: glam::Vec2, x: (f32, f32), y: (f32, f32)) -> bool {
    (x.0..=x.1).contains(&pos.x) && (y.0..=y.1).contains(&pos.y)
}
