//! Deterministic game logic
//!
//! All gameplay lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - No sound, timers, or DOM; transitions return `Effect`s instead
//! - No rendering or platform dependencies

pub mod scene;
pub mod state;
pub mod step;

pub use scene::{Scene, generate, load_level};
pub use state::{GameObject, GamePhase, GameState, ObjectKind, TargetEntry};
pub use step::{Effect, Intent, step};
