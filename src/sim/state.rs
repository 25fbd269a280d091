//! Game state and core session types
//!
//! Everything the screens render from lives here.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::catalog::{LEVELS, LevelConfig};
use crate::settings::Rules;
use crate::timer::TimerId;

/// Current screen / phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    GameOver,
    Won,
}

/// What an object in the scene is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// A findable item, tagged with its catalog type key
    Target(&'static str),
    Clutter,
}

impl ObjectKind {
    /// Type key (`"clutter"` for non-targets)
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Target(kind) => kind,
            ObjectKind::Clutter => "clutter",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item placed in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub id: u32,
    pub kind: ObjectKind,
    pub glyph: &'static str,
    /// Position in percent of the scene area
    pub pos: Vec2,
    /// Degrees
    pub rotation: f32,
    pub scale: f32,
    pub is_target: bool,
    pub found: bool,
}

/// One row of the "to find" checklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry {
    pub id: u32,
    pub kind: &'static str,
    pub glyph: &'static str,
    pub found: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Current level (0-based)
    pub level_index: usize,
    pub score: u32,
    /// Seconds left on the clock
    pub time_left: u32,
    pub muted: bool,
    /// Objects in the scene (shuffled)
    pub objects: Vec<GameObject>,
    /// Checklist, one entry per target object
    pub targets: Vec<TargetEntry>,
    /// Live countdown interval, if any
    pub countdown: Option<TimerId>,
    /// Deferred level advance, if the level was just cleared
    pub pending_advance: Option<TimerId>,
    pub rules: Rules,
    pub(crate) levels: Vec<LevelConfig>,
    pub(crate) rng: Pcg32,
    next_id: u32,
    next_timer: u64,
}

impl GameState {
    /// Create a new run on the menu screen
    pub fn new(seed: u64, rules: Rules) -> Self {
        Self::with_levels(seed, rules, LEVELS.to_vec())
    }

    /// Create a run over a custom level list
    pub fn with_levels(seed: u64, rules: Rules, levels: Vec<LevelConfig>) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            level_index: 0,
            score: 0,
            time_left: 0,
            muted: false,
            objects: Vec::new(),
            targets: Vec::new(),
            countdown: None,
            pending_advance: None,
            rules,
            levels,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            next_timer: 1,
        }
    }

    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }

    /// Config of the level being played
    pub fn level(&self) -> Option<&LevelConfig> {
        self.levels.get(self.level_index)
    }

    /// Reserve `count` consecutive object IDs, returning the first
    pub fn reserve_object_ids(&mut self, count: usize) -> u32 {
        let first = self.next_id;
        self.next_id += count as u32;
        first
    }

    /// Allocate a new timer ID
    pub fn next_timer_id(&mut self) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        id
    }

    pub fn object(&self, id: u32) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn targets_remaining(&self) -> usize {
        self.targets.iter().filter(|t| !t.found).count()
    }

    /// Every checklist entry found
    pub fn is_cleared(&self) -> bool {
        !self.targets.is_empty() && self.targets_remaining() == 0
    }

    /// Timers the state still expects to fire
    pub fn live_timers(&self) -> impl Iterator<Item = TimerId> + '_ {
        self.countdown.into_iter().chain(self.pending_advance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_on_menu() {
        let state = GameState::new(1, Rules::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert!(state.objects.is_empty());
        assert_eq!(state.live_timers().count(), 0);
        assert_eq!(state.levels().len(), 3);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = GameState::new(1, Rules::default());
        let a = state.reserve_object_ids(85);
        let b = state.reserve_object_ids(1);
        assert_eq!(b, a + 85);
        assert_ne!(state.next_timer_id(), state.next_timer_id());
    }

    #[test]
    fn test_object_kind_names() {
        assert_eq!(ObjectKind::Clutter.as_str(), "clutter");
        assert_eq!(ObjectKind::Target("dog").to_string(), "dog");
    }

    #[test]
    fn test_empty_checklist_is_not_cleared() {
        let state = GameState::new(1, Rules::default());
        assert!(!state.is_cleared());
    }
}
