//! Scene generation
//!
//! Lays out a level: a random pick of distinct targets placed away from the
//! edges, plus independently drawn clutter over the whole area. The combined
//! list is shuffled so list order says nothing about what is a target.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{GameObject, GamePhase, GameState, ObjectKind, TargetEntry};
use crate::catalog::{CLUTTER, LevelConfig, TARGETS};
use crate::consts::*;

/// A generated level layout
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub objects: Vec<GameObject>,
    pub targets: Vec<TargetEntry>,
}

/// Uniform sample in `[lo, hi)`
fn sample<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    rng.random_range(lo..hi)
}

/// Generate the layout for `level`. Object ids are `first_id..first_id + n`.
///
/// The target catalog must hold at least `level.target_count` entries; a
/// larger count yields every catalog target once.
pub fn generate<R: Rng + ?Sized>(level: &LevelConfig, rng: &mut R, first_id: u32) -> Scene {
    let total = level.target_count + level.clutter_count;
    let mut objects = Vec::with_capacity(total);
    let mut targets = Vec::with_capacity(level.target_count);

    let mut picks: Vec<usize> = (0..TARGETS.len()).collect();
    picks.shuffle(rng);

    let picked = picks.iter().take(level.target_count).map(|&i| &TARGETS[i]);
    for (id, def) in (first_id..).zip(picked) {
        objects.push(GameObject {
            id,
            kind: ObjectKind::Target(def.kind),
            glyph: def.glyph,
            pos: Vec2::new(sample(rng, TARGET_X), sample(rng, TARGET_Y)),
            rotation: sample(rng, (-TARGET_MAX_TILT, TARGET_MAX_TILT)),
            scale: sample(rng, TARGET_SCALE),
            is_target: true,
            found: false,
        });
        targets.push(TargetEntry {
            id,
            kind: def.kind,
            glyph: def.glyph,
            found: false,
        });
    }

    let clutter_first = first_id + targets.len() as u32;
    for id in (clutter_first..).take(level.clutter_count) {
        objects.push(GameObject {
            id,
            kind: ObjectKind::Clutter,
            glyph: CLUTTER[rng.random_range(0..CLUTTER.len())],
            pos: Vec2::new(sample(rng, CLUTTER_X), sample(rng, CLUTTER_Y)),
            rotation: sample(rng, (0.0, 360.0)),
            scale: sample(rng, CLUTTER_SCALE),
            is_target: false,
            found: false,
        });
    }

    objects.shuffle(rng);

    Scene { objects, targets }
}

/// Populate `state` with level `index` and put the clock at its time limit.
///
/// Returns false (state untouched) when no such level exists.
pub fn load_level(state: &mut GameState, index: usize) -> bool {
    let Some(level) = state.levels.get(index).copied() else {
        return false;
    };

    let first_id = state.reserve_object_ids(level.target_count + level.clutter_count);
    let scene = generate(&level, &mut state.rng, first_id);

    log::info!(
        "Level {} \"{}\": {} targets among {} objects, {}s",
        level.id,
        level.name,
        scene.targets.len(),
        scene.objects.len(),
        level.time_limit
    );

    state.level_index = index;
    state.objects = scene.objects;
    state.targets = scene.targets;
    state.time_left = level.time_limit;
    state.phase = GamePhase::Playing;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LEVELS;
    use crate::settings::Rules;
    use crate::within_bounds;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn scene_for(level: &LevelConfig, seed: u64) -> Scene {
        let mut rng = Pcg32::seed_from_u64(seed);
        generate(level, &mut rng, 1)
    }

    #[test]
    fn test_first_level_counts() {
        let scene = scene_for(&LEVELS[0], 42);
        assert_eq!(scene.objects.len(), 85);
        assert_eq!(scene.objects.iter().filter(|o| o.is_target).count(), 5);
        assert_eq!(scene.targets.len(), 5);
    }

    #[test]
    fn test_targets_mirror_target_objects() {
        for level in &LEVELS {
            let scene = scene_for(level, 7);
            let target_ids: HashSet<u32> = scene.targets.iter().map(|t| t.id).collect();
            let object_ids: HashSet<u32> = scene
                .objects
                .iter()
                .filter(|o| o.is_target)
                .map(|o| o.id)
                .collect();
            assert_eq!(target_ids.len(), level.target_count);
            assert_eq!(target_ids, object_ids);

            for entry in &scene.targets {
                let obj = scene.objects.iter().find(|o| o.id == entry.id).unwrap();
                assert_eq!(obj.glyph, entry.glyph);
                assert_eq!(obj.kind, ObjectKind::Target(entry.kind));
                assert!(!entry.found && !obj.found);
            }
        }
    }

    #[test]
    fn test_targets_never_repeat_within_level() {
        let scene = scene_for(&LEVELS[2], 3);
        let kinds: HashSet<&str> = scene.targets.iter().map(|t| t.kind).collect();
        assert_eq!(kinds.len(), 12);
    }

    #[test]
    fn test_object_ids_unique_and_contiguous() {
        let level = &LEVELS[1];
        let mut rng = Pcg32::seed_from_u64(5);
        let scene = generate(level, &mut rng, 100);
        let mut ids: Vec<u32> = scene.objects.iter().map(|o| o.id).collect();
        ids.sort_unstable();
        let expected: Vec<u32> = (100..100 + 158).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = scene_for(&LEVELS[1], 2024);
        let b = scene_for(&LEVELS[1], 2024);
        assert_eq!(a.objects, b.objects);
        assert_eq!(a.targets, b.targets);
    }

    #[test]
    fn test_list_order_is_shuffled() {
        // Targets are generated first; shuffling must move them off the front
        let scene = scene_for(&LEVELS[2], 11);
        assert!(scene.objects[..12].iter().any(|o| !o.is_target));
    }

    #[test]
    fn test_load_level_resets_clock_and_enters_playing() {
        let mut state = GameState::new(9, Rules::default());
        assert!(load_level(&mut state, 1));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.time_left, 90);
        assert_eq!(state.objects.len(), 158);
    }

    #[test]
    fn test_load_level_ids_never_reused() {
        let mut state = GameState::new(9, Rules::default());
        load_level(&mut state, 0);
        let first: HashSet<u32> = state.objects.iter().map(|o| o.id).collect();
        load_level(&mut state, 0);
        assert!(state.objects.iter().all(|o| !first.contains(&o.id)));
    }

    #[test]
    fn test_load_missing_level() {
        let mut state = GameState::new(9, Rules::default());
        assert!(!load_level(&mut state, 3));
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.objects.is_empty());
    }

    proptest! {
        #[test]
        fn prop_positions_within_bounds(seed in any::<u64>(), level_idx in 0usize..3) {
            let scene = scene_for(&LEVELS[level_idx], seed);
            for obj in &scene.objects {
                if obj.is_target {
                    prop_assert!(within_bounds(obj.pos, TARGET_X, TARGET_Y));
                    prop_assert!(obj.rotation.abs() <= TARGET_MAX_TILT);
                    prop_assert!(obj.scale >= TARGET_SCALE.0 && obj.scale <= TARGET_SCALE.1);
                } else {
                    prop_assert!(within_bounds(obj.pos, CLUTTER_X, CLUTTER_Y));
                    prop_assert!(obj.rotation >= 0.0 && obj.rotation <= 360.0);
                    prop_assert!(obj.scale >= CLUTTER_SCALE.0 && obj.scale <= CLUTTER_SCALE.1);
                    prop_assert_eq!(obj.kind, ObjectKind::Clutter);
                }
            }
        }

        #[test]
        fn prop_counts_match_config(seed in any::<u64>(), level_idx in 0usize..3) {
            let level = &LEVELS[level_idx];
            let scene = scene_for(level, seed);
            prop_assert_eq!(scene.objects.len(), level.target_count + level.clutter_count);
            prop_assert_eq!(scene.targets.len(), level.target_count);
        }
    }
}
