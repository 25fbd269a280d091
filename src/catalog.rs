//! Static game data: levels, target/clutter emoji, palette

/// A hand-authored level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    pub id: u32,
    pub name: &'static str,
    pub target_count: usize,
    pub clutter_count: usize,
    /// Seconds on the clock
    pub time_limit: u32,
}

/// A findable item: type key plus the glyph shown in the scene and checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDef {
    pub kind: &'static str,
    pub glyph: &'static str,
}

pub const LEVELS: [LevelConfig; 3] = [
    LevelConfig {
        id: 1,
        name: "Patrouille de Quartier",
        target_count: 5,
        clutter_count: 80,
        time_limit: 60,
    },
    LevelConfig {
        id: 2,
        name: "Enquête Urbaine",
        target_count: 8,
        clutter_count: 150,
        time_limit: 90,
    },
    LevelConfig {
        id: 3,
        name: "Opération Spéciale",
        target_count: 12,
        clutter_count: 250,
        time_limit: 120,
    },
];

// Must hold at least as many entries as the largest level's target_count
pub const TARGETS: [TargetDef; 12] = [
    TargetDef { kind: "gendarme_m", glyph: "👮" },
    TargetDef { kind: "gendarme_f", glyph: "👮‍♀️" },
    TargetDef { kind: "car", glyph: "🚓" },
    TargetDef { kind: "siren", glyph: "🚨" },
    TargetDef { kind: "handcuffs", glyph: "⛓️" },
    TargetDef { kind: "radio", glyph: "📻" },
    TargetDef { kind: "flashlight", glyph: "🔦" },
    TargetDef { kind: "dog", glyph: "🐕" },
    TargetDef { kind: "shield", glyph: "🛡️" },
    TargetDef { kind: "magnifier", glyph: "🔍" },
    TargetDef { kind: "document", glyph: "📜" },
    TargetDef { kind: "camera", glyph: "📸" },
];

pub const CLUTTER: [&str; 30] = [
    "🌳", "🌲", "🏢", "🏠", "🏘️", "🚗", "🚕", "🚲", "🛴", "🚶", "🏃", "🐶", "🐱", "🐦", "🍎",
    "🍔", "🍦", "📦", "🎈", "🎸", "⚽", "🎒", "👓", "🌂", "👟", "🧢", "👕", "👖", "👗", "💼",
];

/// Theme colors
pub mod colors {
    pub const GENDARME_BLUE: &str = "#002395";
    pub const FRENCH_RED: &str = "#ED2939";
    pub const GOLD: &str = "#D4AF37";
}

/// Level at `index`, if any
pub fn level(index: usize) -> Option<&'static LevelConfig> {
    LEVELS.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_catalog_covers_every_level() {
        let max = LEVELS.iter().map(|l| l.target_count).max().unwrap();
        assert!(TARGETS.len() >= max);
    }

    #[test]
    fn test_target_kinds_unique() {
        let mut kinds: Vec<_> = TARGETS.iter().map(|t| t.kind).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), TARGETS.len());
    }

    #[test]
    fn test_levels_get_harder() {
        for pair in LEVELS.windows(2) {
            assert!(pair[1].target_count > pair[0].target_count);
            assert!(pair[1].clutter_count > pair[0].clutter_count);
            assert!(pair[1].time_limit >= pair[0].time_limit);
        }
    }

    #[test]
    fn test_level_lookup() {
        assert_eq!(level(0).map(|l| l.id), Some(1));
        assert!(level(LEVELS.len()).is_none());
    }

    #[test]
    fn test_no_clutter_glyph_is_a_target() {
        for glyph in CLUTTER {
            assert!(TARGETS.iter().all(|t| t.glyph != glyph), "{glyph}");
        }
    }
}
