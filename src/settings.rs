//! Game settings
//!
//! Rules and audio preferences. Read once at startup from an optional JSON
//! block embedded in the page; nothing is written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Scoring and timing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Points per target found
    pub target_reward: u32,
    /// Seconds lost per clutter click
    pub clutter_penalty_secs: u32,
    /// Delay before advancing after the last target (ms)
    pub advance_delay_ms: u32,
    /// Countdown period (ms)
    pub tick_interval_ms: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            target_reward: TARGET_REWARD,
            clutter_penalty_secs: CLUTTER_PENALTY_SECS,
            advance_delay_ms: ADVANCE_DELAY_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

/// Audio preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0), scales every cue
    pub master_volume: f32,
    /// Start the run muted
    pub start_muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            start_muted: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub rules: Rules,
    pub audio: AudioSettings,
}

impl GameSettings {
    /// Id of the `<script type="application/json">` element holding overrides
    pub const ELEMENT_ID: &'static str = "game-settings";

    /// Parse settings; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.audio.master_volume = settings.audio.master_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let rules = Rules::default();
        assert_eq!(rules.target_reward, 100);
        assert_eq!(rules.clutter_penalty_secs, 3);
        assert_eq!(rules.advance_delay_ms, 500);
        assert_eq!(rules.tick_interval_ms, 1000);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = GameSettings::from_json(r#"{ "rules": { "target_reward": 250 } }"#).unwrap();
        assert_eq!(settings.rules.target_reward, 250);
        assert_eq!(settings.rules.clutter_penalty_secs, 3);
        assert_eq!(settings.audio, AudioSettings::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(GameSettings::from_json("{}").unwrap(), GameSettings::default());
    }

    #[test]
    fn test_volume_clamped() {
        let settings = GameSettings::from_json(r#"{ "audio": { "master_volume": 3.5 } }"#).unwrap();
        assert_eq!(settings.audio.master_volume, 1.0);
    }

    #[test]
    fn test_malformed_json_errors() {
        assert!(GameSettings::from_json("{ rules: ").is_err());
    }
}
