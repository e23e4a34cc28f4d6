//! Player settings and preferences
//!
//! Persisted separately from progress in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Playback speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlaybackPreset {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl PlaybackPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackPreset::Slow => "Slow",
            PlaybackPreset::Normal => "Normal",
            PlaybackPreset::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(PlaybackPreset::Slow),
            "normal" | "norm" => Some(PlaybackPreset::Normal),
            "fast" => Some(PlaybackPreset::Fast),
            _ => None,
        }
    }

    /// Simulated seconds per real second.
    ///
    /// Normal is 0.05 simulated seconds per frame at 60 Hz.
    pub fn speed(&self) -> f32 {
        match self {
            PlaybackPreset::Slow => 1.5,
            PlaybackPreset::Normal => 3.0,
            PlaybackPreset::Fast => 4.5,
        }
    }
}

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Animation speed
    pub playback: PlaybackPreset,
    /// Pause the animation when the tab is hidden or the window loses focus
    pub auto_pause_on_hidden: bool,
    /// Present quiz options in a seeded random order
    pub shuffle_answers: bool,
    /// Seed for the option order (0 = pick one per session)
    pub answer_seed: u64,
    /// Print the percentage on each energy meter
    pub show_meter_values: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playback: PlaybackPreset::Normal,
            auto_pause_on_hidden: true,
            shuffle_answers: false,
            answer_seed: 0,
            show_meter_values: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "playground_settings";

    /// Create settings from a playback preset
    pub fn from_preset(preset: PlaybackPreset) -> Self {
        Self {
            playback: preset,
            ..Self::default()
        }
    }

    /// Simulated seconds per real second
    pub fn playback_speed(&self) -> f32 {
        self.playback.speed()
    }

    /// Load settings from LocalStorage (defaults on native or when absent)
    pub fn load() -> Self {
        match persistence::load_json(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        if persistence::store_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(PlaybackPreset::from_str("FAST"), Some(PlaybackPreset::Fast));
        assert_eq!(PlaybackPreset::from_str("norm"), Some(PlaybackPreset::Normal));
        assert_eq!(PlaybackPreset::from_str("warp"), None);
        for preset in [PlaybackPreset::Slow, PlaybackPreset::Normal, PlaybackPreset::Fast] {
            assert_eq!(PlaybackPreset::from_str(preset.as_str()), Some(preset));
        }
    }

    #[test]
    fn test_speeds_are_ordered() {
        assert!(PlaybackPreset::Slow.speed() < PlaybackPreset::Normal.speed());
        assert!(PlaybackPreset::Normal.speed() < PlaybackPreset::Fast.speed());
        assert_eq!(Settings::from_preset(PlaybackPreset::Fast).playback_speed(), 4.5);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"shuffle_answers": true}"#).unwrap();
        assert!(settings.shuffle_answers);
        assert_eq!(settings.playback, PlaybackPreset::Normal);
        assert!(settings.auto_pause_on_hidden);
    }

    #[test]
    fn test_native_load_falls_back_to_defaults() {
        assert_eq!(Settings::load(), Settings::default());
    }
}
