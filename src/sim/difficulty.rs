//! Named difficulty presets

use serde::{Deserialize, Serialize};

use super::clock::Millis;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "med" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Timing and speed constants for this preset
    pub fn config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                spawn_interval_ms: 1000,
                target_lifetime_ms: 3500,
                speed_min: 0.2,
                speed_max: 0.5,
                combo_timeout_ms: 2000,
            },
            Difficulty::Normal => DifficultyConfig {
                spawn_interval_ms: 800,
                target_lifetime_ms: 3000,
                speed_min: 0.3,
                speed_max: 0.8,
                combo_timeout_ms: 1500,
            },
            Difficulty::Hard => DifficultyConfig {
                spawn_interval_ms: 600,
                target_lifetime_ms: 2200,
                speed_min: 0.5,
                speed_max: 1.1,
                combo_timeout_ms: 1000,
            },
        }
    }
}

/// Round parameters derived from a preset. Fixed for the whole round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub spawn_interval_ms: Millis,
    pub target_lifetime_ms: Millis,
    /// Percent of surface per motion tick
    pub speed_min: f32,
    pub speed_max: f32,
    pub combo_timeout_ms: Millis,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str(" med "), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
    }

    #[test]
    fn test_presets_get_harder() {
        let easy = Difficulty::Easy.config();
        let normal = Difficulty::Normal.config();
        let hard = Difficulty::Hard.config();
        assert!(easy.spawn_interval_ms > normal.spawn_interval_ms);
        assert!(normal.spawn_interval_ms > hard.spawn_interval_ms);
        assert!(easy.target_lifetime_ms > hard.target_lifetime_ms);
        assert!(easy.combo_timeout_ms > hard.combo_timeout_ms);
        for d in Difficulty::ALL {
            let c = d.config();
            assert!(c.speed_min <= c.speed_max);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let back: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(back, Difficulty::Easy);
    }
}
