//! Game tuning knobs. Defaults reproduce the classic six-level game.

use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEVELS: u8 = 6;
pub const DEFAULT_RANGE_WIDTH: u32 = 6;
pub const DEFAULT_STARS_PER_LEVEL: u32 = 5;
pub const DEFAULT_STORAGE_KEY: &str = "maxLevel";
pub const DEFAULT_STAR_IMAGE: &str = "img/star.png";

/// Background per level, index 0 = level 1.
pub const DEFAULT_BACKGROUNDS: [&str; 6] = [
    "img/background.png",
    "loly.png",
    "dolphins.png",
    "unicorn.png",
    "rainbow.png",
    "planets.png",
];

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of levels; completing the last one wins the game.
    pub levels: u8,
    /// Width of every level's operand range.
    pub range_width: u32,
    /// Correct answers needed to leave a level.
    pub stars_per_level: u32,
    pub backgrounds: Vec<String>,
    pub star_image: String,
    /// localStorage key holding the highest level reached.
    pub storage_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS,
            range_width: DEFAULT_RANGE_WIDTH,
            stars_per_level: DEFAULT_STARS_PER_LEVEL,
            backgrounds: DEFAULT_BACKGROUNDS.iter().map(|s| s.to_string()).collect(),
            star_image: DEFAULT_STAR_IMAGE.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels == 0 {
            return Err(ConfigError::NoLevels);
        }
        if self.stars_per_level == 0 {
            return Err(ConfigError::NoStars);
        }
        if self.range_width == 0 {
            return Err(ConfigError::EmptyRange);
        }
        // Largest sum is two top-level operands: levels * width * 2.
        let max_sum = (self.levels as u32)
            .checked_mul(self.range_width)
            .and_then(|top| top.checked_mul(2));
        if max_sum.is_none() {
            return Err(ConfigError::RangeTooWide {
                levels: self.levels,
                width: self.range_width,
            });
        }
        if self.backgrounds.len() != self.levels as usize {
            return Err(ConfigError::BackgroundCount {
                expected: self.levels as usize,
                got: self.backgrounds.len(),
            });
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }

    /// Builder-style override used when the page provides its own star slots.
    pub fn with_stars_per_level(mut self, stars: u32) -> Self {
        self.stars_per_level = stars;
        self
    }

    /// Background image for a 1-based level; falls back to the first entry.
    pub fn background_for(&self, level: u8) -> &str {
        let idx = (level as usize).saturating_sub(1);
        self.backgrounds
            .get(idx)
            .or_else(|| self.backgrounds.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Parse and validate a JSON config; missing fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
