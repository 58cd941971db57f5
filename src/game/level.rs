// Difficulty tiers and their operand ranges.
use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;

use crate::error::InvalidLevel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 1-based difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Level(u8);

impl Level {
    pub const FIRST: Level = Level(1);

    /// `None` for level 0.
    pub fn new(n: u8) -> Option<Level> {
        (n >= 1).then_some(Level(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn next(self) -> Level {
        Level(self.0.saturating_add(1))
    }

    /// Inclusive `[(level-1)*width+1, level*width]`.
    pub fn operand_range(self, width: u32) -> RangeInclusive<u32> {
        let lvl = self.0 as u32;
        let min = (lvl - 1) * width + 1;
        let max = lvl * width;
        min..=max
    }

    /// Class name the page body carries while this level is active.
    pub fn body_class(self) -> String {
        format!("level-{}", self.0)
    }

    /// Text for the level label region.
    pub fn label(self) -> String {
        format!("Level-{}", self.0)
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::FIRST
    }
}

impl TryFrom<u8> for Level {
    type Error = InvalidLevel;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Level::new(n).ok_or(InvalidLevel(n))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two independent uniform draws from the level's range.
pub fn draw_operands<R: Rng>(level: Level, width: u32, rng: &mut R) -> (u32, u32) {
    let range = level.operand_range(width);
    let first = rng.gen_range(range.clone());
    let second = rng.gen_range(range);
    (first, second)
}
