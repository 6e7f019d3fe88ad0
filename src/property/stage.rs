//! Life stages derived from age

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named life phase, derived purely from age
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LifeStage {
    Birth,
    Infancy,
    Childhood,
    Teenager,
    YoungAdult,
    Adult,
    MiddleAge,
    Senior,
}

impl LifeStage {
    /// All stages in chronological order
    pub const ALL: [LifeStage; 8] = [
        LifeStage::Birth,
        LifeStage::Infancy,
        LifeStage::Childhood,
        LifeStage::Teenager,
        LifeStage::YoungAdult,
        LifeStage::Adult,
        LifeStage::MiddleAge,
        LifeStage::Senior,
    ];

    /// Classify an age into its life stage
    #[inline]
    pub fn classify(age: u32) -> LifeStage {
        match age {
            0 => LifeStage::Birth,
            1..=4 => LifeStage::Infancy,
            5..=12 => LifeStage::Childhood,
            13..=17 => LifeStage::Teenager,
            18..=29 => LifeStage::YoungAdult,
            30..=59 => LifeStage::Adult,
            60..=79 => LifeStage::MiddleAge,
            _ => LifeStage::Senior,
        }
    }

    /// Chronological index, used by the condition evaluator
    #[inline]
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            LifeStage::Birth => "Birth",
            LifeStage::Infancy => "Infancy",
            LifeStage::Childhood => "Childhood",
            LifeStage::Teenager => "Teenager",
            LifeStage::YoungAdult => "YoungAdult",
            LifeStage::Adult => "Adult",
            LifeStage::MiddleAge => "MiddleAge",
            LifeStage::Senior => "Senior",
        }
    }
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LifeStage {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifeStage::ALL
            .iter()
            .copied()
            .find(|stage| stage.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Classify an age into its life stage
#[inline]
pub fn classify(age: u32) -> LifeStage {
    LifeStage::classify(age)
}
