//! Player state and bounded stat mutation

use crate::property::stage::LifeStage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound for bounded stats
pub const STAT_MIN: i32 = 0;
/// Upper bound for bounded stats
pub const STAT_MAX: i32 = 100;

/// Mutable player attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Happiness,
    Health,
    Smarts,
    Charisma,
    Money,
}

impl Stat {
    pub const ALL: [Stat; 5] = [
        Stat::Happiness,
        Stat::Health,
        Stat::Smarts,
        Stat::Charisma,
        Stat::Money,
    ];

    /// Lowercase name used in data files
    pub fn name(self) -> &'static str {
        match self {
            Stat::Happiness => "happiness",
            Stat::Health => "health",
            Stat::Smarts => "smarts",
            Stat::Charisma => "charisma",
            Stat::Money => "money",
        }
    }

    /// Short code used in condition expressions
    pub fn code(self) -> &'static str {
        match self {
            Stat::Happiness => "HAP",
            Stat::Health => "HLT",
            Stat::Smarts => "SMT",
            Stat::Charisma => "CHR",
            Stat::Money => "MNY",
        }
    }

    /// Money is the only unbounded stat
    #[inline]
    pub fn is_bounded(self) -> bool {
        !matches!(self, Stat::Money)
    }

    /// Look up a stat by data-file name or condition code
    pub fn from_name(name: &str) -> Option<Stat> {
        let name = name.trim();
        Stat::ALL
            .iter()
            .copied()
            .find(|stat| stat.name().eq_ignore_ascii_case(name) || stat.code() == name)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stat {
    type Err = crate::error::LifeSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::from_name(s).ok_or_else(|| crate::error::LifeSimError::UnknownStat(s.to_string()))
    }
}

/// Starting stat values for a new life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialStats {
    pub happiness: i32,
    pub health: i32,
    pub smarts: i32,
    pub charisma: i32,
    pub money: i32,
}

impl Default for InitialStats {
    fn default() -> Self {
        Self {
            happiness: 100,
            health: 100,
            smarts: 50,
            charisma: 50,
            money: 0,
        }
    }
}

/// Point-in-time copy of every player attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSnapshot {
    pub age: u32,
    pub life_stage: LifeStage,
    pub happiness: i32,
    pub health: i32,
    pub smarts: i32,
    pub charisma: i32,
    pub money: i32,
}

/// The player's state for one life
///
/// `life_stage` is always recomputed from `age`, and the four bounded
/// stats never leave `[STAT_MIN, STAT_MAX]`. Once the game is over every
/// mutator is a no-op until [`PlayerState::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    age: u32,
    life_stage: LifeStage,
    happiness: i32,
    health: i32,
    smarts: i32,
    charisma: i32,
    money: i32,
    is_game_over: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(&InitialStats::default())
    }
}

impl PlayerState {
    /// Create a newborn with the given starting stats
    pub fn new(initial: &InitialStats) -> Self {
        Self {
            age: 0,
            life_stage: LifeStage::Birth,
            happiness: clamp(initial.happiness),
            health: clamp(initial.health),
            smarts: clamp(initial.smarts),
            charisma: clamp(initial.charisma),
            money: initial.money,
            is_game_over: false,
        }
    }

    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }

    #[inline]
    pub fn life_stage(&self) -> LifeStage {
        self.life_stage
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    #[inline]
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Happiness => self.happiness,
            Stat::Health => self.health,
            Stat::Smarts => self.smarts,
            Stat::Charisma => self.charisma,
            Stat::Money => self.money,
        }
    }

    #[inline]
    fn slot(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Happiness => &mut self.happiness,
            Stat::Health => &mut self.health,
            Stat::Smarts => &mut self.smarts,
            Stat::Charisma => &mut self.charisma,
            Stat::Money => &mut self.money,
        }
    }

    /// Add `delta` to a stat, clamping bounded stats
    ///
    /// Returns `false` without touching anything once the game is over.
    pub fn change(&mut self, stat: Stat, delta: i32) -> bool {
        if self.is_game_over {
            tracing::debug!(%stat, delta, "ignoring stat change after game over");
            return false;
        }

        let slot = self.slot(stat);
        let next = slot.saturating_add(delta);
        *slot = if stat.is_bounded() { clamp(next) } else { next };
        true
    }

    /// Name-keyed variant of [`PlayerState::change`]; unknown names are logged and ignored
    pub fn change_named(&mut self, name: &str, delta: i32) -> bool {
        match Stat::from_name(name) {
            Some(stat) => self.change(stat, delta),
            None => {
                tracing::warn!(name, delta, "ignoring change to unknown stat");
                false
            }
        }
    }

    /// Overwrite a stat, clamping bounded stats
    pub fn set(&mut self, stat: Stat, value: i32) -> bool {
        if self.is_game_over {
            return false;
        }
        let slot = self.slot(stat);
        *slot = if stat.is_bounded() { clamp(value) } else { value };
        true
    }

    /// Jump to an age, recomputing the stage
    pub fn set_age(&mut self, age: u32) -> bool {
        if self.is_game_over {
            return false;
        }
        self.age = age;
        self.life_stage = LifeStage::classify(age);
        true
    }

    /// Advance one year; returns the new stage when it changed
    pub fn advance_age(&mut self) -> Option<LifeStage> {
        if self.is_game_over {
            return None;
        }
        self.age += 1;
        let stage = LifeStage::classify(self.age);
        if stage != self.life_stage {
            self.life_stage = stage;
            Some(stage)
        } else {
            None
        }
    }

    /// Freeze the state
    pub fn mark_game_over(&mut self) {
        self.is_game_over = true;
    }

    /// Reinitialize to birth defaults
    pub fn reset(&mut self, initial: &InitialStats) {
        *self = Self::new(initial);
    }

    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot {
            age: self.age,
            life_stage: self.life_stage,
            happiness: self.happiness,
            health: self.health,
            smarts: self.smarts,
            charisma: self.charisma,
            money: self.money,
        }
    }
}

#[inline(always)]
fn clamp(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}
