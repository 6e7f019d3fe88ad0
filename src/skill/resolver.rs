//! d20 skill checks

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Faces on the check die
pub const DIE_SIDES: i32 = 20;
/// Stat points per point of bonus
pub const STAT_PER_BONUS: i32 = 20;

/// Outcome of a single randomized check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRoll {
    pub roll: i32,
    pub bonus: i32,
    pub total: i32,
    pub success: bool,
}

/// Difficulty bucket shown next to a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuccessTier {
    Easy,
    Medium,
    Hard,
}

impl SuccessTier {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 75 {
            SuccessTier::Easy
        } else if percentage >= 40 {
            SuccessTier::Medium
        } else {
            SuccessTier::Hard
        }
    }
}

/// Displayed odds for a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessChance {
    pub percentage: u32,
    pub tier: SuccessTier,
}

/// Bonus added to the die for a stat value
#[inline]
pub fn stat_bonus(stat_value: i32) -> i32 {
    stat_value.div_euclid(STAT_PER_BONUS)
}

/// Lowest die face that still succeeds
#[inline]
pub fn required_roll(stat_value: i32, difficulty: i32) -> i32 {
    difficulty - stat_bonus(stat_value)
}

/// Count of die faces (out of 20) that succeed
#[inline]
pub fn winning_faces(stat_value: i32, difficulty: i32) -> i32 {
    let required = required_roll(stat_value, difficulty);
    if required <= 1 {
        DIE_SIDES
    } else if required > DIE_SIDES {
        0
    } else {
        DIE_SIDES - required + 1
    }
}

/// Roll a d20 plus stat bonus against `difficulty`
pub fn roll_check<R: Rng + ?Sized>(stat_value: i32, difficulty: i32, rng: &mut R) -> CheckRoll {
    let roll = rng.gen_range(1..=DIE_SIDES);
    let bonus = stat_bonus(stat_value);
    let total = roll + bonus;
    CheckRoll {
        roll,
        bonus,
        total,
        success: total >= difficulty,
    }
}

/// Exact success probability of [`roll_check`], rounded to a whole percent
pub fn success_chance(stat_value: i32, difficulty: i32) -> SuccessChance {
    let faces = winning_faces(stat_value, difficulty);
    let percentage = ((faces as f64 / DIE_SIDES as f64) * 100.0).round() as u32;
    SuccessChance {
        percentage,
        tier: SuccessTier::from_percentage(percentage),
    }
}

/// Probability that two independent checks both succeed, in whole percent
pub fn combined_percentage(primary: SuccessChance, secondary: SuccessChance) -> u32 {
    ((primary.percentage as f64 * secondary.percentage as f64) / 100.0).round() as u32
}
