//! Skill-check resolution
//!
//! `roll_check` and `success_chance` share one bonus/threshold formula, so
//! the odds shown to the player are the odds the dice actually produce.

mod resolver;


pub use resolver::*;
