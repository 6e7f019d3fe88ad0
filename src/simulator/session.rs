//! Autoplay: run a whole life without a player
//!
//! A `ChoiceStrategy` stands in for the player at every pending event.
//! Given the same catalog, config, seed, and strategy the resulting
//! `LifeRecord` is identical.

use crate::config::GameConfig;
use crate::error::{LifeSimError, Result};
use crate::event::{EventCatalog, EventView};
use crate::simulator::ending::GameOverSummary;
use crate::simulator::engine::LifeGame;
use crate::simulator::log::LogEntry;
use crate::simulator::sink::NullSink;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// ============================================================================
// Choice strategies
// ============================================================================

/// How autoplay answers a pending event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceStrategy {
    /// First enabled choice
    #[default]
    First,
    /// Uniform among enabled choices
    Random,
    /// Highest combined success chance; plain choices count as 50%
    BestOdds,
}

/// Weight given to choices without a skill check
const PLAIN_CHOICE_ODDS: u32 = 50;

impl ChoiceStrategy {
    pub fn name(self) -> &'static str {
        match self {
            ChoiceStrategy::First => "first",
            ChoiceStrategy::Random => "random",
            ChoiceStrategy::BestOdds => "best_odds",
        }
    }

    /// Index of the choice to take, or `None` if nothing is enabled
    pub fn pick<R: Rng + ?Sized>(self, view: &EventView, rng: &mut R) -> Option<usize> {
        let mut enabled = view.choices.iter().filter(|choice| choice.enabled);
        match self {
            ChoiceStrategy::First => enabled.next().map(|choice| choice.index),
            ChoiceStrategy::Random => enabled.choose(rng).map(|choice| choice.index),
            // Ties keep the earliest choice
            ChoiceStrategy::BestOdds => enabled
                .fold(None, |best: Option<(usize, u32)>, choice| {
                    let odds = choice.combined_percentage.unwrap_or(PLAIN_CHOICE_ODDS);
                    match best {
                        Some((_, top)) if top >= odds => best,
                        _ => Some((choice.index, odds)),
                    }
                })
                .map(|(index, _)| index),
        }
    }
}

impl fmt::Display for ChoiceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChoiceStrategy {
    type Err = LifeSimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(ChoiceStrategy::First),
            "random" => Ok(ChoiceStrategy::Random),
            "best_odds" | "bestodds" | "best" => Ok(ChoiceStrategy::BestOdds),
            _ => Err(LifeSimError::DeserializationError(format!(
                "unknown choice strategy: {}",
                s
            ))),
        }
    }
}

// ============================================================================
// Life record
// ============================================================================

/// Complete trajectory of an autoplayed life
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeRecord {
    pub seed: u64,
    pub strategy: ChoiceStrategy,
    /// Number of `advance_time` calls
    pub turns: u32,
    /// Number of choices made
    pub decisions: u32,
    pub trajectory: Vec<LogEntry>,
    pub summary: GameOverSummary,
}

impl LifeRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================================================
// Simulation
// ============================================================================

/// Play one life to its end
///
/// Event rolls use a `ChaCha8Rng` seeded with `seed`; the `Random`
/// strategy draws from a second stream seeded with `seed + 1` so the
/// strategy never shifts the world's rolls.
pub fn simulate_life(
    catalog: Arc<EventCatalog>,
    config: Arc<GameConfig>,
    seed: u64,
    strategy: ChoiceStrategy,
) -> Result<LifeRecord> {
    config.validate()?;

    let mut game = LifeGame::seeded(config, catalog, NullSink, seed);
    let mut picker = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    let mut turns = 0u32;
    let mut decisions = 0u32;

    let summary = loop {
        if let Some(summary) = game.ending() {
            break summary.clone();
        }

        match game.pending_event() {
            Some(view) => {
                let index = strategy.pick(&view, &mut picker).ok_or_else(|| {
                    LifeSimError::ChoiceUnavailable {
                        event_id: view.id.clone(),
                        index: 0,
                    }
                })?;
                game.choose(&view.id, index)?;
                decisions += 1;
            }
            None => {
                game.advance_time()?;
                turns += 1;
            }
        }
    };

    tracing::debug!(seed, %strategy, turns, cause = %summary.cause, "life simulated");

    Ok(LifeRecord {
        seed,
        strategy,
        turns,
        decisions,
        trajectory: game.log().entries().to_vec(),
        summary,
    })
}

/// Built-in catalog with default rules
pub fn simulate_default(seed: u64, strategy: ChoiceStrategy) -> Result<LifeRecord> {
    simulate_life(
        EventCatalog::builtin(),
        Arc::new(GameConfig::default()),
        seed,
        strategy,
    )
}
