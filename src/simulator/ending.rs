//! Terminal conditions

use crate::config::EndingConfig;
use crate::property::{PlayerState, Stat, StatSnapshot};
use serde::Serialize;
use std::fmt;

/// Why a life ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndCause {
    NaturalLifespan,
    HealthFailure,
    Despair,
    Bankruptcy,
}

impl EndCause {
    pub fn message(self) -> &'static str {
        match self {
            EndCause::NaturalLifespan => "You lived a full life and passed away peacefully.",
            EndCause::HealthFailure => "Your health has dwindled to nothing.",
            EndCause::Despair => {
                "Life became too overwhelming, and your happiness reached rock bottom."
            }
            EndCause::Bankruptcy => "Your debts caught up with you. You are bankrupt.",
        }
    }
}

impl fmt::Display for EndCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EndCause::NaturalLifespan => "natural lifespan",
            EndCause::HealthFailure => "health failure",
            EndCause::Despair => "despair",
            EndCause::Bankruptcy => "bankruptcy",
        };
        f.write_str(name)
    }
}

/// First matching terminal cause, in precedence order
pub fn evaluate(state: &PlayerState, endings: &EndingConfig) -> Option<EndCause> {
    if state.age() >= endings.lifespan {
        Some(EndCause::NaturalLifespan)
    } else if state.get(Stat::Health) <= 0 {
        Some(EndCause::HealthFailure)
    } else if state.get(Stat::Happiness) <= 0 {
        Some(EndCause::Despair)
    } else if state.get(Stat::Money) <= endings.bankruptcy_threshold {
        Some(EndCause::Bankruptcy)
    } else {
        None
    }
}

/// Terminal summary handed to the render sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverSummary {
    pub cause: EndCause,
    pub message: String,
    pub years_lived: u32,
    pub final_stats: StatSnapshot,
}

impl GameOverSummary {
    pub fn new(cause: EndCause, state: &PlayerState) -> Self {
        Self {
            cause,
            message: format!(
                "{} Game Over! You lived for {} years.",
                cause.message(),
                state.age()
            ),
            years_lived: state.age(),
            final_stats: state.snapshot(),
        }
    }
}
