//! Player action table

use crate::config::event::StatEffects;
use crate::error::{LifeSimError, Result};
use crate::property::{LifeStage, PlayerState, Stat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Actions the player can take between turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Study,
    Work,
    Socialize,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Study, Action::Work, Action::Socialize];

    pub fn name(self) -> &'static str {
        match self {
            Action::Study => "study",
            Action::Work => "work",
            Action::Socialize => "socialize",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = LifeSimError;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LifeSimError::UnknownAction(s.to_string()))
    }
}

/// Money earned as `floor(base + smarts / smarts_divisor + charisma / charisma_divisor)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageFormula {
    pub base: i32,
    pub smarts_divisor: i32,
    pub charisma_divisor: i32,
}

impl WageFormula {
    /// `floor(base + smarts/sd + charisma/cd)`, exact
    pub fn pay(&self, state: &PlayerState) -> i32 {
        // Stats are bounded to [0, 100], so these products fit in i64
        let sd = i64::from(self.smarts_divisor.max(1));
        let cd = i64::from(self.charisma_divisor.max(1));
        let smarts = i64::from(state.get(Stat::Smarts));
        let charisma = i64::from(state.get(Stat::Charisma));

        let bonus = (smarts * cd + charisma * sd).div_euclid(sd * cd);
        self.base.saturating_add(bonus as i32)
    }
}

/// Effect table for one action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionConfig {
    /// Earliest stage allowed to take the action
    #[serde(default = "earliest_stage")]
    pub min_stage: LifeStage,
    #[serde(default)]
    pub effects: StatEffects,
    #[serde(default)]
    pub wage: Option<WageFormula>,
    #[serde(default)]
    pub result_text: Option<String>,
}

fn earliest_stage() -> LifeStage {
    LifeStage::Birth
}

impl ActionConfig {
    pub fn allowed_at(&self, stage: LifeStage) -> bool {
        stage >= self.min_stage
    }
}

/// Configured actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionTable {
    pub study: ActionConfig,
    pub work: ActionConfig,
    pub socialize: ActionConfig,
}

impl Default for ActionTable {
    fn default() -> Self {
        Self {
            study: ActionConfig {
                min_stage: LifeStage::Birth,
                effects: StatEffects::new()
                    .with(Stat::Smarts, 5)
                    .with(Stat::Happiness, -2),
                wage: None,
                result_text: Some("You hit the books. Study can be tiring!".to_string()),
            },
            work: ActionConfig {
                min_stage: LifeStage::Teenager,
                effects: StatEffects::new()
                    .with(Stat::Happiness, -5)
                    .with(Stat::Health, -2),
                wage: Some(WageFormula {
                    base: 5,
                    smarts_divisor: 10,
                    charisma_divisor: 10,
                }),
                result_text: Some("You put in a shift. Work can be draining!".to_string()),
            },
            socialize: ActionConfig {
                min_stage: LifeStage::Birth,
                effects: StatEffects::new()
                    .with(Stat::Charisma, 5)
                    .with(Stat::Happiness, 5),
                wage: None,
                result_text: Some("You spent time with friends. Socializing is fun!".to_string()),
            },
        }
    }
}

impl ActionTable {
    pub fn get(&self, action: Action) -> &ActionConfig {
        match action {
            Action::Study => &self.study,
            Action::Work => &self.work,
            Action::Socialize => &self.socialize,
        }
    }

    /// Actions allowed at `stage`, in declaration order
    pub fn available_at(&self, stage: LifeStage) -> Vec<Action> {
        Action::ALL
            .iter()
            .copied()
            .filter(|action| self.get(*action).allowed_at(stage))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        for action in Action::ALL {
            if let Some(wage) = self.get(action).wage {
                if wage.smarts_divisor <= 0 || wage.charisma_divisor <= 0 {
                    return Err(LifeSimError::DeserializationError(format!(
                        "{} wage divisors must be positive",
                        action
                    )));
                }
            }
        }
        Ok(())
    }
}
