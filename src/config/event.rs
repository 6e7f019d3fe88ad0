//! Event configuration structures

use crate::condition::parser;
use crate::error::LifeSimError;
use crate::property::Stat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Highest difficulty accepted for a skill check
pub const MAX_DIFFICULTY: i32 = 40;

/// Stat name → delta
///
/// Names are kept as written; unknown names are logged and skipped when
/// the effects are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatEffects(BTreeMap<String, i32>);

impl StatEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, stat: Stat, delta: i32) -> Self {
        self.0.insert(stat.name().to_string(), delta);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when applying these effects would change no stat
    pub fn is_noop(&self) -> bool {
        self.iter()
            .all(|(name, delta)| delta == 0 || Stat::from_name(name).is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(name, delta)| (name.as_str(), *delta))
    }

    /// Names that are not stats
    pub fn unknown_stats(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|name| Stat::from_name(name).is_none())
    }

    /// Human-readable summary, e.g. "Happiness +10, Money -5"
    pub fn describe(&self) -> String {
        self.iter()
            .filter(|(name, delta)| *delta != 0 && Stat::from_name(name).is_some())
            .map(|(name, delta)| {
                let mut label = name.to_string();
                if let Some(first) = label.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                format!("{} {:+}", label, delta)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// What happens when an event fires
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Applied immediately, no player input
    Effects {
        effects: StatEffects,
        result_text: Option<String>,
    },
    /// Presented to the player; one must be chosen
    Choices(Vec<ChoiceConfig>),
}

/// Event configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEvent")]
pub struct EventConfig {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Eligible only while this holds
    pub include: Option<String>,
    /// Never eligible while this holds
    pub exclude: Option<String>,
    pub outcome: EventOutcome,
}

impl EventConfig {
    pub fn choices(&self) -> &[ChoiceConfig] {
        match &self.outcome {
            EventOutcome::Choices(choices) => choices,
            EventOutcome::Effects { .. } => &[],
        }
    }
}

/// Choice resolution
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceKind {
    Simple {
        effects: StatEffects,
        result_text: Option<String>,
    },
    SkillCheck(SkillCheck),
}

/// d20 check against one stat, optionally a second one
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCheck {
    pub stat: Stat,
    pub secondary_stat: Option<Stat>,
    pub difficulty: i32,
    pub success_effects: StatEffects,
    pub failure_effects: StatEffects,
    pub success_text: Option<String>,
    pub failure_text: Option<String>,
}

/// One option of a choice event
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawChoice")]
pub struct ChoiceConfig {
    pub text: String,
    /// Selectable only while this holds
    pub requires: Option<String>,
    pub kind: ChoiceKind,
}

// ============================================================================
// Raw data-file shapes
// ============================================================================

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEvent {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    include: Option<String>,
    exclude: Option<String>,
    effects: Option<StatEffects>,
    result_text: Option<String>,
    choices: Option<Vec<ChoiceConfig>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChoice {
    text: String,
    requires: Option<String>,
    effects: Option<StatEffects>,
    result_text: Option<String>,
    stat_check: Option<String>,
    secondary_stat_check: Option<String>,
    difficulty: Option<i32>,
    success_effects: Option<StatEffects>,
    failure_effects: Option<StatEffects>,
    success_text: Option<String>,
    failure_text: Option<String>,
}

fn validate_condition(owner: &str, condition: &Option<String>) -> Result<(), LifeSimError> {
    match condition {
        Some(cond) if !cond.trim().is_empty() => parser::parse(cond).map(|_| ()).map_err(|e| {
            LifeSimError::InvalidCondition(format!("{} ({})", e, owner))
        }),
        _ => Ok(()),
    }
}

fn parse_check_stat(text: &str, name: &str) -> Result<Stat, LifeSimError> {
    Stat::from_name(name).ok_or_else(|| {
        LifeSimError::InvalidEvent(format!("choice {:?} checks unknown stat {:?}", text, name))
    })
}

impl TryFrom<RawChoice> for ChoiceConfig {
    type Error = LifeSimError;

    fn try_from(raw: RawChoice) -> Result<Self, Self::Error> {
        validate_condition(&raw.text, &raw.requires)?;

        let kind = match raw.stat_check {
            Some(stat_name) => {
                if raw.effects.is_some() || raw.result_text.is_some() {
                    return Err(LifeSimError::InvalidEvent(format!(
                        "choice {:?} mixes direct effects with a skill check",
                        raw.text
                    )));
                }
                let difficulty = raw.difficulty.ok_or_else(|| {
                    LifeSimError::InvalidEvent(format!("choice {:?} has no difficulty", raw.text))
                })?;
                if !(1..=MAX_DIFFICULTY).contains(&difficulty) {
                    return Err(LifeSimError::InvalidEvent(format!(
                        "choice {:?} difficulty {} outside 1..={}",
                        raw.text, difficulty, MAX_DIFFICULTY
                    )));
                }
                ChoiceKind::SkillCheck(SkillCheck {
                    stat: parse_check_stat(&raw.text, &stat_name)?,
                    secondary_stat: raw
                        .secondary_stat_check
                        .as_deref()
                        .map(|name| parse_check_stat(&raw.text, name))
                        .transpose()?,
                    difficulty,
                    success_effects: raw.success_effects.unwrap_or_default(),
                    failure_effects: raw.failure_effects.unwrap_or_default(),
                    success_text: raw.success_text,
                    failure_text: raw.failure_text,
                })
            }
            None => {
                let has_check_fields = raw.secondary_stat_check.is_some()
                    || raw.difficulty.is_some()
                    || raw.success_effects.is_some()
                    || raw.failure_effects.is_some()
                    || raw.success_text.is_some()
                    || raw.failure_text.is_some();
                if has_check_fields {
                    return Err(LifeSimError::InvalidEvent(format!(
                        "choice {:?} has skill-check fields but no stat_check",
                        raw.text
                    )));
                }
                ChoiceKind::Simple {
                    effects: raw.effects.unwrap_or_default(),
                    result_text: raw.result_text,
                }
            }
        };

        Ok(ChoiceConfig {
            text: raw.text,
            requires: raw.requires,
            kind,
        })
    }
}

impl TryFrom<RawEvent> for EventConfig {
    type Error = LifeSimError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        validate_condition(&raw.id, &raw.include)?;
        validate_condition(&raw.id, &raw.exclude)?;

        let outcome = match (raw.effects, raw.choices) {
            (Some(effects), None) => EventOutcome::Effects {
                effects,
                result_text: raw.result_text,
            },
            (None, Some(choices)) => {
                if choices.is_empty() {
                    return Err(LifeSimError::InvalidEvent(format!(
                        "event {} has an empty choice list",
                        raw.id
                    )));
                }
                if raw.result_text.is_some() {
                    return Err(LifeSimError::InvalidEvent(format!(
                        "event {} has result_text but resolves through choices",
                        raw.id
                    )));
                }
                EventOutcome::Choices(choices)
            }
            (Some(_), Some(_)) => {
                return Err(LifeSimError::InvalidEvent(format!(
                    "event {} has both effects and choices",
                    raw.id
                )))
            }
            (None, None) => {
                return Err(LifeSimError::InvalidEvent(format!(
                    "event {} has neither effects nor choices",
                    raw.id
                )))
            }
        };

        Ok(EventConfig {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            include: raw.include,
            exclude: raw.exclude,
            outcome,
        })
    }
}
