//! Configuration module for game data structures
//!
//! Events, actions, and rule tunables are plain serde types loaded from
//! JSON. Validation happens during deserialization, so a loaded config is
//! always well-formed.

mod action;
mod event;
mod game;

pub use action::*;
pub use event::*;
pub use game::*;

use crate::error::{LifeSimError, Result};

/// Deserialize an event list from JSON
/// Expected format: `[EventConfig, ...]` or `{"events": [EventConfig, ...]}`
pub fn deserialize_events(json: &str) -> Result<Vec<EventConfig>> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let list = match value {
        serde_json::Value::Array(items) => serde_json::Value::Array(items),
        serde_json::Value::Object(mut map) => map
            .remove("events")
            .ok_or_else(|| LifeSimError::DeserializationError("events not found".to_string()))?,
        _ => {
            return Err(LifeSimError::DeserializationError(
                "expected an event array or an object with \"events\"".to_string(),
            ))
        }
    };

    let events: Vec<EventConfig> = serde_json::from_value(list)?;

    for event in &events {
        let effect_sets = event_effect_sets(event);
        for effects in effect_sets {
            for name in effects.unknown_stats() {
                tracing::warn!(event = %event.id, stat = name, "event references unknown stat");
            }
        }
    }

    Ok(events)
}

/// Deserialize a game config from JSON
pub fn deserialize_game_config(json: &str) -> Result<GameConfig> {
    GameConfig::from_json(json)
}

fn event_effect_sets(event: &EventConfig) -> Vec<&StatEffects> {
    match &event.outcome {
        EventOutcome::Effects { effects, .. } => vec![effects],
        EventOutcome::Choices(choices) => choices
            .iter()
            .flat_map(|choice| match &choice.kind {
                ChoiceKind::Simple { effects, .. } => vec![effects],
                ChoiceKind::SkillCheck(check) => {
                    vec![&check.success_effects, &check.failure_effects]
                }
            })
            .collect(),
    }
}
