//! Outcome application for events and choices

use crate::condition::cache::check_condition;
use crate::config::{ChoiceConfig, ChoiceKind, EventConfig, EventOutcome, SkillCheck, StatEffects};
use crate::property::{PlayerState, Stat};
use crate::skill::{roll_check, CheckRoll};
use rand::Rng;
use serde::Serialize;
use smallvec::SmallVec;

pub const DEFAULT_SUCCESS_TEXT: &str = "You succeeded!";
pub const DEFAULT_FAILURE_TEXT: &str = "You failed!";
const NOTHING_CHANGES: &str = "Nothing changes.";

/// Deltas that were actually applied, in application order
pub type AppliedEffects = SmallVec<[(Stat, i32); 5]>;

/// Result of resolving a choice or a direct-effect event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub message: String,
    /// `None` for outcomes without a check
    pub success: Option<bool>,
    pub primary_roll: Option<CheckRoll>,
    /// Present only when the primary check succeeded
    pub secondary_roll: Option<CheckRoll>,
    #[serde(skip)]
    pub applied: AppliedEffects,
}

/// Apply every known stat delta; unknown names are logged and skipped
pub fn apply_effects(state: &mut PlayerState, effects: &StatEffects) -> AppliedEffects {
    let mut applied = AppliedEffects::new();
    for (name, delta) in effects.iter() {
        match Stat::from_name(name) {
            Some(stat) => {
                if state.change(stat, delta) {
                    applied.push((stat, delta));
                }
            }
            None => {
                tracing::warn!(name, delta, "skipping effect on unknown stat");
            }
        }
    }
    applied
}

fn message_or_summary(text: &Option<String>, effects: &StatEffects) -> String {
    match text {
        Some(text) => text.clone(),
        None if effects.is_noop() => NOTHING_CHANGES.to_string(),
        None => effects.describe(),
    }
}

/// Whether the player may pick this choice now
pub fn choice_available(choice: &ChoiceConfig, state: &PlayerState) -> bool {
    match choice.requires {
        Some(ref requires) => check_condition(requires, state).unwrap_or(false),
        None => true,
    }
}

/// Apply a direct-effect event; `None` for choice events
pub fn apply_event_effects(event: &EventConfig, state: &mut PlayerState) -> Option<Resolution> {
    match &event.outcome {
        EventOutcome::Effects {
            effects,
            result_text,
        } => Some(Resolution {
            message: message_or_summary(result_text, effects),
            success: None,
            primary_roll: None,
            secondary_roll: None,
            applied: apply_effects(state, effects),
        }),
        EventOutcome::Choices(_) => None,
    }
}

/// Resolve the chosen option against the state
pub fn resolve_choice<R: Rng + ?Sized>(
    choice: &ChoiceConfig,
    state: &mut PlayerState,
    rng: &mut R,
) -> Resolution {
    match &choice.kind {
        ChoiceKind::Simple {
            effects,
            result_text,
        } => Resolution {
            message: message_or_summary(result_text, effects),
            success: None,
            primary_roll: None,
            secondary_roll: None,
            applied: apply_effects(state, effects),
        },
        ChoiceKind::SkillCheck(check) => resolve_skill_check(check, state, rng),
    }
}

/// Primary check, then the secondary check (same difficulty) only on success
///
/// A failed secondary check resolves exactly like a failed primary.
pub fn resolve_skill_check<R: Rng + ?Sized>(
    check: &SkillCheck,
    state: &mut PlayerState,
    rng: &mut R,
) -> Resolution {
    let primary = roll_check(state.get(check.stat), check.difficulty, rng);

    let secondary = match check.secondary_stat {
        Some(stat) if primary.success => Some(roll_check(state.get(stat), check.difficulty, rng)),
        _ => None,
    };

    let success = primary.success && secondary.map_or(true, |roll| roll.success);

    tracing::debug!(
        stat = %check.stat,
        difficulty = check.difficulty,
        roll = primary.roll,
        bonus = primary.bonus,
        secondary = ?secondary.map(|r| r.total),
        success,
        "skill check"
    );

    let (effects, text, fallback) = if success {
        (&check.success_effects, &check.success_text, DEFAULT_SUCCESS_TEXT)
    } else {
        (&check.failure_effects, &check.failure_text, DEFAULT_FAILURE_TEXT)
    };

    Resolution {
        message: text.clone().unwrap_or_else(|| fallback.to_string()),
        success: Some(success),
        primary_roll: Some(primary),
        secondary_roll: secondary,
        applied: apply_effects(state, effects),
    }
}
