//! Event eligibility and selection

use crate::condition::cache::check_condition;
use crate::config::EventConfig;
use crate::event::catalog::EventCatalog;
use crate::event::processor::choice_available;
use crate::property::PlayerState;
use rand::seq::SliceRandom;
use rand::Rng;

/// Whether an event may fire for this state
///
/// A condition that fails to evaluate counts as not met.
pub fn is_eligible(event: &EventConfig, state: &PlayerState) -> bool {
    if let Some(ref exclude) = event.exclude {
        match check_condition(exclude, state) {
            Ok(true) => return false,
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(event = %event.id, %err, "bad exclude condition");
                return false;
            }
        }
    }

    if let Some(ref include) = event.include {
        match check_condition(include, state) {
            Ok(true) => {}
            Ok(false) => return false,
            Err(err) => {
                tracing::warn!(event = %event.id, %err, "bad include condition");
                return false;
            }
        }
    }

    // A choice event with every choice locked could never be resolved
    let choices = event.choices();
    choices.is_empty() || choices.iter().any(|choice| choice_available(choice, state))
}

/// Every event in the catalog currently eligible, in catalog order
pub fn eligible_events<'a>(catalog: &'a EventCatalog, state: &PlayerState) -> Vec<&'a EventConfig> {
    catalog
        .events()
        .iter()
        .filter(|event| is_eligible(event, state))
        .collect()
}

/// Uniform pick; `None` when nothing is eligible
#[inline]
pub fn select_event<'a, R: Rng + ?Sized>(
    eligible: &[&'a EventConfig],
    rng: &mut R,
) -> Option<&'a EventConfig> {
    eligible.choose(rng).copied()
}
