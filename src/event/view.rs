//! Presentation descriptors for events and choices

use crate::config::{ChoiceConfig, ChoiceKind, EventConfig};
use crate::event::processor::choice_available;
use crate::property::{PlayerState, Stat};
use crate::skill::{combined_percentage, success_chance, SuccessChance};
use serde::Serialize;

/// What the render sink shows for one choice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceView {
    pub index: usize,
    pub text: String,
    pub enabled: bool,
    /// Checked stat, for skill-check choices
    pub stat: Option<Stat>,
    pub odds: Option<SuccessChance>,
    pub secondary_stat: Option<Stat>,
    pub secondary_odds: Option<SuccessChance>,
    /// Chance the whole check succeeds, in whole percent
    pub combined_percentage: Option<u32>,
}

/// What the render sink shows for an event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventView {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Empty for direct-effect events
    pub choices: Vec<ChoiceView>,
}

impl ChoiceView {
    pub fn new(index: usize, choice: &ChoiceConfig, state: &PlayerState) -> Self {
        let mut view = ChoiceView {
            index,
            text: choice.text.clone(),
            enabled: choice_available(choice, state),
            stat: None,
            odds: None,
            secondary_stat: None,
            secondary_odds: None,
            combined_percentage: None,
        };

        if let ChoiceKind::SkillCheck(check) = &choice.kind {
            let primary = success_chance(state.get(check.stat), check.difficulty);
            let secondary = check
                .secondary_stat
                .map(|stat| success_chance(state.get(stat), check.difficulty));

            view.stat = Some(check.stat);
            view.odds = Some(primary);
            view.secondary_stat = check.secondary_stat;
            view.secondary_odds = secondary;
            view.combined_percentage = Some(match secondary {
                Some(secondary) => combined_percentage(primary, secondary),
                None => primary.percentage,
            });
        }

        view
    }
}

impl EventView {
    pub fn new(event: &EventConfig, state: &PlayerState) -> Self {
        EventView {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            choices: event
                .choices()
                .iter()
                .enumerate()
                .map(|(index, choice)| ChoiceView::new(index, choice, state))
                .collect(),
        }
    }
}
