//! Property tests for event module
//!
//! Property 4: Selection only returns eligible events
//! Property 5: Uniform selection
//! Property 6: Outcomes keep stats bounded

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ChoiceKind, EventOutcome};
use crate::event::{
    apply_event_effects, eligible_events, is_eligible, resolve_choice, select_event, EventCatalog,
    EventView,
};
use crate::property::{PlayerState, Stat};

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

/// Generate a PlayerState for testing
fn player_state_strategy() -> impl Strategy<Value = PlayerState> {
    (
        0..=89u32,     // age
        1..=100i32,    // happiness
        1..=100i32,    // health
        0..=100i32,    // smarts
        0..=100i32,    // charisma
        -400..=400i32, // money
    )
        .prop_map(|(age, hap, hlt, smt, chr, mny)| {
            let mut state = PlayerState::default();
            state.set_age(age);
            state.set(Stat::Happiness, hap);
            state.set(Stat::Health, hlt);
            state.set(Stat::Smarts, smt);
            state.set(Stat::Charisma, chr);
            state.set(Stat::Money, mny);
            state
        })
}

fn three_way_catalog() -> EventCatalog {
    EventCatalog::from_json(
        r#"[
            {"id": "a", "title": "A", "include": "AGE<40", "effects": {}},
            {"id": "b", "title": "B", "exclude": "SMT>70", "effects": {}},
            {"id": "c", "title": "C", "include": "STG![Birth,Senior] | MNY>100", "effects": {}}
        ]"#,
    )
    .unwrap()
}

fn assert_bounded(state: &PlayerState) -> Result<(), TestCaseError> {
    for stat in [Stat::Happiness, Stat::Health, Stat::Smarts, Stat::Charisma] {
        let value = state.get(stat);
        prop_assert!((0..=100).contains(&value), "{} = {}", stat, value);
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property 4.1: Selected events are always eligible
    #[test]
    fn prop_selection_respects_eligibility(
        state in player_state_strategy(),
        seed in any::<u64>()
    ) {
        let catalog = EventCatalog::builtin();
        let eligible = eligible_events(&catalog, &state);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..20 {
            match select_event(&eligible, &mut rng) {
                Some(event) => prop_assert!(is_eligible(event, &state), "{} not eligible", event.id),
                None => prop_assert!(eligible.is_empty()),
            }
        }
    }

    /// Property 4.2: Eligibility agrees with the include/exclude expressions
    #[test]
    fn prop_eligibility_matches_conditions(state in player_state_strategy()) {
        let catalog = three_way_catalog();
        let eligible = eligible_events(&catalog, &state);
        let ids: Vec<&str> = eligible
            .iter()
            .map(|e| e.id.as_str())
            .collect();

        let stage = state.life_stage();
        let expect_a = state.age() < 40;
        let expect_b = state.get(Stat::Smarts) <= 70;
        let expect_c = !matches!(stage, crate::property::LifeStage::Birth | crate::property::LifeStage::Senior)
            || state.get(Stat::Money) > 100;

        prop_assert_eq!(ids.contains(&"a"), expect_a);
        prop_assert_eq!(ids.contains(&"b"), expect_b);
        prop_assert_eq!(ids.contains(&"c"), expect_c);
    }

    /// Property 6: Any built-in outcome leaves bounded stats in range
    #[test]
    fn prop_outcomes_keep_stats_bounded(
        state in player_state_strategy(),
        seed in any::<u64>()
    ) {
        let catalog = EventCatalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for event in catalog.events() {
            match &event.outcome {
                EventOutcome::Effects { .. } => {
                    let mut local = state.clone();
                    prop_assert!(apply_event_effects(event, &mut local).is_some());
                    assert_bounded(&local)?;
                }
                EventOutcome::Choices(choices) => {
                    for choice in choices {
                        let mut local = state.clone();
                        let resolution = resolve_choice(choice, &mut local, &mut rng);
                        assert_bounded(&local)?;
                        let is_check = matches!(choice.kind, ChoiceKind::SkillCheck(_));
                        prop_assert_eq!(resolution.success.is_some(), is_check);
                    }
                }
            }
        }
    }

    /// Property 6.2: Views never change state and list every choice
    #[test]
    fn prop_views_are_pure(state in player_state_strategy()) {
        let catalog = EventCatalog::builtin();
        for event in catalog.events() {
            let before = state.clone();
            let view = EventView::new(event, &state);
            prop_assert_eq!(&state, &before);
            prop_assert_eq!(view.choices.len(), event.choices().len());
        }
    }
}

/// Property 5: Uniform selection over a fixed eligible set
#[test]
fn test_uniform_selection_over_three() {
    let catalog = three_way_catalog();
    let mut state = PlayerState::default();
    state.set_age(20);
    let eligible = eligible_events(&catalog, &state);
    assert_eq!(eligible.len(), 3);

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut counts = [0u32; 3];
    let trials = 9000;
    for _ in 0..trials {
        let picked = select_event(&eligible, &mut rng).unwrap();
        let slot = match picked.id.as_str() {
            "a" => 0,
            "b" => 1,
            _ => 2,
        };
        counts[slot] += 1;
    }

    for count in counts {
        let share = count as f64 / trials as f64;
        assert!((share - 1.0 / 3.0).abs() < 0.03, "share {}", share);
    }
}
