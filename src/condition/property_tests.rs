//! Property tests for condition module
//!
//! Property 1: Condition parsing accepts every well-formed expression
//! Property 2: Evaluation agrees with direct comparison
//! Property 3: AND / OR follow boolean semantics

use proptest::prelude::*;

use crate::condition::ast::{AstNode, ConditionValue, Operator};
use crate::condition::cache::check_condition;
use crate::condition::evaluator::check;
use crate::condition::parser::parse;
use crate::property::{LifeStage, PlayerState, Stat};

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

/// Generate valid numeric property codes
fn property_code_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("AGE"),
        Just("HAP"),
        Just("HLT"),
        Just("SMT"),
        Just("CHR"),
        Just("MNY"),
    ]
}

/// Generate comparison operators
fn comparison_operator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(">"),
        Just("<"),
        Just(">="),
        Just("<="),
        Just("="),
        Just("!="),
    ]
}

fn stage_strategy() -> impl Strategy<Value = LifeStage> {
    prop::sample::select(LifeStage::ALL.to_vec())
}

/// Generate a simple condition string
fn simple_condition_strategy() -> impl Strategy<Value = String> {
    (property_code_strategy(), comparison_operator_strategy(), -100..=100i32)
        .prop_map(|(prop, op, val)| format!("{}{}{}", prop, op, val))
}

/// Generate a PlayerState
fn player_state_strategy() -> impl Strategy<Value = PlayerState> {
    (
        0..=95u32,     // age
        0..=100i32,    // happiness
        0..=100i32,    // health
        0..=100i32,    // smarts
        0..=100i32,    // charisma
        -600..=600i32, // money
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

fn read(code: &str, state: &PlayerState) -> i32 {
    match code {
        "AGE" => state.age() as i32,
        other => state.get(Stat::from_name(other).unwrap()),
    }
}

fn direct_compare(lhs: i32, op: &str, rhs: i32) -> bool {
    match op {
        ">" => lhs > rhs,
        "<" => lhs < rhs,
        ">=" => lhs >= rhs,
        "<=" => lhs <= rhs,
        "=" => lhs == rhs,
        _ => lhs != rhs,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property 1.1: Every generated simple condition parses to a Single node
    #[test]
    fn prop_simple_conditions_parse(cond in simple_condition_strategy()) {
        let ast = parse(&cond);
        prop_assert!(ast.is_ok(), "Failed to parse {}: {:?}", cond, ast);
        prop_assert!(matches!(ast.unwrap(), AstNode::Single(_)));
    }

    /// Property 1.2: Stage sets parse with every stage preserved in order
    #[test]
    fn prop_stage_sets_parse(stages in prop::collection::vec(stage_strategy(), 1..=4)) {
        let names: Vec<&str> = stages.iter().map(|s| s.name()).collect();
        let cond = format!("STG?[{}]", names.join(","));
        match parse(&cond).unwrap() {
            AstNode::Single(single) => {
                prop_assert_eq!(single.operator, Operator::IncludesAny);
                prop_assert_eq!(single.value, ConditionValue::Stages(stages));
            }
            other => prop_assert!(false, "Expected single node, got {:?}", other),
        }
    }

    /// Property 2.1: Evaluation matches a direct comparison
    #[test]
    fn prop_evaluation_matches_direct_compare(
        code in property_code_strategy(),
        op in comparison_operator_strategy(),
        value in -100..=100i32,
        state in player_state_strategy()
    ) {
        let cond = format!("{}{}{}", code, op, value);
        let expected = direct_compare(read(code, &state), op, value);
        prop_assert_eq!(check(&parse(&cond).unwrap(), &state), expected, "{}", cond);
    }

    /// Property 2.2: Stage membership matches the classified stage
    #[test]
    fn prop_stage_membership(
        stages in prop::collection::vec(stage_strategy(), 1..=4),
        state in player_state_strategy()
    ) {
        let names: Vec<&str> = stages.iter().map(|s| s.name()).collect();
        let included = format!("STG?[{}]", names.join(","));
        let excluded = format!("STG![{}]", names.join(","));
        let member = stages.contains(&state.life_stage());

        prop_assert_eq!(check_condition(&included, &state).unwrap(), member);
        prop_assert_eq!(check_condition(&excluded, &state).unwrap(), !member);
    }

    /// Property 3: AND / OR combine like boolean operators
    #[test]
    fn prop_boolean_composition(
        a in simple_condition_strategy(),
        b in simple_condition_strategy(),
        state in player_state_strategy()
    ) {
        let left = check(&parse(&a).unwrap(), &state);
        let right = check(&parse(&b).unwrap(), &state);

        let and = check(&parse(&format!("{} & {}", a, b)).unwrap(), &state);
        let or = check(&parse(&format!("({}) | ({})", a, b)).unwrap(), &state);

        prop_assert_eq!(and, left && right);
        prop_assert_eq!(or, left || right);
    }
}
