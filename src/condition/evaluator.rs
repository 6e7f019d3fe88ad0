//! Condition evaluator

use crate::condition::ast::{AstNode, ConditionValue, Operator, Property, SingleCondition};
use crate::property::PlayerState;

/// Evaluate an AST against a PlayerState
pub fn check(ast: &AstNode, state: &PlayerState) -> bool {
    match ast {
        AstNode::Single(cond) => check_single(cond, state),
        AstNode::And(left, right) => check(left, state) && check(right, state),
        AstNode::Or(left, right) => check(left, state) || check(right, state),
    }
}

/// Current value of a property; stages read as their chronological ordinal
#[inline]
pub fn read_property(property: Property, state: &PlayerState) -> i32 {
    match property {
        Property::Age => i32::try_from(state.age()).unwrap_or(i32::MAX),
        Property::Stage => state.life_stage().ordinal(),
        Property::Stat(stat) => state.get(stat),
    }
}

fn compare<T: PartialOrd>(lhs: T, operator: Operator, rhs: T) -> bool {
    match operator {
        Operator::Greater => lhs > rhs,
        Operator::Less => lhs < rhs,
        Operator::GreaterEqual => lhs >= rhs,
        Operator::LessEqual => lhs <= rhs,
        Operator::Equal => lhs == rhs,
        Operator::NotEqual => lhs != rhs,
        Operator::IncludesAny | Operator::ExcludesAll => false,
    }
}

fn check_single(cond: &SingleCondition, state: &PlayerState) -> bool {
    let pv = read_property(cond.property, state);

    match (&cond.value, cond.operator) {
        (ConditionValue::Integer(cv), op) => compare(pv, op, *cv),
        (ConditionValue::Float(cv), op) => compare(pv as f64, op, *cv),

        (ConditionValue::Array(arr), Operator::IncludesAny) => arr.contains(&pv),
        (ConditionValue::Array(arr), Operator::ExcludesAll) => !arr.contains(&pv),

        (ConditionValue::Stages(stages), Operator::IncludesAny) => {
            stages.iter().any(|s| s.ordinal() == pv)
        }
        (ConditionValue::Stages(stages), Operator::ExcludesAll) => {
            stages.iter().all(|s| s.ordinal() != pv)
        }
        (ConditionValue::Stages(stages), op) => match stages.as_slice() {
            [stage] => compare(pv, op, stage.ordinal()),
            _ => false,
        },

        // Default: false for unsupported combinations
        _ => false,
    }
}
