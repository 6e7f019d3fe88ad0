//! Abstract Syntax Tree for eligibility conditions

use crate::property::{LifeStage, Stat};

/// AST node for condition expressions
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Single condition like "SMT>=60"
    Single(SingleCondition),
    /// AND operation
    And(Box<AstNode>, Box<AstNode>),
    /// OR operation
    Or(Box<AstNode>, Box<AstNode>),
}

/// Single condition expression
#[derive(Debug, Clone, PartialEq)]
pub struct SingleCondition {
    pub property: Property,
    pub operator: Operator,
    pub value: ConditionValue,
}

/// Player attribute a condition reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// AGE
    Age,
    /// STG
    Stage,
    /// HAP, HLT, SMT, CHR, MNY
    Stat(Stat),
}

impl Property {
    pub fn from_code(code: &str) -> Option<Property> {
        match code {
            "AGE" => Some(Property::Age),
            "STG" => Some(Property::Stage),
            _ => Stat::ALL
                .iter()
                .copied()
                .find(|stat| stat.code() == code)
                .map(Property::Stat),
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Greater than (>)
    Greater,
    /// Less than (<)
    Less,
    /// Greater than or equal (>=)
    GreaterEqual,
    /// Less than or equal (<=)
    LessEqual,
    /// Equal (=)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Member of set (?)
    IncludesAny,
    /// Not a member of set (!)
    ExcludesAll,
}

/// Condition value types
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    Integer(i32),
    Float(f64),
    Array(Vec<i32>),
    Stages(Vec<LifeStage>),
}
