//! Condition string parser

use crate::condition::ast::{AstNode, ConditionValue, Operator, Property, SingleCondition};
use crate::error::{LifeSimError, Result};
use crate::property::LifeStage;
use once_cell::sync::Lazy;
use regex::Regex;

/// `PROP OP VALUE`; two-character operators are listed first so they win
static SINGLE_CONDITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z]+)\s*(>=|<=|!=|>|<|=|\?|!)\s*(.+)$").expect("valid condition regex")
});

/// Parse a condition string into an AST
pub fn parse(condition: &str) -> Result<AstNode> {
    let condition = condition.trim();
    if condition.is_empty() {
        return Err(LifeSimError::InvalidCondition(
            "Empty condition".to_string(),
        ));
    }

    let tokens = tokenize(condition)?;
    parse_tokens(&tokens)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Condition(String),
    And,
    Or,
    OpenParen,
    CloseParen,
}

fn flush(current: &mut String, tokens: &mut Vec<Token>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        tokens.push(Token::Condition(trimmed.to_string()));
    }
    current.clear();
}

fn tokenize(condition: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut paren_depth = 0i32;
    let mut bracket_depth = 0i32;

    for c in condition.chars() {
        match c {
            '[' => {
                bracket_depth += 1;
                current.push(c);
            }
            ']' => {
                bracket_depth -= 1;
                current.push(c);
            }
            '(' if bracket_depth == 0 => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::OpenParen);
                paren_depth += 1;
            }
            ')' if bracket_depth == 0 => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::CloseParen);
                paren_depth -= 1;
                if paren_depth < 0 {
                    return Err(LifeSimError::InvalidCondition(
                        "Unbalanced parentheses".to_string(),
                    ));
                }
            }
            '&' if bracket_depth == 0 => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::And);
            }
            '|' if bracket_depth == 0 => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::Or);
            }
            _ => current.push(c),
        }
    }

    flush(&mut current, &mut tokens);

    if paren_depth != 0 {
        return Err(LifeSimError::InvalidCondition(
            "Unbalanced parentheses".to_string(),
        ));
    }
    if bracket_depth != 0 {
        return Err(LifeSimError::InvalidCondition(
            "Unbalanced brackets".to_string(),
        ));
    }

    Ok(tokens)
}

/// True when tokens[0] is an open paren whose match is the last token
fn wrapped_in_parens(tokens: &[Token]) -> bool {
    if tokens.len() < 2 || tokens[0] != Token::OpenParen {
        return false;
    }
    let mut depth = 0;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::OpenParen => depth += 1,
            Token::CloseParen => {
                depth -= 1;
                if depth == 0 {
                    return i == tokens.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

fn parse_tokens(tokens: &[Token]) -> Result<AstNode> {
    if tokens.is_empty() {
        return Err(LifeSimError::InvalidCondition(
            "Empty token list".to_string(),
        ));
    }

    // Find the lowest precedence operator (OR has lower precedence than AND)
    let mut paren_depth = 0;
    let mut or_pos = None;
    let mut and_pos = None;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::OpenParen => paren_depth += 1,
            Token::CloseParen => paren_depth -= 1,
            Token::Or if paren_depth == 0 => or_pos = Some(i),
            Token::And if paren_depth == 0 && or_pos.is_none() => and_pos = Some(i),
            _ => {}
        }
    }

    // Handle OR (lowest precedence)
    if let Some(pos) = or_pos {
        let left = parse_tokens(&tokens[..pos])?;
        let right = parse_tokens(&tokens[pos + 1..])?;
        return Ok(AstNode::Or(Box::new(left), Box::new(right)));
    }

    // Handle AND
    if let Some(pos) = and_pos {
        let left = parse_tokens(&tokens[..pos])?;
        let right = parse_tokens(&tokens[pos + 1..])?;
        return Ok(AstNode::And(Box::new(left), Box::new(right)));
    }

    if wrapped_in_parens(tokens) {
        return parse_tokens(&tokens[1..tokens.len() - 1]);
    }

    if let [Token::Condition(cond)] = tokens {
        return parse_single_condition(cond);
    }

    Err(LifeSimError::InvalidCondition(format!(
        "Cannot parse tokens: {:?}",
        tokens
    )))
}

fn parse_single_condition(condition: &str) -> Result<AstNode> {
    let captures = SINGLE_CONDITION.captures(condition).ok_or_else(|| {
        LifeSimError::InvalidCondition(format!("No operator found in: {}", condition))
    })?;

    let code = &captures[1];
    let property = Property::from_code(code)
        .ok_or_else(|| LifeSimError::InvalidCondition(format!("Unknown property: {}", code)))?;

    let operator = match &captures[2] {
        ">" => Operator::Greater,
        "<" => Operator::Less,
        ">=" => Operator::GreaterEqual,
        "<=" => Operator::LessEqual,
        "=" => Operator::Equal,
        "!=" => Operator::NotEqual,
        "?" => Operator::IncludesAny,
        _ => Operator::ExcludesAll,
    };

    let value = match property {
        Property::Stage => parse_stage_value(&captures[3])?,
        _ => parse_value(&captures[3])?,
    };

    let is_set_op = matches!(operator, Operator::IncludesAny | Operator::ExcludesAll);
    let is_set_value = matches!(value, ConditionValue::Array(_))
        || matches!(&value, ConditionValue::Stages(s) if s.len() > 1 || captures[3].trim().starts_with('['));
    if is_set_op != is_set_value {
        return Err(LifeSimError::InvalidCondition(format!(
            "Operator does not fit value in: {}",
            condition
        )));
    }

    Ok(AstNode::Single(SingleCondition {
        property,
        operator,
        value,
    }))
}

fn array_items(value_str: &str) -> Option<impl Iterator<Item = &str>> {
    let inner = value_str.strip_prefix('[')?.strip_suffix(']')?;
    Some(inner.split(',').map(str::trim))
}

fn parse_value(value_str: &str) -> Result<ConditionValue> {
    let value_str = value_str.trim();

    if let Some(items) = array_items(value_str) {
        let values: std::result::Result<Vec<i32>, _> = items.map(str::parse::<i32>).collect();
        return values.map(ConditionValue::Array).map_err(|_| {
            LifeSimError::InvalidCondition(format!("Invalid array: {}", value_str))
        });
    }

    if let Ok(i) = value_str.parse::<i32>() {
        return Ok(ConditionValue::Integer(i));
    }

    if let Ok(f) = value_str.parse::<f64>() {
        return Ok(ConditionValue::Float(f));
    }

    Err(LifeSimError::InvalidCondition(format!(
        "Invalid value: {}",
        value_str
    )))
}

fn parse_stage_value(value_str: &str) -> Result<ConditionValue> {
    let value_str = value_str.trim();
    let parse_one = |name: &str| {
        name.parse::<LifeStage>()
            .map_err(|_| LifeSimError::InvalidCondition(format!("Unknown stage: {}", name)))
    };

    let stages = match array_items(value_str) {
        Some(items) => items.map(parse_one).collect::<Result<Vec<_>>>()?,
        None => vec![parse_one(value_str)?],
    };
    Ok(ConditionValue::Stages(stages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Stat;

    #[test]
    fn test_parse_simple_condition() {
        let ast = parse("CHR>5").unwrap();
        match ast {
            AstNode::Single(cond) => {
                assert_eq!(cond.property, Property::Stat(Stat::Charisma));
                assert_eq!(cond.operator, Operator::Greater);
                assert_eq!(cond.value, ConditionValue::Integer(5));
            }
            _ => panic!("Expected single condition"),
        }
    }

    #[test]
    fn test_parse_with_spaces_around_operator() {
        let ast = parse("AGE >= 18").unwrap();
        assert_eq!(
            ast,
            AstNode::Single(SingleCondition {
                property: Property::Age,
                operator: Operator::GreaterEqual,
                value: ConditionValue::Integer(18),
            })
        );
    }

    #[test]
    fn test_parse_and_condition() {
        let ast = parse("AGE>=13 & AGE<=17").unwrap();
        match ast {
            AstNode::And(_, _) => {}
            _ => panic!("Expected AND condition"),
        }
    }

    #[test]
    fn test_parse_or_condition() {
        let ast = parse("SMT>60 | CHR>60").unwrap();
        match ast {
            AstNode::Or(_, _) => {}
            _ => panic!("Expected OR condition"),
        }
    }

    #[test]
    fn test_parse_stage_set() {
        let ast = parse("STG?[Teenager, YoungAdult]").unwrap();
        match ast {
            AstNode::Single(cond) => {
                assert_eq!(cond.property, Property::Stage);
                assert_eq!(cond.operator, Operator::IncludesAny);
                assert_eq!(
                    cond.value,
                    ConditionValue::Stages(vec![LifeStage::Teenager, LifeStage::YoungAdult])
                );
            }
            _ => panic!("Expected single condition"),
        }
    }

    #[test]
    fn test_parse_single_stage() {
        let ast = parse("STG>=Adult").unwrap();
        match ast {
            AstNode::Single(cond) => {
                assert_eq!(cond.operator, Operator::GreaterEqual);
                assert_eq!(cond.value, ConditionValue::Stages(vec![LifeStage::Adult]));
            }
            _ => panic!("Expected single condition"),
        }
    }

    #[test]
    fn test_parse_all_operators() {
        let operators = [
            ("HAP>5", Operator::Greater),
            ("HAP<5", Operator::Less),
            ("HAP>=5", Operator::GreaterEqual),
            ("HAP<=5", Operator::LessEqual),
            ("HAP=5", Operator::Equal),
            ("HAP!=5", Operator::NotEqual),
            ("AGE?[1]", Operator::IncludesAny),
            ("AGE![1]", Operator::ExcludesAll),
        ];

        for (cond_str, expected_op) in operators {
            let ast = parse(cond_str).unwrap();
            match ast {
                AstNode::Single(cond) => {
                    assert_eq!(cond.operator, expected_op, "Failed for: {}", cond_str);
                }
                _ => panic!("Expected single condition for: {}", cond_str),
            }
        }
    }

    #[test]
    fn test_parse_nested_parentheses() {
        // (A & B) | C
        let ast = parse("(SMT>5 & CHR>5) | MNY>500").unwrap();
        match ast {
            AstNode::Or(left, _) => match *left {
                AstNode::And(_, _) => {}
                _ => panic!("Expected AND inside OR"),
            },
            _ => panic!("Expected OR condition"),
        }
    }

    #[test]
    fn test_parse_operator_precedence() {
        // A | B & C parses as A | (B & C)
        let ast = parse("SMT>5 | CHR>5 & HLT>5").unwrap();
        match ast {
            AstNode::Or(_, right) => match *right {
                AstNode::And(_, _) => {}
                _ => panic!("Expected AND on right side of OR"),
            },
            _ => panic!("Expected OR condition"),
        }
    }

    #[test]
    fn test_parse_separate_groups_not_unwrapped() {
        // (A) & (B) must not be treated as one parenthesized group
        let ast = parse("(AGE>5) & (AGE<10)").unwrap();
        assert!(matches!(ast, AstNode::And(_, _)));
    }

    #[test]
    fn test_parse_float_value() {
        let ast = parse("SMT>5.5").unwrap();
        match ast {
            AstNode::Single(cond) => assert_eq!(cond.value, ConditionValue::Float(5.5)),
            _ => panic!("Expected single condition"),
        }
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            "",
            "   ",
            "(AGE>5",
            "AGE>5)",
            "LUCK>5",
            "AGE",
            "AGE>abc",
            "STG=Toddler",
            "AGE?5",
            "AGE>[1,2]",
            "AGE>5 &",
            "AGE?[1,x]",
        ] {
            assert!(
                matches!(parse(bad), Err(LifeSimError::InvalidCondition(_))),
                "Expected error for: {:?}",
                bad
            );
        }
    }
}
