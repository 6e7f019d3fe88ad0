//! Condition parsing cache

use crate::condition::ast::AstNode;
use crate::condition::parser;
use crate::error::Result;
use crate::property::PlayerState;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Global condition cache with fast hashing (ahash)
static CONDITION_CACHE: Lazy<RwLock<AHashMap<String, AstNode>>> = Lazy::new(|| {
    let map = AHashMap::with_capacity(256);
    RwLock::new(map)
});

/// Get or parse a condition string, using cache for repeated conditions
#[inline]
pub fn get_or_parse(condition: &str) -> Result<AstNode> {
    // Fast path: check read lock first
    {
        let cache = CONDITION_CACHE.read();
        if let Some(ast) = cache.get(condition) {
            return Ok(ast.clone());
        }
    }

    // Slow path: parse and cache
    let ast = parser::parse(condition)?;

    {
        let mut cache = CONDITION_CACHE.write();
        cache.insert(condition.to_string(), ast.clone());
    }

    Ok(ast)
}

/// Check a condition against a PlayerState, using cached AST
///
/// An empty condition is always true.
#[inline]
pub fn check_condition(condition: &str, state: &PlayerState) -> Result<bool> {
    if condition.trim().is_empty() {
        return Ok(true);
    }

    let ast = get_or_parse(condition)?;
    Ok(crate::condition::evaluator::check(&ast, state))
}

/// Clear the condition cache
#[allow(dead_code)]
pub fn clear_cache() {
    let mut cache = CONDITION_CACHE.write();
    cache.clear();
}

/// Whether a condition string is already cached
#[allow(dead_code)]
pub fn is_cached(condition: &str) -> bool {
    let cache = CONDITION_CACHE.read();
    cache.contains_key(condition)
}
