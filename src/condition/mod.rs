//! Condition parsing and evaluation module
//!
//! Eligibility rules are declarative expressions such as
//! `AGE>=13 & STG?[Teenager,YoungAdult] & SMT>50`, parsed once and
//! evaluated against a [`PlayerState`](crate::property::PlayerState).

mod ast;
pub mod cache;
mod evaluator;
pub mod parser;

#[cfg(test)]
mod property_tests;

pub use ast::*;
pub use cache::*;
pub use evaluator::*;
pub use parser::*;
