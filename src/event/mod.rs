//! Event catalog, selection, and outcome application

pub mod catalog;
mod processor;
pub mod selector;
mod view;

#[cfg(test)]
mod property_tests;

pub use catalog::*;
pub use processor::*;
pub use selector::*;
pub use view::*;
