//! Player state, stats, and life stages

mod stage;
mod state;

#[cfg(test)]
mod property_tests;

pub use stage::*;
pub use state::*;
