//! Life Sim Core - turn-based life simulation rule engine
//!
//! A player ages one year per turn through eight life stages. Each turn
//! applies decay, may fire a random event from a JSON catalog, and checks
//! the terminal conditions. Choice events can carry d20 skill checks whose
//! odds are shown before the player commits.
//!
//! Presentation is pushed through a [`RenderSink`]; the engine never reads
//! anything back. Python bindings live behind the `python` feature.
//!
//! ```
//! use life_sim_core::{LifeGame, Phase};
//!
//! let mut game = LifeGame::with_seed(7);
//! while game.phase() != Phase::GameOver {
//!     match game.pending_event() {
//!         Some(event) => {
//!             let index = event.choices.iter().position(|c| c.enabled).unwrap();
//!             game.choose(&event.id, index).unwrap();
//!         }
//!         None => {
//!             game.advance_time().unwrap();
//!         }
//!     }
//! }
//! assert!(game.ending().is_some());
//! ```

pub mod condition;
pub mod config;
pub mod error;
pub mod event;
pub mod property;
pub mod simulator;
pub mod skill;

#[cfg(feature = "python")]
mod bindings;

pub use config::{Action, EventConfig, GameConfig};
pub use error::{LifeSimError, Result};
pub use event::{EventCatalog, EventView, Resolution};
pub use property::{LifeStage, PlayerState, Stat};
pub use simulator::{
    simulate_life, ChoiceStrategy, EndCause, GameOverSummary, LifeGame, LifeRecord, NullSink,
    Phase, RecordingSink, RenderSink, TurnOutcome,
};
