//! Python bindings
//!
//! Results cross the boundary as JSON strings; the Python side decodes
//! them with `json.loads`.

use pyo3::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use crate::config::GameConfig;
use crate::error::LifeSimError;
use crate::event::EventCatalog;
use crate::simulator::{self, ChoiceStrategy, LifeGame, RecordingSink};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;

// ============================================================================
// Cached Configuration
// ============================================================================

/// Catalog and rules shared by every game and simulation
#[derive(Clone)]
struct CachedConfig {
    catalog: Arc<EventCatalog>,
    config: Arc<GameConfig>,
}

impl Default for CachedConfig {
    fn default() -> Self {
        Self {
            catalog: EventCatalog::builtin(),
            config: Arc::new(GameConfig::default()),
        }
    }
}

static CACHED_CONFIG: OnceCell<RwLock<CachedConfig>> = OnceCell::new();

/// Current catalog and rules; built-in defaults until `init_config` runs
fn cached() -> CachedConfig {
    CACHED_CONFIG
        .get_or_init(|| RwLock::new(CachedConfig::default()))
        .read()
        .clone()
}

fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|err| LifeSimError::from(err).into())
}

// ============================================================================
// Python Functions
// ============================================================================

/// Replace the event catalog and/or rules used by new games
///
/// # Arguments
/// * `events_json` - Event catalog JSON; `None` keeps the current catalog
/// * `config_json` - Game config JSON; `None` keeps the current rules
#[pyfunction]
#[pyo3(signature = (events_json=None, config_json=None))]
fn init_config(events_json: Option<&str>, config_json: Option<&str>) -> PyResult<()> {
    let mut next = cached();
    if let Some(json) = events_json {
        next.catalog = Arc::new(EventCatalog::from_json(json)?);
    }
    if let Some(json) = config_json {
        next.config = Arc::new(GameConfig::from_json(json)?);
    }

    tracing::info!(events = next.catalog.len(), "config initialized");
    let lock = CACHED_CONFIG.get_or_init(|| RwLock::new(CachedConfig::default()));
    *lock.write() = next;
    Ok(())
}

/// Play a whole life and return the `LifeRecord` as JSON
#[pyfunction]
#[pyo3(name = "simulate_life", signature = (seed, strategy="first"))]
fn simulate_life_py(seed: u64, strategy: &str) -> PyResult<String> {
    let strategy: ChoiceStrategy = strategy.parse()?;
    let CachedConfig { catalog, config } = cached();
    let record = simulator::simulate_life(catalog, config, seed, strategy)?;
    Ok(record.to_json()?)
}

/// Play a whole life on a blocking thread
///
/// # Returns
/// A Python awaitable that resolves to the `LifeRecord` JSON
///
/// # Example (Python)
/// ```python
/// record = json.loads(await simulate_async(42, "best_odds"))
/// print(record["summary"]["message"])
/// ```
#[pyfunction]
#[pyo3(signature = (seed, strategy="first"))]
fn simulate_async<'py>(py: Python<'py>, seed: u64, strategy: &str) -> PyResult<Bound<'py, PyAny>> {
    let strategy: ChoiceStrategy = strategy.parse()?;
    let CachedConfig { catalog, config } = cached();

    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        let json = tokio::task::spawn_blocking(move || {
            let record = simulator::simulate_life(catalog, config, seed, strategy)?;
            record.to_json()
        })
        .await
        .map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Simulation task panicked: {}",
                e
            ))
        })??;

        Ok(json)
    })
}

// ============================================================================
// Interactive game
// ============================================================================

/// One interactive life
#[pyclass(name = "LifeSim")]
pub struct PyLifeSim {
    game: LifeGame<RecordingSink>,
}

#[pymethods]
impl PyLifeSim {
    /// Start a new life; a missing seed draws one from the OS
    #[new]
    #[pyo3(signature = (seed=None))]
    fn new(seed: Option<u64>) -> Self {
        let CachedConfig { catalog, config } = cached();
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            game: LifeGame::seeded(config, catalog, RecordingSink::new(), seed),
        }
    }

    /// Advance one year; returns the `TurnOutcome` JSON
    fn advance_time(&mut self) -> PyResult<String> {
        let outcome = self.game.advance_time()?;
        to_json(&outcome)
    }

    /// Perform `study`, `work`, or `socialize`; returns the `ActionOutcome` JSON
    fn act(&mut self, action: &str) -> PyResult<String> {
        let outcome = self.game.request_action(action)?;
        to_json(&outcome)
    }

    /// Answer the pending event; returns the `Resolution` JSON
    fn choose(&mut self, event_id: &str, index: usize) -> PyResult<String> {
        let resolution = self.game.choose(event_id, index)?;
        to_json(&resolution)
    }

    fn change_stat(&mut self, name: &str, delta: i32) -> bool {
        self.game.change_stat(name, delta)
    }

    fn reset(&mut self) {
        self.game.reset();
    }

    /// Current stat snapshot as JSON
    fn state(&self) -> PyResult<String> {
        to_json(&self.game.state().snapshot())
    }

    /// Pending event view as JSON, if any
    fn pending_event(&self) -> PyResult<Option<String>> {
        self.game.pending_event().map(|view| to_json(&view)).transpose()
    }

    fn available_actions(&self) -> Vec<&'static str> {
        self.game
            .available_actions()
            .into_iter()
            .map(|action| action.name())
            .collect()
    }

    #[getter]
    fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    /// Notifications since the last drain, as a JSON array
    fn drain_notifications(&mut self) -> PyResult<String> {
        let notes = self.game.sink_mut().drain();
        to_json(&notes)
    }

    /// Year-by-year log as JSON
    fn life_log(&self) -> PyResult<String> {
        to_json(self.game.log())
    }
}

// ============================================================================
// Python Module Definition
// ============================================================================

#[pymodule]
fn life_sim_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_config, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_life_py, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_async, m)?)?;
    m.add_class::<PyLifeSim>()?;
    Ok(())
}
