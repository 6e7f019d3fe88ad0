//! Turn controller
//!
//! `LifeGame` owns the single `PlayerState` and drives it through the
//! Idle → EventPending → Idle cycle until an ending is reached. Every
//! request runs to completion; waiting for the player is the
//! `EventPending` phase, not a blocking call.

use crate::config::{Action, EventConfig, GameConfig};
use crate::error::{LifeSimError, Result};
use crate::event::{
    apply_effects, apply_event_effects, choice_available, eligible_events, resolve_choice,
    select_event, AppliedEffects, EventCatalog, EventView, Resolution,
};
use crate::property::{PlayerState, Stat};
use crate::simulator::ending::{evaluate, EndCause, GameOverSummary};
use crate::simulator::log::LifeLog;
use crate::simulator::sink::{NullSink, RenderSink};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::sync::Arc;

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    EventPending,
    GameOver,
}

/// What one `advance_time` call did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The event roll missed
    Quiet,
    /// The event roll hit but no event was eligible
    NothingEligible,
    /// A choice event is waiting for `choose`
    EventPending { event_id: String },
    /// A direct-effect event fired and was applied
    EventResolved { event_id: String, message: String },
    Ended { cause: EndCause },
}

/// Result of a player action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub action: Action,
    pub message: String,
    #[serde(skip)]
    pub applied: AppliedEffects,
    /// Set when the action itself ended the game
    pub ended: Option<EndCause>,
    /// The follow-up turn, when actions advance time
    pub turn: Option<TurnOutcome>,
}

/// One life, from birth to game over
pub struct LifeGame<S = NullSink, R = ChaCha8Rng> {
    config: Arc<GameConfig>,
    catalog: Arc<EventCatalog>,
    state: PlayerState,
    phase: Phase,
    pending: Option<String>,
    ending: Option<GameOverSummary>,
    log: LifeLog,
    rng: R,
    sink: S,
}

impl LifeGame<NullSink, ChaCha8Rng> {
    /// Default rules, built-in catalog, no display
    pub fn with_seed(seed: u64) -> Self {
        LifeGame::new(
            Arc::new(GameConfig::default()),
            EventCatalog::builtin(),
            NullSink,
            ChaCha8Rng::seed_from_u64(seed),
        )
    }
}

impl<S: RenderSink> LifeGame<S, ChaCha8Rng> {
    pub fn seeded(
        config: Arc<GameConfig>,
        catalog: Arc<EventCatalog>,
        sink: S,
        seed: u64,
    ) -> Self {
        LifeGame::new(config, catalog, sink, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Restart the random stream; the state is untouched
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

impl<S: RenderSink, R: Rng> LifeGame<S, R> {
    pub fn new(config: Arc<GameConfig>, catalog: Arc<EventCatalog>, sink: S, rng: R) -> Self {
        let state = PlayerState::new(&config.initial);
        Self {
            config,
            catalog,
            state,
            phase: Phase::Idle,
            pending: None,
            ending: None,
            log: LifeLog::new(),
            rng,
            sink,
        }
    }

    #[inline]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn log(&self) -> &LifeLog {
        &self.log
    }

    /// Summary of the ending, once reached
    pub fn ending(&self) -> Option<&GameOverSummary> {
        self.ending.as_ref()
    }

    pub fn pending_event_id(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Fresh view of the pending event, with odds for the current stats
    pub fn pending_event(&self) -> Option<EventView> {
        let event = self.catalog.get(self.pending.as_deref()?)?;
        Some(EventView::new(event, &self.state))
    }

    /// Actions that `perform` would accept right now
    pub fn available_actions(&self) -> Vec<Action> {
        if self.phase != Phase::Idle {
            return Vec::new();
        }
        self.config.actions.available_at(self.state.life_stage())
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.phase {
            Phase::Idle => Ok(()),
            Phase::GameOver => {
                tracing::debug!("request ignored: game over");
                Err(LifeSimError::GameOver)
            }
            Phase::EventPending => {
                let id = self.pending.clone().unwrap_or_default();
                tracing::debug!(event = %id, "request ignored: event pending");
                Err(LifeSimError::EventPending(id))
            }
        }
    }

    /// Advance one year
    pub fn advance_time(&mut self) -> Result<TurnOutcome> {
        self.ensure_idle()?;

        if let Some(stage) = self.state.advance_age() {
            tracing::info!(age = self.state.age(), %stage, "entered new life stage");
            self.sink.on_life_stage_changed(stage);
        }
        tracing::debug!(age = self.state.age(), "advanced time");
        self.log.touch(&self.state);
        self.stats_changed();

        if let Some(cause) = self.check_end() {
            return Ok(TurnOutcome::Ended { cause });
        }

        self.apply_decay();
        if let Some(cause) = self.check_end() {
            return Ok(TurnOutcome::Ended { cause });
        }

        let draw: f64 = self.rng.gen();
        if draw >= self.config.event_chance {
            return Ok(TurnOutcome::Quiet);
        }

        let catalog = Arc::clone(&self.catalog);
        let eligible = eligible_events(&catalog, &self.state);
        match select_event(&eligible, &mut self.rng) {
            Some(event) => Ok(self.present(event)),
            None => {
                tracing::debug!(age = self.state.age(), "no eligible event");
                Ok(TurnOutcome::NothingEligible)
            }
        }
    }

    /// Resolve the pending event with the choice at `index`
    pub fn choose(&mut self, event_id: &str, index: usize) -> Result<Resolution> {
        match self.phase {
            Phase::GameOver => {
                tracing::debug!("choice ignored: game over");
                return Err(LifeSimError::GameOver);
            }
            Phase::Idle => {
                tracing::warn!(event = event_id, "choice ignored: no pending event");
                return Err(LifeSimError::NoPendingEvent);
            }
            Phase::EventPending => {}
        }

        if self.pending.as_deref() != Some(event_id) {
            tracing::warn!(event = event_id, pending = ?self.pending, "choice for wrong event");
            return Err(LifeSimError::EventNotFound(event_id.to_string()));
        }

        let catalog = Arc::clone(&self.catalog);
        let event = catalog
            .get(event_id)
            .ok_or_else(|| LifeSimError::EventNotFound(event_id.to_string()))?;
        let choice = event
            .choices()
            .get(index)
            .ok_or_else(|| LifeSimError::ChoiceOutOfRange {
                event_id: event_id.to_string(),
                index,
            })?;

        if !choice_available(choice, &self.state) {
            tracing::warn!(event = event_id, index, "choice requirements not met");
            return Err(LifeSimError::ChoiceUnavailable {
                event_id: event_id.to_string(),
                index,
            });
        }

        let resolution = resolve_choice(choice, &mut self.state, &mut self.rng);
        self.phase = Phase::Idle;
        self.pending = None;

        self.finish_outcome(&resolution.message);
        self.check_end();
        Ok(resolution)
    }

    /// Take an action; runs a turn afterwards when configured to
    pub fn perform(&mut self, action: Action) -> Result<ActionOutcome> {
        self.ensure_idle()?;

        let config = Arc::clone(&self.config);
        let table = config.actions.get(action);
        let stage = self.state.life_stage();
        if !table.allowed_at(stage) {
            tracing::warn!(%action, %stage, "action not available at this stage");
            return Err(LifeSimError::ActionGated {
                action: action.to_string(),
                stage,
            });
        }

        // Wage is based on stats before the action's own effects
        let pay = table.wage.map(|wage| wage.pay(&self.state));
        let mut applied = apply_effects(&mut self.state, &table.effects);
        if let Some(pay) = pay {
            if self.state.change(Stat::Money, pay) {
                applied.push((Stat::Money, pay));
            }
        }

        let mut message = match &table.result_text {
            Some(text) => text.clone(),
            None => table.effects.describe(),
        };
        if let Some(pay) = pay {
            message = format!("{} You earned ${}.", message, pay);
        }

        tracing::debug!(%action, age = self.state.age(), "action performed");
        self.finish_outcome(&message);

        let ended = self.check_end();
        let turn = if ended.is_none() && config.actions_advance_time {
            Some(self.advance_time()?)
        } else {
            None
        };

        Ok(ActionOutcome {
            action,
            message,
            applied,
            ended,
            turn,
        })
    }

    /// Name-keyed entry point for `perform`
    pub fn request_action(&mut self, name: &str) -> Result<ActionOutcome> {
        if self.phase == Phase::GameOver {
            tracing::debug!(name, "action ignored: game over");
            return Err(LifeSimError::GameOver);
        }
        let action = name.parse::<Action>().map_err(|err| {
            tracing::warn!(name, "unknown action");
            err
        })?;
        self.perform(action)
    }

    /// Direct stat write through the bounded store
    ///
    /// Returns `false` (and changes nothing) after game over, while a
    /// choice is pending, or for an unknown stat name.
    pub fn change_stat(&mut self, name: &str, delta: i32) -> bool {
        if self.phase == Phase::EventPending {
            tracing::warn!(name, delta, pending = ?self.pending, "stat change ignored: event pending");
            return false;
        }
        if !self.state.change_named(name, delta) {
            return false;
        }
        self.log.touch(&self.state);
        self.stats_changed();
        self.check_end();
        true
    }

    /// Back to birth defaults; always allowed
    pub fn reset(&mut self) {
        self.state.reset(&self.config.initial);
        self.phase = Phase::Idle;
        self.pending = None;
        self.ending = None;
        self.log.clear();

        tracing::info!("game reset");
        self.stats_changed();
        self.sink.on_life_stage_changed(self.state.life_stage());
    }

    fn present(&mut self, event: &EventConfig) -> TurnOutcome {
        tracing::debug!(event = %event.id, age = self.state.age(), "event fired");
        let view = EventView::new(event, &self.state);
        self.log.record(&self.state, event.title.clone());
        self.sink.on_event_presented(&view);

        match apply_event_effects(event, &mut self.state) {
            Some(resolution) => {
                self.finish_outcome(&resolution.message);
                match self.check_end() {
                    Some(cause) => TurnOutcome::Ended { cause },
                    None => TurnOutcome::EventResolved {
                        event_id: event.id.clone(),
                        message: resolution.message,
                    },
                }
            }
            None => {
                self.phase = Phase::EventPending;
                self.pending = Some(event.id.clone());
                TurnOutcome::EventPending {
                    event_id: event.id.clone(),
                }
            }
        }
    }

    fn apply_decay(&mut self) {
        let decay = &self.config.decay;
        let loss = decay
            .health_loss_at(self.state.age())
            .sample(&mut self.rng);
        let shift = decay.happiness_shift.sample(&mut self.rng);

        self.state.change(Stat::Health, -loss);
        self.state.change(Stat::Happiness, shift);
        self.log.touch(&self.state);
        self.stats_changed();
    }

    fn finish_outcome(&mut self, message: &str) {
        self.log.record(&self.state, message);
        self.sink.on_outcome(message);
        self.stats_changed();
    }

    #[inline]
    fn stats_changed(&mut self) {
        self.sink.on_stats_changed(&self.state);
    }

    /// Evaluate endings; on the first hit freeze the state and notify
    fn check_end(&mut self) -> Option<EndCause> {
        if self.state.is_game_over() {
            return self.ending.as_ref().map(|summary| summary.cause);
        }

        let cause = evaluate(&self.state, &self.config.endings)?;
        self.state.mark_game_over();
        self.phase = Phase::GameOver;
        self.pending = None;

        let summary = GameOverSummary::new(cause, &self.state);
        tracing::info!(%cause, age = self.state.age(), "game over");
        self.log.record(&self.state, summary.message.clone());
        self.sink.on_game_over(&summary);
        self.ending = Some(summary);
        Some(cause)
    }
}
