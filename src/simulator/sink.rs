//! Render sink: push notifications to the presentation layer

use crate::event::EventView;
use crate::property::{LifeStage, PlayerState, StatSnapshot};
use crate::simulator::ending::GameOverSummary;
use serde::Serialize;

/// Receiver for everything the engine wants displayed
///
/// Every method defaults to a no-op so a sink only implements what it
/// renders. The engine never reads anything back.
pub trait RenderSink {
    fn on_stats_changed(&mut self, _state: &PlayerState) {}

    /// Stage-dependent availability (e.g. working) should be refreshed here
    fn on_life_stage_changed(&mut self, _stage: LifeStage) {}

    fn on_event_presented(&mut self, _event: &EventView) {}

    fn on_outcome(&mut self, _message: &str) {}

    fn on_game_over(&mut self, _summary: &GameOverSummary) {}
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn on_stats_changed(&mut self, state: &PlayerState) {
        (**self).on_stats_changed(state)
    }

    fn on_life_stage_changed(&mut self, stage: LifeStage) {
        (**self).on_life_stage_changed(stage)
    }

    fn on_event_presented(&mut self, event: &EventView) {
        (**self).on_event_presented(event)
    }

    fn on_outcome(&mut self, message: &str) {
        (**self).on_outcome(message)
    }

    fn on_game_over(&mut self, summary: &GameOverSummary) {
        (**self).on_game_over(summary)
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {}

/// One recorded notification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    StatsChanged { stats: StatSnapshot },
    LifeStageChanged { stage: LifeStage },
    EventPresented { event: EventView },
    Outcome { message: String },
    GameOver { summary: GameOverSummary },
}

/// Keeps every notification until drained
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    notifications: Vec<Notification>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    /// Outcome messages in order
    pub fn outcomes(&self) -> impl Iterator<Item = &str> {
        self.notifications.iter().filter_map(|n| match n {
            Notification::Outcome { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

impl RenderSink for RecordingSink {
    fn on_stats_changed(&mut self, state: &PlayerState) {
        self.notifications.push(Notification::StatsChanged {
            stats: state.snapshot(),
        });
    }

    fn on_life_stage_changed(&mut self, stage: LifeStage) {
        self.notifications
            .push(Notification::LifeStageChanged { stage });
    }

    fn on_event_presented(&mut self, event: &EventView) {
        self.notifications.push(Notification::EventPresented {
            event: event.clone(),
        });
    }

    fn on_outcome(&mut self, message: &str) {
        self.notifications.push(Notification::Outcome {
            message: message.to_string(),
        });
    }

    fn on_game_over(&mut self, summary: &GameOverSummary) {
        self.notifications.push(Notification::GameOver {
            summary: summary.clone(),
        });
    }
}
