//! Per-year life log

use crate::property::{LifeStage, PlayerState, StatSnapshot};
use serde::Serialize;

/// Everything that happened during one year of life
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub age: u32,
    pub stage: LifeStage,
    pub lines: Vec<String>,
    /// Stats as of the last change this year
    pub stats: StatSnapshot,
}

/// Year-by-year trajectory of a life
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LifeLog {
    entries: Vec<LogEntry>,
}

impl LifeLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&mut self, state: &PlayerState) -> &mut LogEntry {
        let needs_entry = self
            .entries
            .last()
            .map_or(true, |entry| entry.age != state.age());
        if needs_entry {
            self.entries.push(LogEntry {
                age: state.age(),
                stage: state.life_stage(),
                lines: Vec::new(),
                stats: state.snapshot(),
            });
        }
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    /// Refresh the current year's stat snapshot
    pub fn touch(&mut self, state: &PlayerState) {
        self.current(state).stats = state.snapshot();
    }

    /// Append a line to the current year
    pub fn record(&mut self, state: &PlayerState, line: impl Into<String>) {
        let entry = self.current(state);
        entry.lines.push(line.into());
        entry.stats = state.snapshot();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Stat;

    #[test]
    fn test_lines_group_by_age() {
        let mut state = PlayerState::default();
        let mut log = LifeLog::new();

        log.record(&state, "born");
        state.advance_age();
        log.record(&state, "first word");
        state.change(Stat::Smarts, 5);
        log.record(&state, "learned to count");

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].lines, vec!["born"]);
        assert_eq!(entries[1].stage, LifeStage::Infancy);
        assert_eq!(entries[1].lines.len(), 2);
        assert_eq!(entries[1].stats.smarts, 55);
    }

    #[test]
    fn test_touch_creates_quiet_year() {
        let mut state = PlayerState::default();
        let mut log = LifeLog::new();
        state.advance_age();
        log.touch(&state);
        assert_eq!(log.entries().len(), 1);
        assert!(log.entries()[0].lines.is_empty());
    }
}
