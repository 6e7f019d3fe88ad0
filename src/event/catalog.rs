//! Immutable event catalog

use crate::config::{deserialize_events, EventConfig};
use crate::error::{LifeSimError, Result};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;

static BUILTIN_EVENTS: &str = include_str!("../../data/events.json");

/// Built-in catalog, parsed on first use
static BUILTIN_CATALOG: Lazy<Arc<EventCatalog>> = Lazy::new(|| {
    Arc::new(EventCatalog::from_json(BUILTIN_EVENTS).expect("built-in event catalog is valid"))
});

/// Ordered set of events with unique ids
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<EventConfig>,
    index: AHashMap<String, usize>,
}

impl EventCatalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(events: Vec<EventConfig>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(events.len());
        for (pos, event) in events.iter().enumerate() {
            if index.insert(event.id.clone(), pos).is_some() {
                return Err(LifeSimError::InvalidEvent(format!(
                    "duplicate event id {}",
                    event.id
                )));
            }
        }
        Ok(Self { events, index })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(deserialize_events(json)?)
    }

    /// Shared handle to the built-in catalog
    pub fn builtin() -> Arc<EventCatalog> {
        BUILTIN_CATALOG.clone()
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&EventConfig> {
        self.index.get(id).map(|pos| &self.events[*pos])
    }

    #[inline]
    pub fn events(&self) -> &[EventConfig] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
