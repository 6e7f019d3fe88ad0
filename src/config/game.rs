//! Game rule configuration

use crate::config::action::ActionTable;
use crate::error::{LifeSimError, Result};
use crate::property::InitialStats;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive integer range sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: i32,
    pub max: i32,
}

impl StatRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Uniform draw from `min..=max`
    ///
    /// A constant range still consumes a draw like any other range.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.min >= self.max {
            let _: u32 = rng.gen();
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

/// Passive per-turn drift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Ages above this use `elder_health_loss`
    pub elder_age: u32,
    /// Health lost per turn up to `elder_age`
    pub health_loss: StatRange,
    /// Health lost per turn past `elder_age`
    pub elder_health_loss: StatRange,
    /// Happiness added per turn (may be negative)
    pub happiness_shift: StatRange,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            elder_age: 60,
            health_loss: StatRange::new(0, 1),
            elder_health_loss: StatRange::new(0, 2),
            happiness_shift: StatRange::new(-2, 2),
        }
    }
}

impl DecayConfig {
    /// No drift at all
    pub fn none() -> Self {
        Self {
            elder_age: 60,
            health_loss: StatRange::new(0, 0),
            elder_health_loss: StatRange::new(0, 0),
            happiness_shift: StatRange::new(0, 0),
        }
    }

    pub fn health_loss_at(&self, age: u32) -> StatRange {
        if age > self.elder_age {
            self.elder_health_loss
        } else {
            self.health_loss
        }
    }
}

/// Terminal thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndingConfig {
    /// Natural end of life
    pub lifespan: u32,
    /// Money at or below this is bankruptcy
    pub bankruptcy_threshold: i32,
}

impl Default for EndingConfig {
    fn default() -> Self {
        Self {
            lifespan: 90,
            bankruptcy_threshold: -500,
        }
    }
}

/// All tunable rules of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Chance per turn that an eligible event fires
    pub event_chance: f64,
    pub decay: DecayConfig,
    pub endings: EndingConfig,
    pub initial: InitialStats,
    /// Run a turn after every successful action
    pub actions_advance_time: bool,
    pub actions: ActionTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            event_chance: 0.6,
            decay: DecayConfig::default(),
            endings: EndingConfig::default(),
            initial: InitialStats::default(),
            actions_advance_time: true,
            actions: ActionTable::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.event_chance) {
            return Err(LifeSimError::DeserializationError(format!(
                "event_chance {} outside [0, 1]",
                self.event_chance
            )));
        }

        let ranges = [
            ("health_loss", self.decay.health_loss),
            ("elder_health_loss", self.decay.elder_health_loss),
            ("happiness_shift", self.decay.happiness_shift),
        ];
        for (name, range) in ranges {
            if range.min > range.max {
                return Err(LifeSimError::DeserializationError(format!(
                    "{} range {}..={} is empty",
                    name, range.min, range.max
                )));
            }
        }

        if self.endings.lifespan == 0 {
            return Err(LifeSimError::DeserializationError(
                "lifespan must be positive".to_string(),
            ));
        }

        self.actions.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.event_chance, 0.6);
        assert_eq!(config.endings.lifespan, 90);
        assert_eq!(config.endings.bankruptcy_threshold, -500);
        assert_eq!(config.decay.health_loss_at(60), StatRange::new(0, 1));
        assert_eq!(config.decay.health_loss_at(61), StatRange::new(0, 2));
        assert!(config.actions_advance_time);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json(r#"{"event_chance": 0.25, "endings": {"lifespan": 70}}"#)
                .unwrap();
        assert_eq!(config.event_chance, 0.25);
        assert_eq!(config.endings.lifespan, 70);
        assert_eq!(config.endings.bankruptcy_threshold, -500);
        assert_eq!(config.decay, DecayConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(GameConfig::from_json(r#"{"event_chance": 1.5}"#).is_err());
        assert!(GameConfig::from_json(
            r#"{"decay": {"happiness_shift": {"min": 3, "max": -3}}}"#
        )
        .is_err());
        assert!(GameConfig::from_json(r#"{"endings": {"lifespan": 0}}"#).is_err());
        assert!(GameConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_range_sampling() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let range = StatRange::new(-2, 2);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let v = range.sample(&mut rng);
            assert!((-2..=2).contains(&v));
            seen[(v + 2) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));

        assert_eq!(StatRange::new(0, 0).sample(&mut rng), 0);
    }

    #[test]
    fn test_constant_range_keeps_stream_aligned() {
        let mut constant = ChaCha8Rng::seed_from_u64(8);
        let mut varying = ChaCha8Rng::seed_from_u64(8);

        StatRange::new(1, 1).sample(&mut constant);
        StatRange::new(0, 1).sample(&mut varying);

        assert_eq!(constant.gen::<u64>(), varying.gen::<u64>());
    }
}
