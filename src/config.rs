//! Simulation tunables.
//!
//! Every field has a default taken from [`crate::global_variables`], and a
//! JSON config file only needs to name the fields it overrides.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{SimError, SimResult};
use crate::global_variables::*;
use crate::models::direction::MovementType;

/// Half-open millisecond range `[min_ms, max_ms)` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    fn or_default_bounds(partial: PartialRange, fallback: DelayRange) -> Self {
        Self {
            min_ms: partial.min_ms.unwrap_or(fallback.min_ms),
            max_ms: partial.max_ms.unwrap_or(fallback.max_ms),
        }
    }

    fn check(&self, name: &str) -> SimResult<()> {
        if self.min_ms >= self.max_ms {
            return Err(SimError::Config(format!(
                "{name} range is empty: [{}, {})",
                self.min_ms, self.max_ms
            )));
        }
        Ok(())
    }
}

// Ranges have per-field defaults that differ between arrival and reaction,
// so a partial override is completed from the matching constants.
#[derive(Deserialize)]
struct PartialRange {
    min_ms: Option<u64>,
    max_ms: Option<u64>,
}

fn arrival_range<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DelayRange, D::Error> {
    let partial = PartialRange::deserialize(deserializer)?;
    Ok(DelayRange::or_default_bounds(
        partial,
        DelayRange::new(ARRIVAL_MIN_MS, ARRIVAL_MAX_MS),
    ))
}

fn reaction_range<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DelayRange, D::Error> {
    let partial = PartialRange::deserialize(deserializer)?;
    Ok(DelayRange::or_default_bounds(
        partial,
        DelayRange::new(REACTION_MIN_MS, REACTION_MAX_MS),
    ))
}

/// Durations of the three sub-phases a light group goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseTiming {
    pub green_ms: u64,
    pub yellow_ms: u64,
    pub red_ms: u64,
}

impl Default for PhaseTiming {
    fn default() -> Self {
        Self {
            green_ms: GREEN_DURATION_MS,
            yellow_ms: YELLOW_DURATION_MS,
            red_ms: RED_DURATION_MS,
        }
    }
}

impl PhaseTiming {
    /// Length of one group's full green/yellow/red cycle.
    pub fn group_cycle_ms(&self) -> u64 {
        self.green_ms + self.yellow_ms + self.red_ms
    }
}

/// Permits granted to each movement gate when its direction turns green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementPermits {
    pub straight: usize,
    pub left: usize,
    pub right: usize,
}

impl Default for MovementPermits {
    fn default() -> Self {
        Self {
            straight: STRAIGHT_PERMITS,
            left: LEFT_PERMITS,
            right: RIGHT_PERMITS,
        }
    }
}

impl MovementPermits {
    pub fn for_movement(&self, movement: MovementType) -> usize {
        match movement {
            MovementType::Straight => self.straight,
            MovementType::Left => self.left,
            MovementType::Right => self.right,
        }
    }
}

/// Probability weights used when assigning a movement type to a new vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementWeights {
    pub straight: u32,
    pub left: u32,
    pub right: u32,
}

impl Default for MovementWeights {
    fn default() -> Self {
        Self {
            straight: STRAIGHT_WEIGHT,
            left: LEFT_WEIGHT,
            right: RIGHT_WEIGHT,
        }
    }
}

impl MovementWeights {
    /// Sum of the weights, or `None` if it does not fit in a `u32`.
    pub fn checked_total(&self) -> Option<u32> {
        self.straight.checked_add(self.left)?.checked_add(self.right)
    }

    pub fn total(&self) -> u32 {
        self.straight.saturating_add(self.left).saturating_add(self.right)
    }

    /// Maps a roll in `0..total()` onto a movement type.
    pub fn pick(&self, roll: u32) -> MovementType {
        if roll < self.straight {
            MovementType::Straight
        } else if roll < self.straight.saturating_add(self.left) {
            MovementType::Left
        } else {
            MovementType::Right
        }
    }
}

/// Step counts and per-step delays for the three display interpolations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTiming {
    pub approach_steps: u32,
    pub approach_step_ms: u64,
    pub crossing_steps: u32,
    pub crossing_step_ms: u64,
    pub exit_steps: u32,
    pub exit_step_ms: u64,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            approach_steps: APPROACH_STEPS,
            approach_step_ms: APPROACH_STEP_MS,
            crossing_steps: CROSSING_STEPS,
            crossing_step_ms: CROSSING_STEP_MS,
            exit_steps: EXIT_STEPS,
            exit_step_ms: EXIT_STEP_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub phase: PhaseTiming,
    pub permits: MovementPermits,
    pub intersection_capacity: usize,
    #[serde(deserialize_with = "arrival_range")]
    pub arrival: DelayRange,
    #[serde(deserialize_with = "reaction_range")]
    pub reaction: DelayRange,
    pub admission_poll_ms: u64,
    pub near_miss_threshold_ms: u64,
    pub monitor_period_ms: u64,
    pub movement_weights: MovementWeights,
    pub animation: AnimationTiming,
    /// When false the generator loop is not started; vehicles only appear
    /// through [`crate::engine::traffic_controller::TrafficController::spawn_vehicle`].
    pub generate_vehicles: bool,
    /// Stop generating after this many vehicles.
    pub vehicle_limit: Option<u64>,
    /// Seed for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            phase: PhaseTiming::default(),
            permits: MovementPermits::default(),
            intersection_capacity: INTERSECTION_CAPACITY,
            arrival: DelayRange::new(ARRIVAL_MIN_MS, ARRIVAL_MAX_MS),
            reaction: DelayRange::new(REACTION_MIN_MS, REACTION_MAX_MS),
            admission_poll_ms: ADMISSION_POLL_MS,
            near_miss_threshold_ms: NEAR_MISS_THRESHOLD_MS,
            monitor_period_ms: MONITOR_PERIOD_MS,
            movement_weights: MovementWeights::default(),
            animation: AnimationTiming::default(),
            generate_vehicles: true,
            vehicle_limit: None,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks structural invariants. Called by the controller constructor.
    pub fn validate(&self) -> SimResult<()> {
        if self.intersection_capacity == 0 {
            return Err(SimError::Config(
                "intersection capacity must be at least 1".to_string(),
            ));
        }
        if self.phase.green_ms == 0 || self.phase.yellow_ms == 0 || self.phase.red_ms == 0 {
            return Err(SimError::Config(format!(
                "phase durations must be non-zero: {:?}",
                self.phase
            )));
        }
        if self.admission_poll_ms == 0 {
            return Err(SimError::Config(
                "admission poll interval must be non-zero".to_string(),
            ));
        }
        if self.monitor_period_ms == 0 {
            return Err(SimError::Config(
                "monitor period must be non-zero".to_string(),
            ));
        }
        let weight_total = self.movement_weights.checked_total().ok_or_else(|| {
            SimError::Config(format!(
                "movement weights overflow: {:?}",
                self.movement_weights
            ))
        })?;
        if weight_total == 0 {
            return Err(SimError::Config(
                "at least one movement weight must be non-zero".to_string(),
            ));
        }
        self.arrival.check("arrival")?;
        self.reaction.check("reaction")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.intersection_capacity, 2);
        assert_eq!(config.phase.group_cycle_ms(), 8000);
        assert_eq!(config.permits.for_movement(MovementType::Straight), 3);
        assert_eq!(config.permits.for_movement(MovementType::Left), 1);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config =
            SimulationConfig::from_json_str(r#"{ "seed": 7, "phase": { "green_ms": 9000 } }"#)
                .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.phase.green_ms, 9000);
        assert_eq!(config.phase.yellow_ms, YELLOW_DURATION_MS);
        assert_eq!(config.arrival, DelayRange::new(1500, 3500));
    }

    #[test]
    fn partial_range_keeps_the_other_bound() {
        let config = SimulationConfig::from_json_str(
            r#"{ "arrival": { "min_ms": 1000 }, "reaction": { "max_ms": 1200 } }"#,
        )
        .unwrap();
        assert_eq!(config.arrival, DelayRange::new(1000, ARRIVAL_MAX_MS));
        assert_eq!(config.reaction, DelayRange::new(REACTION_MIN_MS, 1200));
    }

    #[test]
    fn partial_range_is_still_validated() {
        let err = SimulationConfig::from_json_str(r#"{ "arrival": { "min_ms": 4000 } }"#)
            .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn overflowing_weights_are_a_config_error() {
        let config = SimulationConfig {
            movement_weights: MovementWeights {
                straight: u32::MAX,
                left: 1,
                right: 0,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SimError::Config(_))));
        assert_eq!(config.movement_weights.total(), u32::MAX);

        let parsed = SimulationConfig::from_json_str(
            r#"{ "movement_weights": { "straight": 4294967295, "left": 4294967295 } }"#,
        );
        assert!(matches!(parsed, Err(SimError::Config(_))));
    }

    #[test]
    fn rejects_zero_capacity() {
        let config = SimulationConfig {
            intersection_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SimError::Config(_))));
    }

    #[test]
    fn rejects_inverted_range() {
        let config = SimulationConfig {
            arrival: DelayRange::new(500, 500),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SimulationConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse(_)));
    }

    #[test]
    fn weights_split_rolls() {
        let weights = MovementWeights::default();
        assert_eq!(weights.total(), 100);
        assert_eq!(weights.pick(0), MovementType::Straight);
        assert_eq!(weights.pick(59), MovementType::Straight);
        assert_eq!(weights.pick(60), MovementType::Left);
        assert_eq!(weights.pick(79), MovementType::Left);
        assert_eq!(weights.pick(80), MovementType::Right);
        assert_eq!(weights.pick(99), MovementType::Right);
    }
}
