// src/shared_data.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::control_system::directional_light::DirectionalLight;
use crate::models::direction::{Direction, LightPhase};
use crate::models::vehicle::Vehicle;

/// Cumulative counters. Never reset for the lifetime of a controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_vehicles_generated: u64,
    pub vehicles_crossed_safely: u64,
    /// Admission polls that ran past the near-miss threshold.
    pub accidents_prevented: u64,
    pub max_concurrent_in_intersection: u64,
    pub safety_violations: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightSnapshot {
    pub direction: Direction,
    pub phase: LightPhase,
    pub ms_in_phase: u64,
}

impl From<&DirectionalLight> for LightSnapshot {
    fn from(light: &DirectionalLight) -> Self {
        Self {
            direction: light.direction,
            phase: light.phase,
            ms_in_phase: light.time_in_phase().as_millis() as u64,
        }
    }
}

/// Everything a view needs to redraw, captured in one call.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSnapshot {
    pub timestamp: u64,
    pub running: bool,
    pub lights: Vec<LightSnapshot>,
    pub vehicles: Vec<Vehicle>,
    pub statistics: Statistics,
    pub crossing_count: usize,
    pub capacity: usize,
    pub waiting_by_direction: BTreeMap<Direction, usize>,
}

/// Seconds since the unix epoch.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
