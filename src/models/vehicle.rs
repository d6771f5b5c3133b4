use serde::{Deserialize, Serialize};

use crate::models::direction::{Direction, MovementType};
use crate::simulation_engine::movement;

/// Lifecycle of a vehicle agent. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleState {
    Waiting,
    Approaching,
    Crossing,
    Crossed,
}

impl VehicleState {
    pub fn next(self) -> Option<VehicleState> {
        match self {
            VehicleState::Waiting => Some(VehicleState::Approaching),
            VehicleState::Approaching => Some(VehicleState::Crossing),
            VehicleState::Crossing => Some(VehicleState::Crossed),
            VehicleState::Crossed => None,
        }
    }
}

/// Canvas position used only by the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub id: u64,
    pub direction: Direction,
    pub movement: MovementType,
    pub state: VehicleState,
    pub position: Position,
    /// Cosmetic icon picked at creation.
    pub glyph: &'static str,
}

impl Vehicle {
    pub fn new(id: u64, direction: Direction, movement: MovementType, glyph: &'static str) -> Self {
        Self {
            id,
            direction,
            movement,
            state: VehicleState::Waiting,
            position: movement::spawn_point(direction),
            glyph,
        }
    }

    /// Moves to the immediate successor state. Any other target is a bug in
    /// the agent driving this vehicle.
    pub fn advance(&mut self, to: VehicleState) {
        debug_assert_eq!(
            self.state.next(),
            Some(to),
            "vehicle {} cannot go from {:?} to {:?}",
            self.id,
            self.state,
            to
        );
        self.state = to;
    }
}
