//! Concurrent admission control for a simulated four-way intersection.
//!
//! Vehicle agents need right of way from a movement gate (armed by the
//! phase scheduler) and then one of a bounded number of intersection
//! permits before they may cross. A view drives the simulation through
//! [`TrafficController`] and redraws from its snapshot queries whenever the
//! change signal fires.

pub mod communication;
pub mod config;
pub mod control_system;
pub mod engine;
pub mod error;
pub mod global_variables;
pub mod models;
pub mod monitoring;
pub mod shared_data;
pub mod simulation_engine;

pub use communication::notifier::ChangeListener;
pub use config::SimulationConfig;
pub use engine::traffic_controller::TrafficController;
pub use error::{SimError, SimResult};
pub use models::direction::{Direction, LightGroup, LightPhase, MovementType};
pub use models::vehicle::{Position, Vehicle, VehicleState};
pub use shared_data::{LightSnapshot, SimulationSnapshot, Statistics};
