use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::engine::stop_signal::StopSignal;
use crate::engine::traffic_controller::Shared;
use crate::models::vehicle::{Position, Vehicle, VehicleState};
use crate::simulation_engine::movement;

/// Removes the vehicle from the shared collections on every exit path,
/// including an aborted task.
struct AgentExit {
    shared: Arc<Shared>,
    vehicle_id: u64,
}

impl Drop for AgentExit {
    fn drop(&mut self) {
        self.shared.retire_vehicle(self.vehicle_id);
    }
}

/// Steps `vehicle` along `path`, publishing each position. Returns `false`
/// if the run stopped part-way.
async fn animate(
    shared: &Shared,
    vehicle: &mut Vehicle,
    stop: &mut StopSignal,
    steps: u32,
    step_ms: u64,
    path: impl Fn(f64) -> Position,
) -> bool {
    let step = Duration::from_millis(step_ms);
    for i in 0..=steps {
        vehicle.position = path(movement::progress(i, steps));
        shared.update_vehicle(vehicle);
        if !stop.sleep(step).await {
            return false;
        }
    }
    true
}

/// Drives one vehicle through WAITING -> APPROACHING -> CROSSING -> CROSSED
/// and then off the canvas.
///
/// The crossing ticket lives from admission until `finish_crossing`; if the
/// agent stops or is aborted in between, dropping the ticket hands the
/// intersection permit back.
pub(crate) async fn run_vehicle(shared: Arc<Shared>, mut vehicle: Vehicle, mut stop: StopSignal) {
    let _exit = AgentExit {
        shared: Arc::clone(&shared),
        vehicle_id: vehicle.id,
    };
    let animation = shared.config.animation;
    let direction = vehicle.direction;
    let turn = vehicle.movement;

    let reaction = shared.random_delay(shared.config.reaction);
    if !stop.sleep(reaction).await {
        return;
    }

    let Some(ticket) = shared.request_crossing(&vehicle, &mut stop).await else {
        debug!("Vehicle {} gave up waiting: simulation stopped", vehicle.id);
        return;
    };

    vehicle.advance(VehicleState::Approaching);
    let (from, to) = (
        movement::spawn_point(direction),
        movement::entry_point(direction),
    );
    let approached = animate(
        &shared,
        &mut vehicle,
        &mut stop,
        animation.approach_steps,
        animation.approach_step_ms,
        |t| movement::lerp(from, to, t),
    )
    .await;
    if !approached {
        return;
    }

    vehicle.advance(VehicleState::Crossing);
    let crossed = animate(
        &shared,
        &mut vehicle,
        &mut stop,
        animation.crossing_steps,
        animation.crossing_step_ms,
        |t| movement::crossing_position(direction, turn, t),
    )
    .await;
    if !crossed {
        return;
    }

    shared.finish_crossing(ticket);
    vehicle.advance(VehicleState::Crossed);
    shared.update_vehicle(&vehicle);

    let (from, to) = (
        movement::exit_point(direction, turn),
        movement::departure_point(direction, turn),
    );
    animate(
        &shared,
        &mut vehicle,
        &mut stop,
        animation.exit_steps,
        animation.exit_step_ms,
        |t| movement::lerp(from, to, t),
    )
    .await;
}
