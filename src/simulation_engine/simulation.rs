// simulation.rs
use std::sync::Arc;

use log::info;

use crate::engine::stop_signal::StopSignal;
use crate::engine::traffic_controller::Shared;

/// Spawns vehicles at random intervals on random approaches until stopped
/// or until the configured vehicle limit is reached.
pub(crate) async fn run_vehicle_generator(shared: Arc<Shared>, mut stop: StopSignal) {
    info!("Vehicle generator started");
    loop {
        if let Some(limit) = shared.config.vehicle_limit {
            if shared.counters.generated() >= limit {
                info!("Vehicle limit {} reached, generator idle", limit);
                return;
            }
        }

        let delay = shared.random_delay(shared.config.arrival);
        if !stop.sleep(delay).await {
            break;
        }

        let direction = shared.random_direction();
        let movement = shared.random_movement();
        if shared.launch_vehicle(direction, movement, &stop).is_none() {
            break;
        }
    }
    info!("Vehicle generator stopped");
}
