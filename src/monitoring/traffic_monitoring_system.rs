use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};

use crate::engine::stop_signal::StopSignal;
use crate::engine::traffic_controller::Shared;

/// Periodic canary for the intersection capacity bound. A violation is
/// logged and counted, never corrected: it means the intersection gate is
/// broken.
pub(crate) async fn run_safety_monitor(shared: Arc<Shared>, mut stop: StopSignal) {
    let period = Duration::from_millis(shared.config.monitor_period_ms);
    let capacity = shared.config.intersection_capacity;
    info!("Safety monitor started (capacity {})", capacity);
    while stop.sleep(period).await {
        if let Some(inside) = shared.capacity_exceeded() {
            error!(
                "SAFETY ALERT: {} vehicles inside the intersection (maximum {})",
                inside, capacity
            );
            shared.counters.violations.fetch_add(1, Ordering::SeqCst);
            shared.notifier.notify();
        }
    }
    info!("Safety monitor stopped");
}
