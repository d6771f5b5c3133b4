//! Root of the simulation.
//!
//! [`TrafficController`] owns the signal heads, the movement gates, the
//! intersection gate, both vehicle collections and the counters. Vehicle
//! agents and the three background loops only ever reach shared state
//! through the crate-private [`Shared`] half, which is what they hold an
//! `Arc` to.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::communication::notifier::{ChangeListener, ChangeNotifier};
use crate::config::{DelayRange, SimulationConfig};
use crate::control_system::gate::Gate;
use crate::control_system::traffic_light_controller::TrafficLightController;
use crate::engine::stop_signal::{stop_pair, StopHandle, StopSignal};
use crate::error::{SimError, SimResult};
use crate::global_variables::VEHICLE_GLYPHS;
use crate::models::direction::{Direction, LightGroup, LightPhase, MovementType};
use crate::models::vehicle::{Vehicle, VehicleState};
use crate::monitoring::traffic_monitoring_system::run_safety_monitor;
use crate::shared_data::{current_timestamp, LightSnapshot, SimulationSnapshot, Statistics};
use crate::simulation_engine::simulation::run_vehicle_generator;
use crate::simulation_engine::vehicles::run_vehicle;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub generated: AtomicU64,
    pub crossed: AtomicU64,
    pub near_misses: AtomicU64,
    pub max_concurrent: AtomicU64,
    pub violations: AtomicU64,
}

impl Counters {
    pub fn generated(&self) -> u64 {
        self.generated.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> Statistics {
        Statistics {
            total_vehicles_generated: self.generated.load(Ordering::SeqCst),
            vehicles_crossed_safely: self.crossed.load(Ordering::SeqCst),
            accidents_prevented: self.near_misses.load(Ordering::SeqCst),
            max_concurrent_in_intersection: self.max_concurrent.load(Ordering::SeqCst),
            safety_violations: self.violations.load(Ordering::SeqCst),
        }
    }
}

/// State shared between the controller, its background loops and every
/// vehicle agent.
pub(crate) struct Shared {
    pub config: SimulationConfig,
    pub signals: TrafficLightController,
    pub intersection: Gate,
    pub counters: Counters,
    pub notifier: ChangeNotifier,
    active: Mutex<BTreeMap<u64, Vehicle>>,
    crossing: Mutex<BTreeSet<u64>>,
    agents: Mutex<HashMap<u64, JoinHandle<()>>>,
    next_id: AtomicU64,
    rng: Mutex<SmallRng>,
    running: AtomicBool,
    runtime: Handle,
}

impl Shared {
    pub fn random_delay(&self, range: DelayRange) -> Duration {
        let ms = lock(&self.rng).random_range(range.min_ms..range.max_ms);
        Duration::from_millis(ms)
    }

    pub fn random_direction(&self) -> Direction {
        let i = lock(&self.rng).random_range(0..Direction::ALL.len());
        Direction::ALL[i]
    }

    pub fn random_movement(&self) -> MovementType {
        let weights = self.config.movement_weights;
        let roll = lock(&self.rng).random_range(0..weights.total());
        weights.pick(roll)
    }

    fn random_glyph(&self) -> &'static str {
        let i = lock(&self.rng).random_range(0..VEHICLE_GLYPHS.len());
        VEHICLE_GLYPHS[i]
    }

    /// Registers a new vehicle and launches its agent. The vehicle is fully
    /// registered before the agent starts; if the run is already stopping
    /// nothing is registered or launched.
    pub fn launch_vehicle(
        self: &Arc<Self>,
        direction: Direction,
        movement: MovementType,
        stop: &StopSignal,
    ) -> Option<u64> {
        let glyph = self.random_glyph();
        let mut agents = lock(&self.agents);
        let vehicle = {
            let mut active = lock(&self.active);
            if stop.is_stopped() {
                return None;
            }
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let vehicle = Vehicle::new(id, direction, movement, glyph);
            active.insert(id, vehicle.clone());
            vehicle
        };
        self.counters.generated.fetch_add(1, Ordering::SeqCst);

        let id = vehicle.id;
        debug!("Spawned vehicle {} {} from {} going {}", glyph, id, direction, movement);
        let handle = self
            .runtime
            .spawn(run_vehicle(Arc::clone(self), vehicle, stop.clone()));
        agents.insert(id, handle);
        drop(agents);

        self.notifier.notify();
        Some(id)
    }

    /// Publishes the agent's view of its vehicle. A vehicle already removed
    /// by `stop()` is not brought back.
    pub fn update_vehicle(&self, vehicle: &Vehicle) {
        {
            let mut active = lock(&self.active);
            match active.get_mut(&vehicle.id) {
                Some(entry) => *entry = vehicle.clone(),
                None => return,
            }
        }
        self.notifier.notify();
    }

    /// Final step of every agent, whatever path it exits through. Also
    /// called by `cancel_vehicle`, since an agent aborted before its first
    /// poll never runs its own exit path.
    pub fn retire_vehicle(&self, vehicle_id: u64) {
        let removed = lock(&self.active).remove(&vehicle_id).is_some();
        lock(&self.crossing).remove(&vehicle_id);
        lock(&self.agents).remove(&vehicle_id);
        if removed {
            debug!("Vehicle {} left the simulation", vehicle_id);
        }
        self.notifier.notify();
    }

    /// Two-stage admission: right of way from the movement gate, then room
    /// in the intersection. Returns `None` when the run stops first, in
    /// which case no intersection permit is held.
    pub async fn request_crossing(
        self: &Arc<Self>,
        vehicle: &Vehicle,
        stop: &mut StopSignal,
    ) -> Option<CrossingTicket> {
        debug!(
            "Vehicle {} ({}) from {} requesting to cross",
            vehicle.id, vehicle.movement, vehicle.direction
        );

        let lane = self.signals.gate(vehicle.direction, vehicle.movement);
        if !lane.try_acquire() {
            debug!(
                "Vehicle {} waiting for {:?} right of way",
                vehicle.id,
                vehicle.direction.group()
            );
            tokio::select! {
                _ = lane.acquire() => {}
                _ = stop.stopped() => return None,
            }
        }

        let poll = Duration::from_millis(self.config.admission_poll_ms);
        let threshold = Duration::from_millis(self.config.near_miss_threshold_ms);
        let mut waited = Duration::ZERO;
        {
            // Kept alive across polls so the vehicle holds its place in line.
            let entry = self.intersection.acquire();
            tokio::pin!(entry);
            loop {
                tokio::select! {
                    _ = &mut entry => break,
                    _ = stop.stopped() => return None,
                    _ = tokio::time::sleep(poll) => {
                        waited += poll;
                        if waited > threshold {
                            self.counters.near_misses.fetch_add(1, Ordering::SeqCst);
                            warn!(
                                "Accident prevented: vehicle {} waited {}ms for an occupied intersection",
                                vehicle.id,
                                waited.as_millis()
                            );
                        }
                    }
                }
            }
        }

        let inside = {
            let mut crossing = lock(&self.crossing);
            if stop.is_stopped() {
                None
            } else {
                crossing.insert(vehicle.id);
                let inside = crossing.len();
                self.counters
                    .max_concurrent
                    .fetch_max(inside as u64, Ordering::SeqCst);
                Some(inside)
            }
        };
        let Some(inside) = inside else {
            self.intersection.release();
            return None;
        };

        debug!(
            "Vehicle {} entered the intersection ({} inside)",
            vehicle.id, inside
        );
        self.notifier.notify();
        Some(CrossingTicket {
            shared: Arc::clone(self),
            vehicle_id: vehicle.id,
            settled: false,
        })
    }

    /// Release side of admission. Consuming the ticket makes a second
    /// release for the same vehicle impossible.
    pub fn finish_crossing(&self, mut ticket: CrossingTicket) {
        let remaining = ticket.leave();
        self.counters.crossed.fetch_add(1, Ordering::SeqCst);
        debug!(
            "Vehicle {} left the intersection safely ({} remaining)",
            ticket.vehicle_id, remaining
        );
        self.notifier.notify();
    }

    pub fn crossing_count(&self) -> usize {
        lock(&self.crossing).len()
    }

    /// Occupancy if it exceeds capacity, checked under the crossing lock.
    pub fn capacity_exceeded(&self) -> Option<usize> {
        let inside = lock(&self.crossing).len();
        (inside > self.config.intersection_capacity).then_some(inside)
    }

    #[cfg(test)]
    pub fn insert_crossing_for_test(&self, vehicle_id: u64) {
        lock(&self.crossing).insert(vehicle_id);
    }
}

/// Proof that a vehicle holds an intersection permit and is listed as
/// crossing. Dropping it without [`Shared::finish_crossing`] (the agent was
/// cancelled) gives the permit back without counting a safe crossing.
pub(crate) struct CrossingTicket {
    shared: Arc<Shared>,
    vehicle_id: u64,
    settled: bool,
}

impl CrossingTicket {
    // Leave the crossing set before releasing, so the next vehicle can
    // never be admitted while this one is still counted inside.
    fn leave(&mut self) -> usize {
        self.settled = true;
        let remaining = {
            let mut crossing = lock(&self.shared.crossing);
            crossing.remove(&self.vehicle_id);
            crossing.len()
        };
        self.shared.intersection.release();
        remaining
    }
}

impl Drop for CrossingTicket {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        self.leave();
        debug!("Vehicle {} abandoned the intersection", self.vehicle_id);
        self.shared.notifier.notify();
    }
}

struct RunScope {
    stop: StopHandle,
    loops: Vec<JoinHandle<()>>,
}

/// Owns one simulated intersection. Construct one per simulation; a
/// statistics reset means building a new controller.
pub struct TrafficController {
    shared: Arc<Shared>,
    run: Mutex<Option<RunScope>>,
    retired: Mutex<Vec<JoinHandle<()>>>,
}

impl TrafficController {
    /// Must be called from within a tokio runtime; every task the
    /// controller launches runs on that runtime.
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| SimError::NoRuntime)?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let shared = Shared {
            signals: TrafficLightController::new(config.permits),
            intersection: Gate::new("intersection", config.intersection_capacity),
            counters: Counters::default(),
            notifier: ChangeNotifier::new(),
            active: Mutex::new(BTreeMap::new()),
            crossing: Mutex::new(BTreeSet::new()),
            agents: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            rng: Mutex::new(rng),
            running: AtomicBool::new(false),
            runtime,
            config,
        };
        Ok(Self {
            shared: Arc::new(shared),
            run: Mutex::new(None),
            retired: Mutex::new(Vec::new()),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.shared.config
    }

    /// Launches the phase scheduler, the safety monitor and (if enabled)
    /// the vehicle generator. Does nothing when already running.
    pub fn start(&self) {
        let mut run = lock(&self.run);
        if run.is_some() {
            debug!("start() ignored: simulation already running");
            return;
        }
        let (stop, signal) = stop_pair();
        self.shared.running.store(true, Ordering::SeqCst);

        let mut loops = Vec::with_capacity(3);
        {
            let shared = Arc::clone(&self.shared);
            let signal = signal.clone();
            loops.push(self.shared.runtime.spawn(async move {
                shared
                    .signals
                    .run_phase_cycle(shared.config.phase, &shared.notifier, signal)
                    .await
            }));
        }
        loops.push(
            self.shared
                .runtime
                .spawn(run_safety_monitor(Arc::clone(&self.shared), signal.clone())),
        );
        if self.shared.config.generate_vehicles {
            loops.push(
                self.shared
                    .runtime
                    .spawn(run_vehicle_generator(Arc::clone(&self.shared), signal)),
            );
        }
        *run = Some(RunScope { stop, loops });
        info!("Simulation started");
        self.shared.notifier.notify();
    }

    /// Requests every background loop and vehicle agent to stop, empties
    /// both vehicle collections and closes every movement gate. Statistics
    /// are kept. Does nothing when not running.
    pub fn stop(&self) {
        let mut run = lock(&self.run);
        let Some(scope) = run.take() else {
            return;
        };
        self.shared.running.store(false, Ordering::SeqCst);
        scope.stop.stop();
        self.shared.signals.drain_all();
        lock(&self.shared.active).clear();
        lock(&self.shared.crossing).clear();
        {
            let mut retired = lock(&self.retired);
            retired.retain(|handle| !handle.is_finished());
            retired.extend(scope.loops);
        }
        info!("Simulation stopped");
        self.shared.notifier.notify();
    }

    /// Stops and waits until every task this controller launched has
    /// finished.
    pub async fn shutdown(&self) {
        self.stop();
        let mut handles: Vec<JoinHandle<()>> = lock(&self.retired).drain(..).collect();
        handles.extend(lock(&self.shared.agents).drain().map(|(_, handle)| handle));
        for handle in handles {
            if let Err(err) = handle.await {
                if err.is_panic() {
                    warn!("Simulation task panicked: {}", err);
                }
            }
        }
    }

    /// Registers and launches one vehicle outside the generator. Returns the
    /// new vehicle id, or `None` when not running.
    pub fn spawn_vehicle(&self, direction: Direction, movement: MovementType) -> Option<u64> {
        let signal = lock(&self.run).as_ref()?.stop.signal();
        self.shared.launch_vehicle(direction, movement, &signal)
    }

    /// Aborts one vehicle agent and removes it from both collections right
    /// away. A held intersection permit comes back when the aborted agent
    /// drops its crossing ticket.
    pub fn cancel_vehicle(&self, vehicle_id: u64) -> bool {
        let handle = lock(&self.shared.agents).remove(&vehicle_id);
        match handle {
            Some(handle) => {
                handle.abort();
                self.shared.retire_vehicle(vehicle_id);
                debug!("Vehicle {} cancelled", vehicle_id);
                true
            }
            None => false,
        }
    }

    /// Overrides a light group and re-arms its gates as the scheduler would.
    pub fn force_phase(&self, group: LightGroup, phase: LightPhase) {
        self.shared.signals.force(group, phase);
        info!("Signal group {:?} forced to {:?}", group, phase);
        self.shared.notifier.notify();
    }

    pub fn subscribe(&self) -> ChangeListener {
        self.shared.notifier.subscribe()
    }

    /// Number of change pulses fired so far, for polling views.
    pub fn revision(&self) -> u64 {
        self.shared.notifier.revision()
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    pub fn light_phase(&self, direction: Direction) -> LightPhase {
        self.shared.signals.phase(direction)
    }

    pub fn lights(&self) -> Vec<LightSnapshot> {
        self.shared
            .signals
            .lights()
            .iter()
            .map(LightSnapshot::from)
            .collect()
    }

    /// Copy of every registered vehicle, ordered by id.
    pub fn active_vehicles(&self) -> Vec<Vehicle> {
        lock(&self.shared.active).values().cloned().collect()
    }

    pub fn active_count(&self) -> usize {
        lock(&self.shared.active).len()
    }

    pub fn crossing_count(&self) -> usize {
        self.shared.crossing_count()
    }

    pub fn crossing_vehicle_ids(&self) -> Vec<u64> {
        lock(&self.shared.crossing).iter().copied().collect()
    }

    pub fn capacity(&self) -> usize {
        self.shared.config.intersection_capacity
    }

    pub fn statistics(&self) -> Statistics {
        self.shared.counters.snapshot()
    }

    pub fn waiting_by_direction(&self) -> BTreeMap<Direction, usize> {
        let mut waiting: BTreeMap<Direction, usize> =
            Direction::ALL.iter().map(|&direction| (direction, 0)).collect();
        for vehicle in lock(&self.shared.active).values() {
            if vehicle.state == VehicleState::Waiting {
                *waiting.entry(vehicle.direction).or_default() += 1;
            }
        }
        waiting
    }

    pub fn movement_permits_available(&self, direction: Direction, movement: MovementType) -> usize {
        self.shared.signals.gate(direction, movement).available()
    }

    pub fn intersection_permits_available(&self) -> usize {
        self.shared.intersection.available()
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            timestamp: current_timestamp(),
            running: self.is_running(),
            lights: self.lights(),
            vehicles: self.active_vehicles(),
            statistics: self.statistics(),
            crossing_count: self.crossing_count(),
            capacity: self.capacity(),
            waiting_by_direction: self.waiting_by_direction(),
        }
    }
}

impl Drop for TrafficController {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for TrafficController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrafficController")
            .field("running", &self.is_running())
            .field("statistics", &self.statistics())
            .field("crossing", &self.crossing_count())
            .finish()
    }
}

#[cfg(test)]
impl TrafficController {
    pub(crate) fn shared(&self) -> &Arc<Shared> {
        &self.shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> SimulationConfig {
        SimulationConfig {
            generate_vehicles: false,
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn new_requires_a_runtime() {
        let err = TrafficController::new(SimulationConfig::default()).unwrap_err();
        assert!(matches!(err, SimError::NoRuntime));
    }

    #[tokio::test]
    async fn new_rejects_invalid_config() {
        let config = SimulationConfig {
            admission_poll_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            TrafficController::new(config),
            Err(SimError::Config(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn start_and_stop_are_idempotent() {
        let controller = TrafficController::new(quiet_config()).unwrap();
        controller.stop();
        assert!(!controller.is_running());
        controller.start();
        controller.start();
        assert!(controller.is_running());
        controller.stop();
        controller.stop();
        assert!(!controller.is_running());
        controller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_without_shutdown_keeps_only_live_loop_handles() {
        let controller = TrafficController::new(quiet_config()).unwrap();
        for _ in 0..10 {
            controller.start();
            tokio::time::sleep(Duration::from_millis(10)).await;
            controller.stop();
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        // Scheduler and monitor from the last run only.
        assert!(lock(&controller.retired).len() <= 2);
        controller.shutdown().await;
        assert!(lock(&controller.retired).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_removes_a_crossing_vehicle_at_once() {
        let controller = TrafficController::new(quiet_config()).unwrap();
        controller.start();
        let id = controller
            .spawn_vehicle(Direction::North, MovementType::Right)
            .unwrap();
        while controller.crossing_count() == 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(controller.cancel_vehicle(id));
        assert!(controller.crossing_vehicle_ids().is_empty());
        assert_eq!(controller.active_count(), 0);
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(controller.intersection_permits_available(), 2);
        controller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn spawn_requires_a_running_simulation() {
        let controller = TrafficController::new(quiet_config()).unwrap();
        assert_eq!(
            controller.spawn_vehicle(Direction::North, MovementType::Straight),
            None
        );
        assert_eq!(controller.statistics().total_vehicles_generated, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_ticket_returns_the_permit_without_counting() {
        let controller = TrafficController::new(quiet_config()).unwrap();
        let shared = Arc::clone(controller.shared());
        shared.signals.force(LightGroup::NorthSouth, LightPhase::Green);
        let vehicle = Vehicle::new(99, Direction::North, MovementType::Left, "🚗");
        let (_handle, mut signal) = stop_pair();

        let ticket = shared.request_crossing(&vehicle, &mut signal).await.unwrap();
        assert_eq!(controller.crossing_vehicle_ids(), vec![99]);
        assert_eq!(controller.intersection_permits_available(), 1);
        assert_eq!(
            controller.movement_permits_available(Direction::North, MovementType::Left),
            0
        );
        drop(ticket);
        assert_eq!(controller.crossing_count(), 0);
        assert_eq!(controller.intersection_permits_available(), 2);
        assert_eq!(controller.statistics().vehicles_crossed_safely, 0);
        assert_eq!(controller.statistics().max_concurrent_in_intersection, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn finished_ticket_counts_one_safe_crossing() {
        let controller = TrafficController::new(quiet_config()).unwrap();
        let shared = Arc::clone(controller.shared());
        shared.signals.force(LightGroup::EastWest, LightPhase::Green);
        let vehicle = Vehicle::new(7, Direction::West, MovementType::Straight, "🚕");
        let (_handle, mut signal) = stop_pair();

        let ticket = shared.request_crossing(&vehicle, &mut signal).await.unwrap();
        shared.finish_crossing(ticket);
        assert_eq!(controller.crossing_count(), 0);
        assert_eq!(controller.intersection_permits_available(), 2);
        assert_eq!(controller.statistics().vehicles_crossed_safely, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn red_light_blocks_until_stop() {
        let controller = TrafficController::new(quiet_config()).unwrap();
        let shared = Arc::clone(controller.shared());
        let vehicle = Vehicle::new(1, Direction::South, MovementType::Straight, "🚙");
        let (handle, signal) = stop_pair();

        let waiter = {
            let shared = Arc::clone(&shared);
            let mut signal = signal.clone();
            tokio::spawn(async move { shared.request_crossing(&vehicle, &mut signal).await.is_some() })
        };
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(!waiter.is_finished());
        handle.stop();
        assert!(!waiter.await.unwrap());
        assert_eq!(controller.intersection_permits_available(), 2);
        assert_eq!(controller.statistics().accidents_prevented, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn long_wait_counts_a_near_miss_per_poll_past_the_threshold() {
        let controller = TrafficController::new(quiet_config()).unwrap();
        let shared = Arc::clone(controller.shared());
        shared.signals.force(LightGroup::NorthSouth, LightPhase::Green);
        let (_handle, mut signal) = stop_pair();

        let first = Vehicle::new(1, Direction::North, MovementType::Straight, "🚗");
        let second = Vehicle::new(2, Direction::North, MovementType::Straight, "🚗");
        let third = Vehicle::new(3, Direction::South, MovementType::Straight, "🚗");
        let t1 = shared.request_crossing(&first, &mut signal).await.unwrap();
        let t2 = shared.request_crossing(&second, &mut signal).await.unwrap();

        let waiter = {
            let shared = Arc::clone(&shared);
            let mut signal = signal.clone();
            tokio::spawn(async move { shared.request_crossing(&third, &mut signal).await })
        };
        // 1500ms of polling: slices at 1100..=1500 are past the 1000ms mark.
        tokio::time::sleep(Duration::from_millis(1550)).await;
        assert_eq!(controller.statistics().accidents_prevented, 5);
        shared.finish_crossing(t1);
        let t3 = waiter.await.unwrap().unwrap();
        assert_eq!(controller.crossing_count(), 2);
        assert_eq!(controller.statistics().max_concurrent_in_intersection, 2);
        shared.finish_crossing(t2);
        shared.finish_crossing(t3);
        assert_eq!(controller.statistics().vehicles_crossed_safely, 3);
    }
}
