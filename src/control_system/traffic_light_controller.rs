use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use log::{debug, info};

use crate::communication::notifier::ChangeNotifier;
use crate::config::{MovementPermits, PhaseTiming};
use crate::control_system::directional_light::DirectionalLight;
use crate::control_system::gate::Gate;
use crate::engine::stop_signal::StopSignal;
use crate::models::direction::{Direction, LightGroup, LightPhase, MovementType};

/// The four signal heads plus the twelve movement gates they arm.
///
/// Light changes and the matching gate re-arming happen under one write
/// lock, so a reader never sees a green light whose gates are still from
/// the previous phase.
pub struct TrafficLightController {
    lights: RwLock<[DirectionalLight; 4]>,
    // Indexed by Direction::index() then MovementType::index().
    gates: [[Gate; 3]; 4],
    permits: MovementPermits,
}

impl TrafficLightController {
    pub fn new(permits: MovementPermits) -> Self {
        let lights = Direction::ALL.map(DirectionalLight::new);
        let gates = Direction::ALL.map(|direction| {
            MovementType::ALL.map(|movement| Gate::new(format!("{direction}/{movement}"), 0))
        });
        Self {
            lights: RwLock::new(lights),
            gates,
            permits,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, [DirectionalLight; 4]> {
        self.lights.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, [DirectionalLight; 4]> {
        self.lights.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn gate(&self, direction: Direction, movement: MovementType) -> &Gate {
        &self.gates[direction.index()][movement.index()]
    }

    pub fn phase(&self, direction: Direction) -> LightPhase {
        self.read()[direction.index()].phase
    }

    pub fn lights(&self) -> [DirectionalLight; 4] {
        *self.read()
    }

    fn arm(&self, direction: Direction) {
        for movement in MovementType::ALL {
            self.gate(direction, movement)
                .set_available(self.permits.for_movement(movement));
        }
    }

    fn close(&self, direction: Direction) {
        for movement in MovementType::ALL {
            let gate = self.gate(direction, movement);
            let withdrawn = gate.drain();
            if withdrawn > 0 {
                debug!("Gate {} closed, {} unused permits withdrawn", gate.name(), withdrawn);
            }
        }
    }

    fn apply_locked(&self, lights: &mut [DirectionalLight; 4], group: LightGroup, phase: LightPhase) {
        match phase {
            LightPhase::Green => {
                for direction in group.other().directions() {
                    lights[direction.index()].set_phase(LightPhase::Red);
                    self.close(direction);
                }
                for direction in group.directions() {
                    lights[direction.index()].set_phase(LightPhase::Green);
                    self.arm(direction);
                }
            }
            // Permits already drawn stay valid through yellow.
            LightPhase::Yellow => {
                for direction in group.directions() {
                    lights[direction.index()].set_phase(LightPhase::Yellow);
                }
            }
            LightPhase::Red => {
                for direction in group.directions() {
                    lights[direction.index()].set_phase(LightPhase::Red);
                    self.close(direction);
                }
            }
        }
    }

    /// Puts `group` into `phase` unconditionally.
    pub fn force(&self, group: LightGroup, phase: LightPhase) {
        let mut lights = self.write();
        self.apply_locked(&mut lights, group, phase);
    }

    /// Like [`force`](Self::force) but refuses once `stop` has fired, so a
    /// scheduler waking up late cannot re-arm gates that shutdown drained.
    pub fn apply(&self, group: LightGroup, phase: LightPhase, stop: &StopSignal) -> bool {
        let mut lights = self.write();
        if stop.is_stopped() {
            return false;
        }
        self.apply_locked(&mut lights, group, phase);
        true
    }

    /// Withdraws every outstanding movement permit.
    pub fn drain_all(&self) {
        let _lights = self.write();
        for direction in Direction::ALL {
            self.close(direction);
        }
    }

    /// Runs the green/yellow/red cycle, alternating groups, until stopped.
    /// Never holds a lock across a sleep.
    pub async fn run_phase_cycle(
        &self,
        timing: PhaseTiming,
        notifier: &ChangeNotifier,
        mut stop: StopSignal,
    ) {
        let steps = [
            (LightPhase::Green, Duration::from_millis(timing.green_ms)),
            (LightPhase::Yellow, Duration::from_millis(timing.yellow_ms)),
            (LightPhase::Red, Duration::from_millis(timing.red_ms)),
        ];
        let mut group = LightGroup::NorthSouth;
        info!(
            "Phase scheduler started ({}ms per group cycle)",
            timing.group_cycle_ms()
        );
        loop {
            for (phase, duration) in steps {
                if !self.apply(group, phase, &stop) {
                    info!("Phase scheduler stopped before {:?} {:?}", group, phase);
                    return;
                }
                info!("Signal group {:?} -> {:?}", group, phase);
                notifier.notify();
                if !stop.sleep(duration).await {
                    info!("Phase scheduler stopped during {:?} {:?}", group, phase);
                    return;
                }
            }
            group = group.other();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stop_signal::stop_pair;
    use std::sync::Arc;

    fn controller() -> TrafficLightController {
        TrafficLightController::new(MovementPermits::default())
    }

    #[test]
    fn starts_all_red_and_closed() {
        let tlc = controller();
        for direction in Direction::ALL {
            assert_eq!(tlc.phase(direction), LightPhase::Red);
            for movement in MovementType::ALL {
                assert_eq!(tlc.gate(direction, movement).available(), 0);
            }
        }
    }

    #[test]
    fn green_arms_active_group_and_closes_the_other() {
        let tlc = controller();
        tlc.force(LightGroup::EastWest, LightPhase::Green);
        tlc.force(LightGroup::NorthSouth, LightPhase::Green);
        for direction in [Direction::North, Direction::South] {
            assert_eq!(tlc.phase(direction), LightPhase::Green);
            assert_eq!(tlc.gate(direction, MovementType::Straight).available(), 3);
            assert_eq!(tlc.gate(direction, MovementType::Left).available(), 1);
            assert_eq!(tlc.gate(direction, MovementType::Right).available(), 1);
        }
        for direction in [Direction::East, Direction::West] {
            assert_eq!(tlc.phase(direction), LightPhase::Red);
            for movement in MovementType::ALL {
                assert_eq!(tlc.gate(direction, movement).available(), 0);
            }
        }
    }

    #[test]
    fn green_replaces_rather_than_accumulates() {
        let tlc = controller();
        tlc.force(LightGroup::NorthSouth, LightPhase::Green);
        tlc.force(LightGroup::NorthSouth, LightPhase::Green);
        assert_eq!(tlc.gate(Direction::North, MovementType::Straight).available(), 3);
    }

    #[test]
    fn yellow_keeps_permits_and_red_drains_them() {
        let tlc = controller();
        tlc.force(LightGroup::NorthSouth, LightPhase::Green);
        assert!(tlc.gate(Direction::North, MovementType::Straight).try_acquire());
        tlc.force(LightGroup::NorthSouth, LightPhase::Yellow);
        assert_eq!(tlc.phase(Direction::South), LightPhase::Yellow);
        assert_eq!(tlc.gate(Direction::North, MovementType::Straight).available(), 2);
        tlc.force(LightGroup::NorthSouth, LightPhase::Red);
        assert_eq!(tlc.phase(Direction::North), LightPhase::Red);
        assert_eq!(tlc.gate(Direction::North, MovementType::Straight).available(), 0);
        assert_eq!(tlc.gate(Direction::South, MovementType::Left).available(), 0);
    }

    #[test]
    fn apply_is_refused_after_stop() {
        let tlc = controller();
        let (handle, signal) = stop_pair();
        assert!(tlc.apply(LightGroup::EastWest, LightPhase::Green, &signal));
        handle.stop();
        assert!(!tlc.apply(LightGroup::NorthSouth, LightPhase::Green, &signal));
        assert_eq!(tlc.phase(Direction::North), LightPhase::Red);
        tlc.drain_all();
        assert_eq!(tlc.gate(Direction::East, MovementType::Straight).available(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cycle_follows_the_fixed_timing() {
        let tlc = Arc::new(controller());
        let notifier = Arc::new(ChangeNotifier::new());
        let (handle, signal) = stop_pair();
        let task = {
            let tlc = Arc::clone(&tlc);
            let notifier = Arc::clone(&notifier);
            tokio::spawn(async move {
                tlc.run_phase_cycle(PhaseTiming::default(), &notifier, signal)
                    .await
            })
        };
        let start = tokio::time::Instant::now();
        tokio::time::sleep_until(start + Duration::from_millis(2500)).await;
        assert_eq!(tlc.phase(Direction::North), LightPhase::Green);
        assert_eq!(tlc.phase(Direction::East), LightPhase::Red);
        tokio::time::sleep_until(start + Duration::from_millis(6000)).await;
        assert_eq!(tlc.phase(Direction::South), LightPhase::Yellow);
        tokio::time::sleep_until(start + Duration::from_millis(7500)).await;
        assert_eq!(tlc.phase(Direction::North), LightPhase::Red);
        assert_eq!(tlc.phase(Direction::West), LightPhase::Red);
        tokio::time::sleep_until(start + Duration::from_millis(8500)).await;
        assert_eq!(tlc.phase(Direction::East), LightPhase::Green);
        assert_eq!(tlc.phase(Direction::North), LightPhase::Red);
        assert_eq!(notifier.revision(), 4);
        handle.stop();
        task.await.unwrap();
    }
}
