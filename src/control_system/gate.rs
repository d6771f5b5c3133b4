//! Counting permit gate with FIFO hand-off.
//!
//! Waiters queue in arrival order and permits are handed directly to the
//! head of the queue, so a later arrival can never overtake a parked one.
//! The available count can be replaced in one step (`set_available`), which
//! is what light-phase transitions use.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;

struct GateState {
    available: usize,
    waiters: VecDeque<oneshot::Sender<()>>,
}

impl GateState {
    // Invariant after every call: available > 0 implies no live waiter.
    fn dispatch(&mut self) {
        while self.available > 0 {
            match self.waiters.pop_front() {
                Some(waiter) => {
                    if waiter.send(()).is_ok() {
                        self.available -= 1;
                    }
                }
                None => break,
            }
        }
    }
}

pub struct Gate {
    name: String,
    state: Mutex<GateState>,
}

impl Gate {
    pub fn new(name: impl Into<String>, permits: usize) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(GateState {
                available: permits,
                waiters: VecDeque::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn available(&self) -> usize {
        self.lock().available
    }

    /// Number of callers currently parked in `acquire`.
    pub fn waiting(&self) -> usize {
        self.lock()
            .waiters
            .iter()
            .filter(|waiter| !waiter.is_closed())
            .count()
    }

    /// Takes a permit if one is free and nobody is queued ahead.
    pub fn try_acquire(&self) -> bool {
        let mut state = self.lock();
        if state.available > 0 && state.waiters.is_empty() {
            state.available -= 1;
            true
        } else {
            false
        }
    }

    /// Waits until a permit is handed over.
    ///
    /// Cancel safe: if the returned future is dropped after a permit was
    /// already handed to it, the permit goes back to the gate.
    pub async fn acquire(&self) {
        loop {
            let rx = {
                let mut state = self.lock();
                if state.available > 0 && state.waiters.is_empty() {
                    state.available -= 1;
                    return;
                }
                let (tx, rx) = oneshot::channel();
                state.waiters.push_back(tx);
                rx
            };

            let mut pending = PendingAcquire {
                gate: self,
                rx,
                settled: false,
            };
            let outcome = (&mut pending.rx).await;
            pending.settled = true;
            if outcome.is_ok() {
                return;
            }
            // Sender vanished without a permit; queue up again.
        }
    }

    /// Waits at most `timeout` for a permit.
    pub async fn try_acquire_within(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.acquire()).await.is_ok()
    }

    pub fn release(&self) {
        self.grant(1);
    }

    /// Adds exactly `n` permits.
    pub fn grant(&self, n: usize) {
        if n == 0 {
            return;
        }
        let mut state = self.lock();
        state.available += n;
        state.dispatch();
    }

    /// Sets the available count to zero whatever it was. Returns how many
    /// permits were withdrawn.
    pub fn drain(&self) -> usize {
        self.set_available(0)
    }

    /// Replaces the available count in one critical section, so observers
    /// never see an intermediate empty gate. Returns the previous count.
    pub fn set_available(&self, n: usize) -> usize {
        let mut state = self.lock();
        let previous = state.available;
        state.available = n;
        state.dispatch();
        previous
    }
}

impl std::fmt::Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Gate")
            .field("name", &self.name)
            .field("available", &state.available)
            .field("queued", &state.waiters.len())
            .finish()
    }
}

struct PendingAcquire<'a> {
    gate: &'a Gate,
    rx: oneshot::Receiver<()>,
    settled: bool,
}

impl Drop for PendingAcquire<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        self.rx.close();
        if self.rx.try_recv().is_ok() {
            // Handed a permit we will never use.
            self.gate.release();
        } else {
            self.gate.lock().waiters.retain(|waiter| !waiter.is_closed());
        }
    }
}
