use std::time::Duration;

use tokio::sync::watch;

/// Cooperative cancellation for one run of the simulation.
///
/// Each `start()` creates a fresh pair, so tasks left over from an earlier
/// run can never observe the next run as live. Dropping the [`StopHandle`]
/// counts as a stop request.
#[derive(Debug)]
pub struct StopHandle {
    tx: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

pub fn stop_pair() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx }, StopSignal { rx })
}

impl StopHandle {
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    pub fn signal(&self) -> StopSignal {
        StopSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl StopSignal {
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once a stop has been requested.
    pub async fn stopped(&mut self) {
        // Err means the handle is gone, which is also a stop.
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }

    /// Sleeps for `duration` unless stopped first. Returns `true` when the
    /// full duration elapsed.
    pub async fn sleep(&mut self, duration: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(duration) => !self.is_stopped(),
            _ = self.stopped() => false,
        }
    }
}
