//! Stop signalling for graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use parking_lot::Mutex;

/// One-shot stop signal shared between an owner and its worker threads.
///
/// Nothing is ever sent on the channel. Triggering drops the only sender, so
/// every receiver observes disconnection at once, including threads parked
/// in [`StopSignal::wait_timeout`].
#[derive(Debug)]
pub struct StopSignal {
    tx: Mutex<Option<Sender<()>>>,
    rx: Receiver<()>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(0);
        Self {
            tx: Mutex::new(Some(tx)),
            rx,
        }
    }

    /// Request stop. Idempotent.
    pub fn trigger(&self) {
        self.tx.lock().take();
    }

    pub fn is_triggered(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Sleep for up to `timeout`, waking early on stop.
    ///
    /// Returns `true` if the signal has been triggered.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        if timeout.is_zero() {
            return self.is_triggered();
        }
        match self.rx.recv_timeout(timeout) {
            Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) | Ok(()) => false,
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Set up a Ctrl-C handler that triggers `stop`.
///
/// # Example
/// ```ignore
/// let stop = Arc::new(StopSignal::new());
/// setup_ctrl_c_handler(Arc::clone(&stop))?;
/// while !stop.wait_timeout(Duration::from_secs(1)) {
///     // ... do work ...
/// }
/// ```
pub fn setup_ctrl_c_handler(stop: Arc<StopSignal>) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        stop.trigger();
    })
}
