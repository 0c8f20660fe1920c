// driver.rs - Timer loop that steps a session while it is running

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

use crate::config::{Dimensions, Speed};
use crate::error::{GridError, SessionError};
use crate::session::{Change, Session, Snapshot, SubscriptionId};

/// Owns a session and the one repeating timer that steps it.
///
/// The timer is a task on the given tokio runtime. It is torn down on
/// stop, reset, speed change (then re-armed) and drop. Each tick checks
/// the session epoch under the lock, so once `stop` returns no further
/// step can land even if the aborted task is still being polled.
pub struct Driver {
    session: Arc<Mutex<Session>>,
    runtime: Handle,
    ticker: Option<JoinHandle<()>>,
}

impl Driver {
    pub fn new(session: Session, runtime: Handle) -> Self {
        let mut driver = Self {
            session: Arc::new(Mutex::new(session)),
            runtime,
            ticker: None,
        };
        if driver.is_running() {
            driver.arm();
        }
        driver
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_running()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.lock().dimensions()
    }

    pub fn subscribe(&self, observer: impl FnMut(Change, &Snapshot) + Send + 'static) -> SubscriptionId {
        self.lock().subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().unsubscribe(id)
    }

    pub fn start(&mut self) {
        {
            let mut session = self.lock();
            if session.is_running() {
                return;
            }
            session.set_running(true);
        }
        self.arm();
    }

    pub fn stop(&mut self) {
        self.lock().set_running(false);
        self.disarm();
    }

    pub fn toggle_running(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Stops the timer and clears the grid.
    pub fn reset(&mut self) {
        self.lock().reset();
        self.disarm();
    }

    /// New period takes effect from now; a running timer is replaced.
    pub fn set_speed(&mut self, speed: Speed) {
        let rearm = {
            let mut session = self.lock();
            let changed = session.speed() != speed;
            session.set_speed(speed);
            changed && session.is_running()
        };
        if rearm {
            self.arm();
        }
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        self.lock().toggle_cell(row, col)
    }

    pub fn resize(&mut self, dimensions: Dimensions) -> Result<(), SessionError> {
        self.lock().resize(dimensions)
    }

    /// Replaces any live timer with one bound to the current epoch.
    fn arm(&mut self) {
        self.disarm();
        let (epoch, period) = {
            let session = self.lock();
            (session.epoch(), session.speed().period())
        };
        let session = Arc::clone(&self.session);
        self.ticker = Some(self.runtime.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let stepped = {
                    let mut session = lock(&session);
                    if session.accepts_tick(epoch) {
                        session.advance();
                        trace!(generation = session.generation(), "tick");
                        true
                    } else {
                        false
                    }
                };
                if !stepped {
                    trace!(epoch, "stale timer exiting");
                    break;
                }
            }
        }));
    }

    fn disarm(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        lock(&self.session)
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        // Invalidate the epoch first so an in-flight poll cannot step again.
        self.lock().set_running(false);
        self.disarm();
    }
}

/// A panicking observer cannot leave the session half-updated: every
/// mutation completes before observers run.
fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
