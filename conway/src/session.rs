// session.rs - Owned simulation state and change notifications

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{Dimensions, SimulationConfig, Speed};
use crate::error::{GridError, SessionError};
use crate::grid::Grid;
use crate::rules;

/// What just happened to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Stepped,
    CellToggled { row: usize, col: usize },
    Reset,
    Started,
    Stopped,
    SpeedChanged,
    Resized,
}

/// Consistent view of a session at one point in time.
///
/// The grid is shared, so holding a snapshot never blocks the next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Arc<Grid>,
    pub generation: u64,
    pub running: bool,
    pub speed: Speed,
}

/// Callback run after every change. Runs while the session is borrowed,
/// so it must not reach back into the session or its driver.
pub type Observer = Box<dyn FnMut(Change, &Snapshot) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Grid, generation counter, run flag and speed in one place.
pub struct Session {
    grid: Arc<Grid>,
    generation: u64,
    running: bool,
    speed: Speed,
    dimensions: Dimensions,
    /// Bumped whenever a running timer must be discarded.
    epoch: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl Session {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            grid: Arc::new(Grid::empty(config.dimensions)),
            generation: 0,
            running: false,
            speed: config.speed,
            dimensions: config.dimensions,
            epoch: 0,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: Arc::clone(&self.grid),
            generation: self.generation,
            running: self.running,
            speed: self.speed,
        }
    }

    /// Manual edit: flips one cell and restarts the generation count.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        self.grid = Arc::new(self.grid.toggled(row, col)?);
        self.generation = 0;
        debug!(row, col, "cell toggled");
        self.notify(Change::CellToggled { row, col });
        Ok(())
    }

    /// One generation forward.
    pub fn advance(&mut self) {
        self.grid = Arc::new(rules::step(&self.grid));
        self.generation += 1;
        self.notify(Change::Stepped);
    }

    /// Back to an empty, stopped grid of the configured size.
    pub fn reset(&mut self) {
        self.grid = Arc::new(Grid::empty(self.dimensions));
        self.generation = 0;
        self.running = false;
        self.epoch += 1;
        info!(dimensions = %self.dimensions, "grid reset");
        self.notify(Change::Reset);
    }

    /// Only the driver flips this, so a running session always has a timer.
    pub(crate) fn set_running(&mut self, running: bool) {
        if self.running == running {
            return;
        }
        self.running = running;
        self.epoch += 1;
        info!(generation = self.generation, speed = %self.speed, running, "run state changed");
        self.notify(if running { Change::Started } else { Change::Stopped });
    }

    pub fn set_speed(&mut self, speed: Speed) {
        if self.speed == speed {
            return;
        }
        self.speed = speed;
        self.epoch += 1;
        debug!(%speed, "speed changed");
        self.notify(Change::SpeedChanged);
    }

    /// Replaces the grid with an empty one of a new size. Not allowed
    /// while running; there is no policy for carrying cells over.
    pub fn resize(&mut self, dimensions: Dimensions) -> Result<(), SessionError> {
        if self.running {
            return Err(SessionError::ResizeWhileRunning);
        }
        self.dimensions = dimensions;
        self.grid = Arc::new(Grid::empty(dimensions));
        self.generation = 0;
        info!(%dimensions, "grid resized");
        self.notify(Change::Resized);
        Ok(())
    }

    pub fn subscribe(&mut self, observer: impl FnMut(Change, &Snapshot) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True if a timer armed at `epoch` may still step this session.
    pub(crate) fn accepts_tick(&self, epoch: u64) -> bool {
        self.running && self.epoch == epoch
    }

    fn notify(&mut self, change: Change) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, observer) in &mut self.observers {
            observer(change, &snapshot);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("dimensions", &self.dimensions)
            .field("generation", &self.generation)
            .field("running", &self.running)
            .field("speed", &self.speed)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn small() -> Session {
        Session::new(SimulationConfig::new(5, 5, 50).unwrap())
    }

    #[test]
    fn new_session_is_stopped_and_empty() {
        let session = Session::default();
        assert!(!session.is_running());
        assert_eq!(session.generation(), 0);
        assert_eq!(session.grid().population(), 0);
        assert_eq!(session.grid().dimensions(), Dimensions::default());
    }

    #[test]
    fn advance_counts_generations() {
        let mut session = small();
        session.toggle_cell(2, 1).unwrap();
        session.toggle_cell(2, 2).unwrap();
        session.toggle_cell(2, 3).unwrap();

        for expected in 1..=4 {
            session.advance();
            assert_eq!(session.generation(), expected);
        }
        // Blinker is back to horizontal after an even number of steps.
        assert!(session.grid().is_alive(2, 1));
        assert!(!session.grid().is_alive(1, 2));
    }

    #[test]
    fn toggle_resets_generation() {
        let mut session = small();
        session.advance();
        session.advance();
        assert_eq!(session.generation(), 2);

        session.toggle_cell(0, 0).unwrap();
        assert_eq!(session.generation(), 0);
        assert!(session.grid().is_alive(0, 0));
    }

    #[test]
    fn failed_toggle_leaves_state_alone() {
        let mut session = small();
        session.advance();
        assert!(session.toggle_cell(9, 0).is_err());
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn reset_restores_empty_stopped_grid() {
        let mut session = small();
        session.toggle_cell(1, 1).unwrap();
        session.set_running(true);
        session.advance();

        session.reset();
        assert!(!session.is_running());
        assert_eq!(session.generation(), 0);
        assert_eq!(**session.grid(), Grid::empty(Dimensions::new(5, 5).unwrap()));
    }

    #[test]
    fn resize_requires_a_stopped_session() {
        let mut session = small();
        let bigger = Dimensions::new(8, 12).unwrap();

        session.set_running(true);
        assert_eq!(session.resize(bigger), Err(SessionError::ResizeWhileRunning));
        assert_eq!(session.dimensions().rows(), 5);

        session.set_running(false);
        session.toggle_cell(0, 0).unwrap();
        session.advance();
        session.resize(bigger).unwrap();
        assert_eq!(session.grid().dimensions(), bigger);
        assert_eq!(session.grid().population(), 0);
        assert_eq!(session.generation(), 0);

        // Reset keeps the new size.
        session.reset();
        assert_eq!(session.grid().dimensions(), bigger);
    }

    #[test]
    fn epoch_moves_on_run_and_speed_changes() {
        let mut session = small();
        session.set_running(true);
        let armed = session.epoch();
        assert!(session.accepts_tick(armed));

        session.set_speed(Speed::from_millis(10).unwrap());
        assert!(!session.accepts_tick(armed));
        assert!(session.accepts_tick(session.epoch()));

        let armed = session.epoch();
        session.set_running(false);
        assert!(!session.accepts_tick(armed));
        assert!(!session.accepts_tick(session.epoch()));
    }

    #[test]
    fn observers_see_every_change() {
        let seen = std::sync::Arc::new(Mutex::new(Vec::new()));
        let mut session = small();
        let sink = std::sync::Arc::clone(&seen);
        let id = session.subscribe(move |change, snapshot| {
            sink.lock().unwrap().push((change, snapshot.generation));
        });

        session.toggle_cell(0, 0).unwrap();
        session.set_running(true);
        session.advance();
        session.set_speed(Speed::from_millis(20).unwrap());
        session.set_speed(Speed::from_millis(20).unwrap());
        session.reset();

        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.advance();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (Change::CellToggled { row: 0, col: 0 }, 0),
                (Change::Started, 0),
                (Change::Stepped, 1),
                (Change::SpeedChanged, 1),
                (Change::Reset, 0),
            ]
        );
    }

    #[test]
    fn snapshot_grid_outlives_later_steps() {
        let mut session = small();
        session.toggle_cell(2, 2).unwrap();
        let before = session.snapshot();
        session.advance();

        assert_eq!(before.grid.population(), 1);
        assert_eq!(session.grid().population(), 0);
    }
}
