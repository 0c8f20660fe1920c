//! Conway's Game of Life on a bounded grid.
//!
//! [`grid`] and [`rules`] are pure; [`session`] owns the mutable state and
//! notifies observers; [`driver`] steps a session on a tokio timer.

pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod rules;
pub mod session;

pub use config::{Dimensions, SimulationConfig, Speed};
pub use driver::Driver;
pub use error::{ConfigError, GridError, SessionError};
pub use grid::{Cell, Grid};
pub use rules::{count_alive_neighbors, step};
pub use session::{Change, Observer, Session, Snapshot, SubscriptionId};
