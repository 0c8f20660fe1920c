// config.rs - Grid size and speed configuration

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Grid size in cells. Both sides are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

impl Dimensions {
    pub const DEFAULT_ROWS: usize = 30;
    pub const DEFAULT_COLS: usize = 50;

    /// Validates raw values from a numeric input. Zero or negative on
    /// either side is rejected, and so is any size whose cell count does
    /// not fit in memory indexing.
    pub fn new(rows: i64, cols: i64) -> Result<Self, ConfigError> {
        if rows <= 0 || cols <= 0 {
            return Err(ConfigError::NonPositiveDimension { rows, cols });
        }
        let too_large = ConfigError::DimensionsTooLarge { rows, cols };
        let (Ok(r), Ok(c)) = (usize::try_from(rows), usize::try_from(cols)) else {
            return Err(too_large);
        };
        match r.checked_mul(c) {
            Some(area) if area <= isize::MAX as usize => Ok(Self { rows: r, cols: c }),
            _ => Err(too_large),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    /// Crate-internal constructor for sizes already known to be non-zero.
    pub(crate) fn from_usize(rows: usize, cols: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        Self { rows, cols }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            rows: Self::DEFAULT_ROWS,
            cols: Self::DEFAULT_COLS,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Interval between two generations while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed {
    millis: u64,
}

impl Speed {
    pub const DEFAULT_MILLIS: u64 = 100;
    pub const MIN_MILLIS: u64 = 1;

    pub fn from_millis(millis: i64) -> Result<Self, ConfigError> {
        if millis <= 0 {
            return Err(ConfigError::NonPositiveSpeed(millis));
        }
        Ok(Self {
            millis: millis as u64,
        })
    }

    /// Clamp used by input widgets before handing a value to the driver.
    pub fn clamped(millis: i64) -> Self {
        Self {
            millis: millis.max(Self::MIN_MILLIS as i64) as u64,
        }
    }

    pub fn millis(&self) -> u64 {
        self.millis
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.millis)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self {
            millis: Self::DEFAULT_MILLIS,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}

/// Everything needed to start a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationConfig {
    pub dimensions: Dimensions,
    pub speed: Speed,
}

impl SimulationConfig {
    pub fn new(rows: i64, cols: i64, speed_millis: i64) -> Result<Self, ConfigError> {
        Ok(Self {
            dimensions: Dimensions::new(rows, cols)?,
            speed: Speed::from_millis(speed_millis)?,
        })
    }
}
