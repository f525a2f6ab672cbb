//! Core data models for estate surveys.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Largest accepted width or length of an estate, in cells.
pub const MAX_PLOT_DIMENSION: u32 = 50_000;

/// Tallest tree the service accepts.
pub const MAX_TREE_HEIGHT: u32 = 30;

/// Rectangular plot dimensions.
///
/// `width` is the row count (`y` in `1..=width`), `length` the column
/// count (`x` in `1..=length`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plot {
    pub width: u32,
    pub length: u32,
}

impl Plot {
    /// Build a plot from raw (possibly negative) request values.
    pub fn new(width: i64, length: i64) -> Result<Self, CoreError> {
        let in_range = |side: i64| (1..=i64::from(MAX_PLOT_DIMENSION)).contains(&side);
        if !in_range(width) || !in_range(length) {
            return Err(CoreError::InvalidPlot { width, length });
        }
        Ok(Self {
            width: width as u32,
            length: length as u32,
        })
    }

    /// Re-check the bounds of a plot built by struct literal.
    pub fn validate(&self) -> Result<(), CoreError> {
        Self::new(i64::from(self.width), i64::from(self.length)).map(|_| ())
    }

    pub fn contains(&self, position: Position) -> bool {
        (1..=self.length).contains(&position.x) && (1..=self.width).contains(&position.y)
    }
}

/// A 1-based grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    /// Takeoff cell of every sweep.
    pub const ORIGIN: Position = Position { x: 1, y: 1 };

    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A planted tree as supplied by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRecord {
    pub x: u32,
    pub y: u32,
    pub height: u32,
}

impl TreeRecord {
    pub const fn new(x: u32, y: u32, height: u32) -> Self {
        Self { x, y, height }
    }

    /// Validate raw request values for a new tree on `plot`.
    pub fn placed_in(plot: &Plot, x: i64, y: i64, height: i64) -> Result<Self, CoreError> {
        let inside = (1..=i64::from(plot.length)).contains(&x)
            && (1..=i64::from(plot.width)).contains(&y);
        if !inside {
            return Err(CoreError::TreeOutOfBounds {
                x,
                y,
                width: plot.width,
                length: plot.length,
            });
        }
        if !(1..=i64::from(MAX_TREE_HEIGHT)).contains(&height) {
            return Err(CoreError::InvalidHeight(height));
        }
        Ok(Self::new(x as u32, y as u32, height as u32))
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Outcome of a survey plan computation.
///
/// Serializes as `{"distance": n}` for a full sweep and
/// `{"distance": budget, "rest": {"x": .., "y": ..}}` when the budget ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SurveyPlan {
    /// Budget exceeded; `stopped_at` is the cell being processed at that time.
    Truncated {
        #[serde(rename = "distance")]
        budget: u64,
        #[serde(rename = "rest")]
        stopped_at: Position,
    },
    /// The whole plot was swept.
    Full {
        #[serde(rename = "distance")]
        total_distance: u64,
    },
}

impl SurveyPlan {
    /// Distance reported to the caller (the budget for truncated plans).
    pub fn distance(&self) -> u64 {
        match self {
            SurveyPlan::Truncated { budget, .. } => *budget,
            SurveyPlan::Full { total_distance } => *total_distance,
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, SurveyPlan::Truncated { .. })
    }
}
