//! Error types for survey planning.

use thiserror::Error;

/// Errors raised while validating survey input.
///
/// All of them are reported before the sweep starts; a well-formed plot and
/// tree list always yields a [`SurveyPlan`](crate::SurveyPlan).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Width or length outside `1..=MAX_PLOT_DIMENSION`.
    #[error("invalid estate size {width}x{length} (each side must be 1..=50000)")]
    InvalidPlot { width: i64, length: i64 },

    /// Budget input that is not an integer.
    #[error("invalid max distance {0:?}")]
    InvalidBudget(String),

    /// Two tree records share a grid cell.
    #[error("duplicate tree at ({x}, {y})")]
    DuplicatePosition { x: u32, y: u32 },

    /// Tree placed outside `[1, length] x [1, width]`.
    #[error("tree at ({x}, {y}) lies outside a {width}x{length} estate")]
    TreeOutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        length: u32,
    },

    /// Tree height outside `1..=MAX_TREE_HEIGHT`.
    #[error("invalid tree height {0} (must be 1..=30)")]
    InvalidHeight(i64),
}
